use crate::input;
use effigy_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, session: &Rc<RefCell<Session>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    if let Some(intent) = input::intent_for_key(&key) {
        let accepted = session.borrow_mut().apply(intent);
        log::info!("[keys] {} -> {}", intent, if accepted { "ok" } else { "ignored" });
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(session: &Rc<RefCell<Session>>) {
    if let Some(window) = web::window() {
        let session = session.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &session);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
