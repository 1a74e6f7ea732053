use crate::view;
use effigy_core::Session;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub document: web::Document,
    pub last_instant: Instant,
    pub last_revision: Option<u64>,
}

impl FrameContext {
    pub fn new(session: Rc<RefCell<Session>>, document: web::Document) -> Self {
        Self {
            session,
            document,
            last_instant: Instant::now(),
            last_revision: None,
        }
    }

    /// Advance the session by the wall-clock time since the last frame and
    /// re-render when its state moved.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let snapshot = {
            let mut session = self.session.borrow_mut();
            session.advance(dt);
            if self.last_revision == Some(session.revision()) {
                return;
            }
            self.last_revision = Some(session.revision());
            session.snapshot()
        };
        view::render(&self.document, &snapshot);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
