use crate::input;
use effigy_core::Session;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Turn presses on the figure into pointer intents.
pub fn wire_figure_pointer(figure: &web::Element, session: &Rc<RefCell<Session>>) {
    let session = session.clone();
    let target = figure.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = target.get_bounding_client_rect();
        let point = input::local_point(
            Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
        );
        let bounds = Vec2::new(rect.width() as f32, rect.height() as f32);
        if let Some(kind) = session.borrow_mut().pointer(point, bounds) {
            log::info!(
                "[pointer] {} at ({:.0},{:.0}) in {:.0}x{:.0}",
                kind.name(),
                point.x,
                point.y,
                bounds.x,
                bounds.y
            );
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = figure.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}
