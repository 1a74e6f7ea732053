#![cfg(target_arch = "wasm32")]
use crate::constants::FIGURE_ID;
use effigy_core::{Session, SessionConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod view;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("effigy-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let figure = document
        .get_element_by_id(FIGURE_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", FIGURE_ID))?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let session = Session::new(SessionConfig::default().with_seed(seed))?;
    let session = Rc::new(RefCell::new(session));

    events::wire_controls(&document, &session);
    events::pointer::wire_figure_pointer(&figure, &session);
    events::keyboard::wire_global_keydown(&session);

    // Scheduler clock + renderer driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(session, document)));
    frame::start_loop(frame_ctx);
    Ok(())
}
