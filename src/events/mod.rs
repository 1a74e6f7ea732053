pub mod keyboard;
pub mod pointer;

use crate::constants::{
    DEATH_BUTTON_ID, INTENSITY_SLIDER_ID, PAIN_BUTTON_ID, RESET_BUTTON_ID, RESPAWN_BUTTON_ID,
    TRIGGER_BUTTON_ID,
};
use crate::dom;
use crate::input;
use effigy_core::{ChannelId, Intent, LayerId, Session};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Wire every control button to the intent it stands for.
pub fn wire_controls(document: &web::Document, session: &Rc<RefCell<Session>>) {
    for id in LayerId::ALL {
        wire_intent_button(
            document,
            &input::layer_button_id(id),
            session,
            Intent::ToggleLayer(id),
        );
    }
    for id in ChannelId::ALL {
        wire_intent_button(
            document,
            &input::channel_button_id(id),
            session,
            Intent::ToggleChannel(id),
        );
    }
    wire_intent_button(document, TRIGGER_BUTTON_ID, session, Intent::TriggerSequence);
    wire_intent_button(document, PAIN_BUTTON_ID, session, Intent::TriggerPain);
    wire_intent_button(document, DEATH_BUTTON_ID, session, Intent::TriggerDeath);
    wire_intent_button(document, RESPAWN_BUTTON_ID, session, Intent::Respawn);
    wire_intent_button(document, RESET_BUTTON_ID, session, Intent::ResetAll);

    let session_slider = session.clone();
    dom::add_value_listener(document, INTENSITY_SLIDER_ID, move |value| {
        if let Some(v) = input::parse_intensity(&value) {
            session_slider.borrow_mut().set_intensity(v);
        }
    });
}

fn wire_intent_button(
    document: &web::Document,
    element_id: &str,
    session: &Rc<RefCell<Session>>,
    intent: Intent,
) {
    let session = session.clone();
    dom::add_click_listener(document, element_id, move || {
        let accepted = session.borrow_mut().apply(intent);
        log::info!("[click] {} -> {}", intent, if accepted { "ok" } else { "ignored" });
    });
}
