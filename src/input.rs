use crate::constants::{
    CHANNEL_BUTTON_PREFIX, CHANNEL_PREFIX, LAYER_BUTTON_PREFIX, LAYER_PREFIX, PARTICLES_PREFIX,
};
use effigy_core::{ChannelId, Intent, LayerId};
use glam::Vec2;

// ---------------- Pointer helpers ----------------
/// Pointer position relative to an element's top-left corner (CSS px).
#[inline]
pub fn local_point(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}

// ---------------- Keyboard ----------------
#[inline]
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "1" => Some(Intent::ToggleLayer(LayerId::Outer)),
        "2" => Some(Intent::ToggleLayer(LayerId::Inner)),
        "3" => Some(Intent::ToggleLayer(LayerId::Base)),
        "w" | "W" => Some(Intent::ToggleChannel(ChannelId::Water)),
        "f" | "F" => Some(Intent::ToggleChannel(ChannelId::Fire)),
        "e" | "E" => Some(Intent::ToggleChannel(ChannelId::Earth)),
        "a" | "A" => Some(Intent::ToggleChannel(ChannelId::Air)),
        "d" | "D" => Some(Intent::TriggerSequence),
        "p" | "P" => Some(Intent::TriggerPain),
        "k" | "K" => Some(Intent::TriggerDeath),
        "r" | "R" => Some(Intent::Respawn),
        "Escape" => Some(Intent::ResetAll),
        _ => None,
    }
}

/// Slider text to an intensity value. Out-of-range input is clamped.
pub fn parse_intensity(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
}

// ---------------- Element ids ----------------
pub fn layer_element_id(id: LayerId) -> String {
    format!("{}{}", LAYER_PREFIX, id.name())
}

pub fn layer_button_id(id: LayerId) -> String {
    format!("{}{}", LAYER_BUTTON_PREFIX, id.name())
}

pub fn channel_element_id(id: ChannelId) -> String {
    format!("{}{}", CHANNEL_PREFIX, id.name())
}

pub fn channel_button_id(id: ChannelId) -> String {
    format!("{}{}", CHANNEL_BUTTON_PREFIX, id.name())
}

pub fn particles_element_id(id: ChannelId) -> String {
    format!("{}{}", PARTICLES_PREFIX, id.name())
}
