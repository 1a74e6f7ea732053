// Host-side tests for keyboard bindings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use effigy_core::{ChannelId, Intent, LayerId};
use input::intent_for_key;

#[test]
fn digit_keys_toggle_layers() {
    assert_eq!(intent_for_key("1"), Some(Intent::ToggleLayer(LayerId::Outer)));
    assert_eq!(intent_for_key("2"), Some(Intent::ToggleLayer(LayerId::Inner)));
    assert_eq!(intent_for_key("3"), Some(Intent::ToggleLayer(LayerId::Base)));
    assert_eq!(intent_for_key("4"), None);
}

#[test]
fn element_keys_toggle_channels_in_either_case() {
    for (key, id) in [
        ("w", ChannelId::Water),
        ("f", ChannelId::Fire),
        ("e", ChannelId::Earth),
        ("a", ChannelId::Air),
    ] {
        assert_eq!(intent_for_key(key), Some(Intent::ToggleChannel(id)));
        assert_eq!(
            intent_for_key(&key.to_uppercase()),
            Some(Intent::ToggleChannel(id))
        );
    }
}

#[test]
fn action_keys() {
    assert_eq!(intent_for_key("d"), Some(Intent::TriggerSequence));
    assert_eq!(intent_for_key("p"), Some(Intent::TriggerPain));
    assert_eq!(intent_for_key("K"), Some(Intent::TriggerDeath));
    assert_eq!(intent_for_key("r"), Some(Intent::Respawn));
    assert_eq!(intent_for_key("Escape"), Some(Intent::ResetAll));
}

#[test]
fn unbound_keys_map_to_nothing() {
    for key in ["", " ", "Enter", "Shift", "x", "escape", "ww"] {
        assert_eq!(intent_for_key(key), None, "key {key:?}");
    }
}
