//! Writes a session snapshot into the page. Display only: every decision
//! (what is visible, what is disabled) is read straight off the snapshot.

use crate::constants::*;
use crate::dom;
use crate::input;
use effigy_core::{ReactionKind, Snapshot};
use std::fmt::Write;
use web_sys as web;

pub fn render(document: &web::Document, snapshot: &Snapshot) {
    render_figure(document, snapshot);
    render_layers(document, snapshot);
    render_channels(document, snapshot);
    render_reactions(document, snapshot);
    render_readouts(document, snapshot);
}

fn render_figure(document: &web::Document, snapshot: &Snapshot) {
    let Some(figure) = document.get_element_by_id(FIGURE_ID) else {
        return;
    };
    dom::set_class(&figure, CLASS_DEAD, snapshot.subject.dead);
    dom::set_class(&figure, CLASS_PRESSED, snapshot.cues.press);
    dom::set_class(&figure, CLASS_PAIN, snapshot.cues.pain);
    dom::set_class(&figure, CLASS_DEATH_CUE, snapshot.cues.death);
    dom::set_class(&figure, CLASS_SUBMERGED, snapshot.run.running);
    _ = figure.set_attribute("data-stage", &snapshot.run.current_stage.to_string());
    _ = figure.set_attribute("data-intensity", &snapshot.intensity.to_string());
}

fn render_layers(document: &web::Document, snapshot: &Snapshot) {
    for layer in &snapshot.layers {
        if let Some(el) = document.get_element_by_id(&input::layer_element_id(layer.id)) {
            dom::set_class(&el, CLASS_HIDDEN, !layer.visible());
            dom::set_class(&el, CLASS_REMOVING, layer.removing());
        }
        dom::set_disabled(
            document,
            &input::layer_button_id(layer.id),
            snapshot.subject.dead,
        );
    }
}

fn render_channels(document: &web::Document, snapshot: &Snapshot) {
    for channel in &snapshot.channels {
        if let Some(el) = document.get_element_by_id(&input::channel_element_id(channel.id)) {
            dom::set_class(&el, CLASS_ACTIVE, channel.active);
        }
        dom::set_disabled(
            document,
            &input::channel_button_id(channel.id),
            snapshot.subject.dead,
        );
        if let Some(el) = document.get_element_by_id(&input::particles_element_id(channel.id)) {
            let mut html = String::new();
            for p in &channel.particles {
                _ = write!(
                    html,
                    "<span class='particle' style='left:{:.1}px;top:{:.1}px;width:{:.1}px;height:{:.1}px'></span>",
                    p.position.x, p.position.y, p.size, p.size
                );
            }
            el.set_inner_html(&html);
        }
    }
}

fn render_reactions(document: &web::Document, snapshot: &Snapshot) {
    let Some(el) = document.get_element_by_id(REACTIONS_ID) else {
        return;
    };
    let mut html = String::new();
    for r in &snapshot.reactions {
        _ = write!(
            html,
            "<span class='reaction reaction-{}' style='left:{:.0}px;top:{:.0}px'>{}</span>",
            r.kind.name(),
            r.position.x,
            r.position.y,
            reaction_glyph(r.kind)
        );
    }
    el.set_inner_html(&html);
}

fn render_readouts(document: &web::Document, snapshot: &Snapshot) {
    match &snapshot.stage {
        Some(stage) => {
            dom::set_text(
                document,
                STAGE_NAME_ID,
                &format!("Stage {}: {}", stage.index, stage.name),
            );
            dom::set_text(document, STAGE_DESCRIPTION_ID, &stage.description);
        }
        None => {
            dom::set_text(document, STAGE_NAME_ID, "");
            dom::set_text(document, STAGE_DESCRIPTION_ID, "");
        }
    }
    dom::set_text(
        document,
        PROGRESS_ID,
        &format!("{:.0}%", snapshot.run.progress * 100.0),
    );
    let status = if snapshot.subject.dead {
        "Dead"
    } else if snapshot.run.running {
        "Submerged"
    } else {
        "Alive"
    };
    dom::set_text(document, STATUS_ID, status);
    let dead = snapshot.subject.dead;
    let submerging = snapshot.submerging;
    dom::set_disabled(
        document,
        TRIGGER_BUTTON_ID,
        snapshot.run.running || snapshot.run.terminal || dead || submerging,
    );
    dom::set_text(
        document,
        TRIGGER_BUTTON_ID,
        if submerging {
            "Auto-Drowning Active"
        } else {
            "Drowning Sequence"
        },
    );
    dom::set_disabled(document, PAIN_BUTTON_ID, dead || snapshot.cues.pain);
    dom::set_disabled(document, DEATH_BUTTON_ID, dead || snapshot.cues.death);
    dom::set_disabled(document, INTENSITY_SLIDER_ID, dead);
}

#[inline]
fn reaction_glyph(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Primary => "\u{1F496}",
        ReactionKind::Secondary => "\u{1F60A}",
        ReactionKind::Alert => "\u{1F632}",
        ReactionKind::Tertiary => "\u{1F60C}",
    }
}
