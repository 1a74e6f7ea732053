// Host-side tests for layer visibility and the two-phase hide.

use effigy_core::constants::HIDE_COMMIT_DELAY;
use effigy_core::layers::LayerController;
use effigy_core::task::Task;
use effigy_core::{LayerId, LayerPhase, LayerToggle, Scheduler};
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

struct Harness {
    layers: LayerController,
    scheduler: Scheduler<Task>,
}

impl Harness {
    fn new() -> Self {
        Self {
            layers: LayerController::new(HIDE_COMMIT_DELAY),
            scheduler: Scheduler::new(),
        }
    }

    fn toggle(&mut self, id: LayerId) -> LayerToggle {
        self.layers.toggle(id, &mut self.scheduler)
    }

    fn run_to(&mut self, until: Duration) {
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            if let Task::CommitHide { layer, generation } = task {
                self.layers.commit_hide(layer, generation);
            }
        }
        self.scheduler.settle(until);
    }

    fn phase(&self, id: LayerId) -> LayerPhase {
        self.layers.layer(id).phase()
    }
}

#[test]
fn layers_start_shown() {
    let h = Harness::new();
    for layer in h.layers.layers() {
        assert!(layer.visible());
        assert!(!layer.removing());
    }
}

#[test]
fn hide_passes_through_removing_before_committing() {
    let mut h = Harness::new();
    assert_eq!(h.toggle(LayerId::Outer), LayerToggle::HideStarted);
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Removing);
    assert!(h.layers.layer(LayerId::Outer).visible());
    h.run_to(ms(499));
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Removing);
    h.run_to(ms(500));
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Hidden);
}

#[test]
fn show_is_immediate_and_arms_nothing() {
    let mut h = Harness::new();
    h.toggle(LayerId::Inner);
    h.run_to(ms(600));
    assert_eq!(h.toggle(LayerId::Inner), LayerToggle::Shown);
    assert_eq!(h.phase(LayerId::Inner), LayerPhase::Shown);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn toggling_back_inside_the_window_never_hides() {
    let mut h = Harness::new();
    h.toggle(LayerId::Outer);
    h.run_to(ms(200));
    assert_eq!(h.toggle(LayerId::Outer), LayerToggle::HideCancelled);
    for t in (200..=3_000).step_by(50) {
        h.run_to(ms(t));
        assert_eq!(h.phase(LayerId::Outer), LayerPhase::Shown, "at {t}ms");
    }
}

#[test]
fn stale_commit_is_ignored() {
    let mut h = Harness::new();
    h.toggle(LayerId::Base);
    // generations that never matched the pending commit
    assert!(!h.layers.commit_hide(LayerId::Base, 0));
    assert!(!h.layers.commit_hide(LayerId::Base, 999));
    assert_eq!(h.phase(LayerId::Base), LayerPhase::Removing);
}

#[test]
fn rehiding_restarts_the_commit_window() {
    let mut h = Harness::new();
    h.toggle(LayerId::Outer);
    h.run_to(ms(300));
    h.toggle(LayerId::Outer);
    h.toggle(LayerId::Outer);
    h.run_to(ms(700));
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Removing);
    h.run_to(ms(800));
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Hidden);
}

#[test]
fn layers_toggle_independently() {
    let mut h = Harness::new();
    h.toggle(LayerId::Outer);
    h.run_to(ms(1_000));
    assert_eq!(h.phase(LayerId::Outer), LayerPhase::Hidden);
    assert_eq!(h.phase(LayerId::Inner), LayerPhase::Shown);
    assert_eq!(h.phase(LayerId::Base), LayerPhase::Shown);
}

#[test]
fn removing_always_implies_visible() {
    let mut h = Harness::new();
    let pattern = [
        (LayerId::Outer, 0),
        (LayerId::Outer, 100),
        (LayerId::Inner, 150),
        (LayerId::Outer, 400),
        (LayerId::Inner, 900),
        (LayerId::Base, 950),
        (LayerId::Inner, 1_100),
        (LayerId::Base, 1_300),
    ];
    for (id, at) in pattern {
        h.run_to(ms(at));
        h.toggle(id);
        for layer in h.layers.layers() {
            assert!(!layer.removing() || layer.visible());
        }
    }
    h.run_to(ms(5_000));
    for layer in h.layers.layers() {
        assert!(!layer.removing());
    }
}

#[test]
fn reset_all_shows_everything_and_drops_pending_commits() {
    let mut h = Harness::new();
    h.toggle(LayerId::Outer);
    h.run_to(ms(600));
    h.toggle(LayerId::Inner);
    h.layers.reset_all(&mut h.scheduler);
    assert_eq!(h.scheduler.pending(), 0);
    h.run_to(ms(5_000));
    for id in LayerId::ALL {
        assert_eq!(h.phase(id), LayerPhase::Shown);
    }
}
