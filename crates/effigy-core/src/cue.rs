//! Short one-shot visual cues raised by intents and cleared by timers.

use crate::scheduler::{Scheduler, TimerHandle};
use crate::task::Task;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Brief squeeze after an accepted pointer press.
    Press,
    Pain,
    Death,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Press, Cue::Pain, Cue::Death];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Which cues are currently showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CueFlags {
    pub press: bool,
    pub pain: bool,
    pub death: bool,
}

impl CueFlags {
    pub fn get(&self, cue: Cue) -> bool {
        match cue {
            Cue::Press => self.press,
            Cue::Pain => self.pain,
            Cue::Death => self.death,
        }
    }

    fn set(&mut self, cue: Cue, on: bool) {
        match cue {
            Cue::Press => self.press = on,
            Cue::Pain => self.pain = on,
            Cue::Death => self.death = on,
        }
    }
}

#[derive(Debug, Default)]
pub struct Cues {
    flags: CueFlags,
    timers: [Option<TimerHandle>; 3],
}

impl Cues {
    #[inline]
    pub fn flags(&self) -> CueFlags {
        self.flags
    }

    /// Show `cue` for `hold`. Raising a cue that is already up restarts its
    /// window.
    pub fn raise(&mut self, cue: Cue, hold: Duration, scheduler: &mut Scheduler<Task>) {
        if let Some(handle) = self.timers[cue.slot()].take() {
            scheduler.cancel(handle);
        }
        self.flags.set(cue, true);
        self.timers[cue.slot()] = Some(scheduler.after(hold, Task::EndCue(cue)));
    }

    /// Timer callback. Returns true if the cue was showing.
    pub fn end(&mut self, cue: Cue) -> bool {
        self.timers[cue.slot()] = None;
        let was_up = self.flags.get(cue);
        self.flags.set(cue, false);
        was_up
    }

    pub fn clear(&mut self, scheduler: &mut Scheduler<Task>) {
        for handle in self.timers.iter_mut().filter_map(Option::take) {
            scheduler.cancel(handle);
        }
        self.flags = CueFlags::default();
    }
}
