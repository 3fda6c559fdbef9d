// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Deciding when a pick is done, from nothing but the polled left button.
//!
//! The overlay can't be trusted to receive the click itself (it may not have focus yet, and the
//! press that started the pick may still be in progress), so the global button state is polled
//! every tick instead.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// the button that started the pick is still held
    WaitingForRelease,
    /// ready for the press that picks
    Armed,
    /// picking press in progress, completes on release
    Pressed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickSession {
    phase: Phase,
}

impl PickSession {
    /// `left_down` is the button state when the pick starts.
    pub fn new(left_down: bool) -> Self {
        let phase = if left_down {
            Phase::WaitingForRelease
        } else {
            Phase::Armed
        };
        PickSession { phase }
    }

    /// Feed one poll of the button. Returns `true` once, when the picking click completes.
    pub fn on_pointer(&mut self, left_down: bool) -> bool {
        let (phase, complete) = match (self.phase, left_down) {
            (Phase::WaitingForRelease, false) => (Phase::Armed, false),
            (Phase::WaitingForRelease, true) => (Phase::WaitingForRelease, false),
            (Phase::Armed, true) => (Phase::Pressed, false),
            (Phase::Armed, false) => (Phase::Armed, false),
            (Phase::Pressed, true) => (Phase::Pressed, false),
            (Phase::Pressed, false) => (Phase::Armed, true),
        };
        self.phase = phase;
        complete
    }
}
