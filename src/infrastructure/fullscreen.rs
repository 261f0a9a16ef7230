// SPDX-License-Identifier: MPL-2.0
//! Adapters implementing the [`FullscreenCapability`] port.
//!
//! [`WindowFullscreen`] drives a real Iced window. Its `is_active` state is
//! only ever updated from the window mode reported back by the runtime, so a
//! refused request never flips it. [`HeadlessFullscreen`] is a scripted stand-in
//! for tests and environments without a window.

use crate::application::port::FullscreenCapability;
use iced::{window, Task};

/// Fullscreen control of the window hosting the viewer.
///
/// `M` is the message type produced when the actual window mode has been
/// read back.
#[derive(Debug, Clone)]
pub struct WindowFullscreen<M> {
    window: Option<window::Id>,
    active: bool,
    on_observed: fn(bool) -> M,
}

impl<M: Send + 'static> WindowFullscreen<M> {
    #[must_use]
    pub fn new(on_observed: fn(bool) -> M) -> Self {
        Self {
            window: None,
            active: false,
            on_observed,
        }
    }

    /// Binds the adapter to a window. Returns `true` if the window changed.
    pub fn set_window(&mut self, window: window::Id) -> bool {
        if self.window == Some(window) {
            return false;
        }
        self.window = Some(window);
        true
    }

    #[must_use]
    pub fn window(&self) -> Option<window::Id> {
        self.window
    }

    /// Records the mode the runtime reported.
    pub fn observe(&mut self, fullscreen: bool) {
        self.active = fullscreen;
    }

    /// Reads the current window mode back.
    #[must_use]
    pub fn query(&self) -> Task<M> {
        match self.window {
            Some(id) => Self::read_mode(id, self.on_observed),
            None => Task::none(),
        }
    }

    fn read_mode(id: window::Id, on_observed: fn(bool) -> M) -> Task<M> {
        window::mode(id).map(move |mode| on_observed(mode == window::Mode::Fullscreen))
    }

    fn request(&self, mode: window::Mode) -> Option<Task<M>> {
        let id = self.window?;
        Some(window::set_mode(id, mode).chain(Self::read_mode(id, self.on_observed)))
    }
}

impl<M: Send + 'static> FullscreenCapability for WindowFullscreen<M> {
    type Request = Task<M>;

    fn is_available(&self) -> bool {
        self.window.is_some()
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn enter(&mut self) -> Option<Task<M>> {
        self.request(window::Mode::Fullscreen)
    }

    fn exit(&mut self) -> Option<Task<M>> {
        self.request(window::Mode::Windowed)
    }
}

/// What a [`HeadlessFullscreen`] did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessOutcome {
    Entered,
    Exited,
    Refused,
}

/// Fullscreen capability without a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessFullscreen {
    available: bool,
    accepts: bool,
    active: bool,
}

impl Default for HeadlessFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessFullscreen {
    /// Available and honouring every request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: true,
            accepts: true,
            active: false,
        }
    }

    /// Reports fullscreen as unsupported.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            accepts: false,
            active: false,
        }
    }

    /// Available, but every request is refused.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            available: true,
            accepts: false,
            active: false,
        }
    }

    fn apply(&mut self, desired: bool) -> HeadlessOutcome {
        if !self.accepts {
            return HeadlessOutcome::Refused;
        }
        self.active = desired;
        if desired {
            HeadlessOutcome::Entered
        } else {
            HeadlessOutcome::Exited
        }
    }
}

impl FullscreenCapability for HeadlessFullscreen {
    type Request = HeadlessOutcome;

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn enter(&mut self) -> Option<HeadlessOutcome> {
        Some(self.apply(true))
    }

    fn exit(&mut self) -> Option<HeadlessOutcome> {
        Some(self.apply(false))
    }
}
