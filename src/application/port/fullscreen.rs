// SPDX-License-Identifier: MPL-2.0
//! Fullscreen capability port definition.
//!
//! The host environment decides whether fullscreen is possible and whether a
//! request is honoured. The viewer only reads [`is_active`] and asks for
//! changes; it never assumes a request succeeded.
//!
//! [`is_active`]: FullscreenCapability::is_active

/// Access to the host's fullscreen state.
///
/// `Request` is whatever the environment needs to carry out a change: an Iced
/// `Task` for a real window, a plain outcome for headless use.
pub trait FullscreenCapability {
    type Request;

    /// Whether the environment supports fullscreen at all.
    fn is_available(&self) -> bool;

    /// The last observed fullscreen state.
    fn is_active(&self) -> bool;

    /// Asks the environment to enter fullscreen.
    ///
    /// Returns `None` when there is nothing to do.
    fn enter(&mut self) -> Option<Self::Request>;

    /// Asks the environment to leave fullscreen.
    ///
    /// Returns `None` when there is nothing to do.
    fn exit(&mut self) -> Option<Self::Request>;
}
