// SPDX-License-Identifier: MPL-2.0
//! Fullscreen toggling on top of [`FullscreenCapability`].

use crate::application::port::FullscreenCapability;
use tracing::debug;

/// Asks the environment to flip its fullscreen state.
///
/// Returns `None` when fullscreen is unavailable; the request is then a silent
/// no-op. The capability's observed state is not flipped here: it only changes
/// once the environment reports the new mode.
pub fn toggle<C: FullscreenCapability>(capability: &mut C) -> Option<C::Request> {
    if !capability.is_available() {
        debug!("fullscreen unavailable, ignoring toggle");
        return None;
    }
    if capability.is_active() {
        capability.exit()
    } else {
        capability.enter()
    }
}
