// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! Everything the lightbox needs to know about *what* it shows, independent of
//! how images are fetched or drawn.

mod background;
mod descriptor;
mod layout;
pub mod newtypes;
mod srcset;

pub use background::BackgroundColor;
pub use descriptor::{ImageDescriptor, SizeHint};
pub use layout::{Fit, LayoutMode, Viewport};
pub use newtypes::{Lookahead, LoadingGrace, MaxImageWidth};
pub use srcset::{CandidateDescriptor, SrcSet, SrcSetCandidate};

/// Direction of a single navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Signed index offset of one step in this direction.
    #[must_use]
    pub fn delta(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Clamps `current + delta` into `[0, len - 1]`.
///
/// Returns `None` for an empty list.
#[must_use]
pub fn clamp_index(current: usize, delta: isize, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let target = current.saturating_add_signed(delta);
    Some(target.min(last))
}
