// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`navigation`]: The navigation & preload sequencer
//! - [`fullscreen`]: Fullscreen toggling on top of a capability port
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives application services and executes the
//!   commands they return
//!
//! # Example
//!
//! ```ignore
//! use iced_lightbox::application::navigation::Sequencer;
//! use iced_lightbox::media::PreloadCache;
//!
//! let mut cache = PreloadCache::with_defaults();
//! let mut sequencer = Sequencer::new(sources, 0, Lookahead::default())?;
//! for command in sequencer.mount(&mut cache) {
//!     // run fetches and timers
//! }
//! ```

pub mod fullscreen;
pub mod navigation;
pub mod port;
