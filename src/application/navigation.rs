// SPDX-License-Identifier: MPL-2.0
//! Navigation & preload sequencing for a gallery.
//!
//! The [`Sequencer`] owns the current index of one viewer and decides what has
//! to be fetched when the index changes. It never performs I/O itself: every
//! operation returns [`Command`]s that the presentation layer executes (as Iced
//! tasks) and reports back through [`Sequencer::on_fetched`] and
//! [`Sequencer::on_grace_elapsed`].
//!
//! Only the current display request is authoritative. Each navigation issues a
//! fresh [`LoadToken`]; completions and timers belonging to an older request
//! only populate the shared [`PreloadCache`].

use crate::domain::gallery::{clamp_index, Lookahead};
use crate::error::{Result, ValidationError};
use crate::media::{ImageData, PreloadCache};
use tracing::debug;

/// Identity of one display request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Work the caller must carry out on behalf of the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch `source` and report the result with [`Sequencer::on_fetched`].
    Fetch(String),
    /// Wait for the loading grace period, then call
    /// [`Sequencer::on_grace_elapsed`] with the token.
    StartGraceTimer(LoadToken),
}

/// State of the image currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStatus {
    /// Pixels are available.
    Ready,
    /// Waiting for the fetch. The indicator only shows once the grace period
    /// has elapsed.
    Pending { indicator_visible: bool },
    /// The fetch failed with the given message.
    Failed(String),
}

/// Outcome of a [`Sequencer::navigate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The target was clamped onto the current index.
    Unchanged,
    Moved {
        from: usize,
        to: usize,
        commands: Vec<Command>,
    },
}

/// Outcome of a fetch reported through [`Sequencer::on_fetched`].
#[derive(Debug, Clone)]
pub enum Completion {
    /// The fetched image is the one on display.
    Displayed(ImageData),
    /// The image on display could not be fetched.
    DisplayFailed(String),
    /// A preload or stale request finished; nothing changes on screen.
    Background,
}

/// Navigation state of one gallery viewer.
#[derive(Debug, Clone)]
pub struct Sequencer {
    sources: Vec<String>,
    index: usize,
    lookahead: Lookahead,
    token: LoadToken,
    next_token: u64,
    status: DisplayStatus,
}

impl Sequencer {
    /// Creates a sequencer over `sources`, starting at `start` (clamped).
    ///
    /// # Errors
    ///
    /// Returns a validation error when `sources` is empty.
    pub fn new(sources: Vec<String>, start: usize, lookahead: Lookahead) -> Result<Self> {
        if sources.is_empty() {
            return Err(ValidationError::new("images", "a non-empty Array", "[]").into());
        }
        let index = start.min(sources.len() - 1);

        Ok(Self {
            sources,
            index,
            lookahead,
            token: LoadToken(0),
            next_token: 1,
            status: DisplayStatus::Pending {
                indicator_visible: false,
            },
        })
    }

    /// Requests the start image and preloads its immediate neighbours.
    pub fn mount(&mut self, cache: &mut PreloadCache) -> Vec<Command> {
        let mut commands = Vec::new();
        self.display(cache, &mut commands);

        let neighbours = [
            clamp_index(self.index, -1, self.len()),
            clamp_index(self.index, 1, self.len()),
        ];
        for neighbour in neighbours.into_iter().flatten() {
            self.preload(neighbour, cache, &mut commands);
        }
        commands
    }

    /// Moves by `delta`, clamped to the list bounds.
    ///
    /// A clamped no-op changes nothing and issues no commands. Otherwise the
    /// index changes immediately, the target is requested and the images
    /// further along the same direction are preloaded.
    pub fn navigate(&mut self, delta: isize, cache: &mut PreloadCache) -> Navigation {
        let Some(target) = clamp_index(self.index, delta, self.len()) else {
            return Navigation::Unchanged;
        };
        if target == self.index {
            return Navigation::Unchanged;
        }

        let from = self.index;
        self.index = target;

        let mut commands = Vec::new();
        self.display(cache, &mut commands);

        let step = delta.signum();
        for distance in 1..=self.lookahead.value() {
            let offset = step.saturating_mul(isize::try_from(distance).unwrap_or(isize::MAX));
            if let Some(ahead) = clamp_index(target, offset, self.len()) {
                self.preload(ahead, cache, &mut commands);
            }
        }

        debug!(from, to = target, commands = commands.len(), "navigated");
        Navigation::Moved {
            from,
            to: target,
            commands,
        }
    }

    /// Records the result of a [`Command::Fetch`].
    pub fn on_fetched(
        &mut self,
        source: &str,
        result: std::result::Result<ImageData, String>,
        cache: &mut PreloadCache,
    ) -> Completion {
        let awaited = self.current_source() == source
            && matches!(self.status, DisplayStatus::Pending { .. });

        match result {
            Ok(image) => {
                cache.complete(source, image.clone());
                if awaited {
                    self.status = DisplayStatus::Ready;
                    Completion::Displayed(image)
                } else {
                    Completion::Background
                }
            }
            Err(message) => {
                cache.fail(source);
                if awaited {
                    self.status = DisplayStatus::Failed(message.clone());
                    Completion::DisplayFailed(message)
                } else {
                    debug!(source, %message, "background fetch failed");
                    Completion::Background
                }
            }
        }
    }

    /// Shows the loading indicator if `token` is still the current request and
    /// its image has not arrived yet. Returns whether the indicator turned on.
    pub fn on_grace_elapsed(&mut self, token: LoadToken) -> bool {
        if token != self.token {
            return false;
        }
        match &mut self.status {
            DisplayStatus::Pending { indicator_visible } if !*indicator_visible => {
                *indicator_visible = true;
                true
            }
            _ => false,
        }
    }

    fn display(&mut self, cache: &mut PreloadCache, commands: &mut Vec<Command>) {
        self.token = LoadToken(self.next_token);
        self.next_token += 1;

        let source = self.sources[self.index].clone();
        if cache.contains(&source) {
            self.status = DisplayStatus::Ready;
            return;
        }

        self.status = DisplayStatus::Pending {
            indicator_visible: false,
        };
        if cache.begin_fetch(&source) {
            commands.push(Command::Fetch(source));
        }
        commands.push(Command::StartGraceTimer(self.token));
    }

    fn preload(&self, index: usize, cache: &mut PreloadCache, commands: &mut Vec<Command>) {
        if index == self.index || !cache.is_enabled() {
            return;
        }
        let source = &self.sources[index];
        if source == self.current_source() {
            return;
        }
        if cache.begin_fetch(source) {
            commands.push(Command::Fetch(source.clone()));
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[must_use]
    pub fn current_source(&self) -> &str {
        &self.sources[self.index]
    }

    #[must_use]
    pub fn token(&self) -> LoadToken {
        self.token
    }

    #[must_use]
    pub fn status(&self) -> &DisplayStatus {
        &self.status
    }

    /// Whether the loading indicator should be visible.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            DisplayStatus::Pending {
                indicator_visible: true
            }
        )
    }

    #[must_use]
    pub fn at_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn at_last(&self) -> bool {
        self.index + 1 == self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    fn image() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    fn fetches(commands: &[Command]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::Fetch(source) => Some(source.as_str()),
                Command::StartGraceTimer(_) => None,
            })
            .collect()
    }

    fn moved_commands(navigation: Navigation) -> Vec<Command> {
        match navigation {
            Navigation::Moved { commands, .. } => commands,
            Navigation::Unchanged => panic!("expected the index to move"),
        }
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let err = Sequencer::new(Vec::new(), 0, Lookahead::default()).unwrap_err();
        assert!(err.to_string().contains("'images'"));
    }

    #[test]
    fn start_index_is_clamped() {
        let sequencer = Sequencer::new(sources(&["a", "b"]), 10, Lookahead::default()).unwrap();
        assert_eq!(sequencer.index(), 1);
        assert!(sequencer.at_last());
    }

    #[test]
    fn mount_requests_start_and_neighbours() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c", "d"]), 1, Lookahead::default()).unwrap();

        let commands = sequencer.mount(&mut cache);
        assert_eq!(fetches(&commands), vec!["b", "a", "c"]);
        assert!(commands.contains(&Command::StartGraceTimer(sequencer.token())));
    }

    #[test]
    fn walks_forward_and_stops_at_last() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["A", "B", "C"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);

        assert!(matches!(
            sequencer.navigate(1, &mut cache),
            Navigation::Moved { from: 0, to: 1, .. }
        ));
        assert!(matches!(
            sequencer.navigate(1, &mut cache),
            Navigation::Moved { from: 1, to: 2, .. }
        ));
        assert_eq!(sequencer.navigate(1, &mut cache), Navigation::Unchanged);
        assert_eq!(sequencer.index(), 2);
    }

    #[test]
    fn navigating_before_first_is_a_no_op() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer = Sequencer::new(sources(&["A", "B"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);
        let token = sequencer.token();

        assert_eq!(sequencer.navigate(-1, &mut cache), Navigation::Unchanged);
        assert_eq!(sequencer.index(), 0);
        assert_eq!(sequencer.token(), token, "no-op must not issue a request");
    }

    #[test]
    fn index_stays_in_bounds_for_any_delta_sequence() {
        let mut cache = PreloadCache::with_defaults();
        let names = sources(&["a", "b", "c", "d", "e"]);
        let mut sequencer = Sequencer::new(names, 2, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);

        // Deterministic pseudo-random walk over large and small steps.
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..1_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let delta = (seed % 15) as isize - 7;
            sequencer.navigate(delta, &mut cache);
            assert!(sequencer.index() < sequencer.len());
        }

        sequencer.navigate(isize::MIN, &mut cache);
        assert_eq!(sequencer.index(), 0);
        sequencer.navigate(isize::MAX, &mut cache);
        assert_eq!(sequencer.index(), 4);
    }

    #[test]
    fn navigation_preloads_ahead_in_travel_direction() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c", "d", "e"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);

        let commands = moved_commands(sequencer.navigate(1, &mut cache));
        // "b" was preloaded on mount and is still in flight.
        assert_eq!(fetches(&commands), vec!["c", "d"]);

        let commands = moved_commands(sequencer.navigate(1, &mut cache));
        assert_eq!(fetches(&commands), vec!["e"]);
    }

    #[test]
    fn same_source_is_fetched_once() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c"]), 0, Lookahead::default()).unwrap();

        let mut fetched = fetches(&sequencer.mount(&mut cache))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        for delta in [1, 1, -1, -1, 1] {
            if let Navigation::Moved { commands, .. } = sequencer.navigate(delta, &mut cache) {
                fetched.extend(fetches(&commands).into_iter().map(String::from));
            }
        }

        fetched.sort();
        assert_eq!(fetched, vec!["a", "b", "c"]);
    }

    #[test]
    fn cached_target_is_ready_immediately() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer = Sequencer::new(sources(&["a", "b"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);
        sequencer.on_fetched("b", Ok(image()), &mut cache);

        let commands = moved_commands(sequencer.navigate(1, &mut cache));
        assert!(commands.is_empty());
        assert_eq!(sequencer.status(), &DisplayStatus::Ready);
    }

    #[test]
    fn completion_of_current_source_clears_loading() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer = Sequencer::new(sources(&["a", "b"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);

        assert!(sequencer.on_grace_elapsed(sequencer.token()));
        assert!(sequencer.is_loading());

        let completion = sequencer.on_fetched("a", Ok(image()), &mut cache);
        assert!(matches!(completion, Completion::Displayed(_)));
        assert!(!sequencer.is_loading());
    }

    #[test]
    fn stale_completion_does_not_clear_newer_request() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);
        sequencer.navigate(1, &mut cache);
        sequencer.navigate(1, &mut cache);
        assert!(sequencer.on_grace_elapsed(sequencer.token()));

        let completion = sequencer.on_fetched("a", Ok(image()), &mut cache);
        assert!(matches!(completion, Completion::Background));
        assert!(sequencer.is_loading(), "stale completion must not clear loading");
        assert!(cache.contains("a"));
    }

    #[test]
    fn stale_grace_timer_is_ignored() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);
        let old = sequencer.token();
        sequencer.navigate(1, &mut cache);

        assert!(!sequencer.on_grace_elapsed(old));
        assert!(!sequencer.is_loading());
    }

    #[test]
    fn grace_timer_after_arrival_shows_nothing() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer = Sequencer::new(sources(&["a"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);
        sequencer.on_fetched("a", Ok(image()), &mut cache);

        assert!(!sequencer.on_grace_elapsed(sequencer.token()));
        assert!(!sequencer.is_loading());
    }

    #[test]
    fn failed_display_fetch_is_retried_on_revisit() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer = Sequencer::new(sources(&["a", "b"]), 0, Lookahead::default()).unwrap();
        sequencer.mount(&mut cache);

        let completion = sequencer.on_fetched("a", Err("404".into()), &mut cache);
        assert!(matches!(completion, Completion::DisplayFailed(ref msg) if msg == "404"));
        assert_eq!(sequencer.status(), &DisplayStatus::Failed("404".into()));

        sequencer.navigate(1, &mut cache);
        let commands = moved_commands(sequencer.navigate(-1, &mut cache));
        assert_eq!(fetches(&commands), vec!["a"]);
    }

    #[test]
    fn disabled_cache_skips_preloads() {
        let mut cache = PreloadCache::new(crate::media::PreloadConfig::disabled());
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c"]), 1, Lookahead::default()).unwrap();

        let commands = sequencer.mount(&mut cache);
        assert_eq!(fetches(&commands), vec!["b"]);
    }

    #[test]
    fn bounds_flags_follow_navigation() {
        let mut cache = PreloadCache::with_defaults();
        let mut sequencer =
            Sequencer::new(sources(&["a", "b", "c"]), 0, Lookahead::default()).unwrap();
        assert!(sequencer.at_first());
        assert!(!sequencer.at_last());

        sequencer.navigate(2, &mut cache);
        assert!(!sequencer.at_first());
        assert!(sequencer.at_last());
    }
}
