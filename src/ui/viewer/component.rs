// SPDX-License-Identifier: MPL-2.0
//! Lightbox component encapsulating state and update logic.
//!
//! The component owns the state of one open gallery. Messages come from its
//! own widgets, from [`Lightbox::subscription`] (keyboard, window and
//! animation events) and from the tasks it spawns (fetches, timers, window
//! mode queries). The preload cache is not part of the component: the host
//! owns it for the whole session and lends it to every `update`.

use crate::application::fullscreen;
use crate::application::navigation::{Command, Completion, LoadToken, Navigation, Sequencer};
use crate::application::port::{FullscreenCapability, ImageFetcher};
use crate::domain::gallery::{
    Direction, Fit, ImageDescriptor, LayoutMode, LoadingGrace, Lookahead, Viewport,
};
use crate::error::Result;
use crate::i18n::fluent::I18n;
use crate::infrastructure::fullscreen::WindowFullscreen;
use crate::media::{ImageData, PreloadCache};
use crate::ui::design_tokens::motion;
use crate::ui::viewer::props::{CloseCallback, ViewerProps};
use crate::ui::viewer::view;
use crate::ui::widgets::SpinnerPhase;
use iced::{event, keyboard, time, window, Element, Size, Subscription, Task};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Keyboard shortcuts understood by the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Previous,
    Next,
    Close,
}

/// Messages handled by the lightbox.
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Direction),
    ToggleFullscreen,
    ToggleLayout,
    /// Close button: fades out, then closes.
    ClosePressed,
    CloseFadeElapsed,
    Shortcut {
        window: window::Id,
        shortcut: Shortcut,
    },
    ImageFetched {
        source: String,
        result: std::result::Result<ImageData, String>,
    },
    LoadingGraceElapsed(LoadToken),
    FullscreenObserved(bool),
    WindowResized {
        window: window::Id,
        size: Size,
    },
    Tick(Instant),
}

/// Side effects the host should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The viewer was dismissed; the host should drop it.
    CloseRequested,
}

/// Tunables that come from the application settings rather than the props.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerOptions {
    pub lookahead: Lookahead,
    pub loading_grace: LoadingGrace,
}

/// State of one open gallery.
pub struct Lightbox {
    props: ViewerProps,
    on_close: Option<CloseCallback>,
    sequencer: Sequencer,
    fetcher: Arc<dyn ImageFetcher>,
    displayed: Option<ImageData>,
    layout: LayoutMode,
    viewport: Option<Viewport>,
    fullscreen: WindowFullscreen<Message>,
    loading_grace: LoadingGrace,
    spinner: SpinnerPhase,
    closing_since: Option<Instant>,
    fade: f32,
    closed: bool,
}

impl fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lightbox")
            .field("index", &self.sequencer.index())
            .field("count", &self.sequencer.len())
            .field("status", self.sequencer.status())
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("fullscreen", &self.fullscreen.is_active())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Lightbox {
    /// Creates the viewer. Nothing is fetched until [`Lightbox::mount`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the props hold no image.
    pub fn new(
        mut props: ViewerProps,
        fetcher: Arc<dyn ImageFetcher>,
        options: ViewerOptions,
    ) -> Result<Self> {
        let sequencer = Sequencer::new(props.sources(), props.start_index(), options.lookahead)?;
        let on_close = props.take_on_close();

        Ok(Self {
            layout: props.layout(),
            props,
            on_close,
            sequencer,
            fetcher,
            displayed: None,
            viewport: None,
            fullscreen: WindowFullscreen::new(Message::FullscreenObserved),
            loading_grace: options.loading_grace,
            spinner: SpinnerPhase::default(),
            closing_since: None,
            fade: 1.0,
            closed: false,
        })
    }

    /// Requests the start image and preloads its neighbours.
    pub fn mount(&mut self, cache: &mut PreloadCache) -> Task<Message> {
        let commands = self.sequencer.mount(cache);
        self.refresh_displayed(cache);
        self.run(commands)
    }

    pub fn update(&mut self, message: Message, cache: &mut PreloadCache) -> (Effect, Task<Message>) {
        if self.closed {
            // Fetches still settle into the shared cache after closing.
            if let Message::ImageFetched { source, result } = message {
                let _ = self.sequencer.on_fetched(&source, result, cache);
            }
            return (Effect::None, Task::none());
        }

        match message {
            Message::Navigate(direction) => (Effect::None, self.navigate(direction.delta(), cache)),
            Message::ToggleFullscreen => (Effect::None, self.toggle_fullscreen()),
            Message::ToggleLayout => {
                self.toggle_layout();
                (Effect::None, Task::none())
            }
            Message::ClosePressed => {
                if self.closing_since.is_some() {
                    return (Effect::None, Task::none());
                }
                self.closing_since = Some(Instant::now());
                let task = Task::perform(
                    async { tokio::time::sleep(motion::CLOSE_FADE).await },
                    |()| Message::CloseFadeElapsed,
                );
                (Effect::None, task)
            }
            Message::CloseFadeElapsed => (self.close(), Task::none()),
            Message::Shortcut { window, shortcut } => {
                let bound = self.bind_window(window);
                let (effect, task) = match shortcut {
                    Shortcut::Previous => (Effect::None, self.navigate(-1, cache)),
                    Shortcut::Next => (Effect::None, self.navigate(1, cache)),
                    Shortcut::Close => (self.close(), Task::none()),
                };
                (effect, Task::batch([bound, task]))
            }
            Message::ImageFetched { source, result } => {
                match self.sequencer.on_fetched(&source, result, cache) {
                    Completion::Displayed(image) => self.displayed = Some(image),
                    Completion::DisplayFailed(error) => {
                        warn!(source, %error, "failed to load image");
                        self.displayed = None;
                    }
                    Completion::Background => {}
                }
                (Effect::None, Task::none())
            }
            Message::LoadingGraceElapsed(token) => {
                if self.sequencer.on_grace_elapsed(token) {
                    debug!(token = token.value(), "showing loading indicator");
                }
                (Effect::None, Task::none())
            }
            Message::FullscreenObserved(active) => {
                self.fullscreen.observe(active);
                (Effect::None, Task::none())
            }
            Message::WindowResized { window, size } => {
                self.viewport = Some(Viewport::new(size.width, size.height));
                self.fullscreen.set_window(window);
                // Fullscreen can also change from outside (window manager,
                // platform shortcuts), so read the mode back on every resize.
                (Effect::None, self.fullscreen.query())
            }
            Message::Tick(now) => {
                self.spinner.advance();
                if let Some(since) = self.closing_since {
                    let elapsed = now.saturating_duration_since(since).as_secs_f32();
                    self.fade = (1.0 - elapsed / motion::CLOSE_FADE.as_secs_f32()).clamp(0.0, 1.0);
                }
                (Effect::None, Task::none())
            }
        }
    }

    /// Moves by `delta` images, clamped to the gallery.
    pub fn navigate(&mut self, delta: isize, cache: &mut PreloadCache) -> Task<Message> {
        match self.sequencer.navigate(delta, cache) {
            Navigation::Unchanged => Task::none(),
            Navigation::Moved { commands, .. } => {
                self.refresh_displayed(cache);
                self.run(commands)
            }
        }
    }

    pub fn toggle_fullscreen(&mut self) -> Task<Message> {
        fullscreen::toggle(&mut self.fullscreen).unwrap_or_else(Task::none)
    }

    /// Switches to the explicit layout opposite to the one currently in effect.
    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled(self.viewport);
    }

    fn close(&mut self) -> Effect {
        if self.closed {
            return Effect::None;
        }
        self.closed = true;
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
        Effect::CloseRequested
    }

    fn bind_window(&mut self, window: window::Id) -> Task<Message> {
        if self.fullscreen.set_window(window) {
            self.fullscreen.query()
        } else {
            Task::none()
        }
    }

    fn refresh_displayed(&mut self, cache: &mut PreloadCache) {
        self.displayed = cache.get(self.sequencer.current_source());
    }

    fn run(&self, commands: Vec<Command>) -> Task<Message> {
        Task::batch(commands.into_iter().map(|command| match command {
            Command::Fetch(source) => fetch_task(Arc::clone(&self.fetcher), source),
            Command::StartGraceTimer(token) => {
                let grace = self.loading_grace.as_duration();
                Task::perform(async move { tokio::time::sleep(grace).await }, move |()| {
                    Message::LoadingGraceElapsed(token)
                })
            }
        }))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(|event, status, window| match event {
            event::Event::Window(window::Event::Resized(size))
            | event::Event::Window(window::Event::Opened { size, .. }) => {
                Some(Message::WindowResized { window, size })
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. })
                if status == event::Status::Ignored =>
            {
                let shortcut = match key {
                    keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Shortcut::Previous,
                    keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Shortcut::Next,
                    keyboard::Key::Named(keyboard::key::Named::Escape) => Shortcut::Close,
                    _ => return None,
                };
                Some(Message::Shortcut { window, shortcut })
            }
            _ => None,
        });

        let animating = self.sequencer.is_loading() || self.closing_since.is_some();
        let ticks = if animating && !self.closed {
            time::every(motion::SPINNER_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([events, ticks])
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        view::view(view::ViewContext {
            i18n,
            descriptor: self.current_descriptor(),
            image: self.displayed.as_ref(),
            status: self.sequencer.status(),
            loading: self.sequencer.is_loading(),
            index: self.sequencer.index(),
            count: self.sequencer.len(),
            at_first: self.sequencer.at_first(),
            at_last: self.sequencer.at_last(),
            fit: self.fit(),
            max_image_width: self.props.max_image_width(),
            background: self.props.background(),
            fullscreen_available: self.fullscreen.is_available(),
            fullscreen_active: self.fullscreen.is_active(),
            spinner: self.spinner,
            fade: self.fade,
        })
    }

    fn current_descriptor(&self) -> &ImageDescriptor {
        &self.props.images()[self.sequencer.index()]
    }

    /// Fit in effect for the current viewport. `auto` is resolved on every
    /// call.
    #[must_use]
    pub fn fit(&self) -> Fit {
        self.layout.resolve(self.viewport)
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.sequencer.index()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequencer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequencer.is_empty()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.sequencer.is_loading()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn displayed(&self) -> Option<&ImageData> {
        self.displayed.as_ref()
    }

    #[must_use]
    pub fn current_source(&self) -> &str {
        self.sequencer.current_source()
    }

    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }
}

/// Runs a blocking fetch on the worker pool and decodes into a renderer handle.
fn fetch_task(fetcher: Arc<dyn ImageFetcher>, source: String) -> Task<Message> {
    Task::perform(
        async move {
            let requested = source.clone();
            let result = tokio::task::spawn_blocking(move || fetcher.fetch(&requested))
                .await
                .map_err(|e| e.to_string())
                .and_then(|fetched| fetched.map_err(|e| e.to_string()))
                .map(ImageData::from_raw);
            (source, result)
        },
        |(source, result)| Message::ImageFetched { source, result },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::FetchError;
    use crate::domain::image::RawImage;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct NoopFetcher;

    impl ImageFetcher for NoopFetcher {
        fn fetch(&self, _source: &str) -> std::result::Result<RawImage, FetchError> {
            Ok(RawImage::from_rgba(1, 1, vec![0, 0, 0, 255]))
        }
    }

    fn lightbox(names: &[&str]) -> Lightbox {
        let images = names.iter().map(|n| ImageDescriptor::new(*n)).collect();
        let props = ViewerProps::builder(images).build().unwrap();
        Lightbox::new(props, Arc::new(NoopFetcher), ViewerOptions::default()).unwrap()
    }

    fn image() -> ImageData {
        ImageData::from_rgba(2, 1, vec![0; 8])
    }

    #[test]
    fn navigation_messages_move_within_bounds() {
        let mut cache = PreloadCache::with_defaults();
        let mut viewer = lightbox(&["a", "b", "c"]);
        let _ = viewer.mount(&mut cache);

        for _ in 0..5 {
            let _ = viewer.update(Message::Navigate(Direction::Next), &mut cache);
        }
        assert_eq!(viewer.index(), 2);

        for _ in 0..5 {
            let _ = viewer.update(Message::Navigate(Direction::Previous), &mut cache);
        }
        assert_eq!(viewer.index(), 0);
    }

    #[test]
    fn fetched_image_is_displayed_only_when_current() {
        let mut cache = PreloadCache::with_defaults();
        let mut viewer = lightbox(&["a", "b"]);
        let _ = viewer.mount(&mut cache);
        let _ = viewer.update(Message::Navigate(Direction::Next), &mut cache);

        let stale = Message::ImageFetched {
            source: "a".into(),
            result: Ok(image()),
        };
        let _ = viewer.update(stale, &mut cache);
        assert!(viewer.displayed().is_none());

        let current = Message::ImageFetched {
            source: "b".into(),
            result: Ok(image()),
        };
        let _ = viewer.update(current, &mut cache);
        assert_eq!(viewer.displayed().map(|i| i.width), Some(2));
    }

    #[test]
    fn returning_to_cached_image_shows_it_immediately() {
        let mut cache = PreloadCache::with_defaults();
        let mut viewer = lightbox(&["a", "b"]);
        let _ = viewer.mount(&mut cache);
        let _ = viewer.update(
            Message::ImageFetched {
                source: "a".into(),
                result: Ok(image()),
            },
            &mut cache,
        );
        let _ = viewer.update(Message::Navigate(Direction::Next), &mut cache);
        assert!(viewer.displayed().is_none());

        let _ = viewer.update(Message::Navigate(Direction::Previous), &mut cache);
        assert!(viewer.displayed().is_some());
    }

    #[test]
    fn loading_flag_waits_for_grace_timer() {
        let mut cache = PreloadCache::with_defaults();
        let mut viewer = lightbox(&["a"]);
        let _ = viewer.mount(&mut cache);
        assert!(!viewer.is_loading());

        let token = viewer.sequencer().token();
        let _ = viewer.update(Message::LoadingGraceElapsed(token), &mut cache);
        assert!(viewer.is_loading());
    }

    #[test]
    fn escape_invokes_close_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let props = ViewerProps::builder(vec![ImageDescriptor::new("a")])
            .on_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();
        let mut viewer =
            Lightbox::new(props, Arc::new(NoopFetcher), ViewerOptions::default()).unwrap();
        let mut cache = PreloadCache::with_defaults();

        let escape = Message::Shortcut {
            window: window::Id::unique(),
            shortcut: Shortcut::Close,
        };
        let (effect, _) = viewer.update(escape.clone(), &mut cache);
        assert_eq!(effect, Effect::CloseRequested);

        let (effect, _) = viewer.update(escape, &mut cache);
        assert_eq!(effect, Effect::None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completions_after_close_settle_into_shared_cache() {
        let mut cache = PreloadCache::with_defaults();
        let mut first = lightbox(&["a", "b", "c"]);
        let _ = first.mount(&mut cache);
        let escape = Message::Shortcut {
            window: window::Id::unique(),
            shortcut: Shortcut::Close,
        };
        let (effect, _) = first.update(escape, &mut cache);
        assert_eq!(effect, Effect::CloseRequested);

        let _ = first.update(
            Message::ImageFetched {
                source: "b".into(),
                result: Ok(image()),
            },
            &mut cache,
        );
        let _ = first.update(
            Message::ImageFetched {
                source: "a".into(),
                result: Err("offline".into()),
            },
            &mut cache,
        );
        assert!(cache.contains("b"));
        assert!(!cache.is_in_flight("b"));
        assert!(!cache.is_in_flight("a"));

        let props = ViewerProps::builder(vec![
            ImageDescriptor::new("a"),
            ImageDescriptor::new("b"),
            ImageDescriptor::new("c"),
        ])
        .start_index(1)
        .build()
        .unwrap();
        let mut second =
            Lightbox::new(props, Arc::new(NoopFetcher), ViewerOptions::default()).unwrap();
        let _ = second.mount(&mut cache);
        assert!(second.displayed().is_some());
        assert!(!second.is_loading());
    }

    #[test]
    fn close_button_fades_before_closing() {
        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);
        let props = ViewerProps::builder(vec![ImageDescriptor::new("a")])
            .on_close(move || flag.store(true, Ordering::SeqCst))
            .build()
            .unwrap();
        let mut viewer =
            Lightbox::new(props, Arc::new(NoopFetcher), ViewerOptions::default()).unwrap();
        let mut cache = PreloadCache::with_defaults();

        let (effect, _) = viewer.update(Message::ClosePressed, &mut cache);
        assert_eq!(effect, Effect::None);
        assert!(!closed.load(Ordering::SeqCst));

        let later = Instant::now() + motion::CLOSE_FADE;
        let _ = viewer.update(Message::Tick(later), &mut cache);
        assert!(viewer.fade < 0.01);

        let (effect, _) = viewer.update(Message::CloseFadeElapsed, &mut cache);
        assert_eq!(effect, Effect::CloseRequested);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn auto_layout_follows_viewport_until_toggled() {
        let images = vec![ImageDescriptor::new("a")];
        let props = ViewerProps::builder(images)
            .layout(LayoutMode::Auto)
            .build()
            .unwrap();
        let mut viewer =
            Lightbox::new(props, Arc::new(NoopFetcher), ViewerOptions::default()).unwrap();
        let mut cache = PreloadCache::with_defaults();
        let window = window::Id::unique();

        let _ = viewer.update(
            Message::WindowResized {
                window,
                size: Size::new(1200.0, 800.0),
            },
            &mut cache,
        );
        assert_eq!(viewer.fit(), Fit::Cover);

        let _ = viewer.update(
            Message::WindowResized {
                window,
                size: Size::new(600.0, 900.0),
            },
            &mut cache,
        );
        assert_eq!(viewer.fit(), Fit::Contain);

        let _ = viewer.update(Message::ToggleLayout, &mut cache);
        assert_eq!(viewer.layout(), LayoutMode::Cover);
    }

    #[test]
    fn fullscreen_mirrors_observed_mode() {
        let mut viewer = lightbox(&["a"]);
        let mut cache = PreloadCache::with_defaults();

        // No window known yet: toggling is a silent no-op.
        let _ = viewer.update(Message::ToggleFullscreen, &mut cache);
        assert!(!viewer.is_fullscreen());

        let _ = viewer.update(
            Message::WindowResized {
                window: window::Id::unique(),
                size: Size::new(800.0, 600.0),
            },
            &mut cache,
        );
        let _ = viewer.update(Message::ToggleFullscreen, &mut cache);
        assert!(!viewer.is_fullscreen(), "only the observed mode counts");

        let _ = viewer.update(Message::FullscreenObserved(true), &mut cache);
        assert!(viewer.is_fullscreen());
    }
}
