// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the lightbox.
//!
//! The `App` struct owns the shared preload cache, localization and the viewer
//! component, and turns the viewer's effects into runtime actions such as
//! closing the window.

pub mod config;
mod launch;
mod message;
pub mod paths;

pub use launch::Launch;
pub use message::{Flags, Message};

use crate::i18n::fluent::I18n;
use crate::media::PreloadCache;
use crate::ui::viewer::{counter_label, Effect, Lightbox};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use tracing::{debug, warn};

pub const WINDOW_DEFAULT_HEIGHT: u32 = 768;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 360;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    cache: PreloadCache,
    viewer: Lightbox,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("viewer", &self.viewer)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(launch: Launch) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; the launch state is consumed once.
    let boot_state = RefCell::new(Some(launch));
    let boot = move || {
        let launch = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(launch)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Sets up localization and the preload cache, then mounts the viewer.
    fn new(launch: Launch) -> (Self, Task<Message>) {
        let Launch {
            lang,
            config,
            config_warning,
            viewer,
        } = launch;

        let i18n = I18n::new(lang, &config);
        if let Some(key) = config_warning {
            warn!("{}", i18n.tr(&key));
        }

        let mut app = App {
            i18n,
            cache: PreloadCache::new(config.preload_config()),
            viewer,
        };
        let task = app.viewer.mount(&mut app.cache).map(Message::Viewer);
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        let counter = counter_label(&self.i18n, self.viewer.index(), self.viewer.len());
        format!("{counter} - {app_name}")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        self.viewer.subscription().map(Message::Viewer)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(message) => {
                let (effect, task) = self.viewer.update(message, &mut self.cache);
                match effect {
                    Effect::None => task.map(Message::Viewer),
                    Effect::CloseRequested => {
                        debug!(stats = ?self.cache.stats(), "lightbox closed");
                        iced::exit()
                    }
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.viewer.view(&self.i18n).map(Message::Viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::Direction;
    use crate::ui::viewer::component;
    use config::Config;

    fn app(inputs: &[&str]) -> App {
        let flags = Flags {
            lang: Some("en-US".to_string()),
            inputs: inputs.iter().map(|s| (*s).to_string()).collect(),
            ..Flags::default()
        };
        let launch = Launch::prepare_with_config(flags, Config::default(), None).unwrap();
        App::new(launch).0
    }

    #[test]
    fn title_shows_position() {
        let app = app(&["a.png", "b.png", "c.png"]);
        assert_eq!(app.title(), "1 / 3 - Lightbox");
    }

    #[test]
    fn navigation_updates_title() {
        let mut app = app(&["a.png", "b.png"]);
        let _ = app.update(Message::Viewer(component::Message::Navigate(Direction::Next)));
        assert_eq!(app.title(), "2 / 2 - Lightbox");
    }

    #[test]
    fn mount_registers_fetches_in_cache() {
        let app = app(&["a.png", "b.png"]);
        assert!(app.cache.is_in_flight("a.png"));
        assert!(app.cache.is_in_flight("b.png"));
    }
}
