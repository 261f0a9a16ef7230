// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::viewer::component;
use std::ffi::OsString;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_LIGHTBOX_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Layout mode override: `cover`, `contain` or `auto`.
    pub layout: Option<String>,
    /// Zero-based start position.
    pub start_index: Option<i64>,
    /// Backdrop colour override.
    pub background: Option<String>,
    /// Maximum display width override, in pixels.
    pub max_image_width: Option<u32>,
    /// A gallery manifest (`.toml`) or one or more image paths and URLs.
    pub inputs: Vec<String>,
}

impl Flags {
    /// Reads the flags from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Fails on malformed option values and on inputs that are not valid
    /// UTF-8.
    pub fn from_args(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let mut flags = Flags {
            lang: args.opt_value_from_str("--lang")?,
            config_dir: args.opt_value_from_str("--config-dir")?,
            layout: args.opt_value_from_str("--layout")?,
            start_index: args.opt_value_from_str("--start")?,
            background: args.opt_value_from_str("--background")?,
            max_image_width: args.opt_value_from_str("--max-width")?,
            inputs: Vec::new(),
        };
        flags.inputs = args
            .finish()
            .into_iter()
            .map(OsString::into_string)
            .collect::<Result<_, _>>()
            .map_err(|_| pico_args::Error::NonUtf8Argument)?;
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn options_and_inputs_are_read() {
        let flags = Flags::from_args(args(&[
            "--layout", "auto", "--start", "2", "--max-width", "900", "a.png", "b.png",
        ]))
        .unwrap();
        assert_eq!(flags.layout.as_deref(), Some("auto"));
        assert_eq!(flags.start_index, Some(2));
        assert_eq!(flags.max_image_width, Some(900));
        assert_eq!(flags.inputs, vec!["a.png", "b.png"]);
    }

    #[test]
    fn malformed_number_is_an_error() {
        assert!(Flags::from_args(args(&["--start", "two", "a.png"])).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_input_is_an_error() {
        use std::os::unix::ffi::OsStringExt;

        let list = vec![
            OsString::from("a.png"),
            OsString::from_vec(vec![b'b', 0xff, b'.', b'p', b'n', b'g']),
        ];
        let err = Flags::from_args(pico_args::Arguments::from_vec(list)).unwrap_err();
        assert!(matches!(err, pico_args::Error::NonUtf8Argument));
    }
}
