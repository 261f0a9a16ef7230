// SPDX-License-Identifier: MPL-2.0
use iced_lightbox::app::{self, paths, Flags, Launch};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Usage: iced_lightbox [OPTIONS] <GALLERY.toml | IMAGE...>

Arguments:
  GALLERY.toml            Gallery manifest describing images and viewer options
  IMAGE...                Image paths or http(s) URLs, shown in order

Options:
      --lang <LOCALE>       Interface language (e.g. en-US, fr)
      --layout <MODE>       cover, contain or auto
      --start <INDEX>       Zero-based index of the first image shown
      --background <COLOR>  Backdrop color (#rgb, #rrggbb, #rrggbbaa or a name)
      --max-width <PX>      Maximum display width of a contained image
      --config-dir <DIR>    Directory holding settings.toml
  -h, --help                Print help
";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match Flags::from_args(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());

    let launch = match Launch::prepare(flags) {
        Ok(launch) => launch,
        Err(err) => {
            error!(%err, "cannot open gallery");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(launch) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "application error");
            ExitCode::FAILURE
        }
    }
}
