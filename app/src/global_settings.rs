use std::{env, str::FromStr};

use stubcat_printer::ColorChoice;

/// Settings read from the environment.
///
/// `STUBCAT_COLORIZE` accepts `always`, `always-ansi`, `auto` and `never`;
/// `STUBCAT_LOG_LEVEL` accepts any `log` level filter such as `debug` or `off`.
#[derive(Debug, Clone)]
pub struct GlobalSettings {
    pub colorize: ColorChoice,
    pub log_level: log::LevelFilter,
}

impl GlobalSettings {
    pub fn from_env() -> Self {
        let colorize = env::var("STUBCAT_COLORIZE")
            .ok()
            .and_then(|var| ColorChoice::from_str(&var).ok())
            .unwrap_or(ColorChoice::Auto);

        let log_level = env::var("STUBCAT_LOG_LEVEL")
            .ok()
            .and_then(|var| log::LevelFilter::from_str(&var.to_uppercase()).ok())
            .unwrap_or(log::LevelFilter::Info);

        Self { colorize, log_level }
    }

    /// `--verbose` raises the log level to at least `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = self.log_level.max(log::LevelFilter::Debug);
        }
        self
    }

    pub fn init_logger(&self) {
        env_logger::builder()
            .format_timestamp(None)
            .format_target(false)
            .filter_level(self.log_level)
            .init();
    }
}
