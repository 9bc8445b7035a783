//! Command-line configuration for the generator entry point (C11).
//! Grounded on `ft-generator/src/config.h`'s `-p/-o/-v` flag set, expressed
//! as a `clap` derive the way `opensase`'s CLI crate does it.

use clap::Parser;

use crate::error::{CoreError, Result};

/// Parsed command-line configuration for a generator run.
#[derive(Parser, Debug, Clone)]
#[command(name = "packetforge")]
#[command(about = "Synthesizes replayable test traffic from flow profiles", long_about = None)]
pub struct Config {
    /// Path to the flow profiles file.
    #[arg(short = 'p', long = "profiles")]
    pub profiles_file: String,

    /// Path the generated capture is written to.
    #[arg(short = 'o', long = "output")]
    pub output_file: String,

    /// Verbosity level; repeat for more detail (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Config {
    /// Parses `args` (excluding the program name), surfacing failures as
    /// `CoreError::ConfigError` rather than clap's own exit-process default.
    pub fn parse_from<I, T>(args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Config as clap::Parser>::try_parse_from(args)
            .map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Maps `-v` repetitions to a `tracing` filter level: `warn` by default,
    /// `info` at one `-v`, `debug` at two, `trace` at three or more.
    fn tracing_level(&self) -> tracing::Level {
        match self.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Installs a `tracing-subscriber` fmt subscriber at the level implied by
/// `config.verbosity`. Called once from the generator entry point, never
/// from library code that other crates might embed.
pub fn init_tracing(config: &Config) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .finish();
    // A second call (e.g. from a test harness that also runs the CLI path)
    // would panic on `tracing::subscriber::set_global_default`; this is a
    // one-shot process bootstrap, so failures to install are swallowed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_flags() {
        let cfg = Config::parse_from(["packetforge", "-p", "profiles.yaml", "-o", "out.pcap"])
            .unwrap();
        assert_eq!(cfg.profiles_file, "profiles.yaml");
        assert_eq!(cfg.output_file, "out.pcap");
        assert_eq!(cfg.verbosity, 0);
    }

    #[test]
    fn counts_repeated_verbosity_flag() {
        let cfg = Config::parse_from([
            "packetforge",
            "-p",
            "profiles.yaml",
            "-o",
            "out.pcap",
            "-vvv",
        ])
        .unwrap();
        assert_eq!(cfg.verbosity, 3);
    }

    #[test]
    fn missing_required_flag_is_config_error() {
        let result = Config::parse_from(["packetforge", "-p", "profiles.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_maps_to_increasingly_detailed_tracing_levels() {
        let quiet = Config::parse_from(["packetforge", "-p", "a", "-o", "b"]).unwrap();
        let loud = Config::parse_from(["packetforge", "-p", "a", "-o", "b", "-vvv"]).unwrap();
        assert_eq!(quiet.tracing_level(), tracing::Level::WARN);
        assert_eq!(loud.tracing_level(), tracing::Level::TRACE);

        // Installing a subscriber here only exercises the call path; a real
        // process would call this once from its entry point.
        init_tracing(&quiet);
    }
}
