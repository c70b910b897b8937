use std::cmp::max;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use log::LevelFilter;

use crate::config::{Backend, Config};

/// CLI options for the main CoreUI executable.
#[derive(Parser, Default, Debug)]
#[clap(author, about, version = env!("CARGO_PKG_VERSION"))]
pub struct Options {
    /// Print all window events to stdout.
    #[clap(long)]
    pub print_events: bool,

    /// Specify alternative configuration file [default:
    /// $XDG_CONFIG_HOME/coreui/coreui.toml].
    #[cfg(not(any(target_os = "macos", windows)))]
    #[clap(long, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    /// Specify alternative configuration file [default: %APPDATA%\coreui\coreui.toml].
    #[cfg(windows)]
    #[clap(long, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    /// Specify alternative configuration file [default: $HOME/.config/coreui/coreui.toml].
    #[cfg(target_os = "macos")]
    #[clap(long, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    /// Defines the window title [default: CoreUI].
    #[clap(short = 'T', long)]
    pub title: Option<String>,

    /// Render without a window system.
    #[clap(long)]
    pub headless: bool,

    /// Stop after presenting this many frames.
    #[clap(long)]
    pub frames: Option<u64>,

    /// Log every OpenGL call at trace level.
    #[clap(long)]
    pub gl_call_log: bool,

    /// Reduces the level of verbosity (the min level is -qq).
    #[clap(short, conflicts_with("verbose"), action = ArgAction::Count)]
    quiet: u8,

    /// Increases the level of verbosity (the max level is -vvv).
    #[clap(short, conflicts_with("quiet"), action = ArgAction::Count)]
    verbose: u8,
}

impl Options {
    pub fn new() -> Self {
        Self::parse()
    }

    /// Override configuration file with options from the CLI.
    pub fn override_config(&self, config: &mut Config) {
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }

        if self.headless {
            config.debug.backend = Backend::Headless;
        }

        if self.frames.is_some() {
            config.debug.frames = self.frames;
        }

        config.debug.print_events |= self.print_events;
        config.debug.gl_call_log |= self.gl_call_log;
        config.debug.log_level = max(config.debug.log_level, self.log_level());
    }

    /// Logging filter level.
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            // Force at least `Info` level for `--print-events`.
            (_, 0) if self.print_events => LevelFilter::Info,

            // Default.
            (0, 0) => LevelFilter::Warn,

            // Verbose.
            (_, 1) => LevelFilter::Info,
            (_, 2) => LevelFilter::Debug,
            (0, _) => LevelFilter::Trace,

            // Quiet.
            (1, _) => LevelFilter::Error,
            (..) => LevelFilter::Off,
        }
    }
}
