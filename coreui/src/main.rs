//! CoreUI - Native OpenGL window demo.

#![warn(rust_2018_idioms, future_incompatible)]
#![deny(clippy::all, clippy::if_not_else, clippy::enum_glob_use)]

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use log::{info, warn};

use coreui::{DefaultPlatform, Headless, NativeWindow, Platform, Point, Size, Window};

mod cli;
mod config;
mod demo;
mod logging;

use crate::cli::Options;
use crate::config::{Backend, Config};
use crate::demo::Demo;

/// Frames presented by the headless backend when no limit is configured.
const HEADLESS_FRAMES: u64 = 60;

fn main() -> Result<(), Box<dyn Error>> {
    // Load command line options.
    let options = Options::new();

    // Initialize the logger as soon as possible as to capture output from other subsystems.
    let log_file = logging::initialize(options.log_level())?;

    // Load configuration file.
    let mut config = config::load(&options);

    // Update the log level from config.
    logging::set_level(config.debug.log_level);
    opengl::set_call_log_enabled(config.debug.gl_call_log);

    info!("Welcome to CoreUI");

    let result = match config.debug.backend {
        Backend::Native => {
            if cfg!(not(windows)) {
                warn!("No native window system available, falling back to headless");
                headless_defaults(&mut config);
            }
            launch(Arc::new(DefaultPlatform::default()), &config)
        },
        Backend::Headless => {
            headless_defaults(&mut config);
            launch(Arc::new(Headless::new()), &config)
        },
    };

    info!("Goodbye");

    // Clean up logfile.
    if !config.debug.persistent_logging && fs::remove_file(&log_file).is_ok() {
        let _ = writeln!(io::stdout(), "Deleted log file at \"{}\"", log_file.display());
    }

    result.map_err(Into::into)
}

/// Headless windows only repaint while animating, and never close.
fn headless_defaults(config: &mut Config) {
    config.window.animation = true;

    if config.debug.frames.is_none() {
        info!("No frame limit given, stopping after {} frames", HEADLESS_FRAMES);
        config.debug.frames = Some(HEADLESS_FRAMES);
    }
}

/// Create the demo window on `platform` and block until its loop stops.
fn launch<P: Platform>(platform: Arc<P>, config: &Config) -> coreui::Result<()> {
    let window = Window::new(platform, Demo::new(config));

    let Point { x, y } = Point::from(config.window.position);
    let Size { width, height } = Size::from(config.window.dimensions);
    window.create(x, y, width, height, config.window.decorations.styles())?;

    window.set_caption(&config.window.title)?;
    window.set_cursor_visible(config.window.cursor_visible)?;
    if config.window.fullscreen {
        window.set_fullscreen(true)?;
    }

    window.set_animation(config.window.animation);
    window.show()?;

    info!("Initialisation complete");

    // Start the message loop and block until shutdown.
    window.run()?;

    window.destroy()
}
