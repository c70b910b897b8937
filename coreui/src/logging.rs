//! Logging for CoreUI.
//!
//! The main executable is supposed to call `initialize()` exactly once during
//! startup. All logging messages are written to stdout and to a log file in the
//! temporary directory, given that their log-level is sufficient for the level
//! configured in `cli::Options`.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Stdout, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use log::{self, LevelFilter, Metadata, Record};

/// Name for the environment variable containing the log file's path.
const COREUI_LOG_ENV: &str = "COREUI_LOG";

/// Target of the OpenGL call log.
const CALL_LOG_TARGET: &str = "opengl::call";

/// List of targets which will be logged by CoreUI.
const ALLOWED_TARGETS: &[&str] = &["coreui", "opengl"];

/// Level of all targets except the call log.
static LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Warn as usize);

/// Initialize the logger to its defaults.
pub fn initialize(level: LevelFilter) -> Result<PathBuf, log::SetLoggerError> {
    set_level(level);

    let logger = Logger::new();
    let path = logger.file_path();
    log::set_boxed_logger(Box::new(logger))?;

    // The call log is always emitted at trace level and filtered by the logger.
    log::set_max_level(LevelFilter::Trace);

    Ok(path)
}

pub fn set_level(level: LevelFilter) {
    LEVEL.store(level as usize, Ordering::Relaxed);
}

fn level() -> LevelFilter {
    match LEVEL.load(Ordering::Relaxed) {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub struct Logger {
    logfile: Mutex<OnDemandLogFile>,
    stdout: Mutex<LineWriter<Stdout>>,
    start: Instant,
}

impl Logger {
    fn new() -> Self {
        let logfile = Mutex::new(OnDemandLogFile::new());
        let stdout = Mutex::new(LineWriter::new(io::stdout()));

        Logger { logfile, stdout, start: Instant::now() }
    }

    fn file_path(&self) -> PathBuf {
        match self.logfile.lock() {
            Ok(logfile) => logfile.path.clone(),
            Err(poisoned) => poisoned.into_inner().path.clone(),
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        if metadata.target().starts_with(CALL_LOG_TARGET) {
            return opengl::call_log_enabled();
        }

        metadata.level() <= level()
    }

    fn log(&self, record: &Record<'_>) {
        // Get target crate.
        let index = record.target().find(':').unwrap_or_else(|| record.target().len());
        let target = &record.target()[..index];

        // Only log our own crates.
        if !self.enabled(record.metadata()) || !ALLOWED_TARGETS.contains(&target) {
            return;
        }

        let now = self.start.elapsed();
        let message = format!(
            "[{}.{:0>9}s] [{:<5}] [{}] {}\n",
            now.as_secs(),
            now.subsec_nanos(),
            record.level(),
            record.target(),
            record.args()
        );

        // Write to stdout.
        if let Ok(mut stdout) = self.stdout.lock() {
            let _ = stdout.write_all(message.as_ref());
        }

        // Write to logfile.
        if let Ok(mut logfile) = self.logfile.lock() {
            let _ = logfile.write_all(message.as_ref());
        }
    }

    fn flush(&self) {}
}

struct OnDemandLogFile {
    file: Option<LineWriter<File>>,
    path: PathBuf,
}

impl OnDemandLogFile {
    fn new() -> Self {
        let mut path = env::temp_dir();
        path.push(format!("CoreUI-{}.log", process::id()));

        // Set log path as an environment variable.
        env::set_var(COREUI_LOG_ENV, path.as_os_str());

        OnDemandLogFile { path, file: None }
    }

    fn file(&mut self) -> Result<&mut LineWriter<File>, io::Error> {
        // Allow to recreate the file if it has been deleted at runtime.
        if self.file.is_some() && !self.path.as_path().exists() {
            self.file = None;
        }

        // Create the file if it doesn't exist yet.
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                let file = OpenOptions::new().append(true).create(true).open(&self.path);
                match file {
                    Ok(file) => {
                        let _ = writeln!(
                            io::stdout(),
                            "Created log file at \"{}\"",
                            self.path.display()
                        );
                        LineWriter::new(file)
                    },
                    Err(e) => {
                        let _ = writeln!(io::stdout(), "Unable to create log file: {}", e);
                        return Err(e);
                    },
                }
            },
        };

        Ok(self.file.insert(file))
    }
}

impl Write for OnDemandLogFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, io::Error> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.file()?.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trip() {
        let filters = [LevelFilter::Off, LevelFilter::Error, LevelFilter::Info, LevelFilter::Trace];
        for filter in filters {
            set_level(filter);
            assert_eq!(level(), filter);
        }

        set_level(LevelFilter::Warn);
    }
}
