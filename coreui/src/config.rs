use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info, LevelFilter};
use serde::Deserialize;

use coreui::{KeyCode, NativeWindowStyles, Point, Size};

use crate::cli::Options;

/// Name of the configuration file.
const CONFIG_FILE: &str = "coreui.toml";

pub const DEFAULT_TITLE: &str = "CoreUI";

/// Result from config loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors occurring during config loading.
#[derive(Debug)]
pub enum Error {
    /// Config file not found.
    NotFound,

    /// io error reading file.
    Io(io::Error),

    /// Invalid toml.
    Toml(toml::de::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::Io(err) => err.source(),
            Error::Toml(err) => err.source(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "Unable to locate config file"),
            Error::Io(err) => write!(f, "Error reading config file: {}", err),
            Error::Toml(err) => write!(f, "Config error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Self {
        if val.kind() == io::ErrorKind::NotFound {
            Error::NotFound
        } else {
            Error::Io(val)
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(val: toml::de::Error) -> Self {
        Error::Toml(val)
    }
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub debug: Debug,
    pub bindings: Bindings,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,

    /// Outer frame position.
    pub position: Position,

    /// Client area size.
    pub dimensions: Dimensions,

    pub decorations: Decorations,
    pub fullscreen: bool,
    pub cursor_visible: bool,

    /// Repaint continuously.
    pub animation: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            position: Default::default(),
            dimensions: Default::default(),
            decorations: Default::default(),
            fullscreen: Default::default(),
            cursor_visible: true,
            animation: true,
        }
    }
}

#[derive(Deserialize, Default, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Point::new(position.x, position.y)
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

impl From<Dimensions> for Size {
    fn from(dimensions: Dimensions) -> Self {
        Size::new(dimensions.width, dimensions.height)
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Decorations {
    pub border: bool,
    pub caption: bool,
    pub resizeable: bool,
}

impl Default for Decorations {
    fn default() -> Self {
        Self { border: true, caption: true, resizeable: true }
    }
}

impl Decorations {
    pub fn styles(&self) -> NativeWindowStyles {
        let mut styles = NativeWindowStyles::empty();
        styles.set(NativeWindowStyles::BORDER, self.border);
        styles.set(NativeWindowStyles::CAPTION, self.caption);
        styles.set(NativeWindowStyles::RESIZEABLE, self.resizeable);
        styles.normalized()
    }
}

/// Debugging options.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Debug {
    pub log_level: LevelFilter,

    pub print_events: bool,

    /// Keep the log file after quitting.
    pub persistent_logging: bool,

    /// Log every OpenGL call.
    pub gl_call_log: bool,

    /// Window system used to open the window.
    pub backend: Backend,

    /// Stop after presenting this many frames.
    pub frames: Option<u64>,
}

impl Default for Debug {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn,
            print_events: Default::default(),
            persistent_logging: Default::default(),
            gl_call_log: Default::default(),
            backend: Default::default(),
            frames: Default::default(),
        }
    }
}

#[derive(Deserialize, Default, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native window system of the target OS.
    #[default]
    Native,

    /// In-memory windows without any GL entry points.
    Headless,
}

/// Keys handled by the demo.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Bindings {
    pub toggle_fullscreen: KeyCode,
    pub toggle_animation: KeyCode,
    pub quit: KeyCode,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            toggle_fullscreen: KeyCode::F11,
            toggle_animation: KeyCode::Space,
            quit: KeyCode::Escape,
        }
    }
}

/// Load the configuration file, falling back to the defaults.
pub fn load(options: &Options) -> Config {
    let config_path = options.config_file.clone().or_else(installed_config);

    let mut config = match &config_path {
        Some(path) => load_from(path).unwrap_or_else(|err| {
            error!("Unable to load config {:?}: {}", path, err);
            Config::default()
        }),
        None => {
            info!("No config file found; using default");
            Config::default()
        },
    };

    options.override_config(&mut config);

    config
}

pub fn load_from(path: &Path) -> Result<Config> {
    let mut contents = fs::read_to_string(path)?;

    // Remove UTF-8 BOM.
    if contents.starts_with('\u{FEFF}') {
        contents = contents.split_off(3);
    }

    let config = parse_config(&contents)?;
    debug!("Loaded config from {:?}", path);

    Ok(config)
}

fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Get the location of the first found default config file paths
/// according to the following order:
///
/// 1. $XDG_CONFIG_HOME/coreui/coreui.toml
/// 2. $XDG_CONFIG_HOME/coreui.toml
#[cfg(not(windows))]
pub fn installed_config() -> Option<PathBuf> {
    // Try using XDG location by default.
    xdg::BaseDirectories::with_prefix("coreui")
        .ok()
        .and_then(|xdg| xdg.find_config_file(CONFIG_FILE))
        .or_else(|| {
            xdg::BaseDirectories::new()
                .ok()
                .and_then(|fallback| fallback.find_config_file(CONFIG_FILE))
        })
}

#[cfg(windows)]
pub fn installed_config() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join("coreui").join(CONFIG_FILE)).filter(|new| new.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("# Only comments.\n").unwrap(), Config::default());
    }

    #[test]
    fn partial_window_section() {
        let config = parse_config(
            r#"
            [window]
            title = "Demo"
            position = { x = -8 }
            dimensions = { width = 320, height = 200 }
            decorations = { caption = false }
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert_eq!(Point::from(config.window.position), Point::new(-8, 0));
        assert_eq!(Size::from(config.window.dimensions), Size::new(320, 200));
        assert_eq!(
            config.window.decorations.styles(),
            NativeWindowStyles::BORDER | NativeWindowStyles::RESIZEABLE
        );
        assert!(config.window.cursor_visible);
    }

    #[test]
    fn borderless_decorations() {
        let decorations = Decorations { border: false, caption: true, resizeable: true };
        assert_eq!(decorations.styles(), NativeWindowStyles::empty());
    }

    #[test]
    fn debug_and_bindings() {
        let config = parse_config(
            r#"
            [debug]
            log_level = "Debug"
            backend = "headless"
            frames = 10

            [bindings]
            quit = "Q"
            "#,
        )
        .unwrap();

        assert_eq!(config.debug.log_level, LevelFilter::Debug);
        assert_eq!(config.debug.backend, Backend::Headless);
        assert_eq!(config.debug.frames, Some(10));
        assert_eq!(config.bindings.quit, KeyCode::Q);
        assert_eq!(config.bindings.toggle_fullscreen, KeyCode::F11);
    }

    #[test]
    fn invalid_toml() {
        assert!(matches!(parse_config("[window"), Err(Error::Toml(_))));
        assert!(matches!(parse_config("[bindings]\nquit = \"Nope\""), Err(Error::Toml(_))));
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/coreui/coreui.toml");
        assert!(matches!(load_from(path), Err(Error::NotFound)));
    }
}
