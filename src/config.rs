use clap::{ArgAction, Parser, Subcommand, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_DEVICE};
use crate::display::{Color, TftOptions};
use crate::pacer::{PacingConfig, PacingProfile};
use crate::protocol::{FontSize, Rotation};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub connection: Option<ConnectionConfig>,
    pub screen: Option<ScreenConfig>,
    /// delay overrides; measured values, change with care
    pub pacing: Option<PacingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConnectionConfig {
    pub device: Option<String>,       // e.g. "/dev/ttyAMA0"
    pub baud_rate: Option<u32>,
    pub clear_on_exit: Option<bool>,
    pub flush: Option<bool>,
}

/// Applied once after connecting
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScreenConfig {
    pub rotation: Option<Rotation>,
    pub theme: Option<crate::display::Theme>,
    pub background: Option<Color>,
}

impl Config {
    pub fn device(&self) -> &str {
        self.connection
            .as_ref()
            .and_then(|c| c.device.as_deref())
            .unwrap_or(DEFAULT_DEVICE)
    }

    pub fn baud_rate(&self) -> u32 {
        self.connection.as_ref().and_then(|c| c.baud_rate).unwrap_or(DEFAULT_BAUD_RATE)
    }

    pub fn tft_options(&self) -> TftOptions {
        let conn = self.connection.clone().unwrap_or_default();
        let pacing = match self.pacing.as_ref() {
            Some(p) => PacingProfile::default().with_overrides(p),
            None => PacingProfile::default(),
        };
        TftOptions {
            clear_on_exit: conn.clear_on_exit.unwrap_or(true),
            flush: conn.flush.unwrap_or(true),
            pacing,
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "serialtft", version, about = "Drive a Hobbytronics serial TFT")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(short = 'v', long, alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Serial device the TFT is wired to
    #[arg(short = 'd', long, value_hint = ValueHint::FilePath)]
    pub device: Option<String>,
    #[arg(short = 'b', long)]
    pub baud_rate: Option<u32>,
    /// leave the last frame on screen at exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_clear_on_exit: bool,
    /// pace drawing commands instead of draining after every write
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_flush: bool,
    #[arg(long, value_enum)]
    pub rotation: Option<Rotation>,
    /// record frames and print them as hex instead of opening the device
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum Action {
    /// Blank the screen
    Clear,
    /// Print text at the cursor (or at a character cell)
    Text {
        text: String,
        /// finish with a carriage return
        #[arg(long, action = ArgAction::SetTrue)]
        line: bool,
        #[arg(long, requires = "row")]
        col: Option<i32>,
        #[arg(long, requires = "col")]
        row: Option<i32>,
        #[arg(long, value_enum)]
        font: Option<FontSize>,
        #[arg(long, value_enum)]
        color: Option<Color>,
    },
    /// Load a built-in palette theme into the user slots
    Theme {
        #[arg(value_enum)]
        theme: crate::display::Theme,
    },
    /// Redefine one palette slot from a hex string
    Palette {
        #[arg(value_enum)]
        slot: Color,
        /// e.g. "#268bd2"
        hex: String,
    },
    /// Backlight level
    Brightness {
        level: u8,
    },
    /// Analog clock face
    Clock {
        #[arg(long, default_value_t = 60)]
        seconds: u32,
    },
    /// Colored circles raining down the screen
    Rain {
        #[arg(long, default_value_t = 200)]
        frames: u32,
    },
    /// Random bar chart
    Bars,
}

impl Action {
    /// One-shot actions whose result should stay on screen after exit
    pub fn leaves_output(&self) -> bool {
        !matches!(self, Action::Clock { .. } | Action::Rain { .. })
    }
}

/// Public entry point: read YAML, layer CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/serialtft/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/serialtft/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/serialtft.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["serialtft.yaml", "config.yaml", "config/serialtft.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    // connection
    match (&mut dst.connection, src.connection) {
        (None, Some(c)) => dst.connection = Some(c),
        (Some(d), Some(s)) => merge_connection(d, s),
        _ => {}
    }
    match (&mut dst.screen, src.screen) {
        (None, Some(c)) => dst.screen = Some(c),
        (Some(d), Some(s)) => merge_screen(d, s),
        _ => {}
    }
    match (&mut dst.pacing, src.pacing) {
        (None, Some(c)) => dst.pacing = Some(c),
        (Some(d), Some(s)) => merge_pacing(d, s),
        _ => {}
    }
}

fn merge_connection(dst: &mut ConnectionConfig, src: ConnectionConfig) {
    if src.device.is_some()        { dst.device = src.device; }
    if src.baud_rate.is_some()     { dst.baud_rate = src.baud_rate; }
    if src.clear_on_exit.is_some() { dst.clear_on_exit = src.clear_on_exit; }
    if src.flush.is_some()         { dst.flush = src.flush; }
}

fn merge_screen(dst: &mut ScreenConfig, src: ScreenConfig) {
    if src.rotation.is_some()   { dst.rotation = src.rotation; }
    if src.theme.is_some()      { dst.theme = src.theme; }
    if src.background.is_some() { dst.background = src.background; }
}

fn merge_pacing(dst: &mut PacingConfig, src: PacingConfig) {
    if src.clear_settle_ms.is_some()           { dst.clear_settle_ms = src.clear_settle_ms; }
    if src.pixel_ms.is_some()                  { dst.pixel_ms = src.pixel_ms; }
    if src.line_ms.is_some()                   { dst.line_ms = src.line_ms; }
    if src.box_ms.is_some()                    { dst.box_ms = src.box_ms; }
    if src.filled_box_ms.is_some()             { dst.filled_box_ms = src.filled_box_ms; }
    if src.circle_base_ms.is_some()            { dst.circle_base_ms = src.circle_base_ms; }
    if src.circle_log_divisor.is_some()        { dst.circle_log_divisor = src.circle_log_divisor; }
    if src.filled_circle_log_divisor.is_some() { dst.filled_circle_log_divisor = src.filled_circle_log_divisor; }
    if src.text_packet_ms.is_some()            { dst.text_packet_ms = src.text_packet_ms; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    let any_conn = cli.device.is_some()
        || cli.baud_rate.is_some()
        || cli.no_clear_on_exit
        || cli.no_flush;

    if any_conn && cfg.connection.is_none() {
        cfg.connection = Some(ConnectionConfig::default());
    }
    if let Some(conn) = cfg.connection.as_mut() {
        if cli.device.is_some()    { conn.device = cli.device.clone(); }
        if cli.baud_rate.is_some() { conn.baud_rate = cli.baud_rate; }
        if cli.no_clear_on_exit    { conn.clear_on_exit = Some(false); }
        if cli.no_flush            { conn.flush = Some(false); }
    }
    if let Some(rotation) = cli.rotation {
        cfg.screen.get_or_insert_with(ScreenConfig::default).rotation = Some(rotation);
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(ConfigError::Validation(format!("unknown log_level {:?}", level))),
        }
    }
    if let Some(conn) = cfg.connection.as_ref() {
        if let Some(device) = conn.device.as_deref() {
            if device.trim().is_empty() {
                return Err(ConfigError::Validation("connection device must not be empty".into()));
            }
        }
        if let Some(baud) = conn.baud_rate {
            if !baud_ok(baud) {
                return Err(ConfigError::Validation(format!("unsupported baud_rate {}", baud)));
            }
        }
    }
    if let Some(pacing) = cfg.pacing.as_ref() {
        for (name, value) in pacing.delays_ms() {
            if let Some(ms) = value {
                if !ms.is_finite() || ms < 0.0 {
                    return Err(ConfigError::Validation(format!("pacing {} must be >= 0", name)));
                }
            }
        }
        for (name, value) in pacing.divisors() {
            if let Some(k) = value {
                if !k.is_finite() || k <= 0.0 {
                    return Err(ConfigError::Validation(format!("pacing {} must be > 0", name)));
                }
            }
        }
    }
    Ok(())
}

#[cfg(unix)]
fn baud_ok(baud: u32) -> bool {
    crate::display::drivers::serial::baud_supported(baud)
}

#[cfg(not(unix))]
fn baud_ok(baud: u32) -> bool {
    baud > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Theme;
    use std::time::Duration;

    const SAMPLE: &str = "
log_level: debug
connection:
  device: /dev/ttyUSB0
  baud_rate: 19200
  flush: false
screen:
  rotation: landscape
  theme: solarized
pacing:
  clear_settle_ms: 250
  filled_circle_log_divisor: 100
";

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["serialtft"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.device(), "/dev/ttyAMA0");
        assert_eq!(cfg.baud_rate(), 9600);
        let opts = cfg.tft_options();
        assert!(opts.clear_on_exit);
        assert!(opts.flush);
        assert_eq!(opts.pacing, PacingProfile::default());
    }

    #[test]
    fn test_parse_yaml() {
        let cfg = parse_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.device(), "/dev/ttyUSB0");
        assert_eq!(cfg.baud_rate(), 19200);
        let screen = cfg.screen.clone().unwrap();
        assert_eq!(screen.rotation, Some(Rotation::Landscape));
        assert_eq!(screen.theme, Some(Theme::Solarized));
        let opts = cfg.tft_options();
        assert!(!opts.flush);
        assert!(opts.clear_on_exit);
        assert_eq!(opts.pacing.clear_settle, Duration::from_millis(250));
        assert_eq!(opts.pacing.filled_circle_log_divisor, 100.0);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = parse_yaml(SAMPLE).unwrap();
        let src = parse_yaml("connection:\n  baud_rate: 9600\n").unwrap();
        merge(&mut dst, src);
        assert_eq!(dst.baud_rate(), 9600);
        assert_eq!(dst.device(), "/dev/ttyUSB0");
        assert_eq!(dst.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut cfg = parse_yaml(SAMPLE).unwrap();
        let cli = cli(&["--device", "/dev/ttyS1", "--no-clear-on-exit", "--rotation", "portrait-left", "clear"]);
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.device(), "/dev/ttyS1");
        assert_eq!(cfg.baud_rate(), 19200);
        assert!(!cfg.tft_options().clear_on_exit);
        assert_eq!(cfg.screen.unwrap().rotation, Some(Rotation::PortraitLeft));
        assert_eq!(cli.action, Some(Action::Clear));
    }

    #[test]
    fn test_cli_creates_connection_section() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--no-flush"]));
        assert!(!cfg.tft_options().flush);
    }

    #[test]
    fn test_cli_subcommands() {
        let c = cli(&["text", "hello", "--line", "--col", "1", "--row", "2", "--color", "user3"]);
        match c.action {
            Some(Action::Text { text, line, col, row, color, font }) => {
                assert_eq!(text, "hello");
                assert!(line);
                assert_eq!((col, row), (Some(1), Some(2)));
                assert_eq!(color, Some(Color::User3));
                assert_eq!(font, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(cli(&["theme", "flat-ui"]).action, Some(Action::Theme { theme: Theme::FlatUi }));
        assert_eq!(cli(&["clock"]).action, Some(Action::Clock { seconds: 60 }));
        assert_eq!(cli(&["brightness", "128"]).action, Some(Action::Brightness { level: 128 }));
        assert!(Cli::try_parse_from(["serialtft", "brightness", "300"]).is_err());
        assert!(Cli::try_parse_from(["serialtft", "text", "x", "--col", "1"]).is_err());
    }

    #[test]
    fn test_leaves_output() {
        assert!(Action::Clear.leaves_output());
        assert!(Action::Bars.leaves_output());
        assert!(!Action::Clock { seconds: 1 }.leaves_output());
        assert!(!Action::Rain { frames: 1 }.leaves_output());
    }

    #[test]
    fn test_validation_failures() {
        let bad_baud = parse_yaml("connection:\n  baud_rate: 12345\n").unwrap();
        assert!(matches!(validate(&bad_baud), Err(ConfigError::Validation(_))));

        let empty_device = parse_yaml("connection:\n  device: ''\n").unwrap();
        assert!(validate(&empty_device).is_err());

        let negative = parse_yaml("pacing:\n  line_ms: -1\n").unwrap();
        assert!(validate(&negative).is_err());

        let zero_divisor = parse_yaml("pacing:\n  circle_log_divisor: 0\n").unwrap();
        assert!(validate(&zero_divisor).is_err());

        let bad_level = parse_yaml("log_level: loud\n").unwrap();
        assert!(validate(&bad_level).is_err());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let c = cli(&["--config", "/nonexistent/serialtft.yaml"]);
        assert!(matches!(load(&c), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(parse_yaml("connection: [1, 2"), Err(ConfigError::Yaml(_))));
    }
}
