use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

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

/// Top-level app configuration. Layout geometry is intentionally absent:
/// the panel layout is a constant table, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>, // e.g., "info" | "debug"
    pub status: Option<StatusConfig>,
    pub render: Option<RenderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusConfig {
    /// Shell command whose stdout is one JSON status snapshot.
    pub command: Option<String>,
    /// Poll cadence in milliseconds.
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    pub fps: Option<u32>,
    pub sink: Option<SinkKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Term,
    Null,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "trackmarq", about = "Marquee now-playing panel", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Status poll command, e.g. "volumio status"
    #[arg(long)]
    pub status_command: Option<String>,
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
    #[arg(long)]
    pub fps: Option<u32>,
    /// Render frames to the terminal instead of discarding them
    #[arg(long, action = ArgAction::SetTrue)]
    pub term: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    load_with(cli)
}

pub fn load_with(cli: Cli) -> Result<Config, ConfigError> {
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
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

impl Config {
    pub fn status_command(&self) -> String {
        self.status
            .as_ref()
            .and_then(|s| s.command.clone())
            .unwrap_or_else(|| "volumio status".to_string())
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.status
            .as_ref()
            .and_then(|s| s.poll_interval_ms)
            .unwrap_or(1000)
    }

    pub fn fps(&self) -> u32 {
        self.render
            .as_ref()
            .and_then(|r| r.fps)
            .unwrap_or(crate::constants::DISPLAY_FPS)
    }

    pub fn sink(&self) -> SinkKind {
        self.render
            .as_ref()
            .and_then(|r| r.sink)
            .unwrap_or(SinkKind::Null)
    }
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/trackmarq/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/trackmarq/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/trackmarq.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["trackmarq.yaml", "config.yaml", "config/trackmarq.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.status, src.status) {
        (None, Some(c)) => dst.status = Some(c),
        (Some(d), Some(s)) => {
            if s.command.is_some() { d.command = s.command; }
            if s.poll_interval_ms.is_some() { d.poll_interval_ms = s.poll_interval_ms; }
        }
        _ => {}
    }
    match (&mut dst.render, src.render) {
        (None, Some(c)) => dst.render = Some(c),
        (Some(d), Some(s)) => {
            if s.fps.is_some() { d.fps = s.fps; }
            if s.sink.is_some() { d.sink = s.sink; }
        }
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    if cli.status_command.is_some() || cli.poll_interval_ms.is_some() {
        let status = cfg.status.get_or_insert_with(StatusConfig::default);
        if cli.status_command.is_some() { status.command = cli.status_command.clone(); }
        if cli.poll_interval_ms.is_some() { status.poll_interval_ms = cli.poll_interval_ms; }
    }
    if cli.fps.is_some() || cli.term {
        let render = cfg.render.get_or_insert_with(RenderConfig::default);
        if cli.fps.is_some() { render.fps = cli.fps; }
        if cli.term { render.sink = Some(SinkKind::Term); }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(render) = cfg.render.as_ref() {
        if let Some(fps) = render.fps {
            if fps == 0 || fps > 60 {
                return Err(ConfigError::Validation("render fps must be 1..=60".into()));
            }
        }
    }
    if let Some(status) = cfg.status.as_ref() {
        if status.poll_interval_ms == Some(0) {
            return Err(ConfigError::Validation("status poll_interval_ms must be > 0".into()));
        }
        if status.command.as_deref() == Some("") {
            return Err(ConfigError::Validation("status command must not be empty".into()));
        }
    }
    Ok(())
}
