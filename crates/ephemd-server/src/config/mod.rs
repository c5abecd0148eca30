//! Server config loader (strict parsing).
//!
//! Configuration comes from an optional YAML file plus two environment
//! overrides read once at startup: `PORT` (rewrites the listen port) and
//! `ENVIRONMENT` (name echoed by `/health`). A missing file falls back to
//! defaults so the demo runs with zero setup.

pub mod schema;

use std::fs;

use ephemd_core::error::{EphemdError, Result};

pub use schema::{AppConfig, ServerSection, TaskSection};

/// Default config file path.
pub const DEFAULT_PATH: &str = "ephemd.yaml";

pub fn load(path: &str) -> Result<AppConfig> {
    let mut cfg = match fs::read_to_string(path) {
        Ok(s) => parse(&s)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => return Err(EphemdError::Internal(format!("read config failed: {e}"))),
    };
    cfg.apply_overrides(
        std::env::var("PORT").ok().as_deref(),
        std::env::var("ENVIRONMENT").ok().as_deref(),
    )?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse(s: &str) -> Result<AppConfig> {
    serde_yaml::from_str(s).map_err(|e| EphemdError::BadRequest(format!("invalid yaml: {e}")))
}
