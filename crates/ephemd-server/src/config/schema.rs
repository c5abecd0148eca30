use ephemd_core::error::{EphemdError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub tasks: TaskSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            tasks: TaskSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EphemdError::BadRequest("config version must be 1".into()));
        }

        self.server.validate()?;
        self.tasks.validate()?;

        Ok(())
    }

    /// Apply the startup environment overrides (`PORT`, `ENVIRONMENT`).
    pub fn apply_overrides(&mut self, port: Option<&str>, environment: Option<&str>) -> Result<()> {
        if let Some(port) = port {
            let port: u16 = port.parse().map_err(|_| {
                EphemdError::BadRequest(format!("PORT must be a port number, got: {port}"))
            })?;
            let host = match self.server.listen.rsplit_once(':') {
                Some((h, _)) => h.to_string(),
                None => self.server.listen.clone(),
            };
            self.server.listen = format!("{host}:{port}");
        }
        if let Some(environment) = environment {
            self.server.environment = environment.to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Deployment name echoed by `/health`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Host-header allowlist. `"*"` admits everything.
    #[serde(default = "default_wildcard")]
    pub allowed_hosts: Vec<String>,

    /// CORS origin allowlist. `"*"` admits everything.
    #[serde(default = "default_wildcard")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            environment: default_environment(),
            allowed_hosts: default_wildcard(),
            allowed_origins: default_wildcard(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.allowed_hosts.is_empty() {
            return Err(EphemdError::BadRequest(
                "server.allowed_hosts must not be empty".into(),
            ));
        }
        if self.allowed_origins.is_empty() {
            return Err(EphemdError::BadRequest(
                "server.allowed_origins must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_environment() -> String {
    "development".into()
}
fn default_wildcard() -> Vec<String> {
    vec!["*".into()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSection {
    /// Fixed delay before a created task flips to completed.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

impl TaskSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=600_000).contains(&self.processing_delay_ms) {
            return Err(EphemdError::BadRequest(
                "tasks.processing_delay_ms must be between 10 and 600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_processing_delay_ms() -> u64 {
    2000
}
