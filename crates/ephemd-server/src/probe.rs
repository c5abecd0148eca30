//! Readiness dependency probes.
//!
//! The demo deployment has no real dependencies, so no probe is registered
//! and `/health/ready` always answers ready. The seam exists so a future
//! dependency (queue, downstream service) can fail readiness with a 503
//! without touching the handler.

use async_trait::async_trait;

use ephemd_core::error::Result;

#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    fn name(&self) -> &'static str;
    async fn check(&self) -> Result<()>;
}
