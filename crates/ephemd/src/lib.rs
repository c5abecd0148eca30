//! Top-level facade crate for ephemd.
//!
//! Re-exports the core types and the server library so users can depend on a single crate.

pub mod core {
    pub use ephemd_core::*;
}

pub mod server {
    pub use ephemd_server::*;
}
