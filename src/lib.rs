//! linearly
//!
//! Fachada del workspace:
//! - Re-exporta el motor (`linearly-core`) y el estado (`linearly-state`).
//! - Expone `config` para la configuración cargada desde el entorno.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;

pub use linearly_core::*;
pub use linearly_state::{Change, Diff, StateError, Status, Transition};
