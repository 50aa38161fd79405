//! linearly-state: el acumulador (`State`) que recorre un flow.
//!
//! El motor (`linearly-core`) sólo consume esta interfaz: crear un estado,
//! leer campos, y transicionar con `succeed` / `fail` / `finish`. Cada
//! transición devuelve un estado nuevo y deja rastro en `history`.
pub mod diff;
pub mod errors;
pub mod fault;
pub mod state;

pub use diff::{Change, Diff, Transition};
pub use errors::StateError;
pub use fault::Fault;
pub use state::{State, Status};
