//! Definiciones relacionadas a Steps.
//!
//! Un step declara los campos que requiere (`inputs`), los que produce
//! (`outputs`) y una transformación `State -> State`. Este módulo define:
//! - `Step`: variante dinámica, la instancia declara todo.
//! - `StaticStep` + `Static`: variante estática, declarada a nivel de tipo.
//! - `FnStep`: step dinámico a partir de un closure.
//! - `Chain`: encadenado `a.then(b)` que produce un `Flow`.

mod closure;
mod definition;
pub mod static_step;

pub use closure::{from_fn, FnStep};
pub use definition::{Chain, Step};
pub use static_step::{Bound, Static, StaticStep};
