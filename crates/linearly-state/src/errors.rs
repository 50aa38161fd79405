//! Errores de acceso a campos del estado.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StateError {
    /// El campo no existe en el estado.
    #[error("field `{0}` is not present in state")]
    MissingField(String),
    /// El campo existe pero no se puede leer como el tipo pedido.
    #[error("field `{field}` is not a valid {expected}: {reason}")]
    Mismatch {
        field: String,
        expected: &'static str,
        reason: String,
    },
}
