//! Motivo por el que un campo no pasó la validación.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// El campo no existe en el estado.
    Missing,
    /// El campo existe pero su valor no cumple la expectativa.
    Unexpected,
}

impl Failure {
    pub fn is_missing(self) -> bool {
        matches!(self, Failure::Missing)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Missing => f.write_str("[missing]"),
            Failure::Unexpected => f.write_str("[unexpected]"),
        }
    }
}
