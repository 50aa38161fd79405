//! Expectativas por campo y su evaluación.
//!
//! Un step declara, para cada campo que consume o produce, una de tres
//! expectativas:
//! - `Present`: basta con que el campo exista.
//! - `Kind`: el valor debe pertenecer a un `ValueKind`.
//! - `Predicate`: una función arbitraria sobre el valor.
//!
//! `Expectation::check` evalúa cualquiera de ellas sobre un valor.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Función booleana sobre el valor de un campo.
pub type Check = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Mapa ordenado nombre de campo -> expectativa.
pub type Expectations = IndexMap<String, Expectation>;

/// Familias de valores JSON. `Integer` y `Float` son subtipos de `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Any,
    Null,
    Bool,
    Number,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Pertenencia del valor a esta familia.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            ValueKind::Any => true,
            ValueKind::Null => value.is_null(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Number => value.is_number(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Float => value.is_f64(),
            ValueKind::String => value.is_string(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

#[derive(Clone)]
pub enum Expectation {
    Present,
    Kind(ValueKind),
    Predicate(Check),
}

impl Expectation {
    pub fn present() -> Self {
        Expectation::Present
    }

    pub fn kind(kind: ValueKind) -> Self {
        Expectation::Kind(kind)
    }

    pub fn predicate<F>(check: F) -> Self
        where F: Fn(&Value) -> bool + Send + Sync + 'static
    {
        Expectation::Predicate(Arc::new(check))
    }

    /// Evalúa la expectativa sobre un valor presente.
    ///
    /// `Present` siempre devuelve `true`: la existencia del campo ya la
    /// verificó la validación antes de llegar aquí.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Expectation::Present => true,
            Expectation::Kind(kind) => kind.admits(value),
            Expectation::Predicate(check) => check(value),
        }
    }
}

impl From<ValueKind> for Expectation {
    fn from(kind: ValueKind) -> Self {
        Expectation::Kind(kind)
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Present => f.write_str("Present"),
            Expectation::Kind(kind) => write!(f, "Kind({})", kind.name()),
            Expectation::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Los predicados se comparan por identidad.
impl PartialEq for Expectation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expectation::Present, Expectation::Present) => true,
            (Expectation::Kind(a), Expectation::Kind(b)) => a == b,
            (Expectation::Predicate(a), Expectation::Predicate(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Construye un `Expectations` a partir de pares `(nombre, expectativa)`.
///
/// ```
/// use linearly_core::{expectations, Expectation, ValueKind};
/// let exp = expectations([("user_id", Expectation::kind(ValueKind::Integer)),
///                         ("token", Expectation::present())]);
/// assert_eq!(exp.len(), 2);
/// ```
pub fn expectations<I, K, E>(pairs: I) -> Expectations
    where I: IntoIterator<Item = (K, E)>,
          K: Into<String>,
          E: Into<Expectation>
{
    pairs.into_iter().map(|(k, e)| (k.into(), e.into())).collect()
}
