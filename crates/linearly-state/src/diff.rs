//! Historial append-only de transiciones de un `State`.
//!
//! Cada transición (`create`, `succeed`, `fail`, `finish`) agrega exactamente
//! una entrada. Las validaciones del motor que pasan no agregan nada, por lo
//! que el largo del historial cuenta sólo cambios reales.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Valor previo y nuevo de un campo sobrescrito.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub before: Value,
    pub after: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diff {
    /// Estado inicial con sus campos.
    Created { fields: IndexMap<String, Value> },
    /// `succeed` con al menos un campo nuevo o modificado.
    Changed {
        added: IndexMap<String, Value>,
        changed: IndexMap<String, Change>,
    },
    /// `succeed` sin cambios efectivos.
    Unchanged,
    /// `fail`; guarda sólo el mensaje (el error vive en el estado).
    Failed { message: String },
    Finished,
}

impl Diff {
    /// Calcula el diff de aplicar `updates` sobre `fields`.
    pub(crate) fn between(fields: &IndexMap<String, Value>, updates: &IndexMap<String, Value>) -> Self {
        let mut added = IndexMap::new();
        let mut changed = IndexMap::new();
        for (key, after) in updates {
            match fields.get(key) {
                None => {
                    added.insert(key.clone(), after.clone());
                }
                Some(before) if before != after => {
                    changed.insert(key.clone(),
                                   Change { before: before.clone(),
                                            after: after.clone() });
                }
                Some(_) => {}
            }
        }
        if added.is_empty() && changed.is_empty() {
            Diff::Unchanged
        } else {
            Diff::Changed { added, changed }
        }
    }
}

/// Entrada del historial: el diff y el instante en que ocurrió.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub diff: Diff,
    pub at: DateTime<Utc>,
}

impl Transition {
    pub(crate) fn now(diff: Diff) -> Self {
        Self { diff, at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn splits_added_and_changed() {
        let fields = map(&[("a", json!(1)), ("b", json!(2))]);
        let updates = map(&[("a", json!(1)), ("b", json!(3)), ("c", json!("x"))]);
        match Diff::between(&fields, &updates) {
            Diff::Changed { added, changed } => {
                assert_eq!(added, map(&[("c", json!("x"))]));
                assert_eq!(changed.len(), 1);
                assert_eq!(changed["b"], Change { before: json!(2), after: json!(3) });
            }
            other => panic!("expected Changed, got {:?}", other),
        }
    }

    #[test]
    fn identical_updates_are_unchanged() {
        let fields = map(&[("a", json!(1))]);
        assert_eq!(Diff::between(&fields, &map(&[("a", json!(1))])), Diff::Unchanged);
        assert_eq!(Diff::between(&fields, &IndexMap::new()), Diff::Unchanged);
    }
}
