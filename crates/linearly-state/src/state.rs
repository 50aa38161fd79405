//! `State`: acumulador inmutable que recorre un flow.
//!
//! Todas las transiciones son no destructivas: `succeed`, `fail` y `finish`
//! reciben `&self` y devuelven un estado nuevo con una entrada más en el
//! historial. El `correlation_id` se asigna en `create` y se conserva en
//! todas las transiciones posteriores.
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::diff::{Diff, Transition};
use crate::errors::StateError;
use crate::fault::Fault;

/// Estado de la ejecución.
///
/// - `Success`: se puede seguir ejecutando steps.
/// - `Failure`: terminal, lleva el error que la causó.
/// - `Finished`: terminal pero exitoso (un step decidió cortar el flow).
#[derive(Debug, Clone)]
pub enum Status {
    Success,
    Failure(Fault),
    Finished,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure(_) => "failure",
            Status::Finished => "finished",
        }
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Status::Success, Status::Success) | (Status::Finished, Status::Finished) => true,
            (Status::Failure(a), Status::Failure(b)) => Fault::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    correlation_id: Uuid,
    fields: IndexMap<String, Value>,
    status: Status,
    history: Vec<Transition>,
}

impl State {
    /// Crea un estado exitoso con los campos iniciales dados.
    pub fn create<I, K>(fields: I) -> Self
        where I: IntoIterator<Item = (K, Value)>,
              K: Into<String>
    {
        let fields: IndexMap<String, Value> = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let created = Transition::now(Diff::Created { fields: fields.clone() });
        Self { correlation_id: Uuid::new_v4(),
               fields,
               status: Status::Success,
               history: vec![created] }
    }

    /// Estado exitoso sin campos.
    pub fn empty() -> Self {
        Self::create(Vec::<(String, Value)>::new())
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Valor crudo de un campo; error si no existe.
    pub fn fetch(&self, name: &str) -> Result<&Value, StateError> {
        self.fields.get(name).ok_or_else(|| StateError::MissingField(name.to_string()))
    }

    /// Lee un campo deserializándolo a `T`.
    pub fn get<T>(&self, name: &str) -> Result<T, StateError>
        where T: DeserializeOwned
    {
        let value = self.fetch(name)?;
        T::deserialize(value).map_err(|e| StateError::Mismatch { field: name.to_string(),
                                                                  expected: std::any::type_name::<T>(),
                                                                  reason: e.to_string() })
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge no destructivo de `updates`; registra `Changed` o `Unchanged`.
    pub fn succeed<I, K>(&self, updates: I) -> State
        where I: IntoIterator<Item = (K, Value)>,
              K: Into<String>
    {
        let updates: IndexMap<String, Value> = updates.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let diff = Diff::between(&self.fields, &updates);
        let mut fields = self.fields.clone();
        fields.extend(updates);
        self.transition(fields, Status::Success, diff)
    }

    /// Transiciona a `Failure` con el error dado.
    pub fn fail<E>(&self, error: E) -> State
        where E: Into<Fault>
    {
        let fault = error.into();
        let diff = Diff::Failed { message: fault.to_string() };
        self.transition(self.fields.clone(), Status::Failure(fault), diff)
    }

    /// Transiciona a `Finished`: terminal, pero exitoso.
    pub fn finish(&self) -> State {
        self.transition(self.fields.clone(), Status::Finished, Diff::Finished)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, Status::Failure(_))
    }

    pub fn finished(&self) -> bool {
        matches!(self.status, Status::Finished)
    }

    /// Un estado `Finished` también es exitoso.
    pub fn successful(&self) -> bool {
        !self.failed()
    }

    pub fn error(&self) -> Option<&Fault> {
        match &self.status {
            Status::Failure(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Devuelve el estado si no falló, o su error.
    pub fn resolve(self) -> Result<State, Fault> {
        match &self.status {
            Status::Failure(fault) => Err(fault.clone()),
            _ => Ok(self),
        }
    }

    /// Representación JSON para logs y salida de CLI.
    pub fn snapshot(&self) -> Value {
        json!({
            "correlation_id": self.correlation_id,
            "status": self.status.label(),
            "error": self.error().map(|e| e.to_string()),
            "fields": self.fields,
            "history": self.history,
        })
    }

    fn transition(&self, fields: IndexMap<String, Value>, status: Status, diff: Diff) -> State {
        let mut history = self.history.clone();
        history.push(Transition::now(diff));
        State { correlation_id: self.correlation_id,
                fields,
                status,
                history }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::empty()
    }
}
