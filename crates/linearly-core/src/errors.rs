//! Errores del motor: contratos rotos y steps que no devuelven estado.
//!
//! Ninguno de estos errores se propaga con `Err` desde `Flow::call`: el
//! motor los guarda como error del `State` fallido.
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::failure::Failure;

/// Fase de validación en la que se rompió un contrato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Preflight: inputs requeridos.
    Inputs,
    /// Postflight: outputs prometidos.
    Outputs,
}

impl Phase {
    fn copy(self) -> &'static str {
        match self {
            Phase::Inputs => "failed input expectations",
            Phase::Outputs => "failed output expectations",
        }
    }
}

/// Uno o más campos no cumplen las expectativas de un step o flow.
///
/// Se construye con `BrokenContract::inputs` o `BrokenContract::outputs`.
/// El mensaje lista los campos ordenados alfabéticamente:
/// `failed input expectations on Users::Find: [user_id]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BrokenContract {
    phase: Phase,
    origin: Option<String>,
    failures: IndexMap<String, Failure>,
    message: String,
}

impl BrokenContract {
    pub fn inputs(failures: IndexMap<String, Failure>) -> Self {
        Self::new(Phase::Inputs, failures)
    }

    pub fn outputs(failures: IndexMap<String, Failure>) -> Self {
        Self::new(Phase::Outputs, failures)
    }

    /// Identidad del step o flow cuyo contrato se rompió.
    pub fn on(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.message = Self::render(self.phase, self.origin.as_deref(), &self.failures);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn failures(&self) -> &IndexMap<String, Failure> {
        &self.failures
    }

    /// Campos fallidos en orden de declaración.
    pub fn keys(&self) -> Vec<&str> {
        self.failures.keys().map(String::as_str).collect()
    }

    pub fn failure(&self, field: &str) -> Option<Failure> {
        self.failures.get(field).copied()
    }

    fn new(phase: Phase, failures: IndexMap<String, Failure>) -> Self {
        let message = Self::render(phase, None, &failures);
        Self { phase,
               origin: None,
               failures,
               message }
    }

    fn render(phase: Phase, origin: Option<&str>, failures: &IndexMap<String, Failure>) -> String {
        let mut keys: Vec<&str> = failures.keys().map(String::as_str).collect();
        keys.sort_unstable();
        match origin {
            Some(origin) => format!("{} on {}: [{}]", phase.copy(), origin, keys.join(", ")),
            None => format!("{}: [{}]", phase.copy(), keys.join(", ")),
        }
    }
}

/// Un step devolvió algo que no es un `State`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{output}, returned from {step}, is not a State")]
pub struct StateNotReturned {
    output: Value,
    step: String,
}

impl StateNotReturned {
    pub fn new(output: Value, step: impl Into<String>) -> Self {
        Self { output, step: step.into() }
    }

    /// Valor devuelto en lugar del estado.
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Identidad del step que lo devolvió.
    pub fn step(&self) -> &str {
        &self.step
    }
}
