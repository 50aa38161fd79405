//! Validación de inputs (preflight) y outputs (postflight) contra un mapa de
//! expectativas por campo.
//!
//! La validación nunca devuelve `Err`: si algo falla, el estado transiciona a
//! fallido con un `BrokenContract`; si todo pasa, devuelve el estado intacto.
use indexmap::IndexMap;
use log::debug;

use linearly_state::State;

use crate::errors::{BrokenContract, Phase};
use crate::expectation::Expectations;
use crate::failure::Failure;
use crate::reducer::{Returned, StepResult, Unit};

pub struct Validation {
    phase: Phase,
    origin: Option<String>,
    label: String,
    expectations: Expectations,
}

impl Validation {
    /// Validación preflight de los inputs declarados.
    pub fn inputs(expectations: &Expectations) -> Self {
        Self::new(Phase::Inputs, expectations)
    }

    /// Validación postflight de los outputs declarados.
    pub fn outputs(expectations: &Expectations) -> Self {
        Self::new(Phase::Outputs, expectations)
    }

    /// Asocia la identidad del step o flow validado (aparece en el error).
    pub fn on(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.label = format!("{}({})", Self::kind_label(self.phase), origin);
        self.origin = Some(origin);
        self
    }

    /// Aplica las expectativas a `state`.
    pub fn call(&self, state: &State) -> State {
        let failures = self.failures(state);
        if failures.is_empty() {
            return state.clone();
        }
        let broken = match self.phase {
            Phase::Inputs => BrokenContract::inputs(failures),
            Phase::Outputs => BrokenContract::outputs(failures),
        };
        let broken = match &self.origin {
            Some(origin) => broken.on(origin.as_str()),
            None => broken,
        };
        debug!("{}", broken);
        state.fail(broken)
    }

    /// Un campo es `Missing` o `Unexpected`, nunca ambos.
    fn failures(&self, state: &State) -> IndexMap<String, Failure> {
        let mut failures = IndexMap::new();
        for (field, expectation) in &self.expectations {
            match state.value(field) {
                None => {
                    failures.insert(field.clone(), Failure::Missing);
                }
                Some(value) if !expectation.check(value) => {
                    failures.insert(field.clone(), Failure::Unexpected);
                }
                Some(_) => {}
            }
        }
        failures
    }

    fn new(phase: Phase, expectations: &Expectations) -> Self {
        Self { phase,
               origin: None,
               label: Self::kind_label(phase).to_string(),
               expectations: expectations.clone() }
    }

    fn kind_label(phase: Phase) -> &'static str {
        match phase {
            Phase::Inputs => "Validation::Inputs",
            Phase::Outputs => "Validation::Outputs",
        }
    }
}

impl Unit for Validation {
    fn name(&self) -> &str {
        &self.label
    }

    fn invoke(&self, state: &State) -> StepResult {
        Ok(Returned::State(self.call(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::{expectations, Expectation, ValueKind};
    use serde_json::json;

    fn state() -> State {
        State::create([("key", json!("val"))])
    }

    fn broken(state: &State) -> &BrokenContract {
        state.error()
             .and_then(|e| e.downcast_ref::<BrokenContract>())
             .expect("state should carry a BrokenContract")
    }

    #[test]
    fn passing_validation_returns_the_same_state() {
        for exp in [Expectation::present(),
                    Expectation::kind(ValueKind::String),
                    Expectation::predicate(|v| v.as_str().map(|s| s.len() == 3).unwrap_or(false))]
        {
            let input = state();
            let out = Validation::inputs(&expectations([("key", exp)])).call(&input);
            assert!(out.successful());
            assert_eq!(out, input);
        }
    }

    #[test]
    fn missing_field_is_reported_as_missing() {
        for phase_inputs in [true, false] {
            let exp = expectations([("other", Expectation::present())]);
            let validation = if phase_inputs {
                Validation::inputs(&exp)
            } else {
                Validation::outputs(&exp)
            };
            let out = validation.call(&state());
            assert!(out.failed());
            let err = broken(&out);
            assert_eq!(err.phase(), if phase_inputs { Phase::Inputs } else { Phase::Outputs });
            assert_eq!(err.failures(), &IndexMap::from([("other".to_string(), Failure::Missing)]));
        }
    }

    #[test]
    fn wrong_kind_is_reported_as_unexpected() {
        let out = Validation::outputs(&expectations([("key", ValueKind::Number)])).call(&state());
        let err = broken(&out);
        assert_eq!(err.phase(), Phase::Outputs);
        assert_eq!(err.failure("key"), Some(Failure::Unexpected));
    }

    #[test]
    fn failing_predicate_is_reported_as_unexpected() {
        let exp = expectations([("key",
                                 Expectation::predicate(|v| v.as_str().map(|s| s.len() == 4).unwrap_or(false)))]);
        let out = Validation::inputs(&exp).call(&state());
        assert_eq!(broken(&out).failure("key"), Some(Failure::Unexpected));
    }

    #[test]
    fn reports_missing_and_unexpected_in_one_pass() {
        let exp = expectations([("key", Expectation::kind(ValueKind::Integer)), ("other", Expectation::present())]);
        let out = Validation::inputs(&exp).on("Users::Find").call(&state());
        let err = broken(&out);
        assert_eq!(err.failure("key"), Some(Failure::Unexpected));
        assert_eq!(err.failure("other"), Some(Failure::Missing));
        assert_eq!(err.to_string(), "failed input expectations on Users::Find: [key, other]");
    }
}
