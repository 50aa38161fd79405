//! Inferencia del contrato de un flow a partir de sus steps.
//!
//! Se simula el flujo de datos en orden de declaración, sin ejecutar nada:
//! - un input de un step se agrega a `inputs` sólo si ningún step anterior
//!   ya lo produce ni lo requiere (gana la primera expectativa declarada);
//! - los outputs se mezclan en `outputs`; si dos steps producen el mismo
//!   campo, gana la expectativa del step posterior (la posición es la de la
//!   primera declaración).
//!
//! El resultado se congela: `Contract` no expone mutadores.
use std::sync::Arc;

use serde_json::json;

use crate::constants::CONTRACT_VERSION;
use crate::expectation::Expectations;
use crate::hashing::hash_value;
use crate::step::Step;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
    inputs: Expectations,
    outputs: Expectations,
}

impl Contract {
    pub fn build(steps: &[Arc<dyn Step>]) -> Self {
        let mut inputs = Expectations::new();
        let mut outputs = Expectations::new();
        for step in steps {
            for (field, expectation) in step.inputs() {
                if !inputs.contains_key(&field) && !outputs.contains_key(&field) {
                    inputs.insert(field, expectation);
                }
            }
            for (field, expectation) in step.outputs() {
                outputs.insert(field, expectation);
            }
        }
        Self { inputs, outputs }
    }

    /// Campos que el flow necesita recibir.
    pub fn inputs(&self) -> &Expectations {
        &self.inputs
    }

    /// Campos que el flow garantiza producir.
    pub fn outputs(&self) -> &Expectations {
        &self.outputs
    }

    /// Hash estable de la forma del flow: steps en orden y campos del
    /// contrato. No depende de las expectativas (los predicados no son
    /// serializables).
    pub fn fingerprint(&self, step_names: &[&str]) -> String {
        let inputs: Vec<&str> = self.inputs.keys().map(String::as_str).collect();
        let outputs: Vec<&str> = self.outputs.keys().map(String::as_str).collect();
        hash_value(&json!({
            "contract_version": CONTRACT_VERSION,
            "steps": step_names,
            "inputs": inputs,
            "outputs": outputs,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::{expectations, Expectation, ValueKind};
    use crate::step::from_fn;
    use linearly_state::State;

    fn step(inputs: Expectations, outputs: Expectations) -> Arc<dyn Step> {
        Arc::new(from_fn("step", inputs, outputs, |s: &State| Ok(s.clone().into())))
    }

    #[test]
    fn produced_fields_are_not_required_downstream() {
        let steps = [step(expectations([("key", ValueKind::String)]), expectations([("new_key", ValueKind::String)])),
                     step(expectations([("new_key", ValueKind::Any), ("other", ValueKind::Number)]),
                          Expectations::new())];
        let contract = Contract::build(&steps);
        assert_eq!(contract.inputs().keys().collect::<Vec<_>>(), vec!["key", "other"]);
        assert_eq!(contract.outputs().keys().collect::<Vec<_>>(), vec!["new_key"]);
    }

    #[test]
    fn first_input_expectation_wins() {
        let steps = [step(expectations([("key", ValueKind::String)]), Expectations::new()),
                     step(expectations([("key", ValueKind::Number)]), Expectations::new())];
        let contract = Contract::build(&steps);
        assert_eq!(contract.inputs()["key"], Expectation::kind(ValueKind::String));
    }

    #[test]
    fn later_output_expectation_wins_keeping_position() {
        let steps = [step(Expectations::new(), expectations([("a", ValueKind::String), ("b", ValueKind::Bool)])),
                     step(Expectations::new(), expectations([("a", ValueKind::Integer)]))];
        let contract = Contract::build(&steps);
        assert_eq!(contract.outputs().keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(contract.outputs()["a"], Expectation::kind(ValueKind::Integer));
    }

    #[test]
    fn a_field_required_after_being_produced_is_not_an_input() {
        let steps = [step(Expectations::new(), expectations([("x", Expectation::present())])),
                     step(expectations([("x", Expectation::present())]), Expectations::new())];
        assert!(Contract::build(&steps).inputs().is_empty());
    }

    #[test]
    fn fingerprint_tracks_step_order() {
        let contract = Contract::default();
        assert_eq!(contract.fingerprint(&["a", "b"]), contract.fingerprint(&["a", "b"]));
        assert_ne!(contract.fingerprint(&["a", "b"]), contract.fingerprint(&["b", "a"]));
    }
}
