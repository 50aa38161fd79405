//! `FnStep`: step dinámico armado a partir de un closure.
//!
//! Útil para steps pequeños y para tests, sin declarar un tipo propio.
use std::fmt;

use linearly_state::State;

use crate::expectation::Expectations;
use crate::reducer::StepResult;
use crate::step::Step;

pub struct FnStep<F> {
    name: String,
    inputs: Expectations,
    outputs: Expectations,
    body: F,
}

impl<F> FnStep<F> where F: Fn(&State) -> StepResult + Send + Sync
{
    pub fn new(name: impl Into<String>, inputs: Expectations, outputs: Expectations, body: F) -> Self {
        Self { name: name.into(),
               inputs,
               outputs,
               body }
    }
}

impl<F> Step for FnStep<F> where F: Fn(&State) -> StepResult + Send + Sync
{
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> Expectations {
        self.inputs.clone()
    }

    fn outputs(&self) -> Expectations {
        self.outputs.clone()
    }

    fn call(&self, state: &State) -> StepResult {
        (self.body)(state)
    }
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep")
         .field("name", &self.name)
         .field("inputs", &self.inputs)
         .field("outputs", &self.outputs)
         .finish()
    }
}

/// Atajo para `FnStep::new`.
pub fn from_fn<F>(name: impl Into<String>, inputs: Expectations, outputs: Expectations, body: F) -> FnStep<F>
    where F: Fn(&State) -> StepResult + Send + Sync
{
    FnStep::new(name, inputs, outputs, body)
}
