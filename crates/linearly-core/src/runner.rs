//! `Runner`: envuelve un step con validación de inputs antes y de outputs
//! después, y ejecuta las tres unidades con el reducer.
//!
//! El step sólo se ejecuta si su contrato de inputs pasó; sus outputs se
//! verifican antes de devolver el control al reducer que lo contiene.
use std::sync::Arc;

use linearly_state::State;

use crate::reducer::{reduce, Returned, StepResult, Unit};
use crate::step::Step;
use crate::validation::Validation;

pub struct Runner {
    step: Arc<dyn Step>,
    preflight: Validation,
    postflight: Validation,
}

impl Runner {
    pub fn new(step: Arc<dyn Step>) -> Self {
        let name = step.name().to_string();
        let preflight = Validation::inputs(&step.inputs()).on(name.as_str());
        let postflight = Validation::outputs(&step.outputs()).on(name);
        Self { step,
               preflight,
               postflight }
    }

    pub fn call(&self, state: &State) -> State {
        let body = Invoke(self.step.as_ref());
        let units: [&dyn Unit; 3] = [&self.preflight, &body, &self.postflight];
        reduce(state.clone(), units)
    }
}

impl Unit for Runner {
    fn name(&self) -> &str {
        self.step.name()
    }

    fn invoke(&self, state: &State) -> StepResult {
        Ok(Returned::State(self.call(state)))
    }
}

/// El step en sí como unidad del reducer.
struct Invoke<'a>(&'a dyn Step);

impl Unit for Invoke<'_> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn invoke(&self, state: &State) -> StepResult {
        self.0.call(state)
    }
}
