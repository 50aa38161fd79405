//! `Flow`: composición ordenada de steps con un contrato agregado.
//!
//! Al construirse, el flow infiere su contrato (`Contract::build`) una única
//! vez y prepara un `Runner` por step. Al invocarse ejecuta, con el reducer:
//!
//! ```text
//! [Validation::Inputs(flow), Runner(step1), ..., Runner(stepN), Validation::Outputs(flow)]
//! ```
//!
//! Un flow es inmutable: `prepend`, `append` y `>>` devuelven un flow nuevo
//! (los steps se comparten vía `Arc`, no se copian). Como implementa `Step`,
//! un flow puede anidarse dentro de otro.
use std::fmt;
use std::ops::Shr;
use std::sync::Arc;

use log::debug;

use linearly_state::State;

use crate::contract::Contract;
use crate::expectation::Expectations;
use crate::reducer::{reduce, Returned, StepResult, Unit};
use crate::runner::Runner;
use crate::step::Step;
use crate::validation::Validation;

const DEFAULT_NAME: &str = "Flow";

pub struct Flow {
    name: Option<String>,
    steps: Vec<Arc<dyn Step>>,
    runners: Vec<Runner>,
    contract: Contract,
    entry: Validation,
    exit: Validation,
    fingerprint: String,
}

impl Flow {
    /// Construye un flow con los steps en el orden dado.
    pub fn new<I>(steps: I) -> Self
        where I: IntoIterator<Item = Arc<dyn Step>>
    {
        Self::build(None, steps.into_iter().collect())
    }

    /// Igual que `new`, pero los errores de contrato del flow llevan `name`.
    pub fn named<I>(name: impl Into<String>, steps: I) -> Self
        where I: IntoIterator<Item = Arc<dyn Step>>
    {
        Self::build(Some(name.into()), steps.into_iter().collect())
    }

    /// Campos requeridos por el flow (ver `Contract`).
    pub fn inputs(&self) -> &Expectations {
        self.contract.inputs()
    }

    /// Campos producidos por el flow (ver `Contract`).
    pub fn outputs(&self) -> &Expectations {
        self.contract.outputs()
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn steps(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Hash de la definición (steps + campos del contrato).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Ejecuta el flow. Nunca devuelve `Err`: cualquier problema queda como
    /// error del estado devuelto.
    pub fn call(&self, state: State) -> State {
        let units = std::iter::once(&self.entry as &dyn Unit).chain(self.runners.iter().map(|r| r as &dyn Unit))
                                                             .chain(std::iter::once(&self.exit as &dyn Unit));
        reduce(state, units)
    }

    /// Nuevo flow con `step` antes de los steps actuales.
    pub fn prepend(&self, step: Arc<dyn Step>) -> Flow {
        let steps = std::iter::once(step).chain(self.steps.iter().cloned()).collect();
        Self::build(self.name.clone(), steps)
    }

    /// Nuevo flow con `step` después de los steps actuales.
    pub fn append(&self, step: Arc<dyn Step>) -> Flow {
        let steps = self.steps.iter().cloned().chain(std::iter::once(step)).collect();
        Self::build(self.name.clone(), steps)
    }

    fn build(name: Option<String>, steps: Vec<Arc<dyn Step>>) -> Self {
        let contract = Contract::build(&steps);
        let runners = steps.iter().cloned().map(Runner::new).collect();
        let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
        let fingerprint = contract.fingerprint(&names);
        let mut entry = Validation::inputs(contract.inputs());
        let mut exit = Validation::outputs(contract.outputs());
        if let Some(name) = &name {
            entry = entry.on(name.as_str());
            exit = exit.on(name.as_str());
        }
        debug!("flow `{}` built: steps={:?} inputs={:?} outputs={:?} fingerprint={}",
               name.as_deref().unwrap_or(DEFAULT_NAME),
               names,
               contract.inputs().keys().collect::<Vec<_>>(),
               contract.outputs().keys().collect::<Vec<_>>(),
               fingerprint);
        Self { name,
               steps,
               runners,
               contract,
               entry,
               exit,
               fingerprint }
    }
}

impl Step for Flow {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    fn inputs(&self) -> Expectations {
        self.contract.inputs().clone()
    }

    fn outputs(&self) -> Expectations {
        self.contract.outputs().clone()
    }

    fn call(&self, state: &State) -> StepResult {
        Ok(Returned::State(Flow::call(self, state.clone())))
    }
}

/// `flow >> step` agrega `step` al final, en un flow nuevo.
impl<S> Shr<S> for Flow where S: Step + 'static
{
    type Output = Flow;

    fn shr(self, rhs: S) -> Flow {
        self.append(Arc::new(rhs))
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
         .field("name", &Step::name(self))
         .field("steps", &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>())
         .field("contract", &self.contract)
         .field("fingerprint", &self.fingerprint)
         .finish()
    }
}
