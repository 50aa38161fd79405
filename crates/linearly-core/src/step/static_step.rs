//! Steps estáticos: la lógica depende únicamente del estado recibido.
//!
//! Un `StaticStep` declara inputs/outputs a nivel de tipo y escribe su cuerpo
//! contra un `Bound`, una vista del estado ligada a una sola invocación con
//! accesores tipados (`get::<T>`, `fetch`, `has`). El punto de entrada
//! `StaticStep::execute` atrapa cualquier `Err` del cuerpo y lo convierte en
//! un estado fallido, de modo que el autor del step no necesita hacerlo.
//!
//! ```
//! use linearly_core::{expectations, Bound, Fault, StaticStep, ValueKind};
//! use linearly_state::State;
//! use serde_json::json;
//!
//! struct Increment;
//!
//! impl StaticStep for Increment {
//!     fn inputs() -> linearly_core::Expectations {
//!         expectations([("number", ValueKind::Integer)])
//!     }
//!
//!     fn outputs() -> linearly_core::Expectations {
//!         expectations([("string", ValueKind::String)])
//!     }
//!
//!     fn call(bound: &Bound<'_>) -> Result<State, Fault> {
//!         let number: i64 = bound.get("number")?;
//!         Ok(bound.succeed([("string", json!((number + 1).to_string()))]))
//!     }
//! }
//!
//! let out = Increment::execute(&State::create([("number", json!(7))]));
//! assert_eq!(out.get::<String>("string").unwrap(), "8");
//! ```
use std::fmt;
use std::marker::PhantomData;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use linearly_state::{Fault, State, StateError};

use crate::expectation::Expectations;
use crate::reducer::{Returned, StepResult};
use crate::step::definition::short_type_name;
use crate::step::Step;

/// Vista de un `State` ligada a una única ejecución de un `StaticStep`.
pub struct Bound<'a> {
    state: &'a State,
}

impl<'a> Bound<'a> {
    pub fn new(state: &'a State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &'a State {
        self.state
    }

    pub fn fetch(&self, name: &str) -> Result<&'a Value, StateError> {
        self.state.fetch(name)
    }

    pub fn get<T>(&self, name: &str) -> Result<T, StateError>
        where T: DeserializeOwned
    {
        self.state.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.state.has(name)
    }

    pub fn correlation_id(&self) -> Uuid {
        self.state.correlation_id()
    }

    pub fn succeed<I, K>(&self, updates: I) -> State
        where I: IntoIterator<Item = (K, Value)>,
              K: Into<String>
    {
        self.state.succeed(updates)
    }

    pub fn fail<E>(&self, error: E) -> State
        where E: Into<Fault>
    {
        self.state.fail(error)
    }

    pub fn finish(&self) -> State {
        self.state.finish()
    }
}

pub trait StaticStep: 'static {
    fn inputs() -> Expectations;

    fn outputs() -> Expectations;

    /// Cuerpo del step.
    fn call(bound: &Bound<'_>) -> Result<State, Fault>;

    /// Punto de entrada: ejecuta el cuerpo ligado a `state` y convierte
    /// cualquier fault en un estado fallido.
    fn execute(state: &State) -> State {
        match Self::call(&Bound::new(state)) {
            Ok(next) => next,
            Err(fault) => {
                debug!("static step `{}` raised: {}", short_type_name(std::any::type_name::<Self>()), fault);
                state.fail(fault)
            }
        }
    }

    /// Adaptador para componer este step dentro de un `Flow`.
    fn step() -> Static<Self>
        where Self: Sized
    {
        Static::new()
    }
}

/// Adaptador `StaticStep` -> `Step`.
pub struct Static<S>(PhantomData<fn() -> S>);

impl<S> Static<S> {
    pub fn new() -> Self {
        Static(PhantomData)
    }
}

impl<S> Default for Static<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Static<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> Copy for Static<S> {}

impl<S> fmt::Debug for Static<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Static<{}>", std::any::type_name::<S>())
    }
}

impl<S> Step for Static<S> where S: StaticStep
{
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<S>())
    }

    fn inputs(&self) -> Expectations {
        S::inputs()
    }

    fn outputs(&self) -> Expectations {
        S::outputs()
    }

    fn call(&self, state: &State) -> StepResult {
        Ok(Returned::State(S::execute(state)))
    }
}
