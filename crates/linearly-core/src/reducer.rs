//! Reducer: el bucle de ejecución compartido por `Flow` y `Runner`.
//!
//! Recibe un estado y una lista ordenada de unidades invocables y las aplica
//! de izquierda a derecha. Invariante: una vez que el estado está fallido o
//! terminado, ninguna unidad posterior lo observa.
use log::{debug, trace};
use serde_json::Value;

use linearly_state::{Fault, State};

use crate::errors::StateNotReturned;

/// Lo que devuelve una unidad al ejecutarse.
///
/// Los steps normalmente devuelven `Returned::State`; cualquier otro valor es
/// un error de contrato (`StateNotReturned`) que el reducer registra en el
/// estado en vez de adoptarlo.
#[derive(Debug, Clone, PartialEq)]
pub enum Returned {
    State(State),
    Value(Value),
}

impl From<State> for Returned {
    fn from(state: State) -> Self {
        Returned::State(state)
    }
}

impl From<Value> for Returned {
    fn from(value: Value) -> Self {
        Returned::Value(value)
    }
}

/// Resultado de invocar un step: `Err` equivale a "el step lanzó un fault".
pub type StepResult = Result<Returned, Fault>;

/// Unidad ejecutable por el reducer (validación, step envuelto, runner).
pub trait Unit {
    /// Identidad usada en errores y logs.
    fn name(&self) -> &str;

    fn invoke(&self, state: &State) -> StepResult;
}

/// Ejecuta `units` en orden sobre `state`.
///
/// - estado fallido o terminado: corta y devuelve el estado actual;
/// - `Err(fault)`: `current.fail(fault)`;
/// - `Ok(Returned::Value(v))`: `current.fail(StateNotReturned)`;
/// - `Ok(Returned::State(s))`: `s` pasa a ser el estado actual.
pub fn reduce<'u, U, I>(state: State, units: I) -> State
    where U: Unit + ?Sized + 'u,
          I: IntoIterator<Item = &'u U>
{
    let mut current = state;
    for unit in units {
        if current.failed() || current.finished() {
            debug!("short-circuit before `{}` (failed={}, finished={})",
                   unit.name(),
                   current.failed(),
                   current.finished());
            break;
        }
        trace!("invoking `{}`", unit.name());
        current = match unit.invoke(&current) {
            Ok(Returned::State(next)) => next,
            Ok(Returned::Value(output)) => {
                debug!("`{}` returned a non-state value: {}", unit.name(), output);
                current.fail(StateNotReturned::new(output, unit.name()))
            }
            Err(fault) => {
                debug!("`{}` raised: {}", unit.name(), fault);
                current.fail(fault)
            }
        };
    }
    current
}
