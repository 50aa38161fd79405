use std::sync::Arc;

use linearly_state::State;

use crate::expectation::Expectations;
use crate::flow::Flow;
use crate::reducer::StepResult;

/// Contrato de un step (variante dinámica: la instancia declara todo).
///
/// Los tres métodos son obligatorios; un step que no declare inputs, outputs
/// o su lógica no compila. Los steps deben ser `Send + Sync` para que un
/// mismo `Flow` pueda invocarse desde varios hilos.
pub trait Step: Send + Sync {
    /// Identidad del step en errores y logs. Por defecto, el nombre corto
    /// del tipo (sin la ruta de módulos).
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Campos requeridos y su expectativa.
    fn inputs(&self) -> Expectations;

    /// Campos producidos y su expectativa.
    fn outputs(&self) -> Expectations;

    /// Lógica del step. `Err` equivale a un fault lanzado por el cuerpo.
    fn call(&self, state: &State) -> StepResult;
}

/// `a::b::Step<c::D>` -> `Step<c::D>`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let path_end = full.find('<').unwrap_or(full.len());
    match full[..path_end].rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}

impl<S> Step for Arc<S> where S: Step + ?Sized
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn inputs(&self) -> Expectations {
        (**self).inputs()
    }

    fn outputs(&self) -> Expectations {
        (**self).outputs()
    }

    fn call(&self, state: &State) -> StepResult {
        (**self).call(state)
    }
}

/// Encadenado de steps: `a.then(b)` construye un `Flow` con ambos.
///
/// Si `b` es a su vez un `Flow`, queda anidado como un único step.
pub trait Chain: Step + Sized + 'static {
    fn then<N>(self, next: N) -> Flow
        where N: Step + 'static
    {
        Flow::new([Arc::new(self) as Arc<dyn Step>, Arc::new(next)])
    }
}

impl<S> Chain for S where S: Step + 'static {}
