//! `Fault`: error opaco que viaja dentro de un `State` fallido.
//!
//! Un step puede fallar con cualquier tipo de error; el motor no lo
//! reclasifica. `Fault` lo envuelve en un `Arc` para que clonar un estado no
//! clone el error y para que el llamador pueda recuperar exactamente el mismo
//! objeto (`downcast_ref`, `ptr_eq`).
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Fault(Arc<anyhow::Error>);

impl Fault {
    /// Crea un fault ad-hoc a partir de un mensaje.
    pub fn msg<M>(message: M) -> Self
        where M: fmt::Display + fmt::Debug + Send + Sync + 'static
    {
        Self(Arc::new(anyhow::Error::msg(message)))
    }

    /// Referencia al error original si es de tipo `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
        where E: fmt::Display + fmt::Debug + Send + Sync + 'static
    {
        self.0.downcast_ref::<E>()
    }

    pub fn is<E>(&self) -> bool
        where E: fmt::Display + fmt::Debug + Send + Sync + 'static
    {
        self.0.is::<E>()
    }

    /// Identidad: dos faults son el mismo objeto si comparten asignación.
    pub fn ptr_eq(a: &Fault, b: &Fault) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<E> From<E> for Fault where E: std::error::Error + Send + Sync + 'static
{
    fn from(error: E) -> Self {
        Self(Arc::new(anyhow::Error::new(error)))
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
