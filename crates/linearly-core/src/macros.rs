//! Macros utilitarias para reducir boilerplate al definir flows y steps.
//!
//! Exportadas en la raíz del crate:
//!   use linearly_core::{flow, static_step};

/// Construye un `Flow` envolviendo cada step en un `Arc<dyn Step>`.
///
/// Formas soportadas:
/// - flow![StepA, StepB::new(), Other::step()]
/// - flow![name: "users"; StepA, StepB] // errores de contrato con nombre
#[macro_export]
macro_rules! flow {
    (name: $name:expr; $($step:expr),* $(,)?) => {
        $crate::flow::Flow::named(
            $name,
            ::std::vec![$(::std::sync::Arc::new($step) as ::std::sync::Arc<dyn $crate::step::Step>),*],
        )
    };
    ($($step:expr),* $(,)?) => {
        $crate::flow::Flow::new(
            ::std::vec![$(::std::sync::Arc::new($step) as ::std::sync::Arc<dyn $crate::step::Step>),*],
        )
    };
}

/// Declara un `StaticStep` (struct unitario + impl).
///
/// ```
/// use linearly_core::{static_step, StaticStep, ValueKind};
/// use linearly_state::State;
/// use serde_json::json;
///
/// static_step! {
///     pub Double {
///         inputs: [("n", ValueKind::Integer)],
///         outputs: [("n2", ValueKind::Integer)],
///         call(bound) {
///             let n: i64 = bound.get("n")?;
///             Ok(bound.succeed([("n2", json!(n * 2))]))
///         }
///     }
/// }
///
/// let out = Double::execute(&State::create([("n", json!(4))]));
/// assert_eq!(out.get::<i64>("n2").unwrap(), 8);
/// ```
#[macro_export]
macro_rules! static_step {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident {
            inputs: [$(($in_field:expr, $in_exp:expr)),* $(,)?],
            outputs: [$(($out_field:expr, $out_exp:expr)),* $(,)?],
            call($bound:ident) $body:block
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::step::StaticStep for $name {
            #[allow(unused_mut)]
            fn inputs() -> $crate::expectation::Expectations {
                let mut fields = $crate::expectation::Expectations::new();
                $(fields.insert(::std::string::String::from($in_field), $crate::expectation::Expectation::from($in_exp));)*
                fields
            }

            #[allow(unused_mut)]
            fn outputs() -> $crate::expectation::Expectations {
                let mut fields = $crate::expectation::Expectations::new();
                $(fields.insert(::std::string::String::from($out_field), $crate::expectation::Expectation::from($out_exp));)*
                fields
            }

            fn call($bound: &$crate::step::Bound<'_>) -> ::std::result::Result<$crate::State, $crate::Fault> $body
        }
    };
}
