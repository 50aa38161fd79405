//! linearly-core: motor lineal de steps con contratos validados.
//!
//! Un `Flow` compone una lista ordenada de steps. Cada step declara los
//! campos que requiere y los que produce; el flow infiere su contrato
//! agregado al construirse y, al ejecutarse, valida inputs y outputs antes y
//! después de cada step, cortando la cadena en el primer fallo.
//!
//! ```
//! use linearly_core::{expectations, flow, from_fn, Expectations, ValueKind};
//! use linearly_state::State;
//! use serde_json::json;
//!
//! let find = from_fn("Users::Find",
//!                    expectations([("user_id", ValueKind::Integer)]),
//!                    expectations([("user", ValueKind::Object)]),
//!                    |s: &State| Ok(s.succeed([("user", json!({"id": 7}))]).into()));
//! let greet = from_fn("Users::Greet",
//!                     expectations([("user", ValueKind::Object)]),
//!                     Expectations::new(),
//!                     |s: &State| Ok(s.succeed([("greeted", json!(true))]).into()));
//!
//! let users = flow![find, greet];
//! assert_eq!(users.inputs().keys().collect::<Vec<_>>(), vec!["user_id"]);
//!
//! let out = users.call(State::create([("user_id", json!(7))]));
//! assert!(out.successful());
//! ```
pub mod constants;
pub mod contract;
pub mod errors;
pub mod expectation;
pub mod failure;
pub mod flow;
pub mod hashing;
pub mod macros;
pub mod reducer;
pub mod runner;
pub mod step;
pub mod validation;

pub use contract::Contract;
pub use errors::{BrokenContract, Phase, StateNotReturned};
pub use expectation::{expectations, Check, Expectation, Expectations, ValueKind};
pub use failure::Failure;
pub use flow::Flow;
pub use reducer::{reduce, Returned, StepResult, Unit};
pub use runner::Runner;
pub use step::{from_fn, Bound, Chain, FnStep, Static, StaticStep, Step};
pub use validation::Validation;

pub use linearly_state::{Fault, State};
