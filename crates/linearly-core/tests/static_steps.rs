use linearly_core::{expectations, flow, static_step, BrokenContract, Bound, Expectations, Fault, Phase, State,
                    StaticStep, Step, ValueKind};
use linearly_state::StateError;
use serde_json::json;

struct Increment;

impl StaticStep for Increment {
    fn inputs() -> Expectations {
        expectations([("number", ValueKind::Integer)])
    }

    fn outputs() -> Expectations {
        expectations([("string", ValueKind::String)])
    }

    fn call(bound: &Bound<'_>) -> Result<State, Fault> {
        let number: i64 = bound.get("number")?;
        Ok(bound.succeed([("string", json!((number + 1).to_string()))]))
    }
}

static_step! {
    /// Cierra el flow si `stop` es verdadero.
    Gate {
        inputs: [("stop", ValueKind::Bool)],
        outputs: [],
        call(bound) {
            if bound.get::<bool>("stop")? {
                Ok(bound.finish())
            } else {
                Ok(bound.state().clone())
            }
        }
    }
}

fn state_error(state: &State) -> Option<&StateError> {
    state.error().and_then(|e| e.downcast_ref::<StateError>())
}

#[test]
fn static_step_runs_against_the_given_state() {
    let out = Increment::execute(&State::create([("number", json!(7))]));
    assert!(out.successful());
    assert_eq!(out.get::<String>("string"), Ok("8".to_string()));
    assert_eq!(out.get::<i64>("number"), Ok(7));
}

#[test]
fn typed_read_of_wrong_kind_becomes_a_failure() {
    let out = Increment::execute(&State::create([("number", json!("seven"))]));
    assert!(out.failed());
    assert!(matches!(state_error(&out), Some(StateError::Mismatch { field, .. }) if field == "number"));
}

#[test]
fn missing_field_becomes_a_failure() {
    let out = Increment::execute(&State::empty());
    assert_eq!(state_error(&out), Some(&StateError::MissingField("number".to_string())));
}

#[test]
fn adapter_exposes_the_declared_contract() {
    let step = Increment::step();
    assert_eq!(step.name(), "Increment");
    assert_eq!(step.inputs(), Increment::inputs());
    assert_eq!(step.outputs(), Increment::outputs());
}

#[test]
fn static_steps_compose_into_flows() {
    let f = flow![Gate::step(), Increment::step()];
    assert_eq!(f.inputs().keys().collect::<Vec<_>>(), vec!["stop", "number"]);

    let ran = f.call(State::create([("stop", json!(false)), ("number", json!(1))]));
    assert_eq!(ran.get::<String>("string"), Ok("2".to_string()));

    let stopped = f.call(State::create([("stop", json!(true)), ("number", json!(1))]));
    assert!(stopped.finished());
    assert!(!stopped.has("string"));
}

#[test]
fn flow_validation_guards_static_step_inputs() {
    let f = flow![Increment::step()];
    let out = f.call(State::create([("number", json!("seven"))]));
    let err = out.error()
                 .and_then(|e| e.downcast_ref::<BrokenContract>())
                 .expect("expected BrokenContract");
    assert_eq!(err.phase(), Phase::Inputs);
    assert_eq!(err.to_string(), "failed input expectations: [number]");
}

#[test]
fn step_contract_errors_use_the_short_type_name() {
    let out = flow![Liar::step()].call(State::empty());
    assert_eq!(out.error().map(|e| e.to_string()),
               Some("failed output expectations on Liar: [promised]".to_string()));
}

static_step! {
    Liar {
        inputs: [],
        outputs: [("promised", linearly_core::Expectation::present())],
        call(bound) {
            Ok(bound.state().clone())
        }
    }
}
