use linearly::config::CONFIG;
use linearly::{expectations, from_fn, static_step, Flow, State, StaticStep, Step, ValueKind};
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

static_step! {
    /// number -> string (number + 1).
    Increment {
        inputs: [("number", ValueKind::Integer)],
        outputs: [("string", ValueKind::String)],
        call(bound) {
            let number: i64 = bound.get("number")?;
            Ok(bound.succeed([("string", json!((number + 1).to_string()))]))
        }
    }
}

fn announce() -> impl Step {
    from_fn("Announce",
            expectations([("string", ValueKind::String)]),
            expectations([("message", ValueKind::String)]),
            |state: &State| {
                let value: String = state.get("string")?;
                Ok(state.succeed([("message", json!(format!("the answer is {value}")))]).into())
            })
}

fn usage() -> ! {
    eprintln!("Uso: linearly-demo [--number <N>] [--skip-input]");
    std::process::exit(2);
}

fn main() {
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&CONFIG.log.filter))
                                     .try_init();

    // CLI mínima: `linearly-demo [--number <N>] [--skip-input]`
    let args: Vec<String> = std::env::args().collect();
    let mut number = CONFIG.demo.number;
    let mut skip_input = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--number" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse::<i64>().ok()) {
                    Some(n) => number = n,
                    None => usage(),
                }
            }
            "--skip-input" => skip_input = true,
            "-h" | "--help" => usage(),
            other => {
                eprintln!("[linearly-demo] argumento desconocido: {other}");
                usage();
            }
        }
        i += 1;
    }

    let flow = Flow::named("demo", [Arc::new(Increment::step()) as Arc<dyn Step>, Arc::new(announce())]);
    info!("demo flow: inputs={:?} outputs={:?} fingerprint={}",
          flow.inputs().keys().collect::<Vec<_>>(),
          flow.outputs().keys().collect::<Vec<_>>(),
          flow.fingerprint());

    let initial = if skip_input { State::empty() } else { State::create([("number", json!(number))]) };
    let result = flow.call(initial);

    match serde_json::to_string_pretty(&result.snapshot()) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(5);
        }
    }

    if let Some(error) = result.error() {
        warn!("demo flow failed: {error}");
        std::process::exit(1);
    }
}
