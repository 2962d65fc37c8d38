//! Runs a layout-generation script against the mock procedure library and
//! prints the resulting cells.
//!
//! Usage: `pillmock [script_file]`. Settings come from `pillmock.json` in
//! the working directory when present.

use std::env;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use pillmock_core::LayerMap;
use pillmock_io::{layermap, MockConfig, DEFAULT_LAYERMAP};
use pillmock_runtime::{summary, CallListInterpreter, Interpreter, ScriptError, Session};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Creating specialized mock environment for shapes experiment...");

    let config = MockConfig::discover(".").unwrap_or_else(|e| {
        log::error!("Ignoring invalid {}: {}", MockConfig::FILE_NAME, e);
        MockConfig::default()
    });
    let layers = load_layers(&config.layermap);
    let mut session = Session::new(&config.library, layers)
        .with_key_scope(config.key_scope)
        .with_strict_layers(config.strict_layers);

    let Some(script) = env::args_os().nth(1).map(PathBuf::from) else {
        println!("No script file specified. Usage: pillmock <script_file>");
        return;
    };
    run_script(&mut session, &script);
}

fn load_layers(path: &Path) -> LayerMap {
    if !path.exists() {
        log::warn!("Layer map {} not found, using built-in defaults", path.display());
        return layermap::parse(DEFAULT_LAYERMAP).unwrap_or_default();
    }
    layermap::load(path).unwrap_or_else(|e| {
        log::error!("Cannot load layer map {}: {}", path.display(), e);
        LayerMap::new()
    })
}

fn run_script(session: &mut Session, script: &Path) {
    println!("\n=== Running script {} ===", script.display());

    match CallListInterpreter::new().load(script, session) {
        Ok(result) => println!("Script execution result: {result}"),
        Err(err) => report(&err),
    }

    println!("\n=== Cell Summary ===");
    if let Err(e) = summary::write_summary(&mut io::stdout().lock(), &session.cells) {
        log::error!("Cannot write summary: {}", e);
    }
    println!("=== Script execution complete ===");
}

/// Print a script failure with its full cause chain. Execution continues.
fn report(err: &ScriptError) {
    println!("Error running script: {err}");
    let mut cause = err.source();
    while let Some(e) = cause {
        eprintln!("  caused by: {e}");
        cause = e.source();
    }
}
