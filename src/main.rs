//! On-demand TinyGo WebAssembly development server.
//!
//! Serves a bootstrap page, the toolchain's JS runtime glue, and a
//! `main.wasm` that is recompiled on every request, falling back to plain
//! files from the working directory.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use axum::http::HeaderValue;
use tracing::{Level, error, info};

use wasmserve::cli::Cli;
use wasmserve::handlers::app;
use wasmserve::state::AppState;
use wasmserve::toolchain::Tinygo;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Cli = argh::from_env();

    let allow_origin = if args.allow_origin.is_empty() {
        None
    } else {
        match HeaderValue::from_str(&args.allow_origin) {
            Ok(value) => Some(value),
            Err(err) => {
                error!("invalid --allow-origin value: {err}");
                return ExitCode::FAILURE;
            }
        }
    };

    let state = Arc::new(AppState::new(
        Arc::new(Tinygo),
        PathBuf::from("."),
        args.target.clone(),
        args.tags.clone(),
        args.no_debug,
    ));

    let bind = args.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {bind}: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("Building {} with tinygo", state.target);
    info!("Server running on: http://{bind}");

    if let Err(err) = axum::serve(listener, app(state, allow_origin)).await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
