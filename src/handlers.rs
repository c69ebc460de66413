//! HTTP request handlers and router assembly.

use axum::{
    Router,
    extract::{Extension, State},
    http::{HeaderValue, Uri, header},
    middleware::from_fn,
    response::{IntoResponse, Redirect, Response},
};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info, warn};

use crate::colors::colored_id;
use crate::error::ServeError;
use crate::middleware::log_requests;
use crate::state::AppState;

/// Bootstrap page served for `/` and `index.html`. Loads the glue script,
/// fetches the freshly built binary, and shows compiler diagnostics in a
/// `<pre>` when the build fails.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<script src="wasm_exec.js"></script><script>
(async () => {
  const resp = await fetch('main.wasm');
  if (!resp.ok) {
    const pre = document.createElement('pre');
    pre.innerText = await resp.text();
    document.body.appendChild(pre);
    return;
  }
  const src = await resp.arrayBuffer();
  const go = new Go();
  const result = await WebAssembly.instantiate(src, go.importObject);
  go.run(result.instance);
})();
</script>
"#;

/// Artifact name the build route answers to.
const WASM_NAME: &str = "main.wasm";
/// Runtime support script shipped inside the toolchain installation.
const GLUE_NAME: &str = "wasm_exec.js";
/// Location of the glue script relative to the toolchain root.
const GLUE_SUBPATH: &str = "targets/wasm_exec.js";

/// Assembles the application router: one catch-all route, request logging,
/// and, when configured, a blanket `Access-Control-Allow-Origin` header on
/// every response including errors.
pub fn app(state: Arc<AppState>, allow_origin: Option<HeaderValue>) -> Router {
    let router = Router::new()
        .fallback(serve)
        .layer(from_fn(log_requests))
        .with_state(state);

    match allow_origin {
        Some(origin) => router.layer(tower_http::set_header::SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        )),
        None => router,
    }
}

/// Catch-all handler dispatching on the final path segment.
///
/// `index.html` and the trailing-slash form serve the fixed bootstrap page,
/// `wasm_exec.js` comes from the toolchain installation, `main.wasm` is
/// rebuilt from source on every request, and anything else is read from the
/// working directory. Files on disk that happen to share the special names
/// are never consulted.
pub async fn serve(
    State(state): State<Arc<AppState>>,
    Extension(id): Extension<String>,
    uri: Uri,
) -> Result<Response, ServeError> {
    let path = uri.path();
    let base = path.rsplit('/').next().unwrap_or("");

    // A directory reached without its trailing slash redirects to the slash
    // form so the bootstrap page's relative fetches resolve under it.
    if !path.ends_with('/') {
        let local = state.workdir.join(base);
        if fs::metadata(&local).await.is_ok_and(|meta| meta.is_dir()) {
            return Ok(Redirect::to(&format!("{path}/")).into_response());
        }
    }

    match base {
        "" | "index.html" => Ok(content_response("index.html", INDEX_HTML.as_bytes().to_vec())),
        GLUE_NAME => serve_glue(&state, &id).await,
        WASM_NAME => build_and_serve(&state, &id).await,
        _ => {
            let local = state.workdir.join(path.trim_start_matches('/'));
            let bytes = fs::read(&local).await.map_err(ServeError::from_fs)?;
            info!("{} {} {}", colored_id(&id), "FILE".green(), local.display());
            Ok(content_response(&local, bytes))
        }
    }
}

/// Serves the JS runtime glue from underneath the toolchain's install root.
///
/// The root is queried from the toolchain itself on every request; a failed
/// query surfaces the toolchain's own error text as the response body.
async fn serve_glue(state: &AppState, id: &str) -> Result<Response, ServeError> {
    let args = vec![String::from("env"), String::from("TINYGOROOT")];
    let env = state.toolchain.run(&args, &state.workdir).await?;
    let reported = String::from_utf8_lossy(&env.output);
    if !env.success {
        error!(
            "{} {} env query failed: {}",
            colored_id(id),
            "GLUE".yellow(),
            reported.trim_end()
        );
        return Err(ServeError::Toolchain(reported.into_owned()));
    }

    let root = reported.trim_end_matches(['\r', '\n']);
    let glue = Path::new(root).join(GLUE_SUBPATH);
    info!("{} {} {}", colored_id(id), "GLUE".yellow(), glue.display());

    let bytes = fs::read(&glue).await.map_err(ServeError::from_fs)?;
    Ok(content_response(GLUE_NAME, bytes))
}

/// Compiles the configured target and serves the produced binary.
///
/// There is no caching: every request addressed to the artifact name runs a
/// full build, so the served binary can never be stale. A non-zero exit
/// answers with the compiler's combined output so diagnostics land in the
/// browser, and warnings from a successful build only go to the log.
async fn build_and_serve(state: &AppState, id: &str) -> Result<Response, ServeError> {
    let out_dir = state.ensure_out_dir().await?;
    let artifact = out_dir.join(WASM_NAME);

    let mut args = vec![
        String::from("build"),
        String::from("-o"),
        artifact.to_string_lossy().into_owned(),
        String::from("-target"),
        String::from("wasm"),
    ];
    if state.no_debug {
        args.push(String::from("-no-debug"));
    }
    if !state.tags.is_empty() {
        args.push(String::from("-tags"));
        args.push(state.tags.clone());
    }
    args.push(state.target.clone());

    info!(
        "{} {} tinygo {}",
        colored_id(id),
        "BUILD".magenta(),
        args.join(" ")
    );
    let build = state.toolchain.run(&args, &state.workdir).await?;
    let output = String::from_utf8_lossy(&build.output);
    if !build.success {
        error!(
            "{} {} build failed:\n{}",
            colored_id(id),
            "BUILD".magenta(),
            output.trim_end()
        );
        return Err(ServeError::Toolchain(output.into_owned()));
    }
    if !build.output.is_empty() {
        warn!("{} {} {}", colored_id(id), "BUILD".magenta(), output.trim_end());
    }

    // The toolchain reported success, so a missing artifact here is a real
    // server error, not a 404.
    let bytes = fs::read(&artifact).await?;
    Ok(content_response(WASM_NAME, bytes))
}

/// Builds a 200 response whose content type is guessed from the logical
/// filename, not sniffed from the bytes.
fn content_response(name: impl AsRef<Path>, bytes: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
}
