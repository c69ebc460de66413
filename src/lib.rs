//! Wasmserve library - on-demand TinyGo WebAssembly development server.

pub mod cli;
pub mod colors;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod toolchain;
