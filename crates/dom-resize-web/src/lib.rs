//! dom-resize browser binding
//!
//! Exposes the resize engine to JavaScript as the `DomResize` class and, with
//! the `yew` feature, as a Yew hook.
//!
//! This crate is WASM-only. Use `wasm-pack build` or `cargo check --target wasm32-unknown-unknown`.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[cfg(not(target_arch = "wasm32"))]
compile_error!(
    "dom-resize-web only supports wasm32 target. Use: cargo check -p dom-resize-web --target wasm32-unknown-unknown"
);

mod host;
mod logging;
mod selection;
mod widget;

#[cfg(feature = "yew")]
pub mod hooks;

pub use dom_resize_core as engine;
pub use host::WebHost;
pub use logging::init_logging;
pub use widget::DomResize;
