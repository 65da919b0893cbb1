//! Browser console logging.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;

const DEFAULT_FILTER: &str = "info";

/// Install the panic hook and a console tracing subscriber.
///
/// `filter` is an `EnvFilter` directive such as `"dom_resize_core=debug"`.
/// Calling it again is harmless.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(filter: Option<String>) {
    console_error_panic_hook::set_once();

    let filter = filter
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!("[logging] Subscriber already installed");
    }
}
