//! Error reports for notification payloads.

use std::backtrace::Backtrace;
use std::error::Error;

/// Render `err` with a stack trace as one string safe to embed in a quoted
/// payload: every `"` comes out as `\"`.
///
/// Call it where the error is being handled; the trace is captured there.
pub fn traceback_string<E: Error + 'static>(err: &E) -> String {
    let trace = Backtrace::force_capture().to_string();
    render_traceback(short_type_name::<E>(), err, &trace)
}

fn render_traceback(type_name: &str, err: &dyn Error, trace: &str) -> String {
    let mut out = String::from("Traceback:\n");
    let trace = trace.trim_end();
    if !trace.is_empty() {
        out.push_str(trace);
        out.push('\n');
    }
    out.push_str(&format!("{}: {}", type_name, err));

    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }

    escape_quotes(&out)
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
