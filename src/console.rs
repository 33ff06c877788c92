//! Browser console logging.
//!
//! On `wasm32` these forward to `web_sys::console`. Native builds (unit
//! tests, benches) have no JS host, so the calls compile to nothing.

/// Log a formatted message to the browser console.
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::console::log(&format!($($t)*))
    };
}

/// Log a formatted warning to the browser console.
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::console::warn(&format!($($t)*))
    };
}

pub(crate) use console_log;
pub(crate) use console_warn;

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_message: &str) {}

#[cfg(target_arch = "wasm32")]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_message: &str) {}

/// Start a `console.time` span.
#[cfg(target_arch = "wasm32")]
pub fn time(label: &str) {
    web_sys::console::time_with_label(label);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn time(_label: &str) {}

/// End a `console.time` span and print its duration.
#[cfg(target_arch = "wasm32")]
pub fn time_end(label: &str) {
    web_sys::console::time_end_with_label(label);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn time_end(_label: &str) {}
