//! Platform abstraction (clipboard, timers, logging).

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
mod native;
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use native::copy_to_clipboard;

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
mod runtime_native;
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use runtime_native::{init_logging, sleep};

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
mod runtime_wasm;
#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub use runtime_wasm::{init_logging, sleep};
