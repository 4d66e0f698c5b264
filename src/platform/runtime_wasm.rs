use std::sync::Once;
use std::time::Duration;

pub async fn sleep(duration: Duration) {
    let millis = duration.as_millis().min(u32::MAX as u128) as u32;
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

static LOGGER_INIT: Once = Once::new();

/// Console logger plus a panic hook that reports to the console.
pub fn init_logging(level: log::Level) {
    LOGGER_INIT.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(level));
    });
}
