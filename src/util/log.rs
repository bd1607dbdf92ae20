use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

pub static LAST_LOG: LazyLock<Mutex<HashMap<String, Instant>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Like `tracing::warn!`, but emits at most once per `$seconds` from any one call site.
#[macro_export]
macro_rules! warn_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        let loc = $crate::current_location!();
        if let Ok(mut last_log) = $crate::util::log::LAST_LOG.lock() {
            if last_log.get(&loc).map_or(true, |then| then.elapsed().as_secs() >= $seconds) {
                ::tracing::warn!($($args),+);
                last_log.insert(loc, std::time::Instant::now());
            }
        }
    }
}
