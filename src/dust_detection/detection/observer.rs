use tracing::debug;

/// Receives human-readable diagnostics from a detection run.
///
/// Hosts that want messages in their own console implement this; the
/// pipeline never keeps a global switch for it.
pub trait DetectionObserver {
    fn message(&self, text: &str);
}

/// Forwards diagnostics to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DetectionObserver for TracingObserver {
    fn message(&self, text: &str) {
        debug!(target: "dust_detection", "{}", text);
    }
}

/// Drops every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl DetectionObserver for SilentObserver {
    fn message(&self, _text: &str) {}
}
