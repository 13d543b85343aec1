//! Metrics/tracing hooks.
//!
//! This module purposefully avoids pulling heavy telemetry stacks; with the
//! `tracing` feature off every hook is a no-op.

#[cfg(feature = "tracing")]
pub(crate) fn emit(event: &'static str, key_values: &[(&'static str, usize)]) {
    let span = tracing::span!(tracing::Level::TRACE, "lazyq", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, value = *v, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn emit(_event: &'static str, _key_values: &[(&'static str, usize)]) { /* no-op */
}
