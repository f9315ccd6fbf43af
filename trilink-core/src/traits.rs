//! Application-facing traits

/// Receiver of decoded messages
///
/// Called once for every completed, checksum-valid frame whose payload is
/// not the `"ERROR"` sentinel. Depending on the target this may run in or
/// near interrupt context, so implementations must stay fast and
/// non-blocking; copy the payload out if it needs to live longer than the
/// call.
pub trait MessageSink {
    /// Handle one received payload
    fn on_message(&mut self, payload: &[u8]);
}

// Closures work directly as sinks
impl<F: FnMut(&[u8])> MessageSink for F {
    fn on_message(&mut self, payload: &[u8]) {
        self(payload)
    }
}
