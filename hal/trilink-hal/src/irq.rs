//! Edge interrupt masking
//!
//! The receive path is fed by two interrupt sources: Clock rising edges and
//! CS edges (both directions). While the link reconfigures line direction it
//! must guarantee neither source fires, otherwise a handler could read a
//! line in an undefined direction.

/// Control over the clock/CS edge interrupt sources wired to one link
///
/// Implementations typically mask/unmask the EXTI lines or GPIO interrupt
/// enables for the two pins. `disable` must take effect before it returns;
/// a pended edge delivered after `enable` is acceptable, one delivered
/// between `disable` and `enable` is not.
pub trait EdgeIrq {
    /// Unmask both edge sources
    fn enable(&mut self);

    /// Mask both edge sources
    fn disable(&mut self);
}
