//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. The link reconfigures its three lines between
//! input and output whenever it changes role, so the pins it owns must also
//! implement [`FlexPin`].

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can be switched at runtime
///
/// The link holds all three lines as `FlexPin`s: inputs while receiving,
/// outputs while sending. Direction changes only happen inside the link's
/// role transitions, with the edge interrupt sources masked.
pub trait FlexPin: InputPin + OutputPin {
    /// Reconfigure the pin as a high-impedance input
    fn set_input(&mut self);

    /// Reconfigure the pin as a push-pull output, driving low
    ///
    /// Driving low immediately matters for the link: Clock idles low and CS
    /// low means "bus free", so a freshly reconfigured line must not glitch
    /// high.
    fn set_output(&mut self);
}
