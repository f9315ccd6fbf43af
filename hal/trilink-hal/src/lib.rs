//! Trilink Hardware Abstraction Layer
//!
//! This crate defines the hardware traits a chip-specific HAL implements so
//! that the board-agnostic link core (`trilink-core`) can drive and sample
//! the three shared lines on any target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / platform ISR glue        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trilink-core (link state machine)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trilink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  rp2040 pins  │       │  stm32 pins   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Pins that switch between input and output
//! - [`irq::EdgeIrq`] - Masking of the clock/CS edge interrupt sources

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod irq;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use irq::EdgeIrq;
