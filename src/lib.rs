//! GPIO driver for the ESP32 pin topology.
//!
//! The crate exposes a [`Gpio`](sdk::mcu::gpio::Gpio) controller that owns a
//! register handle. On the chip the handle is [`Mmio`](sdk::mcu::register::Mmio),
//! which performs volatile accesses; on the host it is the simulated register file
//! from `sdk::mcu::sim` (tests, or the `sim` feature).
//!
//! ```text
//!   configure(mask, mode, pull, intr) ─┐
//!   set_direction / set_level / ...  ──┼──> pin validation ──> bank / pin / IO_MUX writes
//!   register_handler(vector, isr)    ──┘                       interrupt matrix routing
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod sdk;

pub use sdk::error::{GpioError, Result};
pub use sdk::mcu::gpio::{CoreId, Gpio, GpioConfig, GpioMode, InterruptType, PullMode};
pub use sdk::mcu::irq_i::{register_handler, IsrArg, IsrHandler};
pub use sdk::mcu::register::{GpioRegisters, Mmio};
