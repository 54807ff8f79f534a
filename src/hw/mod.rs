// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU-Level Wrappers
//!
//! Thin wrappers around the STM32F777 peripherals the node uses. Where the HAL has no wrapper
//! (basic timers, EXTI routing, DAC) the registers are driven through the PAC directly.

pub mod dac;
pub mod exti;
pub mod gpio;
pub mod pins;
pub mod timer;
pub mod usart;

pub use dac::Dac;
pub use exti::PulseLine;
pub use gpio::OutputLine;
pub use pins::{BoardPins, SensorPins};
pub use timer::BasicTimer;
pub use usart::{SerialRx, SerialTx};
