// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # IR Node Firmware
//!
//! Firmware for a small robotics sensor/actuator node, written in Rust, targeting an STM32F777
//! MCU. The node
//!
//! - synthesizes a 38 kHz infrared carrier on one pin,
//! - counts rotation pulses from a wheel sensor and reports them as a speed every 100 ms together
//!   with nine digital IR sensor levels,
//! - accepts framed commands on the same serial link to set an analog output level.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Compiled-in clock, timer and baud constants |
//! | [`drivers`] | Device-level drivers (IR carrier, IR sensors, analog setpoint) |
//! | [`sched`] | Timebase, pulse counting and telemetry reporting |
//! | [`protocol`] | Telemetry packet and command frame formats, command parser |
//! | [`link`] | Non-blocking byte channel traits |
//! | [`logging`] | `log` backend that queues lines for the debug USART |
//! | `hw` | MCU-level wrappers around USART, timers, EXTI, DAC (feature `board`) |
//!
//! Everything outside `hw` is hardware-independent and is tested on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod error;
pub mod link;
pub mod logging;
pub mod protocol;
pub mod sched;

#[cfg(feature = "board")]
pub mod hw;

pub use error::LinkError;
