// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Level Drivers
//!
//! Hardware-independent drivers for the node's attached devices. Each one is written against an
//! `embedded-hal` trait or a small trait of its own, so the board code in `hw` supplies the
//! concrete pins and peripherals.
//!
//! ## Existing drivers
//!
//! - [`carrier`] – 38 kHz IR carrier square wave on one output pin
//! - [`ir_sensors`] – nine digital IR sensors and their packed telemetry form
//! - [`setpoint`] – split high/low analog output register

pub mod carrier;
pub mod ir_sensors;
pub mod setpoint;

pub use carrier::Carrier;
pub use ir_sensors::{SensorBank, SensorBits, SENSOR_COUNT};
pub use setpoint::{AnalogOutput, SplitRegister};
