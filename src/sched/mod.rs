// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Scheduling
//!
//! Interrupt-driven measurement and reporting.
//!
//! ## Modules
//!
//! - [`pulse`] - Rotation pulse counter shared between interrupt contexts.
//! - [`timebase`] - 1 ms tick that closes a 100 ms measurement window.
//! - [`reporter`] - Non-blocking telemetry packet transmitter.
//! - [`node`] - Per-tick glue between the three.

pub mod node;
pub mod pulse;
pub mod reporter;
pub mod timebase;

pub use node::TelemetryNode;
pub use pulse::{PulseCounter, PulseSnapshot};
pub use reporter::{Report, Reporter, ReporterStats};
pub use timebase::{Tick, Timebase};
