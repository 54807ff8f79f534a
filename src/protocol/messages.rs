// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wire formats of the node's serial link.
//!
//! Outbound, every measurement window:
//!
//! ```text
//! FF FF <speed hi> <speed lo> <IR8> <IR9 IR1 IR2 IR3 IR4 IR5 IR6 IR7>
//! ```
//!
//! Inbound, whenever the host wants a new analog setpoint:
//!
//! ```text
//! DD DD <setpoint hi> <setpoint lo>
//! ```

use crate::drivers::ir_sensors::SensorBits;

/// Sync byte that opens every telemetry packet (sent twice).
pub const TELEMETRY_SYNC: u8 = 0xFF;
/// Sync byte that opens every command frame (sent twice).
pub const COMMAND_MARKER: u8 = 0xDD;

pub const TELEMETRY_LEN: usize = 6;
pub const COMMAND_LEN: usize = 4;

/// One window's worth of telemetry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TelemetryPacket {
    /// Rotation pulses counted in the window.
    pub speed: u16,
    pub sensors: SensorBits,
}

impl TelemetryPacket {
    pub fn encode(&self) -> [u8; TELEMETRY_LEN] {
        let [speed_hi, speed_lo] = self.speed.to_be_bytes();
        let [byte4, byte5] = self.sensors.pack();
        [
            TELEMETRY_SYNC,
            TELEMETRY_SYNC,
            speed_hi,
            speed_lo,
            byte4,
            byte5,
        ]
    }

    /// Returns `None` if the sync bytes are wrong.
    pub fn decode(raw: &[u8; TELEMETRY_LEN]) -> Option<Self> {
        if raw[0] != TELEMETRY_SYNC || raw[1] != TELEMETRY_SYNC {
            return None;
        }
        Some(Self {
            speed: u16::from_be_bytes([raw[2], raw[3]]),
            sensors: SensorBits::unpack([raw[4], raw[5]]),
        })
    }
}

/// Analog setpoint command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetpointCommand {
    pub setpoint: u16,
}

impl SetpointCommand {
    pub fn encode(&self) -> [u8; COMMAND_LEN] {
        let [hi, lo] = self.setpoint.to_be_bytes();
        [COMMAND_MARKER, COMMAND_MARKER, hi, lo]
    }
}
