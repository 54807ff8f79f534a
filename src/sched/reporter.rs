// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry reporter.
//!
//! When a window closes the reporter records the window's pulse count as the current speed and
//! stages a [`TelemetryPacket`]. Staged bytes are pushed into the link from [`Reporter::service`],
//! which the tick handler calls every millisecond; it writes only as many bytes as the transmitter
//! accepts and returns immediately otherwise. At 9600 baud a packet drains in about 7 ticks.
//!
//! If the previous packet is still staged when the next window closes, the new packet is skipped.
//! The speed is still updated so the next packet that does go out carries a fresh value.

use crate::drivers::ir_sensors::SensorBits;
use crate::link::ByteSink;
use crate::protocol::messages::{TelemetryPacket, TELEMETRY_LEN};
use crate::sched::pulse::PulseSnapshot;

/// What happened to the packet for a closed window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Staged(TelemetryPacket),
    /// The link was still busy with the previous packet.
    Skipped,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReporterStats {
    /// Packets fully handed to the link.
    pub sent: u32,
    /// Windows whose packet was dropped because the link was busy.
    pub skipped: u32,
    /// Windows whose pulse count overflowed.
    pub saturated: u32,
    /// Packets abandoned after a transmit fault.
    pub line_errors: u32,
}

pub struct Reporter {
    staged: [u8; TELEMETRY_LEN],
    /// Next byte of `staged` to send; `TELEMETRY_LEN` when nothing is pending.
    cursor: usize,
    speed: u16,
    stats: ReporterStats,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub const fn new() -> Self {
        Self {
            staged: [0; TELEMETRY_LEN],
            cursor: TELEMETRY_LEN,
            speed: 0,
            stats: ReporterStats {
                sent: 0,
                skipped: 0,
                saturated: 0,
                line_errors: 0,
            },
        }
    }

    /// Speed of the most recently closed window.
    #[inline]
    pub fn speed(&self) -> u16 {
        self.speed
    }

    #[inline]
    pub fn stats(&self) -> ReporterStats {
        self.stats
    }

    /// True when no packet bytes are waiting for the link.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.cursor >= TELEMETRY_LEN
    }

    /// Record the closed window and stage its packet if the link is free.
    pub fn close_window(&mut self, pulses: PulseSnapshot, sensors: SensorBits) -> Report {
        self.speed = pulses.count;
        if pulses.saturated {
            self.stats.saturated = self.stats.saturated.wrapping_add(1);
            log::warn!("pulse count saturated at {}", pulses.count);
        }

        if !self.is_idle() {
            self.stats.skipped = self.stats.skipped.wrapping_add(1);
            log::warn!("link busy, telemetry for this window skipped");
            return Report::Skipped;
        }

        let packet = TelemetryPacket {
            speed: self.speed,
            sensors,
        };
        self.staged = packet.encode();
        self.cursor = 0;
        log::trace!("window closed, speed {}", self.speed);
        Report::Staged(packet)
    }

    /// Push staged bytes until the link pushes back. Returns the number of bytes written.
    pub fn service<S: ByteSink>(&mut self, sink: &mut S) -> usize {
        let mut written = 0;
        while self.cursor < TELEMETRY_LEN {
            match sink.try_write(self.staged[self.cursor]) {
                Ok(()) => {
                    self.cursor += 1;
                    written += 1;
                    if self.cursor == TELEMETRY_LEN {
                        self.stats.sent = self.stats.sent.wrapping_add(1);
                    }
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => {
                    log::warn!("telemetry write failed: {}", e);
                    self.stats.line_errors = self.stats.line_errors.wrapping_add(1);
                    self.cursor = TELEMETRY_LEN;
                    break;
                }
            }
        }
        written
    }
}
