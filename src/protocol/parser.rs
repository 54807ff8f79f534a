// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command frame parser.
//!
//! Runs in the main loop, one received byte at a time. The two payload bytes are written to the
//! analog output as soon as each arrives (high, then low) rather than after the whole frame, which
//! keeps the peripheral's high-before-low write order.

use crate::drivers::setpoint::AnalogOutput;
use crate::error::LinkError;
use crate::link::ByteSource;
use crate::protocol::messages::*;

/// Parser position within a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    /// First marker seen.
    Sync1,
    /// Both markers seen, next byte is the setpoint's high byte.
    HighByte,
    /// High byte written, next byte is the low byte.
    LowByte,
}

pub struct Parser {
    state: State,
    pending: u16,
    frames: u32,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            pending: 0,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Completed frames since start.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Process a single incoming byte. Returns `Some(SetpointCommand)` once the low byte of a frame
    /// has been written to `out`.
    pub fn push<OUT: AnalogOutput>(&mut self, byte: u8, out: &mut OUT) -> Option<SetpointCommand> {
        match self.state {
            State::Idle => {
                if byte == COMMAND_MARKER {
                    self.state = State::Sync1;
                }
            }
            State::Sync1 => {
                self.state = if byte == COMMAND_MARKER {
                    State::HighByte
                } else {
                    State::Idle
                };
            }
            State::HighByte => {
                // Payload bytes may legitimately equal the marker.
                out.write_high(byte);
                self.pending = (byte as u16) << 8;
                self.state = State::LowByte;
            }
            State::LowByte => {
                out.write_low(byte);
                self.pending |= byte as u16;
                self.state = State::Idle;
                self.frames = self.frames.wrapping_add(1);
                return Some(SetpointCommand {
                    setpoint: self.pending,
                });
            }
        }
        None
    }

    /// Read at most one byte from `src` and feed it through [`push`](Parser::push).
    ///
    /// A line error loses a byte that may belong to the frame in flight, so the parser drops back
    /// to `Idle` before the error is returned.
    pub fn poll<SRC, OUT>(
        &mut self,
        src: &mut SRC,
        out: &mut OUT,
    ) -> nb::Result<Option<SetpointCommand>, LinkError>
    where
        SRC: ByteSource,
        OUT: AnalogOutput,
    {
        let byte = src.try_read().map_err(|e| {
            if let nb::Error::Other(_) = e {
                self.reset();
            }
            e
        })?;
        Ok(self.push(byte, out))
    }
}

#[cfg(test)]
mod tests;
