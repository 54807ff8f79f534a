// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-at-a-time serial channel.
//!
//! The telemetry reporter runs inside the 1 ms tick interrupt and must never spin on the UART, so
//! both directions use `nb` semantics: `WouldBlock` means "not now", and the caller decides whether
//! to retry on a later tick or to block with [`nb::block!`].
//!
//! The two halves are separate traits because they live in different execution contexts: the
//! transmit half is owned by the tick interrupt, the receive half by the main loop.

use crate::error::LinkError;

/// Transmit half.
pub trait ByteSink {
    /// Load one byte into the transmitter if it has room.
    fn try_write(&mut self, byte: u8) -> nb::Result<(), LinkError>;
}

/// Receive half.
pub trait ByteSource {
    /// Take one received byte if one is waiting.
    fn try_read(&mut self) -> nb::Result<u8, LinkError>;
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline]
    fn try_write(&mut self, byte: u8) -> nb::Result<(), LinkError> {
        (**self).try_write(byte)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    #[inline]
    fn try_read(&mut self) -> nb::Result<u8, LinkError> {
        (**self).try_read()
    }
}
