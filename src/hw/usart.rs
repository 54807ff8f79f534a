// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Both serial ports are driven through non-blocking halves that implement [`ByteSink`] and
//! [`ByteSource`] with `nb` semantics:
//!
//! - USART2 is the telemetry/command link, split with [`split`].
//! - USART1 is the write-only debug console from [`console`], fed by [`crate::logging::drain`].
//!
//! To access the console on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

use crate::error::LinkError;
use crate::link::{ByteSink, ByteSource};

/// Split a configured serial port into its non-blocking halves.
pub fn split<U: Instance, PINS: Pins<U>>(serial: Serial<U, PINS>) -> (SerialTx<U>, SerialRx<U>) {
    let (tx, rx) = serial.split();
    (SerialTx { tx }, SerialRx { rx })
}

/// Transmit-only port. The receiver is left unread.
pub fn console<U: Instance, PINS: Pins<U>>(serial: Serial<U, PINS>) -> SerialTx<U> {
    let (tx, _rx) = split(serial);
    tx
}

/// Transmit half.
pub struct SerialTx<U: Instance> {
    tx: Tx<U>,
}

/// Receive half.
pub struct SerialRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> ByteSink for SerialTx<U> {
    #[inline]
    fn try_write(&mut self, byte: u8) -> nb::Result<(), LinkError> {
        self.tx.write(byte).map_err(|e| match e {
            nb::Error::WouldBlock => nb::Error::WouldBlock,
            nb::Error::Other(_) => nb::Error::Other(LinkError::Transmit),
        })
    }
}

impl<U: Instance> ByteSource for SerialRx<U> {
    #[inline]
    fn try_read(&mut self) -> nb::Result<u8, LinkError> {
        self.rx.read().map_err(|e| match e {
            nb::Error::WouldBlock => nb::Error::WouldBlock,
            nb::Error::Other(e) => nb::Error::Other(line_error(e)),
        })
    }
}

#[allow(unreachable_patterns)]
fn line_error(e: serial::Error) -> LinkError {
    match e {
        serial::Error::Framing => LinkError::Framing,
        serial::Error::Noise => LinkError::Noise,
        serial::Error::Overrun => LinkError::Overrun,
        serial::Error::Parity => LinkError::Parity,
        _ => LinkError::Noise,
    }
}
