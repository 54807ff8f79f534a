// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line faults reported by the serial link.

use core::fmt;

/// Receive/transmit faults of the byte link.
///
/// Backpressure is not an error: a full transmitter or an empty receiver is reported as
/// `nb::Error::WouldBlock`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// Stop bit not where it was expected.
    Framing,
    /// Noise detected on the line.
    Noise,
    /// A byte arrived before the previous one was read.
    Overrun,
    Parity,
    /// The transmitter refused a byte for a reason other than being busy.
    Transmit,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Framing => f.write_str("framing error"),
            LinkError::Noise => f.write_str("line noise"),
            LinkError::Overrun => f.write_str("receiver overrun"),
            LinkError::Parity => f.write_str("parity error"),
            LinkError::Transmit => f.write_str("transmit fault"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn transmit_fault_is_not_a_line_fault() {
        assert_eq!(LinkError::Transmit.to_string(), "transmit fault");
        for rx in [
            LinkError::Framing,
            LinkError::Noise,
            LinkError::Overrun,
            LinkError::Parity,
        ] {
            assert_ne!(rx, LinkError::Transmit);
            assert_ne!(rx.to_string(), LinkError::Transmit.to_string());
        }
    }
}
