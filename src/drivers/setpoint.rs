// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog output setpoint.
//!
//! The analog output is a 16-bit register written as two separate bytes. The two writes are not
//! atomic from the peripheral's side, so the high byte must always land before the low byte.

/// Split high/low analog output register.
pub trait AnalogOutput {
    /// Write the most significant byte of the setpoint.
    fn write_high(&mut self, byte: u8);

    /// Write the least significant byte of the setpoint.
    fn write_low(&mut self, byte: u8);

    /// Write a full setpoint, high byte first.
    fn write_setpoint(&mut self, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.write_high(high);
        self.write_low(low);
    }
}

impl<T: AnalogOutput + ?Sized> AnalogOutput for &mut T {
    #[inline]
    fn write_high(&mut self, byte: u8) {
        (**self).write_high(byte)
    }

    #[inline]
    fn write_low(&mut self, byte: u8) {
        (**self).write_low(byte)
    }
}

/// Register image of a split 16-bit output, for peripherals that only accept whole words.
///
/// Each byte write updates its half of the image and returns the full word to push to the
/// hardware, so the output sees "new high, old low" between the two writes exactly like a
/// byte-addressed register would.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitRegister {
    value: u16,
}

impl SplitRegister {
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    #[inline]
    pub fn set_high(&mut self, byte: u8) -> u16 {
        self.value = (self.value & 0x00FF) | ((byte as u16) << 8);
        self.value
    }

    #[inline]
    pub fn set_low(&mut self, byte: u8) -> u16 {
        self.value = (self.value & 0xFF00) | byte as u16;
        self.value
    }

    #[inline]
    pub fn value(&self) -> u16 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        reg: SplitRegister,
        seen: std::vec::Vec<u16>,
    }

    impl AnalogOutput for Recorder {
        fn write_high(&mut self, byte: u8) {
            let v = self.reg.set_high(byte);
            self.seen.push(v);
        }

        fn write_low(&mut self, byte: u8) {
            let v = self.reg.set_low(byte);
            self.seen.push(v);
        }
    }

    #[test]
    fn whole_setpoint_goes_high_then_low() {
        let mut out = Recorder::default();
        out.write_setpoint(0x1234);
        out.write_setpoint(0xABCD);
        assert_eq!(out.seen, [0x1200, 0x1234, 0xAB34, 0xABCD]);
        assert_eq!(out.reg.value(), 0xABCD);
    }
}
