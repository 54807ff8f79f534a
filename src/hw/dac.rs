// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog setpoint output on DAC channel 1 (PA4).
//!
//! The DAC is written through its 12-bit left-aligned holding register, so the 16-bit setpoint
//! maps onto it MSB-first and the low four bits are dropped. Each byte write updates the register
//! immediately, high byte first, in the same way a byte-addressed high/low register pair would.

use stm32f7xx_hal::pac;

use crate::drivers::setpoint::{AnalogOutput, SplitRegister};

pub struct Dac {
    dac: pac::DAC,
    reg: SplitRegister,
}

impl Dac {
    /// Enable DAC channel 1 with its output buffer and drive it to zero.
    pub fn dac1(dac: pac::DAC) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.dacen().set_bit());

        dac.cr.modify(|_, w| w.en1().set_bit());

        let mut this = Self {
            dac,
            reg: SplitRegister::new(),
        };
        this.load(0);
        this
    }

    #[inline]
    fn load(&mut self, value: u16) {
        // DHR12L1[15:4] holds the conversion value
        self.dac
            .dhr12l1
            .write(|w| unsafe { w.bits(value as u32 & 0xFFF0) });
    }
}

impl AnalogOutput for Dac {
    fn write_high(&mut self, byte: u8) {
        let value = self.reg.set_high(byte);
        self.load(value);
    }

    fn write_low(&mut self, byte: u8) {
        let value = self.reg.set_low(byte);
        self.load(value);
    }
}
