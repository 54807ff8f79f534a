// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `embedded-hal` 1.0 adapter for HAL output pins.
//!
//! The hardware-independent drivers are written against `embedded_hal::digital`; this wrapper
//! lets them drive a concrete push-pull pin.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PinState, PushPull};

pub struct OutputLine<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> OutputLine<P, N> {
    /// Configure the pin as push-pull output, initially low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::Low);
        Self { pin }
    }
}

impl<const P: char, const N: u8> ErrorType for OutputLine<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for OutputLine<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_state(PinState::Low);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_state(PinState::High);
        Ok(())
    }
}
