// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 IR node.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PullUp, PushPull},
    pac,
    prelude::*,
};

use crate::drivers::ir_sensors::{SensorBank, SensorBits};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub usart2: Usart2Pins,
    pub carrier: gpioc::PC6<Output<PushPull>>,
    /// Rotation sensor, active low (EXTI0)
    pub pulse: gpioa::PA0<Input<PullUp>>,
    pub sensors: SensorPins,
    /// DAC_OUT1
    pub dac_out: gpioa::PA4<Analog>,
}

/// USART1 TX/RX (debug console)
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// USART2 TX/RX (host link)
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// Digital IR sensors IR1..IR9
pub struct SensorPins {
    pub ir1: gpioe::PE0<Input<Floating>>,
    pub ir2: gpioe::PE1<Input<Floating>>,
    pub ir3: gpioe::PE2<Input<Floating>>,
    pub ir4: gpioe::PE3<Input<Floating>>,
    pub ir5: gpioe::PE4<Input<Floating>>,
    pub ir6: gpioe::PE5<Input<Floating>>,
    pub ir7: gpioe::PE6<Input<Floating>>,
    pub ir8: gpioe::PE7<Input<Floating>>,
    pub ir9: gpioe::PE8<Input<Floating>>,
}

impl SensorBank for SensorPins {
    fn sample(&mut self) -> SensorBits {
        SensorBits::new([
            self.ir1.is_high(),
            self.ir2.is_high(),
            self.ir3.is_high(),
            self.ir4.is_high(),
            self.ir5.is_high(),
            self.ir6.is_high(),
            self.ir7.is_high(),
            self.ir8.is_high(),
            self.ir9.is_high(),
        ])
    }
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            usart2: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            carrier: gpioc.pc6.into_push_pull_output(),
            pulse: gpioa.pa0.into_pull_up_input(),

            sensors: SensorPins {
                ir1: gpioe.pe0.into_floating_input(),
                ir2: gpioe.pe1.into_floating_input(),
                ir3: gpioe.pe2.into_floating_input(),
                ir4: gpioe.pe3.into_floating_input(),
                ir5: gpioe.pe4.into_floating_input(),
                ir6: gpioe.pe5.into_floating_input(),
                ir7: gpioe.pe6.into_floating_input(),
                ir8: gpioe.pe7.into_floating_input(),
                ir9: gpioe.pe8.into_floating_input(),
            },

            dac_out: gpioa.pa4.into_analog(),
        }
    }
}
