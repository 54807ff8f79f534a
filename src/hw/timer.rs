// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic interrupts from the STM32F7 basic timers (TIM6/TIM7).
//!
//! The timers run in auto-reload mode and raise an update interrupt every `(psc + 1) * (arr + 1)`
//! timer clocks. Prescaler and reload values come from [`crate::config`]. The interrupt handler
//! must call [`BasicTimer::clear_update`] or the interrupt fires again immediately.

use core::ops::Deref;

use stm32f7xx_hal::pac;

pub struct BasicTimer<TIM> {
    tim: TIM,
}

fn configure(tim: &pac::tim6::RegisterBlock, psc: u16, arr: u16) {
    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    tim.psc.write(|w| unsafe { w.bits(psc as u32) });
    tim.arr.write(|w| unsafe { w.bits(arr as u32) });

    // Buffered reload, then force an update so PSC takes effect now
    tim.cr1.modify(|_, w| w.arpe().set_bit());
    tim.egr.write(|w| w.ug().set_bit());

    // The forced update sets UIF; drop it before enabling the interrupt
    tim.sr.modify(|_, w| w.uif().clear_bit());
    tim.dier.modify(|_, w| w.uie().set_bit());
}

impl BasicTimer<pac::TIM6> {
    /// Configure TIM6. The counter stays stopped until [`start`](BasicTimer::start).
    pub fn tim6(tim6: pac::TIM6, psc: u16, arr: u16) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim6en().set_bit());

        configure(&tim6, psc, arr);

        Self { tim: tim6 }
    }
}

impl BasicTimer<pac::TIM7> {
    /// Configure TIM7. The counter stays stopped until [`start`](BasicTimer::start).
    pub fn tim7(tim7: pac::TIM7, psc: u16, arr: u16) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim7en().set_bit());

        configure(&tim7, psc, arr);

        Self { tim: tim7 }
    }
}

impl<TIM> BasicTimer<TIM>
where
    TIM: Deref<Target = pac::tim6::RegisterBlock>,
{
    #[inline]
    pub fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    /// Acknowledge the update interrupt.
    #[inline]
    pub fn clear_update(&mut self) {
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
    }
}
