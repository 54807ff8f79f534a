// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rotation pulse input on EXTI line 0.
//!
//! The wheel sensor pulls PA0 low once per pulse. EXTI0 is routed to port A and triggers on the
//! falling edge only.

use stm32f7xx_hal::pac;

const LINE0: u32 = 1 << 0;

pub struct PulseLine {
    exti: pac::EXTI,
}

impl PulseLine {
    /// Route PA0 to EXTI0 and enable its falling-edge interrupt request.
    pub fn pa0_falling(exti: pac::EXTI, syscfg: &pac::SYSCFG) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        // EXTICR1[3:0] = 0b0000 selects port A for line 0
        syscfg
            .exticr1
            .modify(|r, w| unsafe { w.bits(r.bits() & !0xF) });

        // Falling edge only
        exti.rtsr.modify(|r, w| unsafe { w.bits(r.bits() & !LINE0) });
        exti.ftsr.modify(|r, w| unsafe { w.bits(r.bits() | LINE0) });

        // Drop anything latched during setup, then unmask
        exti.pr.write(|w| unsafe { w.bits(LINE0) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | LINE0) });

        Self { exti }
    }

    /// Acknowledge the pending edge. PR bits clear on write-one.
    #[inline]
    pub fn clear_pending(&mut self) {
        self.exti.pr.write(|w| unsafe { w.bits(LINE0) });
    }
}
