// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#[cfg(test)]
mod tests {
    use crate::drivers::setpoint::{AnalogOutput, SplitRegister};
    use crate::error::LinkError;
    use crate::link::ByteSource;
    use crate::protocol::{Parser, SetpointCommand, State};
    use std::collections::VecDeque;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Write {
        High(u8),
        Low(u8),
    }

    #[derive(Default)]
    struct Dac {
        reg: SplitRegister,
        log: Vec<Write>,
    }

    impl AnalogOutput for Dac {
        fn write_high(&mut self, byte: u8) {
            self.reg.set_high(byte);
            self.log.push(Write::High(byte));
        }

        fn write_low(&mut self, byte: u8) {
            self.reg.set_low(byte);
            self.log.push(Write::Low(byte));
        }
    }

    fn feed(parser: &mut Parser, dac: &mut Dac, bytes: &[u8]) -> Vec<SetpointCommand> {
        bytes
            .iter()
            .filter_map(|&b| parser.push(b, dac))
            .collect()
    }

    #[test]
    fn test_plain_frame() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        let done = feed(&mut parser, &mut dac, &[0xDD, 0xDD, 0x05, 0xA0]);

        assert_eq!(done, [SetpointCommand { setpoint: 0x05A0 }]);
        assert_eq!(dac.reg.value(), 0x05A0);
        assert_eq!(dac.log, [Write::High(0x05), Write::Low(0xA0)]);
        assert_eq!(parser.state(), State::Idle);
        assert_eq!(parser.frames(), 1);
    }

    #[test]
    fn test_resync_after_stray_byte() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        let done = feed(&mut parser, &mut dac, &[0xDD, 0x01, 0xDD, 0xDD, 0x05, 0xA0]);

        assert_eq!(done, [SetpointCommand { setpoint: 0x05A0 }]);
        assert_eq!(dac.reg.value(), 0x05A0);
        assert_eq!(dac.log.len(), 2);
    }

    #[test]
    fn test_markers_alone_do_not_touch_output() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();
        feed(&mut parser, &mut dac, &[0xDD, 0xDD, 0x12, 0x34]);
        dac.log.clear();

        feed(&mut parser, &mut dac, &[0xDD, 0xDD]);

        assert!(dac.log.is_empty());
        assert_eq!(dac.reg.value(), 0x1234);
        assert_eq!(parser.state(), State::HighByte);
    }

    #[test]
    fn test_payload_may_equal_marker() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        let done = feed(&mut parser, &mut dac, &[0xDD, 0xDD, 0xDD, 0xDD]);

        assert_eq!(done, [SetpointCommand { setpoint: 0xDDDD }]);
        assert_eq!(parser.state(), State::Idle);
    }

    #[test]
    fn test_noise_in_idle_is_ignored() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        let done = feed(
            &mut parser,
            &mut dac,
            &[0x00, 0xFF, 0x42, 0xDD, 0xDD, 0x00, 0x07],
        );

        assert_eq!(done, [SetpointCommand { setpoint: 0x0007 }]);
    }

    #[test]
    fn test_high_byte_lands_before_frame_completes() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        feed(&mut parser, &mut dac, &[0xDD, 0xDD, 0x80]);

        assert_eq!(parser.state(), State::LowByte);
        assert_eq!(dac.log, [Write::High(0x80)]);
        assert_eq!(dac.reg.value(), 0x8000);
    }

    #[test]
    fn test_reset_abandons_partial_frame() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();

        feed(&mut parser, &mut dac, &[0xDD, 0xDD]);
        parser.reset();
        let done = feed(&mut parser, &mut dac, &[0x05, 0xA0]);

        assert!(done.is_empty());
        assert!(dac.log.is_empty());
        assert_eq!(parser.state(), State::Idle);
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();
        let mut stream = Vec::new();
        for sp in [0x0001u16, 0xFFFF, 0x0DD0] {
            stream.extend_from_slice(&SetpointCommand { setpoint: sp }.encode());
        }

        let done = feed(&mut parser, &mut dac, &stream);

        assert_eq!(done.len(), 3);
        assert_eq!(dac.reg.value(), 0x0DD0);
        assert_eq!(parser.frames(), 3);
    }

    /// Scripted receiver: each entry is a byte or a line error.
    struct Line(VecDeque<Result<u8, LinkError>>);

    impl ByteSource for Line {
        fn try_read(&mut self) -> nb::Result<u8, LinkError> {
            match self.0.pop_front() {
                Some(Ok(b)) => Ok(b),
                Some(Err(e)) => Err(nb::Error::Other(e)),
                None => Err(nb::Error::WouldBlock),
            }
        }
    }

    fn poll_all(parser: &mut Parser, line: &mut Line, dac: &mut Dac) -> Vec<SetpointCommand> {
        let mut done = Vec::new();
        loop {
            match parser.poll(line, dac) {
                Ok(Some(cmd)) => done.push(cmd),
                Ok(None) | Err(nb::Error::Other(_)) => {}
                Err(nb::Error::WouldBlock) => return done,
            }
        }
    }

    #[test]
    fn test_poll_reads_one_byte() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();
        let mut line = Line([Ok(0xDD), Ok(0xDD)].into_iter().collect());

        assert_eq!(parser.poll(&mut line, &mut dac), Ok(None));
        assert_eq!(parser.state(), State::Sync1);
        assert_eq!(parser.poll(&mut line, &mut dac), Ok(None));
        assert_eq!(parser.state(), State::HighByte);
        assert_eq!(
            parser.poll(&mut line, &mut dac),
            Err(nb::Error::WouldBlock)
        );
        assert_eq!(parser.state(), State::HighByte);
    }

    #[test]
    fn test_line_error_mid_frame_returns_to_idle() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();
        let mut line = Line(
            [Ok(0xDD), Ok(0xDD), Ok(0x05)]
                .into_iter()
                .collect(),
        );

        assert!(poll_all(&mut parser, &mut line, &mut dac).is_empty());
        assert_eq!(parser.state(), State::LowByte);

        line.0.push_back(Err(LinkError::Framing));
        assert_eq!(
            parser.poll(&mut line, &mut dac),
            Err(nb::Error::Other(LinkError::Framing))
        );
        assert_eq!(parser.state(), State::Idle);

        line.0.push_back(Ok(0xA0));
        assert!(poll_all(&mut parser, &mut line, &mut dac).is_empty());
        assert_eq!(parser.state(), State::Idle);
        assert_eq!(parser.frames(), 0);
        assert_eq!(dac.log, [Write::High(0x05)]);
    }

    #[test]
    fn test_frame_after_line_error_is_accepted() {
        let mut parser = Parser::new();
        let mut dac = Dac::default();
        let mut line = Line(
            [Ok(0xDD), Err(LinkError::Noise), Ok(0xDD), Ok(0xDD), Ok(0x12), Ok(0x34)]
                .into_iter()
                .collect(),
        );

        let done = poll_all(&mut parser, &mut line, &mut dac);

        assert_eq!(done, [SetpointCommand { setpoint: 0x1234 }]);
        assert_eq!(dac.reg.value(), 0x1234);
    }
}
