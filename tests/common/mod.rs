#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

/// Every pin transition and delay the driver performs, in order. `ack` is the
/// level the chip "drives" during the acknowledge slot (true = pulls DIO low).
pub struct Trace {
    pub events: Vec<Event>,
    pub ack: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Clk(bool),
    Dio(bool),
    DelayNs(u32),
}

pub struct ClkPin(pub Rc<RefCell<Trace>>);
pub struct DioPin(pub Rc<RefCell<Trace>>);
pub struct MockDelay(pub Rc<RefCell<Trace>>);

impl embedded_hal::digital::ErrorType for ClkPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ClkPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Clk(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Clk(true));
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for DioPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for DioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Dio(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Dio(true));
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for DioPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().ack)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().ack)
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().events.push(Event::DelayNs(ns));
    }
}

pub fn new_display() -> (tm1637::TM1637<ClkPin, DioPin, MockDelay>, Rc<RefCell<Trace>>) {
    let trace = Rc::new(RefCell::new(Trace {
        events: Vec::new(),
        ack: true,
    }));
    let display = tm1637::TM1637::new(
        ClkPin(trace.clone()),
        DioPin(trace.clone()),
        MockDelay(trace.clone()),
    );
    (display, trace)
}

/// Reconstructs the start/stop-framed byte frames from a pin trace, the way
/// the chip would see them: a bit is sampled on each rising CLK edge, LSB
/// first; DIO falling while CLK is high opens a frame, rising closes it. The
/// host-driven acknowledge slot after each byte is skipped so its DIO
/// activity is not mistaken for framing.
pub fn decode_frames(events: &[Event]) -> Vec<Vec<u8>> {
    #[derive(PartialEq)]
    enum Phase {
        Bits,
        AckPulse,
        AckHold,
    }

    let mut frames = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut clk = false;
    let mut dio = false;
    let mut phase = Phase::Bits;
    let mut bit = 0;
    let mut byte = 0u8;

    for event in events {
        match *event {
            Event::Clk(level) => {
                if level && !clk {
                    match phase {
                        Phase::Bits => {
                            if let Some(frame) = current.as_mut() {
                                if dio {
                                    byte |= 1 << bit;
                                }
                                bit += 1;
                                if bit == 8 {
                                    frame.push(byte);
                                    phase = Phase::AckPulse;
                                }
                            }
                        }
                        Phase::AckPulse => phase = Phase::AckHold,
                        Phase::AckHold => {}
                    }
                } else if !level && clk && phase == Phase::AckHold {
                    phase = Phase::Bits;
                    bit = 0;
                    byte = 0;
                }
                clk = level;
            }
            Event::Dio(level) => {
                if clk && phase == Phase::Bits {
                    if dio && !level {
                        current = Some(Vec::new());
                        bit = 0;
                        byte = 0;
                    } else if !dio && level {
                        if let Some(frame) = current.take() {
                            frames.push(frame);
                        }
                    }
                }
                dio = level;
            }
            Event::DelayNs(_) => {}
        }
    }
    frames
}

/// DIO level at each rising CLK edge, in order.
pub fn dio_at_rising_clk(events: &[Event]) -> Vec<bool> {
    let mut clk = false;
    let mut dio = false;
    let mut levels = Vec::new();
    for event in events {
        match *event {
            Event::Clk(level) => {
                if level && !clk {
                    levels.push(dio);
                }
                clk = level;
            }
            Event::Dio(level) => dio = level,
            Event::DelayNs(_) => {}
        }
    }
    levels
}

/// Millisecond-scale delays (the scroll pauses); bit delays are filtered out.
pub fn ms_delays(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::DelayNs(ns) if *ns >= 1_000_000 => Some(ns / 1_000_000),
            _ => None,
        })
        .collect()
}
