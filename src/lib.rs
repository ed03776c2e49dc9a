#![no_std]

mod constants;

pub use constants::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use num_traits::float::FloatCore;

/// Driver for a TM1637-connected 4-digit 7-segment display.
///
/// The bus is bit-banged over two GPIO pins. `DIO` must be open-drain (or
/// otherwise readable while configured as output): the chip acknowledges each
/// byte by pulling the released data line low.
pub struct TM1637<CLK, DIO, DELAY> {
    clk: CLK,
    dio: DIO,
    delay: DELAY,
    cmd_set_data: u8,
    cmd_set_addr: u8,
    cmd_disp_ctrl: u8,
    point: bool,
}

impl<CLK, DIO, DELAY, E> TM1637<CLK, DIO, DELAY>
where
    CLK: OutputPin<Error = E>,
    DIO: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, delay: DELAY) -> Self {
        Self {
            clk,
            dio,
            delay,
            cmd_set_data: command::ADDR_AUTO,
            cmd_set_addr: command::START_ADDR,
            cmd_disp_ctrl: command::DISPLAY_CTRL + BRIGHT_TYPICAL,
            point: false,
        }
    }

    pub fn destroy(self) -> (CLK, DIO, DELAY) {
        (self.clk, self.dio, self.delay)
    }

    pub fn init(&mut self) -> Result<(), TM1637Error<E>> {
        self.clear()
    }

    /// Stores the brightness (0-7) and the data/address command bytes.
    /// Takes effect on the next write, never retroactively.
    pub fn configure(
        &mut self,
        brightness: u8,
        set_data: u8,
        set_addr: u8,
    ) -> Result<(), TM1637Error<E>> {
        if brightness > MAX_BRIGHTNESS {
            return Err(TM1637Error::InvalidValue);
        }
        self.cmd_set_data = set_data;
        self.cmd_set_addr = set_addr;
        self.cmd_disp_ctrl = command::DISPLAY_CTRL + brightness;
        Ok(())
    }

    /// Rewrites only the display-control command byte, leaving the data and
    /// address command bytes untouched.
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), TM1637Error<E>> {
        if brightness > MAX_BRIGHTNESS {
            return Err(TM1637Error::InvalidValue);
        }
        self.cmd_disp_ctrl = command::DISPLAY_CTRL + brightness;
        Ok(())
    }

    /// Whether to light the clock point ":". Takes effect on the next write.
    pub fn set_point(&mut self, on: bool) {
        self.point = on;
    }

    /// Resolves one input value to a segment byte: the [`BLANK`] sentinel
    /// clears the digit, 0-15 and ASCII digits go through the numeral table,
    /// anything else through the character table (unknown characters render
    /// blank). Bit 7 carries the point flag.
    pub fn encode(&self, value: u8) -> u8 {
        let segments = if value == BLANK {
            0x00
        } else if value < 16 {
            NUMBERS[value as usize]
        } else if value.is_ascii_digit() {
            NUMBERS[(value - b'0') as usize]
        } else {
            char_to_segments(value)
        };
        if self.point {
            segments | POINT_MASK
        } else {
            segments
        }
    }

    /// Encodes and writes all 4 digits in one auto-increment transfer.
    pub fn write_all(&mut self, values: &[u8; DIGITS as usize]) -> Result<(), TM1637Error<E>> {
        let mut segments = [0u8; DIGITS as usize];
        for (seg, value) in segments.iter_mut().zip(values) {
            *seg = self.encode(*value);
        }

        self.start()?;
        self.write_byte(self.cmd_set_data)?;
        self.stop()?;

        self.start()?;
        self.write_byte(self.cmd_set_addr)?;
        for seg in segments {
            self.write_byte(seg)?;
        }
        self.stop()?;

        self.start()?;
        self.write_byte(self.cmd_disp_ctrl)?;
        self.stop()?;
        Ok(())
    }

    /// Encodes and writes a single digit using fixed addressing.
    pub fn write_one(&mut self, position: u8, value: u8) -> Result<(), TM1637Error<E>> {
        if position >= DIGITS {
            return Err(TM1637Error::InvalidLocation(position));
        }
        let segments = self.encode(value);

        self.start()?;
        self.write_byte(command::ADDR_FIXED)?;
        self.stop()?;

        self.start()?;
        self.write_byte(command::START_ADDR | position)?;
        self.write_byte(segments)?;
        self.stop()?;

        self.start()?;
        self.write_byte(self.cmd_disp_ctrl)?;
        self.stop()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), TM1637Error<E>> {
        for position in 0..DIGITS {
            self.write_one(position, BLANK)?;
        }
        Ok(())
    }

    /// Displays a number right-aligned. `decimal_places` is 0 or 2; with 2 the
    /// value is scaled by 100 and the colon lights up (the hardware has no
    /// per-digit decimal point, the clock colon stands in for it). A scaled
    /// magnitude outside `i32` is out of contract.
    pub fn display_number(
        &mut self,
        value: f32,
        decimal_places: u8,
        show_minus: bool,
    ) -> Result<(), TM1637Error<E>> {
        // Point first so the digits written below already carry its bit.
        self.set_point(decimal_places == 2);

        let mut scaled = (value.abs() * 10f32.powi(decimal_places as i32)).round() as i32;
        let minus = show_minus && value < 0.0;

        for i in 0..DIGITS - if minus { 1 } else { 0 } {
            let position = DIGITS - 1 - i;
            if scaled != 0 {
                self.write_one(position, (scaled % 10) as u8)?;
            } else {
                self.write_one(position, BLANK)?;
            }
            scaled /= 10;
        }

        if minus {
            self.write_one(0, b'-')?;
        }
        Ok(())
    }

    /// Displays a string. Text that fits is written left-aligned in a single
    /// transfer; longer text scrolls through a 4-character window that enters
    /// from the right edge and exits off the left, pausing `scroll_delay_ms`
    /// between window positions.
    pub fn display_str(&mut self, text: &str, scroll_delay_ms: u16) -> Result<(), TM1637Error<E>> {
        let bytes = text.as_bytes();

        if bytes.len() <= DIGITS as usize {
            let mut values = [BLANK; DIGITS as usize];
            values[..bytes.len()].copy_from_slice(bytes);
            return self.write_all(&values);
        }

        let len = bytes.len() as i32;
        for window in -(DIGITS as i32)..=len {
            if window > -(DIGITS as i32) {
                self.delay.delay_ms(scroll_delay_ms as u32);
            }
            let mut values = [BLANK; DIGITS as usize];
            for (slot, value) in values.iter_mut().enumerate() {
                let index = window + slot as i32;
                if (0..len).contains(&index) {
                    *value = bytes[index as usize];
                }
            }
            self.write_all(&values)?;
        }
        Ok(())
    }

    /// Sends the start condition: DIO falls while CLK is high.
    pub fn start(&mut self) -> Result<(), TM1637Error<E>> {
        self.clk.set_high()?;
        self.dio.set_high()?;
        self.dio.set_low()?;
        self.clk.set_low()?;
        Ok(())
    }

    /// Sends the stop condition: DIO rises while CLK is high.
    pub fn stop(&mut self) -> Result<(), TM1637Error<E>> {
        self.clk.set_low()?;
        self.dio.set_low()?;
        self.clk.set_high()?;
        self.dio.set_high()?;
        Ok(())
    }

    /// Transmits one byte LSB first and samples the acknowledge. Returns true
    /// when the chip pulled DIO low (ack is active-low on the wire). A missing
    /// ack is reported, not escalated.
    pub fn write_byte(&mut self, byte: u8) -> Result<bool, TM1637Error<E>> {
        let mut data = byte;
        for _ in 0..8 {
            self.clk.set_low()?;
            if data & 0x01 != 0 {
                self.dio.set_high()?;
            } else {
                self.dio.set_low()?;
            }
            data >>= 1;
            self.clk.set_high()?; // chip samples the bit on this edge
        }

        // Release DIO and clock out the acknowledge slot.
        self.clk.set_low()?;
        self.dio.set_high()?;
        self.clk.set_high()?;

        self.bit_delay();
        let ack = self.dio.is_low()?;
        if ack {
            self.dio.set_low()?;
        }

        // A failed ack leaves the line released through these delays. Real
        // chips tolerate it; the ordering matches their timing budget.
        self.bit_delay();
        self.bit_delay();

        Ok(ack)
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TM1637Error<E> {
    PinError(E),
    InvalidValue,
    InvalidLocation(u8),
}

impl<E> From<E> for TM1637Error<E> {
    fn from(error: E) -> Self {
        TM1637Error::PinError(error)
    }
}
