pub const DIGITS: u8 = 4;

/// Sentinel input value that encodes to an empty digit.
pub const BLANK: u8 = 0x7F;
/// Bit 7 of a segment byte drives the colon/point indicator.
pub const POINT_MASK: u8 = 0x80;

pub const BRIGHT_DARKEST: u8 = 0;
pub const BRIGHT_TYPICAL: u8 = 2;
pub const BRIGHTEST: u8 = 7;
pub const MAX_BRIGHTNESS: u8 = 7;

pub const BIT_DELAY_US: u32 = 50;

pub mod command {
    /// Data command, auto-increment addressing.
    pub const ADDR_AUTO: u8 = 0x40;
    /// Data command, fixed addressing.
    pub const ADDR_FIXED: u8 = 0x44;
    /// Address command base; OR'd with digit position 0-3 in fixed mode.
    pub const START_ADDR: u8 = 0xC0;
    /// Display control base; brightness 0-7 is added to it.
    pub const DISPLAY_CTRL: u8 = 0x88;
}

//  --0x01--
// |        |
//0x20     0x02
// |        |
//  --0x40--
// |        |
//0x10     0x04
// |        |
//  --0x08--

/// 0-9, A, b, C, d, E, F
pub const NUMBERS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

/// Closest 7-segment glyph for a printable character, blank when the shape
/// cannot be drawn at all. Letter pairs share one glyph unless upper and
/// lower case are distinguishable with 7 segments.
pub fn char_to_segments(c: u8) -> u8 {
    match c {
        b'_' => 0x08,
        b'^' => 0x01, // ¯
        b'-' => 0x40,
        b'*' => 0x63, // °
        b' ' => 0x00,
        b'A' => 0x77,
        b'a' => 0x57,
        b'B' | b'b' => 0x7C, // lower case b
        b'C' => 0x39,
        b'c' => 0x58,
        b'D' | b'd' => 0x5E, // lower case d
        b'E' | b'e' => 0x79,
        b'F' | b'f' => 0x71,
        b'G' | b'g' => 0x35,
        b'H' => 0x76,
        b'h' => 0x74,
        b'I' | b'i' => 0x06, // right aligned, 0x30 would be left
        b'J' | b'j' => 0x1E,
        b'K' | b'k' => 0x75,
        b'L' | b'l' => 0x38,
        b'M' | b'm' => 0x37, // twice tall ∩
        b'N' | b'n' => 0x54, // lower case n
        b'O' | b'o' => 0x5C, // lower case o
        b'P' | b'p' => 0x73,
        b'Q' | b'q' => 0x67, // lower case q, unconfirmed
        b'R' | b'r' => 0x50, // lower case r
        b'S' | b's' => 0x6D,
        b'T' | b't' => 0x78, // lower case t
        b'U' | b'u' => 0x1C, // lower case u
        b'V' | b'v' => 0x3E, // twice tall u
        b'W' | b'w' => 0x2A,
        b'X' | b'x' => 0x76, // unconfirmed
        b'Y' | b'y' => 0x6E, // lower case y
        b'Z' | b'z' => 0x1B, // unconfirmed
        _ => 0x00,
    }
}
