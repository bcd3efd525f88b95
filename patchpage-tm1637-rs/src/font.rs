//! Seven-segment glyphs.
//!
//! Bit layout (bit 7 drives the decimal point or colon, depending on the
//! module):
//!
//! ```text
//!    ─a─          bit 0 = a
//!   f   b         bit 1 = b
//!    ─g─          ...
//!   e   c         bit 6 = g
//!    ─d─  .       bit 7 = dp
//! ```

use crate::registers::DIGITS;

/// Decimal point / colon segment.
pub const SEG_DP: u8 = 0x80;

const DIGIT_GLYPHS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

/// Segments for a single character. Unknown characters render blank.
pub const fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGIT_GLYPHS[c as usize - '0' as usize],
        'A' | 'a' => 0x77,
        'B' | 'b' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'D' | 'd' => 0x5E,
        'E' | 'e' => 0x79,
        'F' | 'f' => 0x71,
        'H' => 0x76,
        'h' => 0x74,
        'L' | 'l' => 0x38,
        'n' | 'N' => 0x54,
        'O' => 0x3F,
        'o' => 0x5C,
        'P' | 'p' => 0x73,
        'r' | 'R' => 0x50,
        'U' => 0x3E,
        'u' => 0x1C,
        '-' => 0x40,
        '_' => 0x08,
        _ => 0x00,
    }
}

/// Encode `text` into one segment byte per digit, right-aligned.
///
/// A `.` lights the decimal point of the character before it instead of
/// taking a digit of its own. When the text is wider than the display the
/// leftmost characters are dropped.
///
/// # Example
///
/// ```
/// use tm1637_driver::font::encode;
///
/// assert_eq!(encode("P 41"), [0x73, 0x00, 0x66, 0x06]);
/// assert_eq!(encode("7"), [0x00, 0x00, 0x00, 0x07]);
/// assert_eq!(encode("1.5"), [0x00, 0x00, 0x86, 0x6D]);
/// ```
pub fn encode(text: &str) -> [u8; DIGITS] {
    let mut out = [0u8; DIGITS];
    let mut dot_pending = false;
    let mut pos = DIGITS;

    // Walk right to left so overflow drops the leading characters.
    for c in text.chars().rev() {
        if c == '.' {
            dot_pending = true;
            continue;
        }
        if pos == 0 {
            break;
        }
        pos -= 1;
        out[pos] = glyph(c);
        if dot_pending {
            out[pos] |= SEG_DP;
            dot_pending = false;
        }
    }

    out
}
