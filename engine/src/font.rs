//! 3x5 block font used for overlay captions.
//!
//! Each glyph is packed into 15 bits, five rows of three columns, top row in the high bits.

pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;

const fn pack(rows: [u8; 5]) -> u16 {
    ((rows[0] as u16) << 12)
        | ((rows[1] as u16) << 9)
        | ((rows[2] as u16) << 6)
        | ((rows[3] as u16) << 3)
        | rows[4] as u16
}

const UNKNOWN: u16 = pack([0b111, 0b001, 0b010, 0b000, 0b010]);

pub fn glyph(ch: char) -> u16 {
    match ch.to_ascii_uppercase() {
        '0' => pack([0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => pack([0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => pack([0b111, 0b001, 0b111, 0b100, 0b111]),
        '3' => pack([0b111, 0b001, 0b011, 0b001, 0b111]),
        '4' => pack([0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' => pack([0b111, 0b100, 0b111, 0b001, 0b110]),
        '6' => pack([0b011, 0b100, 0b111, 0b101, 0b111]),
        '7' => pack([0b111, 0b001, 0b010, 0b010, 0b010]),
        '8' => pack([0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => pack([0b111, 0b101, 0b111, 0b001, 0b110]),
        'A' => pack([0b010, 0b101, 0b111, 0b101, 0b101]),
        'B' => pack([0b110, 0b101, 0b110, 0b101, 0b110]),
        'C' => pack([0b011, 0b100, 0b100, 0b100, 0b011]),
        'D' => pack([0b110, 0b101, 0b101, 0b101, 0b110]),
        'E' => pack([0b111, 0b100, 0b110, 0b100, 0b111]),
        'F' => pack([0b111, 0b100, 0b110, 0b100, 0b100]),
        'G' => pack([0b011, 0b100, 0b101, 0b101, 0b011]),
        'H' => pack([0b101, 0b101, 0b111, 0b101, 0b101]),
        'I' => pack([0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => pack([0b001, 0b001, 0b001, 0b101, 0b010]),
        'K' => pack([0b101, 0b101, 0b110, 0b101, 0b101]),
        'L' => pack([0b100, 0b100, 0b100, 0b100, 0b111]),
        'M' => pack([0b101, 0b111, 0b111, 0b101, 0b101]),
        'N' => pack([0b110, 0b101, 0b101, 0b101, 0b101]),
        'O' => pack([0b010, 0b101, 0b101, 0b101, 0b010]),
        'P' => pack([0b110, 0b101, 0b110, 0b100, 0b100]),
        'Q' => pack([0b010, 0b101, 0b101, 0b110, 0b011]),
        'R' => pack([0b110, 0b101, 0b110, 0b101, 0b101]),
        'S' => pack([0b011, 0b100, 0b010, 0b001, 0b110]),
        'T' => pack([0b111, 0b010, 0b010, 0b010, 0b010]),
        'U' => pack([0b101, 0b101, 0b101, 0b101, 0b111]),
        'V' => pack([0b101, 0b101, 0b101, 0b101, 0b010]),
        'W' => pack([0b101, 0b101, 0b111, 0b111, 0b101]),
        'X' => pack([0b101, 0b101, 0b010, 0b101, 0b101]),
        'Y' => pack([0b101, 0b101, 0b010, 0b010, 0b010]),
        'Z' => pack([0b111, 0b001, 0b010, 0b100, 0b111]),
        ' ' => 0,
        '.' => pack([0b000, 0b000, 0b000, 0b000, 0b010]),
        ':' => pack([0b000, 0b010, 0b000, 0b010, 0b000]),
        '-' => pack([0b000, 0b000, 0b111, 0b000, 0b000]),
        '!' => pack([0b010, 0b010, 0b010, 0b000, 0b010]),
        _ => UNKNOWN,
    }
}

/// Whether the glyph has ink at (`col`, `row`).
pub fn glyph_bit(glyph: u16, col: u32, row: u32) -> bool {
    if col >= GLYPH_W || row >= GLYPH_H {
        return false;
    }
    let shift = (GLYPH_H - 1 - row) * GLYPH_W + (GLYPH_W - 1 - col);
    (glyph >> shift) & 1 == 1
}

/// Pixel width of `text` at `scale`, with one column of spacing between glyphs.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    let scale = scale.max(1);
    (n * (GLYPH_W + 1) - 1) * scale
}
