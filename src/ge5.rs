use anyhow::{ensure, Result};

use crate::{
    matching::ColorMapping,
    palette::{Color, Palette},
};

// Layout of a GE5 file (MSX2 SCREEN 5 image with a 7-byte BSAVE header).
// Offsets are absolute from the start of the file; the format has no
// self-describing header, so out-of-range regions mean a truncated or
// foreign file.
pub const PALETTE_OFFSET: usize = 0x7687;
pub const PALETTE_SIZE: usize = 32; // 16 colors, 2 bytes each
pub const PIXEL_OFFSET: usize = 7;
pub const PIXEL_LINES: usize = 212;
pub const PIXEL_LINE_BYTES: usize = 128; // 256 pixels, 2 per byte
pub const PIXEL_SIZE: usize = PIXEL_LINES * PIXEL_LINE_BYTES;

#[derive(Clone)]
pub struct Ge5Image {
    pub data: Vec<u8>,
}

impl Ge5Image {
    pub fn new(data: Vec<u8>) -> Self {
        Ge5Image { data }
    }

    // Decodes the 16-color palette region. Each color is a byte pair: red
    // in the high nibble of the first byte, blue in its low nibble, green
    // in the low nibble of the second byte (whose high nibble is unused).
    pub fn read_palette(&self) -> Result<Palette> {
        ensure!(
            PALETTE_OFFSET + PALETTE_SIZE <= self.data.len(),
            "palette region out of bounds: need {} bytes, file has {}",
            PALETTE_OFFSET + PALETTE_SIZE,
            self.data.len()
        );
        let mut colors = [Color::default(); 16];
        for (i, color) in colors.iter_mut().enumerate() {
            let b0 = self.data[PALETTE_OFFSET + i * 2];
            let b1 = self.data[PALETTE_OFFSET + i * 2 + 1];
            *color = Color {
                red: b0 >> 4,
                green: b1 & 15,
                blue: b0 & 15,
            };
        }

        Ok(Palette { colors })
    }

    // Overwrites the palette region so every mapped target slot holds the
    // reference color of that slot. The mapping is total, so afterwards the
    // palette decodes identical to the reference.
    pub fn write_palette(&mut self, reference: &Palette, mapping: &ColorMapping) -> Result<()> {
        ensure!(
            PALETTE_OFFSET + PALETTE_SIZE <= self.data.len(),
            "palette region out of bounds: need {} bytes, file has {}",
            PALETTE_OFFSET + PALETTE_SIZE,
            self.data.len()
        );
        for entry in mapping.entries() {
            let slot = entry.target as usize;
            let c = reference.colors[slot];
            self.data[PALETTE_OFFSET + slot * 2] = c.red << 4 | c.blue;
            self.data[PALETTE_OFFSET + slot * 2 + 1] = c.green;
        }
        Ok(())
    }

    // Rewrites every packed pixel byte through the mapping, one 4-bit color
    // index per nibble.
    pub fn remap_pixels(&mut self, mapping: &ColorMapping) -> Result<()> {
        ensure!(
            PIXEL_OFFSET + PIXEL_SIZE <= self.data.len(),
            "pixel data region out of bounds: need {} bytes, file has {}",
            PIXEL_OFFSET + PIXEL_SIZE,
            self.data.len()
        );
        for i in PIXEL_OFFSET..PIXEL_OFFSET + PIXEL_SIZE {
            let color1 = self.data[i] >> 4;
            let color2 = self.data[i] & 15;
            self.data[i] = mapping.target_of(color1) << 4 | mapping.target_of(color2);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::match_palettes;

    fn blank_image() -> Ge5Image {
        Ge5Image::new(vec![0; PALETTE_OFFSET + PALETTE_SIZE])
    }

    fn color(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    fn distinct_palette() -> Palette {
        let mut colors = [Color::default(); 16];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = color(i as u8, 1, 2);
        }
        Palette { colors }
    }

    fn image_with_palette(palette: &Palette) -> Ge5Image {
        let mut image = blank_image();
        for (i, c) in palette.colors.iter().enumerate() {
            image.data[PALETTE_OFFSET + i * 2] = c.red << 4 | c.blue;
            image.data[PALETTE_OFFSET + i * 2 + 1] = c.green;
        }
        image
    }

    #[test]
    fn palette_decodes_nibbles_from_byte_pairs() {
        let mut image = blank_image();
        image.data[PALETTE_OFFSET] = 0x3A;
        image.data[PALETTE_OFFSET + 1] = 0x05;
        image.data[PALETTE_OFFSET + 30] = 0xF1;
        image.data[PALETTE_OFFSET + 31] = 0x0C;
        let palette = image.read_palette().unwrap();
        assert_eq!(palette.colors[0], color(3, 5, 10));
        assert_eq!(palette.colors[15], color(15, 12, 1));
        assert_eq!(palette.colors[1], color(0, 0, 0));
    }

    #[test]
    fn palette_ignores_high_nibble_of_green_byte() {
        let mut image = blank_image();
        image.data[PALETTE_OFFSET + 1] = 0xF5;
        let palette = image.read_palette().unwrap();
        assert_eq!(palette.colors[0], color(0, 5, 0));
    }

    #[test]
    fn palette_on_short_file_names_the_region() {
        let image = Ge5Image::new(vec![0; 100]);
        let err = image.read_palette().unwrap_err();
        assert!(err.to_string().contains("palette region out of bounds"));
    }

    #[test]
    fn remap_on_short_file_names_the_region() {
        let mut image = Ge5Image::new(vec![0; 100]);
        let reference = distinct_palette();
        let mapping = match_palettes(&reference, &reference);
        let err = image.remap_pixels(&mapping).unwrap_err();
        assert!(err.to_string().contains("pixel data region out of bounds"));
    }

    #[test]
    fn write_palette_on_short_file_names_the_region() {
        let mut image = Ge5Image::new(vec![0; 100]);
        let reference = distinct_palette();
        let mapping = match_palettes(&reference, &reference);
        let err = image.write_palette(&reference, &mapping).unwrap_err();
        assert!(err.to_string().contains("palette region out of bounds"));
    }

    #[test]
    fn write_palette_makes_palette_identical_to_reference() {
        let reference = distinct_palette();
        let mut rotated = [Color::default(); 16];
        for i in 0..16 {
            rotated[i] = reference.colors[(i + 1) % 16];
        }
        let subject = Palette { colors: rotated };
        let mut image = image_with_palette(&subject);
        let mapping = match_palettes(&subject, &reference);
        image.write_palette(&reference, &mapping).unwrap();
        assert_eq!(image.read_palette().unwrap(), reference);
    }

    #[test]
    fn remap_pixels_rewrites_both_nibbles() {
        let reference = distinct_palette();
        let mut rotated = [Color::default(); 16];
        for i in 0..16 {
            rotated[i] = reference.colors[(i + 1) % 16];
        }
        let subject = Palette { colors: rotated };
        // Rotation by one: every source slot s maps to slot s + 1 mod 16.
        let mapping = match_palettes(&subject, &reference);

        let mut image = blank_image();
        image.data[PIXEL_OFFSET] = 0x01;
        image.data[PIXEL_OFFSET + 1] = 0xF0;
        image.data[PIXEL_OFFSET + PIXEL_SIZE - 1] = 0x7C;
        // One byte past the pixel region must stay untouched.
        image.data[PIXEL_OFFSET + PIXEL_SIZE] = 0x01;

        image.remap_pixels(&mapping).unwrap();
        assert_eq!(image.data[PIXEL_OFFSET], 0x12);
        assert_eq!(image.data[PIXEL_OFFSET + 1], 0x01);
        assert_eq!(image.data[PIXEL_OFFSET + PIXEL_SIZE - 1], 0x8D);
        assert_eq!(image.data[PIXEL_OFFSET + PIXEL_SIZE], 0x01);
    }

    #[test]
    fn remap_with_identity_mapping_is_a_no_op() {
        let reference = distinct_palette();
        let mapping = match_palettes(&reference, &reference);
        let mut image = blank_image();
        image.data[PIXEL_OFFSET + 100] = 0xA5;
        let before = image.data.clone();
        image.remap_pixels(&mapping).unwrap();
        assert_eq!(image.data, before);
    }
}
