//! Display colors
//!
//! The SSD1351 OLED takes 16-bit RGB565 pixels. Application code usually
//! thinks in 24-bit `0xRRGGBB` values, so both forms are accepted and the
//! 24-bit one is quantised on the way to the panel.

/// A color in one of the two accepted encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Standard 24-bit `0xRRGGBB`; upper byte ignored
    Rgb888(u32),
    /// Already encoded RGB565
    Rgb565(u16),
}

impl Color {
    /// White in RGB565
    pub const WHITE: Color = Color::Rgb565(0xFFFF);
    /// Black in RGB565
    pub const BLACK: Color = Color::Rgb565(0x0000);
    /// Default text box background (a muted blue)
    pub const TEXT_BACKGROUND: Color = Color::Rgb565(0x4471);

    /// Build a color from a raw value and an "encode" flag
    ///
    /// `encode = true` treats `value` as 24-bit RGB, `false` as RGB565
    /// (only the low 16 bits are kept).
    pub fn from_raw(value: u32, encode: bool) -> Self {
        if encode {
            Color::Rgb888(value & 0x00FF_FFFF)
        } else {
            Color::Rgb565(value as u16)
        }
    }

    /// Encode as RGB565
    pub fn to_rgb565(self) -> u16 {
        match self {
            Color::Rgb565(c) => c,
            Color::Rgb888(c) => rgb888_to_rgb565(c),
        }
    }
}

/// Quantise a 24-bit color to RGB565 by truncating 3/2/3 low bits
pub fn rgb888_to_rgb565(rgb: u32) -> u16 {
    let r = ((rgb >> 16) & 0xFF) as u16;
    let g = ((rgb >> 8) & 0xFF) as u16;
    let b = (rgb & 0xFF) as u16;
    ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb888_to_rgb565(0xFF0000), 0xF800);
        assert_eq!(rgb888_to_rgb565(0x00FF00), 0x07E0);
        assert_eq!(rgb888_to_rgb565(0x0000FF), 0x001F);
        assert_eq!(rgb888_to_rgb565(0xFFFFFF), 0xFFFF);
        assert_eq!(rgb888_to_rgb565(0x000000), 0x0000);
    }

    #[test]
    fn test_pre_encoded_passes_through() {
        assert_eq!(Color::Rgb565(0x4471).to_rgb565(), 0x4471);
        assert_eq!(Color::from_raw(0x4471, false), Color::Rgb565(0x4471));
    }

    #[test]
    fn test_from_raw_encode_masks_alpha() {
        assert_eq!(Color::from_raw(0xAAFF0000, true), Color::Rgb888(0xFF0000));
        assert_eq!(Color::from_raw(0xAAFF0000, true).to_rgb565(), 0xF800);
    }

    proptest! {
        #[test]
        fn quantisation_keeps_high_bits(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = (r as u32) << 16 | (g as u32) << 8 | b as u32;
            let c = rgb888_to_rgb565(rgb);
            prop_assert_eq!((c >> 11) as u8, r >> 3);
            prop_assert_eq!(((c >> 5) & 0x3F) as u8, g >> 2);
            prop_assert_eq!((c & 0x1F) as u8, b >> 3);
        }
    }
}
