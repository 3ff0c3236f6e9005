//! OLED operations

use hexi_core::traits::OledDisplay;
use hexi_core::{Color, Feature};

use super::Hexiwear;
use crate::board::Board;
use crate::error::Error;
use crate::text::TextStyle;

impl<B: Board> Hexiwear<B> {
    fn display(&mut self) -> Result<&mut B::Display, Error> {
        self.oled.as_mut().ok_or(Error::Disabled(Feature::Oled))
    }

    pub fn display_on(&mut self) -> Result<(), Error> {
        Ok(self.display()?.on()?)
    }

    /// Switch the panel off; its contents are kept
    pub fn display_off(&mut self) -> Result<(), Error> {
        Ok(self.display()?.off()?)
    }

    pub fn clear_display(&mut self) -> Result<(), Error> {
        Ok(self.display()?.clear()?)
    }

    pub fn fill_screen(&mut self, color: Color) -> Result<(), Error> {
        Ok(self.display()?.fill_screen(color.to_rgb565())?)
    }

    /// Fill the `w` x `h` rectangle at (`x`, `y`)
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> Result<(), Error> {
        Ok(self.display()?.fill_rect(x, y, w, h, color.to_rgb565())?)
    }

    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        Ok(self.display()?.draw_pixel(x, y, color.to_rgb565())?)
    }

    /// Blit an image of big-endian RGB565 pixels
    pub fn draw_image(&mut self, image: &[u8], x: u16, y: u16, w: u16, h: u16) -> Result<(), Error> {
        Ok(self.display()?.draw_image(image, x, y, w, h)?)
    }

    /// Render `text`, filling unset style fields with the defaults
    pub fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<(), Error> {
        let display = self.display()?;
        let text_box = style.resolve(text, &*display);
        Ok(display.draw_text(text, &text_box)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{full_parts, DisplayOp, MockBoard, Shared, GLYPH_HEIGHT, GLYPH_WIDTH};
    use hexi_core::traits::{Align, TextBox};
    use hexi_core::{Features, HexiwearConfig};

    fn hexiwear(shared: &Shared) -> Hexiwear<MockBoard> {
        let hexiwear =
            Hexiwear::<MockBoard>::new(full_parts(shared), HexiwearConfig::default()).unwrap();
        shared.borrow_mut().display_log.clear();
        hexiwear
    }

    #[test]
    fn test_colors_are_encoded() {
        let shared = Shared::default();
        let mut hexiwear = hexiwear(&shared);

        hexiwear.fill_screen(Color::Rgb888(0xFF0000)).unwrap();
        hexiwear
            .fill_rect(1, 2, 3, 4, Color::Rgb888(0x00FF00))
            .unwrap();
        hexiwear.draw_pixel(5, 6, Color::Rgb565(0x1234)).unwrap();

        assert_eq!(
            shared.borrow().display_log,
            [
                DisplayOp::FillScreen(0xF800),
                DisplayOp::FillRect(1, 2, 3, 4, 0x07E0),
                DisplayOp::Pixel(5, 6, 0x1234),
            ]
        );
    }

    #[test]
    fn test_panel_control() {
        let shared = Shared::default();
        let mut hexiwear = hexiwear(&shared);

        hexiwear.display_off().unwrap();
        hexiwear.display_on().unwrap();
        hexiwear.clear_display().unwrap();
        hexiwear.draw_image(&[0xFF; 8], 0, 0, 2, 2).unwrap();

        assert_eq!(
            shared.borrow().display_log,
            [
                DisplayOp::Off,
                DisplayOp::On,
                DisplayOp::Clear,
                DisplayOp::Image {
                    len: 8,
                    x: 0,
                    y: 0,
                    w: 2,
                    h: 2
                },
            ]
        );
    }

    #[test]
    fn test_text_defaults() {
        let shared = Shared::default();
        let mut hexiwear = hexiwear(&shared);

        hexiwear.draw_text("Hello", &TextStyle::default()).unwrap();

        let expected = TextBox {
            x: 0,
            y: 0,
            w: 5 * GLYPH_WIDTH,
            h: GLYPH_HEIGHT,
            color: 0xFFFF,
            background: 0x4471,
            align: Align::Center,
        };
        assert_eq!(
            shared.borrow().display_log,
            [DisplayOp::Text("Hello".into(), expected)]
        );
    }

    #[test]
    fn test_text_style_overrides() {
        let shared = Shared::default();
        let mut hexiwear = hexiwear(&shared);

        let style = TextStyle::new()
            .at(10, 20)
            .size(50, 12)
            .color(Color::Rgb888(0x0000FF))
            .background(Color::BLACK)
            .align(Align::Left);
        hexiwear.draw_text("42", &style).unwrap();

        let expected = TextBox {
            x: 10,
            y: 20,
            w: 50,
            h: 12,
            color: 0x001F,
            background: 0x0000,
            align: Align::Left,
        };
        assert_eq!(
            shared.borrow().display_log,
            [DisplayOp::Text("42".into(), expected)]
        );
    }

    #[test]
    fn test_disabled_display() {
        let shared = Shared::default();
        let features = Features::all().with(Feature::Oled, false);
        let mut hexiwear =
            Hexiwear::<MockBoard>::with_features(full_parts(&shared), features).unwrap();

        let disabled = Err(Error::Disabled(Feature::Oled));
        assert_eq!(hexiwear.display_on(), disabled);
        assert_eq!(hexiwear.clear_display(), disabled);
        assert_eq!(hexiwear.fill_screen(Color::WHITE), disabled);
        assert_eq!(hexiwear.draw_text("x", &TextStyle::new()), disabled);
        assert!(shared.borrow().display_log.is_empty());
    }
}
