//! Text placement on the OLED
//!
//! Every field of a [`TextStyle`] is optional. Unset fields fall back to
//! the top-left corner, a box exactly the size of the rendered text,
//! white centered text and the default text background.

use hexi_core::traits::{Align, OledDisplay, TextBox};
use hexi_core::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub w: Option<u16>,
    pub h: Option<u16>,
    pub color: Option<Color>,
    pub align: Option<Align>,
    pub background: Option<Color>,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            w: None,
            h: None,
            color: None,
            align: None,
            background: None,
        }
    }

    /// Top-left corner of the text box
    pub const fn at(mut self, x: u16, y: u16) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Width and height of the text box
    pub const fn size(mut self, w: u16, h: u16) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub const fn background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    /// Fill in the defaults using the display's font metrics
    pub fn resolve<D: OledDisplay>(&self, text: &str, display: &D) -> TextBox {
        TextBox {
            x: self.x.unwrap_or(0),
            y: self.y.unwrap_or(0),
            w: self.w.unwrap_or_else(|| display.text_width(text)),
            h: self.h.unwrap_or_else(|| display.font_height()),
            color: self.color.unwrap_or(Color::WHITE).to_rgb565(),
            background: self.background.unwrap_or(Color::TEXT_BACKGROUND).to_rgb565(),
            align: self.align.unwrap_or_default(),
        }
    }
}
