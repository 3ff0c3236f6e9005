//! OLED display trait for the 96x96 SSD1351 panel

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI/GPIO transfer failed
    Communication,
    /// Coordinates or size outside the panel
    InvalidCoordinates,
    /// Image data shorter than `w * h` pixels
    ImageTooSmall,
    /// Display used before `init`
    NotInitialized,
}

/// Horizontal text alignment inside a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Left = 1,
    Right = 2,
    #[default]
    Center = 3,
}

/// Fully resolved text box handed to the display driver
///
/// Colors are already RGB565 at this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBox {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub color: u16,
    pub background: u16,
    pub align: Align,
}

/// Trait for the color OLED driver
///
/// All colors are RGB565; 24-bit conversion happens before the call.
pub trait OledDisplay {
    /// Initialise the controller for a `width` x `height` panel
    fn init(&mut self, width: u16, height: u16) -> Result<(), DisplayError>;

    /// Turn the panel on
    fn on(&mut self) -> Result<(), DisplayError>;

    /// Turn the panel off (contents retained)
    fn off(&mut self) -> Result<(), DisplayError>;

    /// Clear the whole panel to black
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Fill the whole panel
    fn fill_screen(&mut self, color: u16) -> Result<(), DisplayError>;

    /// Fill a rectangle whose top-left corner is (`x`, `y`)
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16)
        -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), DisplayError>;

    /// Blit a `w` x `h` image of big-endian RGB565 pixels
    fn draw_image(&mut self, image: &[u8], x: u16, y: u16, w: u16, h: u16)
        -> Result<(), DisplayError>;

    /// Render `text` inside a text box using the driver's font
    fn draw_text(&mut self, text: &str, text_box: &TextBox) -> Result<(), DisplayError>;

    /// Width in pixels `text` occupies in the driver's font
    fn text_width(&self, text: &str) -> u16;

    /// Height in pixels of the tallest glyph in the driver's font
    fn font_height(&self) -> u16;
}
