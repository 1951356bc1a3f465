//! Core drawing types.
//!
//! These are what the view layer writes and the renderer understands.

// =============================================================================
// Color
// =============================================================================

/// Cell color. `Default` leaves the choice to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => crossterm::style::Color::Reset,
            Color::Rgb(r, g, b) => crossterm::style::Color::Rgb { r, g, b },
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// `ch == '\0'` marks the continuation half of a double-width character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg: Color::Default,
            attrs: Attr::NONE,
        }
    }
}

/// Foreground, background and attributes applied to drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Style {
    pub const fn fg(fg: Color) -> Self {
        Self { fg, bg: Color::Default, attrs: Attr::NONE }
    }

    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }
}
