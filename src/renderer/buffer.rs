//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. All drawing operations work on this buffer
//! and silently clip at its edges.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Wide characters**: measured with `unicode-width`; the second column
//!   holds a continuation marker (`'\0'`).

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::{Cell, Color, Rect, Style};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint a rectangle's background.
    pub fn fill_rect(&mut self, rect: Rect, bg: Color) {
        for y in rect.y..rect.y.saturating_add(rect.height) {
            for x in rect.x..rect.x.saturating_add(rect.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell { bg, ..Cell::default() };
                }
            }
        }
    }

    /// Draw text at a position.
    ///
    /// Returns the number of columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        self.draw_text_max(x, y, text, u16::MAX, style)
    }

    /// Draw text using at most `max_width` columns.
    pub fn draw_text_max(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;

        for ch in text.chars() {
            let char_width = ch.width().unwrap_or(0) as u16;
            if char_width == 0 {
                continue;
            }
            if col.saturating_add(char_width) > limit {
                break;
            }

            self.put(col, y, ch, style);
            if char_width == 2 {
                self.put(col + 1, y, '\0', style);
            }
            col += char_width;
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within `width` columns starting at `x`.
    pub fn draw_text_centered(&mut self, x: u16, y: u16, width: u16, text: &str, style: Style) -> u16 {
        let offset = (width as usize).saturating_sub(text.width()) / 2;
        self.draw_text(x.saturating_add(offset as u16), y, text, style)
    }

    /// Draw text right-aligned so it ends at column `x + width`.
    pub fn draw_text_right(&mut self, x: u16, y: u16, width: u16, text: &str, style: Style) -> u16 {
        let offset = (width as usize).saturating_sub(text.width());
        self.draw_text(x.saturating_add(offset as u16), y, text, style)
    }

    /// Horizontal rule of `ch`.
    pub fn draw_hline(&mut self, x: u16, y: u16, width: u16, ch: char, style: Style) {
        for col in x..x.saturating_add(width) {
            self.put(col, y, ch, style);
        }
    }

    /// Rounded single-line border around `rect`.
    pub fn draw_border(&mut self, rect: Rect, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;

        self.put(rect.x, rect.y, '╭', style);
        self.put(x2, rect.y, '╮', style);
        self.put(rect.x, y2, '╰', style);
        self.put(x2, y2, '╯', style);

        for col in (rect.x + 1)..x2 {
            self.put(col, rect.y, '─', style);
            self.put(col, y2, '─', style);
        }
        for row in (rect.y + 1)..y2 {
            self.put(rect.x, row, '│', style);
            self.put(x2, row, '│', style);
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.ch = ch;
            cell.fg = style.fg;
            if style.bg != Color::Default {
                cell.bg = style.bg;
            }
            cell.attrs = style.attrs;
        }
    }

    /// Text of one row with continuation markers dropped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .filter(|&ch| ch != '\0')
            .collect()
    }

    /// Whole buffer as text, rows joined by newlines, trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attr;

    #[test]
    fn test_new_buffer_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.get(3, 1), Some(&Cell::default()));
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.to_text(), "\n");
    }

    #[test]
    fn test_draw_text_clips() {
        let mut buf = FrameBuffer::new(5, 1);
        let used = buf.draw_text(2, 0, "hello", Style::default());
        assert_eq!(used, 3);
        assert_eq!(buf.row_text(0), "  hel");
        assert_eq!(buf.draw_text(0, 3, "x", Style::default()), 0);
    }

    #[test]
    fn test_draw_text_style() {
        let mut buf = FrameBuffer::new(3, 1);
        let style = Style::fg(Color::rgb(1, 2, 3)).with_attrs(Attr::BOLD);
        buf.draw_text(0, 0, "a", style);
        let cell = buf.get(0, 0).unwrap();
        assert_eq!(cell.fg, Color::rgb(1, 2, 3));
        assert!(cell.attrs.contains(Attr::BOLD));
    }

    #[test]
    fn test_draw_text_max() {
        let mut buf = FrameBuffer::new(10, 1);
        assert_eq!(buf.draw_text_max(1, 0, "abcdef", 3, Style::default()), 3);
        assert_eq!(buf.row_text(0), " abc      ");
    }

    #[test]
    fn test_wide_char_continuation() {
        let mut buf = FrameBuffer::new(4, 1);
        let used = buf.draw_text(0, 0, "日x", Style::default());
        assert_eq!(used, 3);
        assert_eq!(buf.get(1, 0).unwrap().ch, '\0');
        assert_eq!(buf.row_text(0), "日x ");
    }

    #[test]
    fn test_accented_text_is_narrow() {
        let mut buf = FrameBuffer::new(10, 1);
        assert_eq!(buf.draw_text(0, 0, "Feijão", Style::default()), 6);
    }

    #[test]
    fn test_centered_and_right() {
        let mut buf = FrameBuffer::new(10, 2);
        buf.draw_text_centered(0, 0, 10, "ab", Style::default());
        buf.draw_text_right(0, 1, 10, "ab", Style::default());
        assert_eq!(buf.row_text(0), "    ab    ");
        assert_eq!(buf.row_text(1), "        ab");
    }

    #[test]
    fn test_border() {
        let mut buf = FrameBuffer::new(4, 3);
        buf.draw_border(buf.bounds(), Style::default());
        assert_eq!(buf.to_text(), "╭──╮\n│  │\n╰──╯");
    }

    #[test]
    fn test_fill_keeps_bg_under_text() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.fill_rect(buf.bounds(), Color::rgb(9, 9, 9));
        buf.draw_text(0, 0, "a", Style::default());
        assert_eq!(buf.get(0, 0).unwrap().bg, Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_resize_clears() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_text(0, 0, "abc", Style::default());
        buf.resize(2, 2);
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.to_text(), "\n");
    }
}
