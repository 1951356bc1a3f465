//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and
//! only outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: queue cursor move, style changes and the character,
//!      skipping escape codes whose state is already in effect
//! 3. Flush once
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Color};

/// Differential renderer writing to any `Write` sink.
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<FrameBuffer>,
    state: PenState,
}

/// What the terminal currently has in effect.
#[derive(Debug, Default)]
struct PenState {
    pos: Option<(u16, u16)>,
    fg: Option<Color>,
    bg: Option<Color>,
    attrs: Attr,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            state: PenState::default(),
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;
        self.state = PenState::default();

        queue!(self.out, BeginSynchronizedUpdate)?;

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else { continue };
                let changed = previous.and_then(|prev| prev.get(x, y)) != Some(cell);
                if changed {
                    has_changes = true;
                    render_cell(&mut self.out, &mut self.state, x, y, cell)?;
                }
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

fn render_cell<W: Write>(out: &mut W, state: &mut PenState, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
    // Continuation half of a wide character; the terminal already advanced.
    if cell.ch == '\0' {
        state.pos = Some((x + 1, y));
        return Ok(());
    }

    if state.pos != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
    }

    if cell.attrs != state.attrs {
        queue!(out, SetAttribute(Attribute::Reset))?;
        for (flag, attribute) in [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::INVERSE, Attribute::Reverse),
        ] {
            if cell.attrs.contains(flag) {
                queue!(out, SetAttribute(attribute))?;
            }
        }
        // Reset cleared the colors too
        state.fg = None;
        state.bg = None;
        state.attrs = cell.attrs;
    }

    if state.fg != Some(cell.fg) {
        queue!(out, SetForegroundColor(cell.fg.into()))?;
        state.fg = Some(cell.fg);
    }
    if state.bg != Some(cell.bg) {
        queue!(out, SetBackgroundColor(cell.bg.into()))?;
        state.bg = Some(cell.bg);
    }

    queue!(out, Print(cell.ch))?;
    state.pos = Some((x + 1, y));
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
