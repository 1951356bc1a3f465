//! Views - draw the active screen.
//!
//! Each screen draws into a [`FrameBuffer`] and registers its controls in a
//! [`HitMap`] of [`Intent`]s. The views only read the kiosk; a click is
//! resolved by the hit map and fed back to [`Kiosk::handle_intent`].
//!
//! ```text
//! ┌ header: store name · tagline ·························· cart badge ┐
//! │ body (per screen)                                                  │
//! │ toast line                                                         │
//! └ key hints ─────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod confirmation;
mod menu;
mod welcome;

use unicode_width::UnicodeWidthStr;

use crate::renderer::FrameBuffer;
use crate::screens::{Intent, Kiosk, Screen, Toast};
use crate::state::mouse::HitMap;
use crate::types::{Attr, Rect, Style};

// =============================================================================
// Palette
// =============================================================================

pub(crate) mod palette {
    use crate::types::{Attr, Color, Style};

    pub const CRUST: Color = Color::rgb(196, 120, 52);
    pub const CREAM: Color = Color::rgb(250, 240, 220);
    pub const COCOA: Color = Color::rgb(92, 58, 36);
    pub const MUTED: Color = Color::rgb(150, 140, 130);
    pub const OK: Color = Color::rgb(96, 168, 82);
    pub const DANGER: Color = Color::rgb(204, 82, 70);

    pub const TEXT: Style = Style::fg(Color::Default);
    pub const DIM: Style = Style::fg(MUTED);
    pub const TITLE: Style = Style::fg(CRUST).with_attrs(Attr::BOLD);
    pub const HEADER: Style = Style::fg(CREAM).with_bg(COCOA).with_attrs(Attr::BOLD);
    pub const BUTTON: Style = Style::fg(COCOA).with_bg(CREAM);
    pub const PRIMARY_BUTTON: Style = Style::fg(CREAM).with_bg(CRUST).with_attrs(Attr::BOLD);
    pub const DANGER_BUTTON: Style = Style::fg(CREAM).with_bg(DANGER);
    pub const SELECTED: Style = Style::fg(Color::Default).with_attrs(Attr::INVERSE);
    pub const TOAST: Style = Style::fg(CREAM).with_bg(OK);
}

// =============================================================================
// Frame
// =============================================================================

/// What the view layer draws onto.
pub struct Frame<'a> {
    pub buf: &'a mut FrameBuffer,
    pub hits: &'a mut HitMap<Intent>,
}

impl Frame<'_> {
    pub fn width(&self) -> u16 {
        self.buf.width()
    }

    pub fn height(&self) -> u16 {
        self.buf.height()
    }

    /// Draw `[ label ]` and make it clickable. Returns its width.
    pub fn button(&mut self, x: u16, y: u16, label: &str, intent: Intent, style: Style) -> u16 {
        let text = format!("[ {label} ]");
        let width = self.buf.draw_text(x, y, &text, style);
        self.hits.push(Rect::new(x, y, width, 1), intent);
        width
    }

    /// Lay out buttons centered on row `y`, two columns apart.
    pub fn button_row(&mut self, y: u16, buttons: &[(&str, Intent, Style)]) {
        let total: usize = buttons.iter().map(|(label, ..)| label.width() + 4).sum::<usize>()
            + 2 * buttons.len().saturating_sub(1);
        let mut x = (self.width() as usize).saturating_sub(total) as u16 / 2;
        for &(label, intent, style) in buttons {
            x = x.saturating_add(self.button(x, y, label, intent, style) + 2);
        }
    }

    /// Make a whole row clickable.
    pub fn hit_row(&mut self, x: u16, y: u16, width: u16, intent: Intent) {
        self.hits.push(Rect::new(x, y, width, 1), intent);
    }
}

// =============================================================================
// Draw
// =============================================================================

/// Draw the kiosk and rebuild the hit map.
///
/// `toast` is the notification currently on display, if any.
pub fn draw(kiosk: &Kiosk, toast: Option<&Toast>, buf: &mut FrameBuffer, hits: &mut HitMap<Intent>) {
    buf.clear();
    hits.clear();
    if buf.width() == 0 || buf.height() == 0 {
        return;
    }

    let mut frame = Frame { buf, hits };
    header(&mut frame, kiosk);

    match kiosk.screen() {
        Screen::Welcome => welcome::draw(&mut frame, kiosk),
        Screen::Menu { category, cursor } => menu::draw(&mut frame, kiosk, *category, *cursor),
        Screen::Cart { cursor } => cart::draw(&mut frame, kiosk, *cursor),
        Screen::Confirmation { order, remaining, .. } => {
            confirmation::draw(&mut frame, kiosk, order, *remaining)
        }
    }

    if let Some(toast) = toast {
        toast_line(&mut frame, toast);
    }
    footer(&mut frame, kiosk.screen());
}

fn header(frame: &mut Frame<'_>, kiosk: &Kiosk) {
    let width = frame.width();
    let settings = kiosk.settings();
    frame.buf.fill_rect(Rect::new(0, 0, width, 1), palette::COCOA);
    let used = frame.buf.draw_text(1, 0, &settings.store_name, palette::HEADER);
    frame.buf.draw_text(
        used + 2,
        0,
        &format!("· {}", settings.tagline),
        Style::fg(palette::CREAM).with_bg(palette::COCOA),
    );
}

fn toast_line(frame: &mut Frame<'_>, toast: &Toast) {
    let y = frame.height().saturating_sub(2);
    let text = format!(" {}: {} ", toast.title, toast.body);
    frame.buf.draw_text_centered(0, y, frame.width(), &text, palette::TOAST);
}

fn footer(frame: &mut Frame<'_>, screen: &Screen) {
    let hints = match screen {
        Screen::Welcome => "Enter: start",
        Screen::Menu { .. } => "1-9: add item · ↑/↓: move · Enter: add highlighted · Esc: back",
        Screen::Cart { .. } => "1-9: select line · ↑/↓: move · Enter: remove line · Esc: menu",
        Screen::Confirmation { .. } => "Enter: new order",
    };
    let y = frame.height().saturating_sub(1);
    frame.buf.draw_text(1, y, hints, palette::DIM);
}

/// `name ....... amount`, right-aligning the amount inside `width`.
pub(crate) fn priced_row(frame: &mut Frame<'_>, x: u16, y: u16, width: u16, label: &str, amount: &str, style: Style) {
    let amount_width = amount.width() as u16;
    let room = width.saturating_sub(amount_width + 1);
    frame.buf.draw_text_max(x, y, label, room, style);
    frame.buf.draw_text_right(x, y, width, amount, style);
}

/// Left margin that centers a block of `width` columns.
pub(crate) fn centered(frame_width: u16, width: u16) -> u16 {
    frame_width.saturating_sub(width) / 2
}

pub(crate) fn selected_or(selected: bool, style: Style) -> Style {
    if selected {
        Style { attrs: style.attrs | Attr::INVERSE, ..style }
    } else {
        style
    }
}

// =============================================================================
// Tests
// =============================================================================
