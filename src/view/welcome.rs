use super::{palette, Frame};
use crate::screens::{Intent, Kiosk};
use crate::types::Rect;

pub(super) fn draw(frame: &mut Frame<'_>, kiosk: &Kiosk) {
    let (width, height) = (frame.width(), frame.height());
    let settings = kiosk.settings();

    // Touch anywhere to start; the button below sits on top of this.
    frame.hits.push(Rect::new(0, 1, width, height.saturating_sub(2)), Intent::StartOrder);

    let mid = height / 2;
    let top = mid.saturating_sub(3).max(2);
    frame
        .buf
        .draw_text_centered(0, top, width, &settings.store_name.to_uppercase(), palette::TITLE);
    frame.buf.draw_text_centered(0, top + 1, width, &settings.tagline, palette::DIM);
    frame.buf.draw_text_centered(
        0,
        top + 3,
        width,
        "Touch the screen or press Enter to order",
        palette::TEXT,
    );
    frame.button_row(top + 5, &[("Start order", Intent::StartOrder, palette::PRIMARY_BUTTON)]);
}
