use super::{palette, Frame};
use crate::order::Order;
use crate::screens::{Intent, Kiosk};

pub(super) fn draw(frame: &mut Frame<'_>, kiosk: &Kiosk, order: &Order, remaining: u32) {
    let width = frame.width();
    let settings = kiosk.settings();

    let lines = [
        (3, "Order confirmed!".to_string(), palette::TITLE),
        (5, format!("Order #{}", order.id()), palette::TEXT),
        (
            6,
            format!(
                "{} items · Total {}",
                order.item_count(),
                settings.money.format(order.total())
            ),
            palette::TEXT,
        ),
        (7, settings.receipt.format_date(order.created_at()), palette::DIM),
        (9, format!("Returning to the start in {remaining}s"), palette::DIM),
    ];
    for (y, text, style) in &lines {
        frame.buf.draw_text_centered(0, *y, width, text, *style);
    }

    frame.button_row(
        11,
        &[
            ("Print receipt", Intent::PrintReceipt, palette::BUTTON),
            ("New order", Intent::NewOrder, palette::PRIMARY_BUTTON),
        ],
    );
}
