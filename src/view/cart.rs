use super::{centered, palette, priced_row, selected_or, Frame};
use crate::screens::{Intent, Kiosk, SelectionCursor};

const LIST_TOP: u16 = 4;
/// `[-] [+] [x]`
const CONTROLS_WIDTH: u16 = 11;

pub(super) fn draw(frame: &mut Frame<'_>, kiosk: &Kiosk, cursor: SelectionCursor) {
    let (width, height) = (frame.width(), frame.height());
    let cart = kiosk.cart();
    let money = &kiosk.settings().money;

    frame.buf.draw_text_centered(0, 2, width, "Your order", palette::TITLE);

    if cart.is_empty() {
        frame
            .buf
            .draw_text_centered(0, LIST_TOP, width, "Your cart is empty", palette::DIM);
        frame.button_row(
            LIST_TOP + 2,
            &[
                ("Continue shopping", Intent::ContinueShopping, palette::PRIMARY_BUTTON),
                ("Back", Intent::Back, palette::BUTTON),
            ],
        );
        return;
    }

    let content_width = width.saturating_sub(4).min(70);
    let x0 = centered(width, content_width);
    let row_width = content_width.saturating_sub(CONTROLS_WIDTH + 1);

    // Leave room for the separator, the total and the buttons.
    let list_end = height.saturating_sub(6);
    let visible = list_end.saturating_sub(LIST_TOP) as usize;
    let selected = cursor.selected(cart.len());
    let offset = match selected {
        Some(index) if visible > 0 && index >= visible => index + 1 - visible,
        _ => 0,
    };

    let mut y = LIST_TOP;
    for (index, line) in cart.lines().iter().enumerate().skip(offset).take(visible) {
        let style = selected_or(selected == Some(index), palette::TEXT);
        let label = format!("{}. {}x {}", index + 1, line.quantity, line.item.name);
        priced_row(frame, x0, y, row_width, &label, &money.format(line.subtotal()), style);

        let id = line.item.id;
        let controls_x = x0 + row_width + 1;
        frame.buf.draw_text(controls_x, y, "[-]", palette::BUTTON);
        frame.hit_row(controls_x, y, 3, Intent::DecrementLine(id));
        frame.buf.draw_text(controls_x + 4, y, "[+]", palette::BUTTON);
        frame.hit_row(controls_x + 4, y, 3, Intent::IncrementLine(id));
        frame.buf.draw_text(controls_x + 8, y, "[x]", palette::DANGER_BUTTON);
        frame.hit_row(controls_x + 8, y, 3, Intent::RemoveLine(id));
        y += 1;
    }

    frame.buf.draw_hline(x0, y, row_width, '─', palette::DIM);
    let total = format!("{} items", cart.item_count());
    priced_row(
        frame,
        x0,
        y + 1,
        row_width,
        &format!("Total ({total})"),
        &money.format(cart.total()),
        palette::TITLE,
    );

    frame.button_row(
        height.saturating_sub(3),
        &[
            ("Continue shopping", Intent::ContinueShopping, palette::BUTTON),
            ("Confirm order", Intent::ConfirmOrder, palette::PRIMARY_BUTTON),
        ],
    );
}
