use super::{centered, palette, priced_row, selected_or, Frame};
use crate::catalog::Category;
use crate::screens::{Intent, Kiosk, SelectionCursor};
use crate::types::Style;

const LIST_TOP: u16 = 4;

pub(super) fn draw(frame: &mut Frame<'_>, kiosk: &Kiosk, category: Category, cursor: SelectionCursor) {
    let (width, height) = (frame.width(), frame.height());
    let catalog = kiosk.catalog();
    let cart = kiosk.cart();
    let money = &kiosk.settings().money;

    let content_width = width.saturating_sub(4).min(64);
    let x0 = centered(width, content_width);

    // Cart badge in the header, only with something in the cart.
    if !cart.is_empty() {
        let badge = format!(" Cart: {} · {} ", cart.item_count(), money.format(cart.total()));
        frame
            .buf
            .draw_text_right(0, 0, width.saturating_sub(1), &badge, palette::HEADER);
    }

    // Category tabs
    let mut x = x0;
    for tab in Category::ALL {
        let style = if tab == category { palette::PRIMARY_BUTTON } else { palette::BUTTON };
        x = x.saturating_add(frame.button(x, 2, tab.label(), Intent::SelectCategory(tab), style) + 1);
    }
    frame.buf.draw_hline(x0, 3, content_width, '─', palette::DIM);

    // Items
    let list_end = height.saturating_sub(5);
    let visible = list_end.saturating_sub(LIST_TOP) as usize;
    let len = catalog.category_len(category);
    let selected = cursor.selected(len);
    let offset = match selected {
        Some(index) if visible > 0 && index >= visible => index + 1 - visible,
        _ => 0,
    };

    for (row, (index, item)) in catalog
        .in_category(category)
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let y = LIST_TOP + row as u16;
        let style = selected_or(selected == Some(index), palette::TEXT);
        let label = format!("{:>2}  {}", item.id.get(), item.name);
        priced_row(frame, x0, y, content_width, &label, &money.format(item.price), style);
        frame.hit_row(x0, y, content_width, Intent::SelectItem(item.id));
    }

    // Description of the highlighted dish
    if let Some(description) = selected
        .and_then(|index| catalog.nth_in_category(category, index))
        .and_then(|item| item.description.as_deref())
    {
        frame
            .buf
            .draw_text_max(x0, list_end, description, content_width, palette::DIM);
    }

    // Controls
    let controls_y = height.saturating_sub(3);
    let view_cart = format!("View cart ({})", cart.item_count());
    let mut buttons: Vec<(&str, Intent, Style)> = vec![("Back", Intent::Back, palette::BUTTON)];
    if !cart.is_empty() {
        buttons.push((view_cart.as_str(), Intent::ViewCart, palette::PRIMARY_BUTTON));
    }
    frame.button_row(controls_y, &buttons);
}
