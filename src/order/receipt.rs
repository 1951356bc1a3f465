//! Printable receipt for a finalized order.
//!
//! The receipt is fixed-width plain text. Item names are measured with
//! `unicode-width` so accented names still line up with the amounts.

use std::fmt::Write;

use chrono::{DateTime, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Order;
use crate::money::MoneyFormat;

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// How receipts are laid out.
#[derive(Debug, Clone)]
pub struct ReceiptFormat {
    pub store_name: String,
    pub width: usize,
    pub date_format: String,
    pub farewell: String,
    pub money: MoneyFormat,
}

impl Default for ReceiptFormat {
    fn default() -> Self {
        Self {
            store_name: "Padoca da Kamila".to_string(),
            width: 40,
            date_format: FALLBACK_DATE_FORMAT.to_string(),
            farewell: "Thank you for your preference!".to_string(),
            money: MoneyFormat::default(),
        }
    }
}

/// Rendered receipt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    lines: Vec<String>,
}

impl Receipt {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl ReceiptFormat {
    /// Lay out `order` as a receipt.
    pub fn render(&self, order: &Order) -> Receipt {
        let width = self.width.max(20);
        let heavy = "=".repeat(width);
        let light = "-".repeat(width);

        let mut lines = vec![
            heavy.clone(),
            format!("{} - ORDER #{}", self.store_name.to_uppercase(), order.id()),
            heavy.clone(),
            self.format_date(order.created_at()),
            String::new(),
        ];

        for line in order.lines() {
            let label = format!("{}x {}", line.quantity, line.item.name);
            lines.push(columns(&label, &self.money.format(line.subtotal()), width));
        }

        lines.push(light);
        lines.push(columns("TOTAL:", &self.money.format(order.total()), width));
        lines.push(heavy);
        lines.push(self.farewell.clone());

        Receipt { lines }
    }

    /// Human-readable timestamp. Falls back to the default pattern if the
    /// configured one is not a valid strftime string.
    pub fn format_date(&self, at: DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.date_format)).is_ok() {
            return out;
        }
        out.clear();
        let _ = write!(out, "{}", at.format(FALLBACK_DATE_FORMAT));
        out
    }
}

/// Left label, right-aligned amount, total display width `width`.
fn columns(label: &str, amount: &str, width: usize) -> String {
    let amount_width = amount.width();
    let room = width.saturating_sub(amount_width + 1);
    let label = truncate(label, room);
    let gap = width.saturating_sub(label.width() + amount_width).max(1);
    format!("{label}{}{amount}", " ".repeat(gap))
}

fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::{Catalog, ItemId};
    use crate::order::finalize;
    use crate::order::tests::FixedClock;
    use chrono::TimeZone;

    fn order() -> Order {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(catalog.get(ItemId::new(1)).unwrap());
        cart.add(catalog.get(ItemId::new(1)).unwrap());
        cart.add(catalog.get(ItemId::new(12)).unwrap());
        let at = Local.with_ymd_and_hms(2026, 10, 14, 13, 45, 12).unwrap();
        finalize(&cart, &FixedClock(at))
    }

    #[test]
    fn test_receipt_layout() {
        let order = order();
        let receipt = ReceiptFormat::default().render(&order);
        let lines = receipt.lines();

        assert_eq!(lines[0], "=".repeat(40));
        assert_eq!(lines[1], format!("PADOCA DA KAMILA - ORDER #{}", order.id()));
        assert_eq!(lines[3], "14/10/2026 13:45:12");
        assert_eq!(lines[5], format!("2x Filé de Frango{}R$ 31,80", " ".repeat(40 - 17 - 8)));
        assert_eq!(lines[6], format!("1x Feijão{}R$ 3,00", " ".repeat(40 - 9 - 7)));
        assert_eq!(lines[8], format!("TOTAL:{}R$ 34,80", " ".repeat(40 - 6 - 8)));
        assert_eq!(lines.last().unwrap(), "Thank you for your preference!");
    }

    #[test]
    fn test_item_lines_fit_width() {
        let receipt = ReceiptFormat { width: 24, ..Default::default() }.render(&order());
        let lines = receipt.lines();
        for line in [&lines[5], &lines[6], &lines[8]] {
            assert_eq!(line.width(), 24, "{line:?}");
        }
        assert!(lines[5].starts_with("2x Filé de Fra…"));
        assert!(lines[5].ends_with(" R$ 31,80"));
    }

    #[test]
    fn test_custom_date_format() {
        let format = ReceiptFormat {
            date_format: "%Y-%m-%d".to_string(),
            ..Default::default()
        };
        assert_eq!(format.render(&order()).lines()[3], "2026-10-14");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let format = ReceiptFormat {
            date_format: "%Q".to_string(),
            ..Default::default()
        };
        assert_eq!(format.render(&order()).lines()[3], "14/10/2026 13:45:12");
    }
}
