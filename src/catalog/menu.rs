//! Built-in menu.

use super::{Category, MenuItem};

const SIDES: &str = "Served with rice, bean broth, salad, farofa and fries";

pub(super) fn builtin_items() -> Vec<MenuItem> {
    let dish = |id, name, cents| MenuItem::new(id, name, cents, Category::Primary).with_description(SIDES);
    let extra = |id, name, cents| MenuItem::new(id, name, cents, Category::AddOn);

    vec![
        dish(1, "Filé de Frango", 1590),
        dish(2, "Lombo Suíno", 1690),
        dish(3, "Calabresa Acebolada", 1790),
        dish(4, "Omelete de Frios", 1790),
        dish(5, "Filé de Frango Empanado", 1890),
        dish(6, "Picadinho Carne com Legumes", 1890),
        dish(7, "Contra Filé", 1990),
        dish(8, "Filé de Tilápia", 2190),
        dish(9, "Parmegiana de Frango", 2290),
        dish(10, "Strogonoff de Frango", 2390),
        dish(11, "Parmegiana de Tilápia", 2490),
        extra(12, "Feijão", 300),
        extra(13, "Ovo", 300),
        extra(14, "Arroz", 300),
        extra(15, "Batata Frita", 500),
    ]
}
