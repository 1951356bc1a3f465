//! The kiosk controller.
//!
//! # Example
//!
//! ```ignore
//! let mut kiosk = Kiosk::new(Catalog::builtin(), Settings::default(), Box::new(SystemClock));
//! kiosk.handle_intent(Intent::StartOrder);
//! kiosk.handle_action(Action::SelectByIndex(1));
//! for effect in kiosk.take_effects() {
//!     // play sounds, show toasts, start tickers ...
//! }
//! ```

use tracing::{debug, info, warn};

use super::{Effect, Intent, Screen, ScreenKind, SelectionCursor, Settings, SoundCue, Toast};
use crate::cart::{Cart, CartEvent};
use crate::catalog::{Catalog, Category, ItemId, MenuItem};
use crate::order::{self, Clock, Order, SystemClock};
use crate::state::countdown::TimerToken;
use crate::state::router::Action;

/// Owns the cart and the current screen.
///
/// Every handler runs to completion on the caller's thread. Side effects
/// are queued and collected with [`Kiosk::take_effects`].
pub struct Kiosk {
    catalog: Catalog,
    cart: Cart,
    screen: Screen,
    settings: Settings,
    clock: Box<dyn Clock>,
    last_token: TimerToken,
    effects: Vec<Effect>,
}

impl Kiosk {
    pub fn new(catalog: Catalog, settings: Settings, clock: Box<dyn Clock>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            screen: Screen::Welcome,
            settings,
            clock,
            last_token: TimerToken(0),
            effects: Vec::new(),
        }
    }

    pub fn with_system_clock(catalog: Catalog, settings: Settings) -> Self {
        Self::new(catalog, settings, Box::new(SystemClock))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The pending order, present only on the confirmation screen.
    pub fn order(&self) -> Option<&Order> {
        self.screen.order()
    }

    /// Drain queued side effects, oldest first.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // =========================================================================
    // Keyboard actions
    // =========================================================================

    /// Apply a router action to the active screen.
    /// Returns false when the screen ignores it.
    pub fn handle_action(&mut self, action: Action) -> bool {
        debug!(?action, screen = ?self.screen.kind(), "action");

        match self.screen.kind() {
            ScreenKind::Welcome => match action {
                Action::Confirm => self.start_order(),
                _ => false,
            },
            ScreenKind::Menu => self.menu_action(action),
            ScreenKind::Cart => self.cart_action(action),
            ScreenKind::Confirmation => match action {
                Action::Confirm => {
                    self.sound(SoundCue::Acknowledge);
                    self.new_order();
                    true
                }
                _ => false,
            },
        }
    }

    fn menu_action(&mut self, action: Action) -> bool {
        let Screen::Menu { category, cursor } = &self.screen else {
            return false;
        };
        let (category, cursor) = (*category, *cursor);
        let len = self.catalog.category_len(category);

        match action {
            Action::SelectByIndex(digit) => {
                match self.catalog.get(ItemId::new(digit.into())).cloned() {
                    Some(item) => self.add_item(&item),
                    None => self.sound(SoundCue::Acknowledge),
                }
                true
            }
            Action::MoveUp => {
                self.with_cursor(|c| c.move_up(len));
                self.sound(SoundCue::Acknowledge);
                true
            }
            Action::MoveDown => {
                self.with_cursor(|c| c.move_down(len));
                self.sound(SoundCue::Acknowledge);
                true
            }
            Action::Confirm => {
                let highlighted = cursor
                    .selected(len)
                    .and_then(|index| self.catalog.nth_in_category(category, index))
                    .cloned();
                match highlighted {
                    Some(item) => {
                        self.add_item(&item);
                        true
                    }
                    None => false,
                }
            }
            Action::Cancel => {
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::Welcome);
                true
            }
        }
    }

    fn cart_action(&mut self, action: Action) -> bool {
        let len = self.cart.len();

        match action {
            Action::MoveUp => {
                self.with_cursor(|c| c.move_up(len));
                self.sound(SoundCue::Acknowledge);
                true
            }
            Action::MoveDown => {
                self.with_cursor(|c| c.move_down(len));
                self.sound(SoundCue::Acknowledge);
                true
            }
            Action::SelectByIndex(digit) => {
                let digit = usize::from(digit);
                if digit >= 1 {
                    self.with_cursor(|c| {
                        c.select(digit - 1, len);
                    });
                }
                self.sound(SoundCue::Acknowledge);
                true
            }
            Action::Confirm => {
                // Enter on the cart deletes the highlighted line.
                let selected = self
                    .screen
                    .cursor()
                    .and_then(|c| c.selected(len))
                    .and_then(|index| self.cart.line(index))
                    .map(|line| line.item.id);
                match selected.and_then(|id| self.cart.remove(id)) {
                    Some(event) => {
                        self.line_removed(event);
                        true
                    }
                    None => false,
                }
            }
            Action::Cancel => {
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::menu(Category::default()));
                true
            }
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Apply a screen intent. Intents that do not belong to the active
    /// screen are logged and ignored.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        debug!(?intent, screen = ?self.screen.kind(), "intent");

        match (self.screen.kind(), intent) {
            (ScreenKind::Welcome, Intent::StartOrder) => self.start_order(),

            (ScreenKind::Menu, Intent::SelectItem(id)) => match self.catalog.get(id).cloned() {
                Some(item) => {
                    self.add_item(&item);
                    true
                }
                None => {
                    warn!(%id, "select for unknown item ignored");
                    false
                }
            },
            (ScreenKind::Menu, Intent::SelectCategory(category)) => {
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::menu(category));
                true
            }
            (ScreenKind::Menu, Intent::ViewCart) => {
                if self.cart.is_empty() {
                    debug!("view cart with empty cart ignored");
                    return false;
                }
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::cart());
                true
            }
            (ScreenKind::Menu, Intent::Back) => {
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::Welcome);
                true
            }

            (ScreenKind::Cart, Intent::ConfirmOrder) => self.confirm_order(),
            (ScreenKind::Cart, Intent::ContinueShopping | Intent::Back) => {
                self.sound(SoundCue::Acknowledge);
                self.go_to(Screen::menu(Category::default()));
                true
            }
            (ScreenKind::Cart, Intent::IncrementLine(id)) => {
                let Some(quantity) = self.cart.quantity_of(id) else {
                    warn!(%id, "increment for item not in cart ignored");
                    return false;
                };
                self.cart.set_quantity(id, i64::from(quantity) + 1);
                self.sound(SoundCue::Acknowledge);
                true
            }
            (ScreenKind::Cart, Intent::DecrementLine(id)) => {
                let Some(quantity) = self.cart.quantity_of(id) else {
                    warn!(%id, "decrement for item not in cart ignored");
                    return false;
                };
                match self.cart.set_quantity(id, i64::from(quantity) - 1) {
                    Some(event @ CartEvent::Removed { .. }) => self.line_removed(event),
                    Some(_) => self.sound(SoundCue::Acknowledge),
                    None => return false,
                }
                true
            }
            (ScreenKind::Cart, Intent::RemoveLine(id)) => match self.cart.remove(id) {
                Some(event) => {
                    self.line_removed(event);
                    true
                }
                None => {
                    warn!(%id, "remove for item not in cart ignored");
                    false
                }
            },

            (ScreenKind::Confirmation, Intent::NewOrder) => {
                self.sound(SoundCue::Acknowledge);
                self.new_order();
                true
            }
            (ScreenKind::Confirmation, Intent::PrintReceipt) => self.print_receipt(),

            (screen, intent) => {
                warn!(?screen, ?intent, "intent not available on this screen");
                false
            }
        }
    }

    // =========================================================================
    // Countdown
    // =========================================================================

    /// One countdown interval elapsed for `token`.
    ///
    /// Ticks for any token but the active confirmation's are ignored.
    pub fn tick(&mut self, token: TimerToken) -> bool {
        let Screen::Confirmation {
            remaining,
            token: active,
            ..
        } = &mut self.screen
        else {
            debug!(?token, "tick outside confirmation ignored");
            return false;
        };
        if *active != token {
            debug!(?token, ?active, "stale tick ignored");
            return false;
        }

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            info!("countdown elapsed, returning to welcome");
            self.new_order();
        }
        true
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn start_order(&mut self) -> bool {
        self.sound(SoundCue::Acknowledge);
        self.go_to(Screen::menu(Category::default()));
        true
    }

    fn confirm_order(&mut self) -> bool {
        if self.cart.is_empty() {
            debug!("confirm with empty cart ignored");
            return false;
        }

        let order = order::finalize(&self.cart, self.clock.as_ref());
        info!(
            order_id = %order.id(),
            total = %order.total(),
            items = order.item_count(),
            "order confirmed"
        );

        self.last_token = self.last_token.next();
        let token = self.last_token;

        self.sound(SoundCue::Confirm);
        self.toast_long("Order confirmed", format!("Order #{} placed", order.id()));
        self.effects.push(Effect::StartCountdown {
            token,
            interval: self.settings.tick_interval,
        });
        self.go_to(Screen::Confirmation {
            order,
            remaining: self.settings.countdown_secs.max(1),
            token,
        });
        true
    }

    fn new_order(&mut self) {
        self.cart.clear();
        self.go_to(Screen::Welcome);
        info!("new order cycle");
    }

    fn print_receipt(&mut self) -> bool {
        let Some(order) = self.screen.order() else {
            return false;
        };
        let receipt = self.settings.receipt.render(order);
        info!(order_id = %order.id(), "receipt printed");

        self.effects.push(Effect::PrintReceipt(receipt));
        self.toast_short("Receipt sent", "Receipt sent to the printer");
        true
    }

    /// Replace the active screen. Leaving a confirmation cancels its
    /// countdown, whatever the reason for leaving.
    fn go_to(&mut self, next: Screen) {
        if let Screen::Confirmation { token, .. } = &self.screen {
            self.effects.push(Effect::CancelCountdown { token: *token });
        }
        debug!(from = ?self.screen.kind(), to = ?next.kind(), "screen change");
        self.screen = next;
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn add_item(&mut self, item: &MenuItem) {
        let event = self.cart.add(item);
        debug!(?event, "cart");
        self.sound(SoundCue::Confirm);
        self.toast_short("Item added", format!("{} was added to the cart", item.name));
    }

    fn line_removed(&mut self, event: CartEvent) {
        debug!(?event, "cart");
        let len = self.cart.len();
        self.with_cursor(|c| c.clamp(len));
        self.sound(SoundCue::Error);
        if let CartEvent::Removed { name, .. } = event {
            self.toast_short("Item removed", format!("{name} was removed from the cart"));
        }
    }

    fn with_cursor(&mut self, f: impl FnOnce(&mut SelectionCursor)) {
        if let Screen::Menu { cursor, .. } | Screen::Cart { cursor } = &mut self.screen {
            f(cursor);
        }
    }

    fn sound(&mut self, cue: SoundCue) {
        self.effects.push(Effect::Sound(cue));
    }

    fn toast_short(&mut self, title: &str, body: impl Into<String>) {
        let toast = Toast::new(title, body, self.settings.toast_short);
        self.effects.push(Effect::Toast(toast));
    }

    fn toast_long(&mut self, title: &str, body: impl Into<String>) {
        let toast = Toast::new(title, body, self.settings.toast_long);
        self.effects.push(Effect::Toast(toast));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::order::tests::FixedClock;
    use std::time::Duration;

    fn setup() -> Kiosk {
        Kiosk::new(
            Catalog::builtin(),
            Settings::default(),
            Box::new(FixedClock::at_millis(1_760_000_123_456)),
        )
    }

    fn at_menu() -> Kiosk {
        let mut kiosk = setup();
        kiosk.handle_intent(Intent::StartOrder);
        kiosk.take_effects();
        kiosk
    }

    fn at_cart(ids: &[u32]) -> Kiosk {
        let mut kiosk = at_menu();
        for &id in ids {
            kiosk.handle_intent(Intent::SelectItem(ItemId::new(id)));
        }
        kiosk.handle_intent(Intent::ViewCart);
        kiosk.take_effects();
        kiosk
    }

    fn at_confirmation() -> Kiosk {
        let mut kiosk = at_cart(&[1, 1, 12]);
        kiosk.handle_intent(Intent::ConfirmOrder);
        kiosk.take_effects();
        kiosk
    }

    fn cursor_index(kiosk: &Kiosk) -> usize {
        kiosk.screen().cursor().map(SelectionCursor::index).unwrap()
    }

    fn active_token(kiosk: &Kiosk) -> TimerToken {
        match kiosk.screen() {
            Screen::Confirmation { token, .. } => *token,
            other => panic!("not on confirmation: {other:?}"),
        }
    }

    fn sounds(effects: &[Effect]) -> Vec<SoundCue> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Sound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn toast_titles(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Toast(t) => Some(t.title.clone()),
                _ => None,
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Welcome
    // -------------------------------------------------------------------------

    #[test]
    fn test_starts_on_welcome() {
        let kiosk = setup();
        assert_eq!(kiosk.screen(), &Screen::Welcome);
        assert!(kiosk.cart().is_empty());
        assert!(kiosk.order().is_none());
    }

    #[test]
    fn test_start_order_opens_primary_menu() {
        let mut kiosk = setup();
        assert!(kiosk.handle_intent(Intent::StartOrder));
        assert_eq!(kiosk.screen(), &Screen::menu(Category::Primary));
        assert_eq!(sounds(&kiosk.take_effects()), vec![SoundCue::Acknowledge]);
    }

    #[test]
    fn test_enter_on_welcome_starts_order() {
        let mut kiosk = setup();
        assert!(kiosk.handle_action(Action::Confirm));
        assert_eq!(kiosk.screen().kind(), ScreenKind::Menu);
    }

    #[test]
    fn test_welcome_ignores_other_actions() {
        let mut kiosk = setup();
        for action in [Action::MoveUp, Action::MoveDown, Action::Cancel, Action::SelectByIndex(1)] {
            assert!(!kiosk.handle_action(action));
        }
        assert_eq!(kiosk.screen(), &Screen::Welcome);
        assert!(kiosk.take_effects().is_empty());
    }

    // -------------------------------------------------------------------------
    // Menu
    // -------------------------------------------------------------------------

    #[test]
    fn test_digit_adds_matching_item() {
        let mut kiosk = at_menu();
        assert!(kiosk.handle_action(Action::SelectByIndex(1)));
        assert!(kiosk.handle_action(Action::SelectByIndex(1)));

        assert_eq!(kiosk.cart().quantity_of(ItemId::new(1)), Some(2));
        let effects = kiosk.take_effects();
        assert_eq!(sounds(&effects), vec![SoundCue::Confirm, SoundCue::Confirm]);
        assert_eq!(toast_titles(&effects), vec!["Item added", "Item added"]);
    }

    #[test]
    fn test_item_added_toast_names_item() {
        let mut kiosk = at_menu();
        kiosk.handle_intent(Intent::SelectItem(ItemId::new(12)));
        let effects = kiosk.take_effects();
        let name = &kiosk.catalog().get(ItemId::new(12)).unwrap().name;
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Toast(t) if t.body == format!("{name} was added to the cart")
                && t.duration == Duration::from_millis(2000)
        )));
    }

    #[test]
    fn test_digit_zero_matches_nothing() {
        let mut kiosk = at_menu();
        assert!(kiosk.handle_action(Action::SelectByIndex(0)));
        assert!(kiosk.cart().is_empty());
        assert_eq!(sounds(&kiosk.take_effects()), vec![SoundCue::Acknowledge]);
    }

    #[test]
    fn test_select_unknown_item_is_noop() {
        let mut kiosk = at_menu();
        assert!(!kiosk.handle_intent(Intent::SelectItem(ItemId::new(99))));
        assert!(kiosk.cart().is_empty());
        assert!(kiosk.take_effects().is_empty());
    }

    #[test]
    fn test_menu_cursor_wraps_and_enter_adds_highlighted() {
        let mut kiosk = at_menu();
        let len = kiosk.catalog().category_len(Category::Primary);

        kiosk.handle_action(Action::MoveUp);
        assert_eq!(cursor_index(&kiosk), len - 1);
        kiosk.handle_action(Action::MoveDown);
        assert_eq!(cursor_index(&kiosk), 0);
        kiosk.handle_action(Action::MoveDown);

        assert!(kiosk.handle_action(Action::Confirm));
        let expected = kiosk.catalog().nth_in_category(Category::Primary, 1).unwrap().id;
        assert_eq!(kiosk.cart().quantity_of(expected), Some(1));
    }

    #[test]
    fn test_category_switch_resets_cursor() {
        let mut kiosk = at_menu();
        kiosk.handle_action(Action::MoveDown);
        kiosk.handle_action(Action::MoveDown);
        assert_eq!(cursor_index(&kiosk), 2);

        assert!(kiosk.handle_intent(Intent::SelectCategory(Category::AddOn)));
        assert_eq!(kiosk.screen(), &Screen::menu(Category::AddOn));

        kiosk.handle_action(Action::Confirm);
        let first_extra = kiosk.catalog().nth_in_category(Category::AddOn, 0).unwrap().id;
        assert_eq!(kiosk.cart().quantity_of(first_extra), Some(1));
    }

    #[test]
    fn test_view_cart_requires_items() {
        let mut kiosk = at_menu();
        assert!(!kiosk.handle_intent(Intent::ViewCart));
        assert_eq!(kiosk.screen().kind(), ScreenKind::Menu);

        kiosk.handle_action(Action::SelectByIndex(3));
        assert!(kiosk.handle_intent(Intent::ViewCart));
        assert_eq!(kiosk.screen(), &Screen::cart());
    }

    #[test]
    fn test_menu_cancel_and_back_return_to_welcome() {
        let mut kiosk = at_menu();
        kiosk.handle_action(Action::Cancel);
        assert_eq!(kiosk.screen(), &Screen::Welcome);

        kiosk.handle_intent(Intent::StartOrder);
        kiosk.handle_intent(Intent::Back);
        assert_eq!(kiosk.screen(), &Screen::Welcome);
    }

    #[test]
    fn test_cart_survives_going_back_to_welcome() {
        let mut kiosk = at_menu();
        kiosk.handle_action(Action::SelectByIndex(2));
        kiosk.handle_action(Action::Cancel);
        assert_eq!(kiosk.cart().len(), 1);
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    #[test]
    fn test_cart_cursor_wraps() {
        let mut kiosk = at_cart(&[1, 2, 3]);
        assert_eq!(cursor_index(&kiosk), 0);
        kiosk.handle_action(Action::MoveUp);
        assert_eq!(cursor_index(&kiosk), 2);
        kiosk.handle_action(Action::MoveDown);
        assert_eq!(cursor_index(&kiosk), 0);
    }

    #[test]
    fn test_cart_digit_selects_line() {
        let mut kiosk = at_cart(&[1, 2, 3]);
        kiosk.handle_action(Action::SelectByIndex(3));
        assert_eq!(cursor_index(&kiosk), 2);
        kiosk.handle_action(Action::SelectByIndex(0));
        assert_eq!(cursor_index(&kiosk), 2);
        kiosk.handle_action(Action::SelectByIndex(9));
        assert_eq!(cursor_index(&kiosk), 2);
        assert_eq!(sounds(&kiosk.take_effects()), vec![SoundCue::Acknowledge; 3]);
    }

    #[test]
    fn test_enter_removes_selected_line_and_clamps() {
        let mut kiosk = at_cart(&[1, 2, 3]);
        kiosk.handle_action(Action::MoveUp);
        kiosk.take_effects();
        assert!(kiosk.handle_action(Action::Confirm));

        assert_eq!(kiosk.cart().len(), 2);
        assert_eq!(kiosk.cart().quantity_of(ItemId::new(3)), None);
        assert_eq!(cursor_index(&kiosk), 1);
        assert_eq!(kiosk.screen().kind(), ScreenKind::Cart);

        let effects = kiosk.take_effects();
        assert_eq!(sounds(&effects), vec![SoundCue::Error]);
        assert_eq!(toast_titles(&effects), vec!["Item removed"]);
    }

    #[test]
    fn test_enter_on_cart_never_confirms_order() {
        let mut kiosk = at_cart(&[1]);
        kiosk.handle_action(Action::Confirm);
        assert!(kiosk.cart().is_empty());
        assert_eq!(kiosk.screen().kind(), ScreenKind::Cart);
        assert!(kiosk.order().is_none());

        // Empty cart: Enter and ConfirmOrder both do nothing.
        assert!(!kiosk.handle_action(Action::Confirm));
        assert!(!kiosk.handle_intent(Intent::ConfirmOrder));
        assert_eq!(kiosk.screen().kind(), ScreenKind::Cart);
    }

    #[test]
    fn test_cursor_stays_valid_under_mixed_sequence() {
        let mut kiosk = at_cart(&[1, 2, 3, 4, 5]);
        let steps = [
            Action::MoveUp,
            Action::Confirm,
            Action::MoveDown,
            Action::MoveDown,
            Action::Confirm,
            Action::MoveUp,
            Action::MoveUp,
            Action::MoveUp,
            Action::Confirm,
            Action::SelectByIndex(2),
            Action::Confirm,
            Action::MoveDown,
            Action::Confirm,
            Action::MoveUp,
            Action::Confirm,
        ];
        for action in steps {
            kiosk.handle_action(action);
            let len = kiosk.cart().len();
            let index = cursor_index(&kiosk);
            if len == 0 {
                assert_eq!(index, 0);
            } else {
                assert!(index < len, "cursor {index} outside {len} lines");
            }
        }
        assert!(kiosk.cart().is_empty());
    }

    #[test]
    fn test_quantity_controls() {
        let mut kiosk = at_cart(&[5]);
        let id = ItemId::new(5);

        assert!(kiosk.handle_intent(Intent::IncrementLine(id)));
        assert_eq!(kiosk.cart().quantity_of(id), Some(2));
        assert!(kiosk.handle_intent(Intent::DecrementLine(id)));
        assert_eq!(kiosk.cart().quantity_of(id), Some(1));
        kiosk.take_effects();

        assert!(kiosk.handle_intent(Intent::DecrementLine(id)));
        assert_eq!(kiosk.cart().quantity_of(id), None);
        let effects = kiosk.take_effects();
        assert_eq!(sounds(&effects), vec![SoundCue::Error]);
        assert_eq!(toast_titles(&effects), vec!["Item removed"]);

        // Never creates a line
        assert!(!kiosk.handle_intent(Intent::IncrementLine(id)));
        assert!(kiosk.cart().is_empty());
    }

    #[test]
    fn test_remove_line_intent() {
        let mut kiosk = at_cart(&[1, 2]);
        kiosk.handle_action(Action::MoveDown);
        assert!(kiosk.handle_intent(Intent::RemoveLine(ItemId::new(2))));
        assert_eq!(cursor_index(&kiosk), 0);
        assert!(!kiosk.handle_intent(Intent::RemoveLine(ItemId::new(2))));
    }

    #[test]
    fn test_cart_exits_to_menu() {
        let mut kiosk = at_cart(&[1]);
        kiosk.handle_action(Action::Cancel);
        assert_eq!(kiosk.screen(), &Screen::menu(Category::Primary));

        kiosk.handle_intent(Intent::ViewCart);
        kiosk.handle_intent(Intent::ContinueShopping);
        assert_eq!(kiosk.screen().kind(), ScreenKind::Menu);

        kiosk.handle_intent(Intent::ViewCart);
        kiosk.handle_intent(Intent::Back);
        assert_eq!(kiosk.screen().kind(), ScreenKind::Menu);
    }

    // -------------------------------------------------------------------------
    // Confirmation
    // -------------------------------------------------------------------------

    #[test]
    fn test_confirm_order_finalizes_once() {
        let mut kiosk = at_cart(&[1, 1, 12]);
        assert!(kiosk.handle_intent(Intent::ConfirmOrder));

        let order = kiosk.order().unwrap();
        assert_eq!(order.total(), Money::from_cents(3480));
        assert_eq!(order.id().as_str(), "123456");
        assert_eq!(kiosk.screen().remaining(), Some(10));

        let effects = kiosk.take_effects();
        assert_eq!(sounds(&effects), vec![SoundCue::Confirm]);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Toast(t) if t.title == "Order confirmed"
                && t.body == "Order #123456 placed"
                && t.duration == Duration::from_millis(3000)
        )));
        let token = active_token(&kiosk);
        assert!(effects.contains(&Effect::StartCountdown {
            token,
            interval: Duration::from_secs(1),
        }));

        // A second confirm is not available on this screen.
        assert!(!kiosk.handle_intent(Intent::ConfirmOrder));
    }

    #[test]
    fn test_countdown_returns_to_welcome() {
        let mut kiosk = at_confirmation();
        let token = active_token(&kiosk);

        for left in (1..10).rev() {
            assert!(kiosk.tick(token));
            assert_eq!(kiosk.screen().remaining(), Some(left));
        }
        assert!(kiosk.tick(token));

        assert_eq!(kiosk.screen(), &Screen::Welcome);
        assert!(kiosk.cart().is_empty());
        assert!(kiosk.order().is_none());
        assert!(kiosk.take_effects().contains(&Effect::CancelCountdown { token }));
    }

    #[test]
    fn test_new_order_cancels_countdown() {
        let mut kiosk = at_confirmation();
        let token = active_token(&kiosk);

        assert!(kiosk.handle_intent(Intent::NewOrder));
        assert_eq!(kiosk.screen(), &Screen::Welcome);
        assert!(kiosk.cart().is_empty());
        assert!(kiosk.take_effects().contains(&Effect::CancelCountdown { token }));

        // A tick that was already in flight does nothing.
        assert!(!kiosk.tick(token));
        assert_eq!(kiosk.screen(), &Screen::Welcome);
    }

    #[test]
    fn test_stale_token_ignored_on_next_confirmation() {
        let mut kiosk = at_confirmation();
        let first = active_token(&kiosk);
        kiosk.handle_action(Action::Confirm);

        kiosk.handle_intent(Intent::StartOrder);
        kiosk.handle_action(Action::SelectByIndex(4));
        kiosk.handle_intent(Intent::ViewCart);
        kiosk.handle_intent(Intent::ConfirmOrder);
        let second = active_token(&kiosk);
        assert_ne!(first, second);

        assert!(!kiosk.tick(first));
        assert_eq!(kiosk.screen().remaining(), Some(10));
        assert!(kiosk.tick(second));
        assert_eq!(kiosk.screen().remaining(), Some(9));
    }

    #[test]
    fn test_order_unaffected_by_later_cart_changes() {
        let mut kiosk = at_confirmation();
        let snapshot = kiosk.order().unwrap().clone();
        kiosk.handle_intent(Intent::NewOrder);
        assert_eq!(snapshot.lines().len(), 2);
        assert_eq!(snapshot.total(), Money::from_cents(3480));
    }

    #[test]
    fn test_print_receipt() {
        let mut kiosk = at_confirmation();
        assert!(kiosk.handle_intent(Intent::PrintReceipt));

        let effects = kiosk.take_effects();
        let receipt = effects
            .iter()
            .find_map(|e| match e {
                Effect::PrintReceipt(r) => Some(r.clone()),
                _ => None,
            })
            .unwrap();
        assert!(receipt.text().contains("ORDER #123456"));
        assert!(receipt.text().contains("R$ 34,80"));
        assert_eq!(toast_titles(&effects), vec!["Receipt sent"]);
        // Printing does not leave the screen.
        assert_eq!(kiosk.screen().kind(), ScreenKind::Confirmation);
    }

    #[test]
    fn test_intents_outside_their_screen_ignored() {
        let mut kiosk = setup();
        for intent in [
            Intent::PrintReceipt,
            Intent::NewOrder,
            Intent::ConfirmOrder,
            Intent::ViewCart,
            Intent::SelectItem(ItemId::new(1)),
        ] {
            assert!(!kiosk.handle_intent(intent));
        }
        assert_eq!(kiosk.screen(), &Screen::Welcome);
        assert!(kiosk.cart().is_empty());
    }

    #[test]
    fn test_tick_outside_confirmation_ignored() {
        let mut kiosk = at_menu();
        assert!(!kiosk.tick(TimerToken(1)));
        assert_eq!(kiosk.screen().kind(), ScreenKind::Menu);
    }

    #[test]
    fn test_countdown_of_one_second() {
        let settings = Settings {
            countdown_secs: 1,
            ..Settings::default()
        };
        let mut kiosk = Kiosk::new(Catalog::builtin(), settings, Box::new(FixedClock::at_millis(0)));
        kiosk.handle_intent(Intent::StartOrder);
        kiosk.handle_action(Action::SelectByIndex(1));
        kiosk.handle_intent(Intent::ViewCart);
        kiosk.handle_intent(Intent::ConfirmOrder);

        let token = active_token(&kiosk);
        kiosk.tick(token);
        assert_eq!(kiosk.screen(), &Screen::Welcome);
    }
}
