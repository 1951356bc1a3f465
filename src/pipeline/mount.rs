//! Mount - the kiosk event loop
//!
//! Everything funnels into one channel: the stdin reader thread sends
//! input, the countdown thread sends ticks. The loop thread owns the
//! [`Kiosk`] and is the only one that touches it.
//!
//! ```text
//! InputReader ─┐
//!              ├─> mpsc ─> Session::handle ─> Kiosk ─> effects ─> Feedback / Ticker
//! Ticker ──────┘                                  └─> generation++ ─> render effect
//! ```
//!
//! Keys reach the machine through a [`KeyboardRegistry`] subscription that
//! belongs to the active screen. Mouse clicks resolve against the hit map
//! recorded by the last frame and reach the machine as intents.
//!
//! # API
//!
//! - [`run`] - take over the terminal and run until Ctrl+C
//! - [`Session`] - the terminal-free part of the loop, one message at a time

use std::cell::RefCell;
use std::io::{self, BufWriter};
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use spark_signals::{effect, signal, Signal};
use tracing::{debug, info, warn};

use super::feedback::{Feedback, ToastSlot};
use super::terminal::{terminal_size, TerminalGuard};
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::screens::{Effect, Intent, Kiosk, ScreenKind};
use crate::state::{
    route, HitMap, InputEvent, InputReader, KeyboardEvent, KeyboardRegistry, Subscription, Ticker,
    TimerToken,
};
use crate::view;

// =============================================================================
// MESSAGES
// =============================================================================

/// Everything the loop thread can be woken by.
#[derive(Debug)]
pub enum LoopMessage {
    Input(io::Result<InputEvent>),
    Tick(TimerToken),
}

/// Whether the loop keeps going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// SESSION
// =============================================================================

/// Kiosk plus the plumbing around it, minus the terminal.
pub struct Session<F: Feedback> {
    kiosk: Rc<RefCell<Kiosk>>,
    keyboard: KeyboardRegistry,
    listener: Option<(ScreenKind, Subscription)>,
    hits: Rc<RefCell<HitMap<Intent>>>,
    toasts: Rc<RefCell<ToastSlot>>,
    feedback: F,
    countdown: Option<Ticker>,
    tx: Sender<LoopMessage>,
}

impl<F: Feedback> Session<F> {
    pub fn new(kiosk: Kiosk, feedback: F, tx: Sender<LoopMessage>) -> Self {
        let mut session = Self {
            kiosk: Rc::new(RefCell::new(kiosk)),
            keyboard: KeyboardRegistry::new(),
            listener: None,
            hits: Rc::new(RefCell::new(HitMap::new())),
            toasts: Rc::new(RefCell::new(ToastSlot::default())),
            feedback,
            countdown: None,
            tx,
        };
        session.sync_listener();
        session
    }

    pub fn kiosk(&self) -> Rc<RefCell<Kiosk>> {
        self.kiosk.clone()
    }

    pub fn hits(&self) -> Rc<RefCell<HitMap<Intent>>> {
        self.hits.clone()
    }

    pub fn toasts(&self) -> Rc<RefCell<ToastSlot>> {
        self.toasts.clone()
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn keyboard(&self) -> &KeyboardRegistry {
        &self.keyboard
    }

    /// Token of the running countdown, if any.
    pub fn countdown_token(&self) -> Option<TimerToken> {
        self.countdown.as_ref().map(Ticker::token)
    }

    /// How long the loop may sleep before the screen needs a redraw.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.toasts.borrow().deadline(now)
    }

    /// Apply one message. Input errors end the loop.
    pub fn handle(&mut self, message: LoopMessage) -> io::Result<Flow> {
        match message {
            LoopMessage::Input(Ok(InputEvent::Key(event))) => {
                if is_quit(&event) {
                    info!("quit requested");
                    return Ok(Flow::Quit);
                }
                self.keyboard.dispatch(event);
            }
            LoopMessage::Input(Ok(InputEvent::Mouse(event))) => {
                // Bind first so the hit map borrow ends before the kiosk runs.
                let intent = self.hits.borrow_mut().handle(&event);
                if let Some(intent) = intent {
                    debug!(?intent, "pointer");
                    self.kiosk.borrow_mut().handle_intent(intent);
                }
            }
            LoopMessage::Input(Ok(InputEvent::Resize(width, height))) => {
                debug!(width, height, "resize");
            }
            LoopMessage::Input(Ok(InputEvent::None)) => {}
            LoopMessage::Input(Err(err)) => return Err(err),
            LoopMessage::Tick(token) => {
                self.kiosk.borrow_mut().tick(token);
            }
        }

        self.apply_effects()?;
        self.sync_listener();
        Ok(Flow::Continue)
    }

    fn apply_effects(&mut self) -> io::Result<()> {
        let effects = self.kiosk.borrow_mut().take_effects();
        for effect in effects {
            match effect {
                Effect::Sound(cue) => self.feedback.play(cue),
                Effect::Toast(toast) => {
                    self.feedback.notify(&toast);
                    self.toasts.borrow_mut().show(toast, Instant::now());
                }
                Effect::PrintReceipt(receipt) => self.feedback.print_receipt(&receipt),
                Effect::StartCountdown { token, interval } => {
                    if let Some(previous) = self.countdown.take() {
                        previous.cancel();
                    }
                    let ticker = Ticker::start(token, interval, self.tx.clone(), LoopMessage::Tick)?;
                    self.countdown = Some(ticker);
                }
                Effect::CancelCountdown { token } => {
                    if self.countdown_token() == Some(token) {
                        if let Some(ticker) = self.countdown.take() {
                            ticker.cancel();
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Keep exactly one key listener, owned by the active screen.
    fn sync_listener(&mut self) {
        let kind = self.kiosk.borrow().screen().kind();
        if matches!(&self.listener, Some((active, _)) if *active == kind) {
            return;
        }

        // Drop the old subscription before registering the new one.
        self.listener = None;

        let kiosk = self.kiosk.clone();
        let subscription = self.keyboard.on(move |event| {
            let Some(action) = route(event) else {
                return false;
            };
            let mut kiosk = kiosk.borrow_mut();
            if kiosk.screen().kind() != kind {
                return false;
            }
            debug!(?action, screen = ?kind, "key");
            kiosk.handle_action(action)
        });
        self.listener = Some((kind, subscription));
    }
}

impl<F: Feedback> Drop for Session<F> {
    fn drop(&mut self) {
        if let Some(ticker) = self.countdown.take() {
            ticker.cancel();
        }
    }
}

fn is_quit(event: &KeyboardEvent) -> bool {
    event.is_press() && event.modifiers.ctrl && event.key.eq_ignore_ascii_case("c")
}

// =============================================================================
// RUN
// =============================================================================

/// Run the kiosk full screen until Ctrl+C or stdin closes.
pub fn run<F: Feedback + 'static>(kiosk: Kiosk, feedback: F) -> io::Result<()> {
    let mut terminal = TerminalGuard::enter()?;

    let (tx, rx) = mpsc::channel();
    let reader = InputReader::spawn(tx.clone(), LoopMessage::Input)?;
    let mut session = Session::new(kiosk, feedback, tx);

    // Root signal, bumped after every handled message.
    let generation: Signal<u64> = signal(0);

    let (width, height) = terminal_size();
    let mut buffer = FrameBuffer::new(width, height);
    let mut renderer = DiffRenderer::new(BufWriter::new(io::stdout()));

    let gen_for_render = generation.clone();
    let kiosk = session.kiosk();
    let hits = session.hits();
    let toasts = session.toasts();
    let stop_render = effect(move || {
        let _gen = gen_for_render.get();

        let (width, height) = terminal_size();
        if (width, height) != (buffer.width(), buffer.height()) {
            buffer.resize(width, height);
            renderer.invalidate();
        }

        let toast = toasts.borrow().current(Instant::now()).cloned();
        view::draw(&kiosk.borrow(), toast.as_ref(), &mut buffer, &mut hits.borrow_mut());

        if let Err(err) = renderer.render(&buffer) {
            warn!(%err, "render failed");
        }
    });

    generation.set(1);

    let outcome = loop {
        let message = match session.next_deadline(Instant::now()) {
            Some(timeout) => rx.recv_timeout(timeout),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match message {
            Ok(message) => match session.handle(message) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break Ok(()),
                Err(err) => break Err(err),
            },
            // A toast expired; only the frame changes.
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break Ok(()),
        }

        generation.set(generation.get() + 1);
    };

    stop_render();
    drop(session);
    drop(reader);
    terminal.exit()?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ItemId};
    use crate::order::tests::FixedClock;
    use crate::pipeline::feedback::RecordingFeedback;
    use crate::screens::{Screen, Settings, SoundCue};
    use crate::state::{Modifiers, MouseButton, MouseEvent};
    use std::sync::mpsc::Receiver;

    fn setup() -> (Session<RecordingFeedback>, Receiver<LoopMessage>) {
        crate::logging::init_test();
        let settings = Settings {
            tick_interval: Duration::from_secs(3600),
            ..Settings::default()
        };
        let kiosk = Kiosk::new(
            Catalog::builtin(),
            settings,
            Box::new(FixedClock::at_millis(1_760_000_123_456)),
        );
        let (tx, rx) = mpsc::channel();
        (Session::new(kiosk, RecordingFeedback::default(), tx), rx)
    }

    fn key(session: &mut Session<RecordingFeedback>, key: &str) -> Flow {
        let event = InputEvent::Key(KeyboardEvent::new(key));
        session.handle(LoopMessage::Input(Ok(event))).unwrap()
    }

    fn kind(session: &Session<RecordingFeedback>) -> ScreenKind {
        session.kiosk.borrow().screen().kind()
    }

    fn confirm_two_dishes(session: &mut Session<RecordingFeedback>) {
        key(session, "Enter");
        key(session, "1");
        key(session, "1");
        session.kiosk.borrow_mut().handle_intent(Intent::ViewCart);
        session.kiosk.borrow_mut().handle_intent(Intent::ConfirmOrder);
        session.handle(LoopMessage::Input(Ok(InputEvent::None))).unwrap();
    }

    #[test]
    fn test_keys_drive_the_active_screen() {
        let (mut session, _rx) = setup();
        assert_eq!(kind(&session), ScreenKind::Welcome);

        key(&mut session, "Enter");
        assert_eq!(kind(&session), ScreenKind::Menu);

        key(&mut session, "1");
        key(&mut session, "1");
        assert_eq!(session.kiosk.borrow().cart().quantity_of(ItemId::new(1)), Some(2));
        assert!(session.feedback().sounds.contains(&SoundCue::Confirm));
        assert_eq!(session.feedback().toasts.len(), 2);
    }

    #[test]
    fn test_one_listener_across_transitions() {
        let (mut session, _rx) = setup();
        assert_eq!(session.keyboard().handler_count(), 1);
        for _ in 0..5 {
            key(&mut session, "Enter");
            key(&mut session, "Escape");
        }
        assert_eq!(kind(&session), ScreenKind::Welcome);
        assert_eq!(session.keyboard().handler_count(), 1);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut session, _rx) = setup();
        let event = InputEvent::Key(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        let flow = session.handle(LoopMessage::Input(Ok(event))).unwrap();
        assert_eq!(flow, Flow::Quit);
        assert_eq!(key(&mut session, "c"), Flow::Continue);
    }

    #[test]
    fn test_input_error_ends_loop() {
        let (mut session, _rx) = setup();
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed");
        assert!(session.handle(LoopMessage::Input(Err(err))).is_err());
    }

    #[test]
    fn test_click_uses_last_frame() {
        let (mut session, _rx) = setup();
        let mut buffer = FrameBuffer::new(80, 24);
        view::draw(&session.kiosk.borrow(), None, &mut buffer, &mut session.hits.borrow_mut());

        let (x, y) = (40, 5);
        for event in [
            MouseEvent::down(MouseButton::Left, x, y),
            MouseEvent::up(MouseButton::Left, x, y),
        ] {
            session.handle(LoopMessage::Input(Ok(InputEvent::Mouse(event)))).unwrap();
        }
        assert_eq!(kind(&session), ScreenKind::Menu);
    }

    #[test]
    fn test_countdown_started_and_cancelled() {
        let (mut session, _rx) = setup();
        confirm_two_dishes(&mut session);
        assert_eq!(kind(&session), ScreenKind::Confirmation);
        let token = session.countdown_token().unwrap();

        // Toast on screen until it expires.
        assert!(session.next_deadline(Instant::now()).is_some());

        key(&mut session, "Enter");
        assert_eq!(kind(&session), ScreenKind::Welcome);
        assert!(session.countdown_token().is_none());

        // A tick that was already queued lands on Welcome and does nothing.
        session.handle(LoopMessage::Tick(token)).unwrap();
        assert_eq!(kind(&session), ScreenKind::Welcome);
    }

    #[test]
    fn test_ticks_return_to_welcome() {
        let (mut session, _rx) = setup();
        confirm_two_dishes(&mut session);
        let token = session.countdown_token().unwrap();

        for _ in 0..10 {
            session.handle(LoopMessage::Tick(token)).unwrap();
        }
        let kiosk = session.kiosk.borrow();
        assert!(matches!(kiosk.screen(), Screen::Welcome));
        assert!(kiosk.cart().is_empty());
        assert!(kiosk.order().is_none());
    }
}
