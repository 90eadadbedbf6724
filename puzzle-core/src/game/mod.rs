//! Game Controller - Spiel-Zustandsautomat
//!
//! Besitzt Spielphase, Sequenz-Puffer, Talk-Sitzung, Blink-Timer,
//! Debouncer, LEDs, Countdown und Link. Wird einmal pro Loop-Durchlauf
//! über `tick()` weitergeschaltet.
//!
//! Phasen:
//! ```text
//! Idle → Running → Flashing(Won | Lost) → Idle
//!                → Flashing(WrongSequence) → Running
//! Running/Flashing → Over (Reset-Geste) → Idle
//! ```

mod phase;
mod sequence;
mod talk;

pub use phase::{FlashTimer, GamePhase, Outcome};
pub use sequence::SequenceBuffer;
pub use talk::TalkSession;

use embassy_time::Instant;
use rgb::RGB8;

use crate::color::{GREEN, OFF, RED, WHITE};
use crate::config::{ConfigError, GameConfig};
use crate::countdown::CountdownAnimator;
use crate::debounce::{EdgeEvent, InputDebouncer};
use crate::logic::flash_lit;
use crate::traits::{Indicator, Link, SmartLedWriter};
use crate::types::{BUTTON_COUNT, ButtonId, Command, RawInputs};

/// Durch eine Talk-Geste ausgelöste Aktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureAction {
    Start,
    Reset,
}

/// Aktion, die nach der Wartezeit ausgeführt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub action: GestureAction,
    pub due: Instant,
}

/// Orchestriert ein komplettes Puzzle
///
/// # Generische Parameter
/// - `L: Link` - Signal-Kanal zum Peer (TCP oder Mock)
/// - `W: SmartLedWriter` - LED-Ring (RMT oder Mock)
/// - `I: Indicator` - RGB LEDs für Talk-Button und Sequenz-Buttons
/// - `PIXELS` - Anzahl Pixel im Ring
pub struct GameController<L, W, I, const PIXELS: usize> {
    config: GameConfig,
    link: L,
    countdown: CountdownAnimator<W, PIXELS>,
    talk_indicator: I,
    button_indicators: [I; BUTTON_COUNT],
    talk_button: InputDebouncer,
    buttons: [InputDebouncer; BUTTON_COUNT],
    phase: GamePhase,
    locked: bool,
    sequence: SequenceBuffer,
    talk: TalkSession,
    flash: Option<FlashTimer>,
    pending: Option<PendingAction>,
    peer_seen: bool,
}

impl<L, W, I, const PIXELS: usize> GameController<L, W, I, PIXELS>
where
    L: Link,
    W: SmartLedWriter,
    I: Indicator,
{
    /// Erstellt den Controller und schaltet alle Ausgänge aus
    ///
    /// # Fehlerbehandlung
    /// Gibt `ConfigError` zurück wenn die Ziel-Sequenz ungültig ist
    pub fn new(
        config: GameConfig,
        link: L,
        ring: W,
        talk_indicator: I,
        button_indicators: [I; BUTTON_COUNT],
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let countdown = CountdownAnimator::new(ring, config.countdown, config.ring);
        let debouncer = InputDebouncer::new(config.debounce);

        let mut controller = Self {
            config,
            link,
            countdown,
            talk_indicator,
            button_indicators,
            talk_button: debouncer,
            buttons: [debouncer; BUTTON_COUNT],
            phase: GamePhase::Idle,
            locked: true,
            sequence: SequenceBuffer::new(),
            talk: TalkSession::new(),
            flash: None,
            pending: None,
            peer_seen: false,
        };

        // Hardware-Zustand ist beim Booten unbekannt: unbedingt schreiben
        force_off(&mut controller.talk_indicator);
        for indicator in controller.button_indicators.iter_mut() {
            force_off(indicator);
        }

        Ok(controller)
    }

    /// Ein Loop-Durchlauf
    ///
    /// Feste Reihenfolge: Link poll → Countdown → Inputs → Zustand → LEDs.
    /// Blockiert nie; Link-Fehler bedeuten nur "kein Signal in diesem Tick".
    pub fn tick(&mut self, now: Instant, inputs: &RawInputs) {
        // 1. Link
        let incoming = self.link.poll();

        if !self.peer_seen {
            if !self.link.is_connected() {
                self.countdown
                    .pulse(self.config.pulse_color, self.config.pulse_speed, now);
                return;
            }
            info!("Game: peer connected, session ready");
            self.peer_seen = true;
            self.countdown.clear();
        }

        if let Some(command) = incoming {
            self.handle_incoming(command);
        }

        self.run_pending(now);

        // 2. Countdown
        self.countdown.tick(now);
        if self.countdown.is_finished()
            && matches!(
                self.phase,
                GamePhase::Running | GamePhase::Flashing(Outcome::WrongSequence)
            )
        {
            self.game_lost(now);
        }

        // 3. Inputs
        let talk_edge = self.talk_button.poll(inputs.talk, now);
        let mut edges = [EdgeEvent::None; BUTTON_COUNT];
        for ((edge, debouncer), &level) in edges
            .iter_mut()
            .zip(self.buttons.iter_mut())
            .zip(inputs.buttons.iter())
        {
            *edge = debouncer.poll(level, now);
        }

        // 4. Zustand
        self.handle_talk_edge(talk_edge, now);
        self.handle_button_edges(&edges, now);

        // 5. LEDs
        self.update_button_flash(now);
    }

    /// Beliebige Phase → Idle, Peer wird benachrichtigt
    pub fn reset(&mut self) {
        info!("Game: resetting");
        self.send(Command::ResetGame);
        self.reset_local();
    }

    /// Idle → Running, Peer wird benachrichtigt
    ///
    /// Außerhalb von `Idle` passiert nichts.
    pub fn start(&mut self, now: Instant) {
        if self.phase != GamePhase::Idle {
            debug!("Game: start ignored in phase {}", self.phase);
            return;
        }

        info!("Game: starting");
        self.send(Command::StartGame);
        self.phase = GamePhase::Running;
        self.locked = false;
        self.sequence.clear();
        self.flash = None;
        self.pending = None;
        self.talk.reset_burst();
        self.countdown.start(now);
    }

    /// Erzwungener lokaler Reset vor einem Neustart des Geräts
    ///
    /// Setzt allen Zustand und alle Ausgänge zurück, sendet nichts über den Link.
    pub fn shutdown(&mut self) {
        warn!("Game: shutdown, clearing all outputs");
        self.reset_local();
        self.talk = TalkSession::new();
        self.peer_seen = false;
    }

    fn reset_local(&mut self) {
        self.phase = GamePhase::Idle;
        self.locked = true;
        self.sequence.clear();
        self.flash = None;
        self.pending = None;
        self.talk.reset_burst();
        paint(&mut self.talk_indicator, OFF);
        self.paint_buttons(OFF);
        self.countdown.clear();
    }

    fn handle_incoming(&mut self, command: Command) {
        match command {
            Command::Talking => self.talk.peer_talking = true,
            Command::StoppedTalking => self.talk.peer_talking = false,
            other => debug!("Game: ignoring inbound {}", other),
        }
    }

    fn run_pending(&mut self, now: Instant) {
        let Some(pending) = self.pending else {
            return;
        };
        if now < pending.due {
            return;
        }

        self.pending = None;
        match pending.action {
            GestureAction::Start => self.start(now),
            GestureAction::Reset => self.reset(),
        }
    }

    fn handle_talk_edge(&mut self, edge: EdgeEvent, now: Instant) {
        match edge {
            EdgeEvent::Pressed => {
                if !self.talk.is_pressed {
                    self.send(Command::Talking);
                }
                self.talk.is_pressed = true;
                let color = if self.talk.peer_talking { RED } else { GREEN };
                paint(&mut self.talk_indicator, color);
            }
            EdgeEvent::Released => {
                self.talk.is_pressed = false;
                self.send(Command::StoppedTalking);
                paint(&mut self.talk_indicator, OFF);

                // Zählt nur Klicks innerhalb des Fensters, sonst beginnt ein neuer Burst
                let count = self.talk.record_release(now, self.config.talk_window);
                debug!("Game: talk release, burst count {}", count);
                self.check_gesture(count, now);
            }
            EdgeEvent::None => {}
        }
    }

    fn check_gesture(&mut self, count: u32, now: Instant) {
        if self.pending.is_some() {
            return;
        }

        let action = if count >= self.config.reset_presses && self.phase != GamePhase::Idle {
            GestureAction::Reset
        } else if count >= self.config.start_presses && self.phase == GamePhase::Idle {
            GestureAction::Start
        } else {
            return;
        };

        info!("Game: gesture {} accepted ({} presses)", action, count);
        if action == GestureAction::Reset {
            self.phase = GamePhase::Over;
            self.locked = true;
            self.flash = None;
        }
        self.pending = Some(PendingAction {
            action,
            due: now + self.config.settle_delay,
        });
    }

    fn handle_button_edges(&mut self, edges: &[EdgeEvent; BUTTON_COUNT], now: Instant) {
        if self.phase != GamePhase::Running || self.locked {
            return;
        }

        for (index, edge) in edges.iter().enumerate() {
            if *edge != EdgeEvent::Pressed {
                continue;
            }

            let id = index as ButtonId;
            if !self.sequence.record(id) {
                continue;
            }

            info!(
                "Game: button {} pressed ({}/{})",
                id,
                self.sequence.len(),
                self.config.target.len()
            );
            paint(&mut self.button_indicators[index], WHITE);

            if self.sequence.len() == self.config.target.len() {
                self.locked = true;
                self.evaluate_sequence(now);
                break;
            }
        }
    }

    fn evaluate_sequence(&mut self, now: Instant) {
        if self.sequence.matches(&self.config.target) {
            self.game_won(now);
        } else {
            info!("Game: incorrect sequence");
            self.sequence.clear();
            self.begin_flash(Outcome::WrongSequence, now);
        }
    }

    fn game_won(&mut self, now: Instant) {
        info!("Game: won");
        self.send(Command::GameWon);
        self.locked = true;
        self.sequence.clear();
        self.countdown.game_won(now);
        self.begin_flash(Outcome::Won, now);
    }

    fn game_lost(&mut self, now: Instant) {
        info!("Game: lost");
        self.send(Command::GameOver);
        self.locked = true;
        self.sequence.clear();
        self.begin_flash(Outcome::Lost, now);
    }

    fn begin_flash(&mut self, outcome: Outcome, now: Instant) {
        let (budget, color) = match outcome {
            Outcome::Won => (self.config.long_flash, GREEN),
            Outcome::Lost => (self.config.long_flash, RED),
            Outcome::WrongSequence => (self.config.short_flash, RED),
        };
        self.phase = GamePhase::Flashing(outcome);
        self.flash = Some(FlashTimer {
            started_at: now,
            budget,
            color,
        });
    }

    fn update_button_flash(&mut self, now: Instant) {
        let Some(flash) = self.flash else {
            return;
        };

        let color = if flash_lit(flash.elapsed(now), self.config.button_flash_half_period) {
            flash.color
        } else {
            OFF
        };
        self.paint_buttons(color);

        if !flash.is_expired(now) {
            return;
        }

        if self.phase == GamePhase::Flashing(Outcome::WrongSequence) {
            info!("Game: retry, buttons unlocked");
            self.flash = None;
            self.phase = GamePhase::Running;
            self.locked = false;
            self.talk.reset_burst();
            self.paint_buttons(OFF);
        } else {
            self.reset();
        }
    }

    fn send(&mut self, command: Command) {
        if let Err(e) = self.link.send_command(command) {
            debug!("Link: dropped {}: {}", command, e);
        }
    }

    fn paint_buttons(&mut self, color: RGB8) {
        for indicator in self.button_indicators.iter_mut() {
            paint(indicator, color);
        }
    }

    // ------------------------------------------------------------------------
    // Zustand für Tests und Diagnose
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// `true` sobald einmal ein Peer verbunden war
    pub fn has_session(&self) -> bool {
        self.peer_seen
    }

    pub fn sequence(&self) -> &[ButtonId] {
        self.sequence.as_slice()
    }

    pub fn talk_session(&self) -> &TalkSession {
        &self.talk
    }

    pub fn flash_timer(&self) -> Option<&FlashTimer> {
        self.flash.as_ref()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn countdown(&self) -> &CountdownAnimator<W, PIXELS> {
        &self.countdown
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn talk_indicator(&self) -> &I {
        &self.talk_indicator
    }

    pub fn button_indicator(&self, id: ButtonId) -> Option<&I> {
        self.button_indicators.get(usize::from(id))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Setzt eine Farbe, aber nur wenn sie sich ändert
///
/// Schreibfehler werden geloggt und verworfen; beim nächsten Aufruf wird
/// erneut geschrieben, weil sich die gemerkte Farbe nicht geändert hat.
fn paint<I: Indicator>(indicator: &mut I, color: RGB8) {
    if indicator.color() == color {
        return;
    }
    if let Err(e) = indicator.set_color(color) {
        warn!("Indicator: write failed: {}", e);
    }
}

fn force_off<I: Indicator>(indicator: &mut I) {
    if let Err(e) = indicator.set_color(OFF) {
        warn!("Indicator: write failed: {}", e);
    }
}
