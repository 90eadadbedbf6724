//! Mocks und Test-Rig für Host-Tests
//!
//! Diese Crate läuft auf dem Host (x86_64) und ersetzt alle
//! Hardware-Abhängigkeiten von puzzle-core durch In-Memory Mocks.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use puzzle_core::{
    Command, Duration, GameConfig, GameController, Indicator, Instant, LedError, Link,
    LinkError, RawInputs, SmartLedWriter,
};
use rgb::RGB8;

/// Pixel im Test-Ring (wie auf dem Gerät)
pub const RING_PIXELS: usize = 12;

/// Abstand zwischen zwei Abtastungen eines Klicks (größer als die Entprellzeit)
pub const STEP_MS: u64 = 30;

// ============================================================================
// Mock LED-Ring
// ============================================================================

#[derive(Default)]
pub struct MockRing {
    pub last_frame: Option<Vec<RGB8>>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockRing {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartLedWriter for MockRing {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_frame = Some(pixels.to_vec());
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock RGB-Anzeige
// ============================================================================

#[derive(Default)]
pub struct MockIndicator {
    pub color: RGB8,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl Indicator for MockIndicator {
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.color = color;
        self.write_count += 1;
        Ok(())
    }

    fn color(&self) -> RGB8 {
        self.color
    }
}

// ============================================================================
// Mock Link
// ============================================================================

#[derive(Default)]
pub struct MockLink {
    pub connected: bool,
    /// Jedes Senden schlägt fehl (Transport kaputt)
    pub fail_sends: bool,
    pub sent: Vec<Command>,
    pub inbox: VecDeque<Command>,
}

impl MockLink {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Wie oft `command` erfolgreich gesendet wurde
    pub fn sent_count(&self, command: Command) -> usize {
        self.sent.iter().filter(|sent| **sent == command).count()
    }

    /// Simuliert einen Verbindungsabbruch: nichts kommt an, Senden schlägt fehl
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.fail_sends = true;
        self.inbox.clear();
    }
}

impl Link for MockLink {
    fn send_command(&mut self, command: Command) -> Result<(), LinkError> {
        if self.fail_sends {
            return Err(LinkError::Transport);
        }
        if !self.connected {
            return Err(LinkError::NotConnected);
        }

        self.sent.push(command);
        Ok(())
    }

    fn poll(&mut self) -> Option<Command> {
        if !self.connected {
            return None;
        }
        self.inbox.pop_front()
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

// ============================================================================
// Mock embedded-hal Kanäle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockHalError;

impl digital::Error for MockHalError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for MockHalError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

#[derive(Default)]
pub struct MockPin {
    pub high: Option<bool>,
    pub fail: bool,
}

impl digital::ErrorType for MockPin {
    type Error = MockHalError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockHalError);
        }
        self.high = Some(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockHalError);
        }
        self.high = Some(true);
        Ok(())
    }
}

/// 12-bit PWM-Kanal (wie PCA9685)
pub struct MockPwm {
    pub duty: Option<u16>,
}

impl MockPwm {
    pub const MAX_DUTY: u16 = 4095;

    pub fn new() -> Self {
        Self { duty: None }
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        Self::MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = Some(duty);
        Ok(())
    }
}

// ============================================================================
// Test-Rig: Controller + simulierte Zeit
// ============================================================================

pub type TestController = GameController<MockLink, MockRing, MockIndicator, RING_PIXELS>;

/// Schnelle Konfiguration für Tests
///
/// Kurze Zeiten, volle Ring-Helligkeit (Frames == logische Pixel).
pub fn fast_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.countdown = Duration::from_millis(1200);
    config.long_flash = Duration::from_millis(2000);
    config.short_flash = Duration::from_millis(1000);
    config.ring.brightness = 255;
    config
}

pub struct Rig {
    pub game: TestController,
    pub now_ms: u64,
}

impl Rig {
    /// Controller mit verbundenem Peer, Sitzung bereits aufgebaut
    pub fn new(config: GameConfig) -> Self {
        let mut rig = Self::with_link(config, MockLink::connected());
        rig.tick(RawInputs::released());
        rig
    }

    /// Controller ohne Peer
    pub fn with_link(config: GameConfig, link: MockLink) -> Self {
        let game = GameController::new(
            config,
            link,
            MockRing::new(),
            MockIndicator::default(),
            Default::default(),
        )
        .expect("valid test config");

        Self { game, now_ms: 0 }
    }

    /// Controller mit laufendem Spiel
    pub fn running(config: GameConfig) -> Self {
        let mut rig = Self::new(config);
        let now = rig.now();
        rig.game.start(now);
        rig.advance(STEP_MS);
        rig
    }

    pub fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms)
    }

    pub fn tick(&mut self, inputs: RawInputs) {
        let now = self.now();
        self.game.tick(now, &inputs);
    }

    /// Zeit vorspulen und einen Tick ohne gedrückte Buttons ausführen
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.tick(RawInputs::released());
    }

    /// Ticks im 10 ms Raster bis (mindestens) `until_ms`
    pub fn run_until(&mut self, until_ms: u64) {
        while self.now_ms < until_ms {
            let step = (until_ms - self.now_ms).min(10);
            self.advance(step);
        }
    }

    /// Ein kompletter Klick auf einen Sequenz-Button
    pub fn press_button(&mut self, id: u8) {
        self.now_ms += STEP_MS;
        self.tick(RawInputs::with_button_down(id));
        self.advance(STEP_MS);
    }

    pub fn press_sequence(&mut self, ids: &[u8]) {
        for &id in ids {
            self.press_button(id);
        }
    }

    /// Talk-Button drücken (ohne loszulassen)
    pub fn talk_down(&mut self) {
        self.now_ms += STEP_MS;
        self.tick(RawInputs::with_talk_down());
    }

    /// Talk-Button loslassen
    pub fn talk_up(&mut self) {
        self.advance(STEP_MS);
    }

    /// Talk-Klick, dessen Release genau bei `release_ms` liegt
    pub fn click_talk_at(&mut self, release_ms: u64) {
        let press_ms = release_ms.saturating_sub(STEP_MS);
        self.run_until(press_ms);
        self.now_ms = self.now_ms.max(press_ms);
        self.tick(RawInputs::with_talk_down());
        self.now_ms = release_ms.max(self.now_ms + STEP_MS);
        self.tick(RawInputs::released());
    }

    pub fn link(&self) -> &MockLink {
        self.game.link()
    }

    pub fn link_mut(&mut self) -> &mut MockLink {
        self.game.link_mut()
    }

    /// Farben aller Button-LEDs
    pub fn button_colors(&self) -> Vec<RGB8> {
        (0..puzzle_core::BUTTON_COUNT as u8)
            .filter_map(|id| self.game.button_indicator(id))
            .map(|indicator| indicator.color())
            .collect()
    }
}
