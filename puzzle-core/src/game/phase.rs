//! Spielphasen und Blink-Timer der Button-LEDs

use embassy_time::{Duration, Instant};
use rgb::RGB8;

/// Ausgang einer Blink-Phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Won,
    Lost,
    WrongSequence,
}

/// Genau eine Phase ist aktiv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Kein Spiel, wartet auf Start-Geste
    Idle,
    /// Countdown läuft, Sequenz-Eingabe aktiv
    Running,
    /// Buttons blinken als Rückmeldung
    Flashing(Outcome),
    /// Reset-Geste erkannt, Reset folgt nach der Wartezeit
    Over,
}

/// Existiert nur während `GamePhase::Flashing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTimer {
    pub started_at: Instant,
    pub budget: Duration,
    pub color: RGB8,
}

impl FlashTimer {
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.budget
    }
}
