//! Entprellung und Flanken-Erkennung für Taster
//!
//! Taster sind mit Pull-Up verdrahtet: `true` = losgelassen, `false` = gedrückt.

use embassy_time::{Duration, Instant};

use crate::config::DEBOUNCE_INTERVAL;

/// Ergebnis eines `poll()` Aufrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeEvent {
    None,
    /// Übergang high → low
    Pressed,
    /// Übergang low → high
    Released,
}

/// Flanken-Erkennung für einen Taster (nicht-blockierend)
///
/// Jede Pegeländerung wird genau einmal gemeldet. Änderungen innerhalb von
/// `debounce` nach der letzten gemeldeten Flanke gelten als Prellen: der alte
/// Pegel bleibt gültig, und hält der neue Pegel an, wird die Flanke beim ersten
/// `poll()` nach Ablauf des Intervalls gemeldet.
#[derive(Debug, Clone, Copy)]
pub struct InputDebouncer {
    previous_raw_level: bool,
    held: bool,
    last_edge: Option<Instant>,
    debounce: Duration,
}

impl InputDebouncer {
    /// Erstellt einen Debouncer im Zustand "losgelassen"
    ///
    /// `Duration::from_ticks(0)` schaltet die Entprellung ab.
    pub const fn new(debounce: Duration) -> Self {
        Self {
            previous_raw_level: true,
            held: false,
            last_edge: None,
            debounce,
        }
    }

    /// Verarbeitet eine Abtastung und liefert die erkannte Flanke
    pub fn poll(&mut self, raw_level: bool, now: Instant) -> EdgeEvent {
        let bouncing = self
            .last_edge
            .is_some_and(|last| now.saturating_duration_since(last) < self.debounce);

        let edge = if raw_level == self.previous_raw_level || bouncing {
            EdgeEvent::None
        } else {
            self.previous_raw_level = raw_level;
            self.last_edge = Some(now);
            if raw_level {
                EdgeEvent::Released
            } else {
                EdgeEvent::Pressed
            }
        };

        // Bei jedem Aufruf neu berechnet, nie veraltet
        self.held = !self.previous_raw_level;
        edge
    }

    /// `true` zwischen `Pressed` und dem folgenden `Released`
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Zuletzt akzeptierter Pegel
    pub fn level(&self) -> bool {
        self.previous_raw_level
    }
}

impl Default for InputDebouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    #[test]
    fn test_press_and_release_once() {
        let mut button = InputDebouncer::new(Duration::from_ticks(0));
        assert_eq!(button.poll(true, ms(0)), EdgeEvent::None);
        assert_eq!(button.poll(false, ms(10)), EdgeEvent::Pressed);
        assert!(button.is_held());
        assert_eq!(button.poll(false, ms(20)), EdgeEvent::None);
        assert!(button.is_held());
        assert_eq!(button.poll(true, ms(30)), EdgeEvent::Released);
        assert!(!button.is_held());
        assert_eq!(button.poll(true, ms(40)), EdgeEvent::None);
    }

    #[test]
    fn test_bounce_is_suppressed() {
        let mut button = InputDebouncer::new(Duration::from_millis(20));
        assert_eq!(button.poll(false, ms(100)), EdgeEvent::Pressed);
        // Kontakt prellt kurz wieder auf high
        assert_eq!(button.poll(true, ms(105)), EdgeEvent::None);
        assert_eq!(button.poll(false, ms(110)), EdgeEvent::None);
        assert!(button.is_held());
        assert_eq!(button.poll(true, ms(200)), EdgeEvent::Released);
    }

    #[test]
    fn test_persistent_change_reported_after_interval() {
        let mut button = InputDebouncer::new(Duration::from_millis(20));
        assert_eq!(button.poll(false, ms(0)), EdgeEvent::Pressed);
        assert_eq!(button.poll(true, ms(10)), EdgeEvent::None);
        assert_eq!(button.poll(true, ms(20)), EdgeEvent::Released);
    }
}
