//! Talk-Button Sitzung: Klick-Gesten und Sprech-Status

use embassy_time::{Duration, Instant};

/// Zustand des Talk-Buttons und des Peers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TalkSession {
    /// Abgeschlossene Klicks im aktuellen Burst
    pub press_count: u32,
    /// Zeitpunkt des ersten Klicks im aktuellen Burst
    pub window_start: Option<Instant>,
    /// Lokaler Talk-Button gedrückt
    pub is_pressed: bool,
    /// Peer hat `TALKING` gemeldet
    pub peer_talking: bool,
}

impl TalkSession {
    pub const fn new() -> Self {
        Self {
            press_count: 0,
            window_start: None,
            is_pressed: false,
            peer_talking: false,
        }
    }

    /// Zählt einen abgeschlossenen Klick (Release) in den Burst
    ///
    /// Liegt der Burst-Start weiter als `window` zurück, beginnt ein neuer
    /// Burst mit Zähler 1. Gibt den neuen Zählerstand zurück.
    pub fn record_release(&mut self, now: Instant, window: Duration) -> u32 {
        match self.window_start {
            Some(start) if now.saturating_duration_since(start) <= window => {
                self.press_count += 1;
            }
            _ => {
                self.press_count = 1;
                self.window_start = Some(now);
            }
        }
        self.press_count
    }

    /// Burst-Zähler zurücksetzen (Sprech-Status bleibt erhalten)
    pub fn reset_burst(&mut self) {
        self.press_count = 0;
        self.window_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(3000);

    #[test]
    fn test_burst_accumulates_within_window() {
        let mut session = TalkSession::new();
        assert_eq!(session.record_release(Instant::from_millis(100), WINDOW), 1);
        assert_eq!(session.record_release(Instant::from_millis(500), WINDOW), 2);
        assert_eq!(session.record_release(Instant::from_millis(3100), WINDOW), 3);
    }

    #[test]
    fn test_burst_restarts_outside_window() {
        let mut session = TalkSession::new();
        session.record_release(Instant::from_millis(100), WINDOW);
        session.record_release(Instant::from_millis(500), WINDOW);
        assert_eq!(session.record_release(Instant::from_millis(4000), WINDOW), 1);
        assert_eq!(session.window_start, Some(Instant::from_millis(4000)));
    }

    #[test]
    fn test_reset_burst_keeps_talk_flags() {
        let mut session = TalkSession::new();
        session.is_pressed = true;
        session.peer_talking = true;
        session.record_release(Instant::from_millis(0), WINDOW);
        session.reset_burst();
        assert_eq!(session.press_count, 0);
        assert_eq!(session.window_start, None);
        assert!(session.is_pressed);
        assert!(session.peer_talking);
    }
}
