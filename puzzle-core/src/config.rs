// Spiel-Konfiguration: Konstanten und Default-Werte
//
// Alle Zeiten und Schwellwerte des Puzzles sind hier gesammelt.
// Hardware-spezifische Werte (Pins, Adressen, WiFi) liegen in
// puzzle-firmware/src/config.rs.

use embassy_time::Duration;
use heapless::Vec;
use rgb::RGB8;

use crate::color::{BLUE, GREEN, OFF, RED};
use crate::types::{BUTTON_COUNT, ButtonId};

// ============================================================================
// Talk-Button Gesten
// ============================================================================

/// Zeitfenster, in dem mehrere Talk-Button Klicks als eine Geste zählen
pub const TALK_PRESS_TIME_WINDOW: Duration = Duration::from_millis(3000);

/// Klicks innerhalb des Fensters, um ein laufendes Spiel zurückzusetzen
pub const RESET_PRESS_THRESHOLD: u32 = 8;

/// Klicks innerhalb des Fensters, um das Spiel zu starten
pub const START_PRESS_THRESHOLD: u32 = 3;

/// Wartezeit zwischen erkannter Geste und Start/Reset
/// Verhindert, dass die Geste sofort erneut auslöst
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

// ============================================================================
// Spielablauf
// ============================================================================

/// Gesamtdauer des Countdowns
pub const TOTAL_TIME: Duration = Duration::from_secs(300);

/// Maximale Blinkdauer der Buttons nach Sieg/Niederlage
pub const MAX_FLASH_TIME_WINLOSE: Duration = Duration::from_secs(10);

/// Maximale Blinkdauer der Buttons nach falscher Sequenz
pub const MAX_FLASH_TIME_NORMAL: Duration = Duration::from_secs(5);

/// Halbe Blink-Periode der Button-LEDs (an 0.5 s, aus 0.5 s)
pub const BUTTON_FLASH_HALF_PERIOD: Duration = Duration::from_millis(500);

/// Richtige Reihenfolge der Button-Indizes
pub const CORRECT_ORDER: [ButtonId; BUTTON_COUNT] = [6, 5, 4, 7, 0, 8, 2, 1, 3];

/// Entprell-Intervall für mechanische Taster
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(20);

// ============================================================================
// LED-Ring
// ============================================================================

/// Globale Ring-Helligkeit (0-255)
/// 26 ≈ 10 % - gedimmt für Augenschonung
pub const RING_BRIGHTNESS: u8 = 26;

/// Blink-Muster bei Sieg/Niederlage
pub const RESULT_FLASH: FlashPattern = FlashPattern {
    flashes: 30,
    speed_hz: 4,
};

/// Standard Blink-Muster für `CountdownAnimator::start_flashing`
pub const DEFAULT_FLASH: FlashPattern = FlashPattern {
    flashes: 50,
    speed_hz: 5,
};

/// Farbe der Warte-Animation (kein Peer verbunden)
pub const WAITING_PULSE_COLOR: RGB8 = BLUE;

/// Geschwindigkeit der Warte-Animation
pub const WAITING_PULSE_SPEED: f32 = 1.0;

/// Blink-Muster: Anzahl Blinker (an + aus = 1) und Frequenz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashPattern {
    pub flashes: u32,
    pub speed_hz: u32,
}

impl FlashPattern {
    /// Zeit zwischen zwei Umschaltungen (`1 / speed_hz`)
    pub fn interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed_hz.max(1)))
    }
}

/// Farben und Blink-Muster des LED-Rings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    /// Farbe der noch verbleibenden Zeit
    pub active_color: RGB8,
    /// Farbe der abgelaufenen Zeit
    pub elapsed_color: RGB8,
    pub off_color: RGB8,
    pub won_color: RGB8,
    pub lost_color: RGB8,
    pub won_flash: FlashPattern,
    pub lost_flash: FlashPattern,
    /// Globale Helligkeit, wird beim Schreiben angewendet
    pub brightness: u8,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            active_color: GREEN,
            elapsed_color: RED,
            off_color: OFF,
            won_color: GREEN,
            lost_color: RED,
            won_flash: RESULT_FLASH,
            lost_flash: RESULT_FLASH,
            brightness: RING_BRIGHTNESS,
        }
    }
}

/// Fehler bei ungültiger Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Ziel-Sequenz ist leer
    EmptyTarget,
    /// Ziel-Sequenz länger als `BUTTON_COUNT`
    TargetTooLong,
    /// Button-Index außerhalb `0..BUTTON_COUNT`
    ButtonOutOfRange(ButtonId),
    /// Button kommt mehrfach vor (wäre nie lösbar, Wiederholungen werden ignoriert)
    DuplicateButton(ButtonId),
}

/// Komplette Spiel-Konfiguration
///
/// `Default` liefert die Werte des ausgelieferten Puzzles.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub talk_window: Duration,
    pub reset_presses: u32,
    pub start_presses: u32,
    pub settle_delay: Duration,
    pub countdown: Duration,
    pub long_flash: Duration,
    pub short_flash: Duration,
    pub button_flash_half_period: Duration,
    pub debounce: Duration,
    pub target: Vec<ButtonId, BUTTON_COUNT>,
    pub ring: RingConfig,
    pub pulse_color: RGB8,
    pub pulse_speed: f32,
}

impl GameConfig {
    /// Ersetzt die Ziel-Sequenz und prüft sie
    pub fn with_target(mut self, target: &[ButtonId]) -> Result<Self, ConfigError> {
        self.target = Vec::from_slice(target).map_err(|_| ConfigError::TargetTooLong)?;
        self.validate()?;
        Ok(self)
    }

    /// Prüft die Ziel-Sequenz
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }

        for (index, &id) in self.target.iter().enumerate() {
            if usize::from(id) >= BUTTON_COUNT {
                return Err(ConfigError::ButtonOutOfRange(id));
            }
            if self.target[..index].contains(&id) {
                return Err(ConfigError::DuplicateButton(id));
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut target = Vec::new();
        for id in CORRECT_ORDER {
            // Kapazität == BUTTON_COUNT == CORRECT_ORDER.len()
            let _ = target.push(id);
        }

        Self {
            talk_window: TALK_PRESS_TIME_WINDOW,
            reset_presses: RESET_PRESS_THRESHOLD,
            start_presses: START_PRESS_THRESHOLD,
            settle_delay: SETTLE_DELAY,
            countdown: TOTAL_TIME,
            long_flash: MAX_FLASH_TIME_WINLOSE,
            short_flash: MAX_FLASH_TIME_NORMAL,
            button_flash_half_period: BUTTON_FLASH_HALF_PERIOD,
            debounce: DEBOUNCE_INTERVAL,
            target,
            ring: RingConfig::default(),
            pulse_color: WAITING_PULSE_COLOR,
            pulse_speed: WAITING_PULSE_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.target.as_slice(), &CORRECT_ORDER);
    }

    #[test]
    fn test_with_target_rejects_invalid() {
        assert_eq!(
            GameConfig::default().with_target(&[]).err(),
            Some(ConfigError::EmptyTarget)
        );
        assert_eq!(
            GameConfig::default().with_target(&[0, 9]).err(),
            Some(ConfigError::ButtonOutOfRange(9))
        );
        assert_eq!(
            GameConfig::default().with_target(&[1, 2, 1]).err(),
            Some(ConfigError::DuplicateButton(1))
        );
        assert_eq!(
            GameConfig::default()
                .with_target(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 0])
                .err(),
            Some(ConfigError::TargetTooLong)
        );
    }

    #[test]
    fn test_with_target_accepts_short_sequence() {
        let config = GameConfig::default().with_target(&[2, 0]).unwrap();
        assert_eq!(config.target.as_slice(), &[2, 0]);
    }

    #[test]
    fn test_flash_pattern_interval() {
        assert_eq!(RESULT_FLASH.interval(), Duration::from_millis(250));
        assert_eq!(DEFAULT_FLASH.interval(), Duration::from_millis(200));
        let zero = FlashPattern {
            flashes: 1,
            speed_hz: 0,
        };
        assert_eq!(zero.interval(), Duration::from_millis(1000));
    }
}
