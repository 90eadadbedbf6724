//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

use crate::types::Command;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Trait für SmartLED Hardware-Zugriff (LED-Ring)
///
/// Abstrahiert den Zugriff auf einen Strang RGB LEDs (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockRing (in-memory Mock)
pub trait SmartLedWriter {
    /// Schreibt einen kompletten Frame (ein Eintrag pro Pixel)
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError>;
}

/// Eine einzelne RGB-Anzeige (Button-LED, Talk-LED)
///
/// Zustandslos bis auf die aktuell angezeigte Farbe.
pub trait Indicator {
    /// Setzt die Farbe
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError>;

    /// Zuletzt erfolgreich gesetzte Farbe
    fn color(&self) -> RGB8;
}

/// Fehler-Typ für Link-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Kein Peer verbunden
    NotConnected,
    /// Sende-Queue voll, Kommando verworfen
    QueueFull,
    /// Transport-Fehler (Socket)
    Transport,
}

/// Nicht-blockierender Signal-Kanal zum gekoppelten Gerät
///
/// Keine der Methoden darf blockieren: `poll()` liefert `None` wenn
/// nichts anliegt, `send_command()` schlägt lieber fehl als zu warten.
///
/// # Implementierungen
/// - **Production:** ChannelLink (embassy Channels → TCP Task)
/// - **Testing:** MockLink
pub trait Link {
    /// Sendet ein Kommando an den Peer (best effort)
    fn send_command(&mut self, command: Command) -> Result<(), LinkError>;

    /// Holt höchstens ein empfangenes Kommando ab
    fn poll(&mut self) -> Option<Command>;

    /// `true` sobald ein Peer akzeptiert wurde
    fn is_connected(&self) -> bool;
}
