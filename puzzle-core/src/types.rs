//! Core Types für das Puzzle
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Anzahl der Sequenz-Buttons (ohne Talk-Button)
pub const BUTTON_COUNT: usize = 9;

/// Index eines Sequenz-Buttons (`0..BUTTON_COUNT`)
pub type ButtonId = u8;

/// Link-Kommando zwischen den beiden gekoppelten Geräten
///
/// Auf der Leitung als Text übertragen (z.B. `"START_GAME"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Command {
    /// Countdown und Eingabe sind jetzt aktiv
    StartGame,
    /// Kompletter Reset
    ResetGame,
    /// Countdown abgelaufen
    GameOver,
    /// Richtige Sequenz eingegeben
    GameWon,
    /// Talk-Button gedrückt
    Talking,
    /// Talk-Button losgelassen
    StoppedTalking,
}

impl Command {
    /// Text-Tag für die Leitung
    pub const fn as_str(self) -> &'static str {
        match self {
            Command::StartGame => "START_GAME",
            Command::ResetGame => "RESET_GAME",
            Command::GameOver => "GAME_OVER",
            Command::GameWon => "GAME_WON",
            Command::Talking => "TALKING",
            Command::StoppedTalking => "STOPPED_TALKING",
        }
    }
}

impl core::convert::TryFrom<&str> for Command {
    type Error = ();

    /// Parst ein Tag; Whitespace und Zeilenumbrüche am Rand werden ignoriert
    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        match tag.trim() {
            "START_GAME" => Ok(Command::StartGame),
            "RESET_GAME" => Ok(Command::ResetGame),
            "GAME_OVER" => Ok(Command::GameOver),
            "GAME_WON" => Ok(Command::GameWon),
            "TALKING" => Ok(Command::Talking),
            "STOPPED_TALKING" => Ok(Command::StoppedTalking),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rohe Pin-Pegel eines Ticks
///
/// `true` = losgelassen (Pull-Up, idle high), `false` = gedrückt (active low).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputs {
    pub talk: bool,
    pub buttons: [bool; BUTTON_COUNT],
}

impl RawInputs {
    /// Alle Buttons losgelassen
    pub const fn released() -> Self {
        Self {
            talk: true,
            buttons: [true; BUTTON_COUNT],
        }
    }

    /// Wie `released()`, aber mit einem gedrückten Sequenz-Button
    pub fn with_button_down(id: ButtonId) -> Self {
        let mut inputs = Self::released();
        if let Some(level) = inputs.buttons.get_mut(usize::from(id)) {
            *level = false;
        }
        inputs
    }

    /// Wie `released()`, aber mit gedrücktem Talk-Button
    pub const fn with_talk_down() -> Self {
        let mut inputs = Self::released();
        inputs.talk = false;
        inputs
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        Self::released()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_roundtrip_all_tags() {
        for cmd in [
            Command::StartGame,
            Command::ResetGame,
            Command::GameOver,
            Command::GameWon,
            Command::Talking,
            Command::StoppedTalking,
        ] {
            assert_eq!(Command::try_from(cmd.as_str()), Ok(cmd));
        }
    }

    #[test]
    fn test_command_trims_whitespace() {
        assert_eq!(Command::try_from("  TALKING\r\n"), Ok(Command::Talking));
    }

    #[test]
    fn test_command_rejects_unknown() {
        assert_eq!(Command::try_from("talking"), Err(()));
        assert_eq!(Command::try_from(""), Err(()));
    }

    #[test]
    fn test_raw_inputs_button_down() {
        let inputs = RawInputs::with_button_down(4);
        assert!(inputs.talk);
        assert!(!inputs.buttons[4]);
        assert_eq!(inputs.buttons.iter().filter(|level| !**level).count(), 1);
    }
}
