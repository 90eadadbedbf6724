//! Text-Protokoll des Links
//!
//! Ausgehend: ein Tag pro Zeile (`"TALKING\n"`).
//! Eingehend: jeder empfangene Block wird an Zeilenumbrüchen getrennt, jede
//! nicht-leere Zeile ist ein Tag. Ein Block ohne abschließenden Umbruch
//! zählt als eine Zeile (Gegenstellen senden die Tags auch ohne `\n`).

use crate::types::Command;

/// Zeilenende für ausgehende Tags
pub const LINE_END: &[u8] = b"\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Zeile ist kein gültiges UTF-8
    InvalidUtf8,
    /// Unbekanntes Tag
    UnknownTag,
}

/// Zerlegt einen empfangenen Block in Kommandos
///
/// # Beispiele
///
/// ```
/// # use puzzle_core::{Command, decode_chunk};
/// let commands: Vec<_> = decode_chunk(b"TALKING\r\nSTOPPED_TALKING").collect();
/// assert_eq!(commands, [Ok(Command::Talking), Ok(Command::StoppedTalking)]);
/// ```
pub fn decode_chunk(data: &[u8]) -> impl Iterator<Item = Result<Command, DecodeError>> + '_ {
    data.split(|byte| *byte == b'\n' || *byte == b'\r')
        .filter_map(|line| {
            let text = match core::str::from_utf8(line) {
                Ok(text) => text.trim(),
                Err(_) => return Some(Err(DecodeError::InvalidUtf8)),
            };
            if text.is_empty() {
                return None;
            }
            Some(Command::try_from(text).map_err(|_| DecodeError::UnknownTag))
        })
}
