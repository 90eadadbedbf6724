//! Farb-Konstanten
//!
//! Kanonische Farbdarstellung im ganzen Projekt ist `RGB8` (0 = aus, 255 = voll).
//! Umrechnung in Geräte-Einheiten (PWM Duty-Cycle, Pegel) passiert erst
//! an der Indicator-Grenze (siehe `indicator.rs`).

use rgb::RGB8;

pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};
