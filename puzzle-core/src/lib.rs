//! Puzzle Core - Platform-agnostic Spiel-Logik, Animationen und Traits
//!
//! Diese Crate enthält KEINE ESP32-Dependencies.
//! Hardware wird ausschließlich über Traits angesprochen
//! (`SmartLedWriter`, `Indicator`, `Link`, embedded-hal Pins),
//! dadurch läuft die komplette Spiel-Logik auch auf dem Host (Tests).
//!
//! Ablauf pro Tick (fester Ablauf, nicht-blockierend):
//! Link poll → Countdown tick → Input poll → Zustandswechsel → LEDs malen

#![no_std]

#[macro_use]
mod fmt;

pub mod color;
pub mod config;
pub mod countdown;
pub mod debounce;
pub mod game;
pub mod indicator;
pub mod logic;
pub mod protocol;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{ConfigError, FlashPattern, GameConfig, RingConfig};
pub use countdown::{AnimationMode, CountdownAnimator, CountdownState, FlashAnimation};
pub use debounce::{EdgeEvent, InputDebouncer};
pub use game::{
    FlashTimer, GameController, GamePhase, GestureAction, Outcome, PendingAction, SequenceBuffer,
    TalkSession,
};
pub use indicator::{IndicatorChannel, Polarity, RgbIndicator};
pub use logic::{
    button_pwm_channels, elapsed_pixels, flash_lit, pca9685_prescale, pulse_level, scale_color,
};
pub use protocol::{DecodeError, LINE_END, decode_chunk};
pub use traits::{Indicator, LedError, Link, LinkError, SmartLedWriter};
pub use types::{BUTTON_COUNT, ButtonId, Command, RawInputs};

pub use embassy_time::{Duration, Instant};
pub use rgb::RGB8;
