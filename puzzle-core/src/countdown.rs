//! Countdown-Animation für den LED-Ring
//!
//! Zustandsautomat über `AnimationMode`:
//! - **Idle:** nichts zu tun (optional Warte-Puls über `pulse()`)
//! - **Counting:** Ring "läuft ab", Pixel für Pixel von aktiv nach abgelaufen
//! - **Flashing:** Ring blinkt in einer Farbe (Sieg/Niederlage)
//!
//! Alle Übergänge werden über die vergangene Zeit gesteuert, `tick()` blockiert nie.

use embassy_time::{Duration, Instant};
use rgb::RGB8;

use crate::config::{DEFAULT_FLASH, FlashPattern, RingConfig};
use crate::logic::{elapsed_pixels, pulse_level, scale_color};
use crate::traits::SmartLedWriter;

/// Zeitlicher Zustand des Countdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub started_at: Option<Instant>,
    pub total: Duration,
    /// Wird genau einmal pro gestartetem Countdown `true`
    pub finished: bool,
}

/// Laufende Blink-Animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashAnimation {
    pub color: RGB8,
    /// An + Aus zählen jeweils als eine Umschaltung
    pub target_toggles: u32,
    pub toggle_count: u32,
    pub last_toggle: Instant,
    pub interval: Duration,
    pub lit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Idle,
    Counting,
    Flashing(FlashAnimation),
}

/// Besitzt den Ring-Writer und die komplette Ring-Zeitleiste
pub struct CountdownAnimator<W, const PIXELS: usize> {
    ring: W,
    pixels: [RGB8; PIXELS],
    config: RingConfig,
    state: CountdownState,
    mode: AnimationMode,
}

impl<W: SmartLedWriter, const PIXELS: usize> CountdownAnimator<W, PIXELS> {
    /// Erstellt den Animator und schaltet den Ring aus
    pub fn new(ring: W, total: Duration, config: RingConfig) -> Self {
        let mut animator = Self {
            ring,
            pixels: [config.off_color; PIXELS],
            config,
            state: CountdownState {
                started_at: None,
                total,
                finished: false,
            },
            mode: AnimationMode::Idle,
        };
        animator.clear();
        animator
    }

    /// Startet den Countdown, alle Pixel in der aktiven Farbe
    pub fn start(&mut self, now: Instant) {
        self.state.started_at = Some(now);
        self.state.finished = false;
        self.mode = AnimationMode::Counting;
        self.fill(self.config.active_color);
        self.show();
    }

    /// Zurück nach Idle, Ring aus
    pub fn clear(&mut self) {
        self.state.started_at = None;
        self.state.finished = false;
        self.mode = AnimationMode::Idle;
        self.fill(self.config.off_color);
        self.show();
    }

    /// Ein Animations-Schritt
    pub fn tick(&mut self, now: Instant) {
        match self.mode {
            AnimationMode::Flashing(flash) => self.tick_flash(flash, now),
            AnimationMode::Counting => self.tick_countdown(now),
            AnimationMode::Idle => {}
        }
    }

    fn tick_flash(&mut self, mut flash: FlashAnimation, now: Instant) {
        let toggled = now.saturating_duration_since(flash.last_toggle) >= flash.interval;
        if toggled {
            flash.last_toggle = now;
            flash.lit = !flash.lit;
            flash.toggle_count += 1;
        }
        self.mode = AnimationMode::Flashing(flash);

        if toggled {
            let color = if flash.lit {
                flash.color
            } else {
                self.config.off_color
            };
            self.fill(color);
            self.show();
        }

        if flash.toggle_count >= flash.target_toggles {
            debug!("Ring: flash finished after {} toggles", flash.toggle_count);
            self.clear();
        }
    }

    fn tick_countdown(&mut self, now: Instant) {
        let pixels_off = self.pixels_off(now);

        for (index, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = if index < pixels_off {
                self.config.elapsed_color
            } else {
                self.config.active_color
            };
        }
        self.show();

        if pixels_off == PIXELS {
            info!("Ring: countdown finished");
            self.state.finished = true;
            self.game_lost(now);
        }
    }

    /// Sieg: Ring blinkt grün
    pub fn game_won(&mut self, now: Instant) {
        self.start_flashing(self.config.won_color, self.config.won_flash, now);
    }

    /// Niederlage: Ring blinkt rot
    pub fn game_lost(&mut self, now: Instant) {
        self.start_flashing(self.config.lost_color, self.config.lost_flash, now);
    }

    /// Startet eine Blink-Animation (unterbricht den Countdown)
    pub fn start_flashing(&mut self, color: RGB8, pattern: FlashPattern, now: Instant) {
        self.mode = AnimationMode::Flashing(FlashAnimation {
            color,
            target_toggles: pattern.flashes.saturating_mul(2),
            toggle_count: 0,
            last_toggle: now,
            interval: pattern.interval(),
            lit: true,
        });
        self.fill(color);
        self.show();
    }

    /// Blink-Animation mit Standard-Muster (50 Blinker, 5 Hz)
    pub fn flash(&mut self, color: RGB8, now: Instant) {
        self.start_flashing(color, DEFAULT_FLASH, now);
    }

    /// Warte-Animation: alle Pixel pulsieren in `color`
    ///
    /// Nur erlaubt solange kein Countdown läuft und nicht geblinkt wird.
    /// Gibt `false` zurück wenn der Aufruf ignoriert wurde.
    pub fn pulse(&mut self, color: RGB8, speed: f32, now: Instant) -> bool {
        if self.state.started_at.is_some() || self.mode != AnimationMode::Idle {
            return false;
        }

        self.fill(scale_color(color, pulse_level(now, speed)));
        self.show();
        true
    }

    /// Anzahl abgelaufener Pixel zum Zeitpunkt `now`
    pub fn pixels_off(&self, now: Instant) -> usize {
        match self.state.started_at {
            Some(started_at) => elapsed_pixels(
                now.saturating_duration_since(started_at),
                self.state.total,
                PIXELS,
            ),
            None => 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    pub fn mode(&self) -> &AnimationMode {
        &self.mode
    }

    /// Logische Pixel-Farben (ohne Helligkeits-Skalierung)
    pub fn pixels(&self) -> &[RGB8; PIXELS] {
        &self.pixels
    }

    pub fn ring(&self) -> &W {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut W {
        &mut self.ring
    }

    fn fill(&mut self, color: RGB8) {
        self.pixels = [color; PIXELS];
    }

    /// Schreibt den aktuellen Frame mit globaler Helligkeit
    fn show(&mut self) {
        let brightness = self.config.brightness;
        let frame = self.pixels.map(|pixel| scale_color(pixel, brightness));

        if let Err(e) = self.ring.write(&frame) {
            warn!("Ring: write failed: {}", e);
        }
    }
}
