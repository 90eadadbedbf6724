//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::f32::consts::PI;

use embassy_time::{Duration, Instant};
use rgb::RGB8;

/// Skaliert eine Farbe linear mit `level` (0 = aus, 255 = unverändert)
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use puzzle_core::scale_color;
/// let color = scale_color(RGB8 { r: 255, g: 100, b: 0 }, 128);
/// assert_eq!(color, RGB8 { r: 128, g: 50, b: 0 });
/// ```
pub fn scale_color(color: RGB8, level: u8) -> RGB8 {
    let scale = |c: u8| ((u16::from(c) * u16::from(level) + 127) / 255) as u8;
    RGB8 {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

/// Helligkeit der Warte-Animation: `(sin(t · speed · π) + 1) / 2`, skaliert auf 0..=255
///
/// `t` wird auf eine Periode (`2 / speed` Sekunden) reduziert, damit die
/// f32-Genauigkeit auch nach langer Uptime reicht.
/// Ungültige Geschwindigkeiten (≤ 0, NaN) liefern volle Helligkeit.
pub fn pulse_level(now: Instant, speed: f32) -> u8 {
    if !speed.is_finite() || speed <= 0.0 {
        return u8::MAX;
    }

    let period_ms = (2000.0 / speed) as u64;
    let t_ms = if period_ms == 0 {
        0
    } else {
        now.as_millis() % period_ms
    };
    let t = t_ms as f32 / 1000.0;

    let brightness = (libm::sinf(t * speed * PI) + 1.0) / 2.0;
    (brightness.clamp(0.0, 1.0) * 255.0) as u8
}

/// Anzahl abgelaufener Pixel: `floor(elapsed / total × count)`, begrenzt auf `count`
///
/// Reine Integer-Arithmetik, dadurch monoton in `elapsed`.
/// `total == 0` gilt als sofort abgelaufen.
pub fn elapsed_pixels(elapsed: Duration, total: Duration, count: usize) -> usize {
    let total_ticks = total.as_ticks();
    if total_ticks == 0 {
        return count;
    }

    let pixels = elapsed.as_ticks().saturating_mul(count as u64) / total_ticks;
    pixels.min(count as u64) as usize
}

/// Blink-Phase der Button-Rückmeldung
///
/// `true` in der ersten Hälfte jeder Periode (`2 × half_period`).
pub fn flash_lit(elapsed: Duration, half_period: Duration) -> bool {
    let half_ms = half_period.as_millis();
    if half_ms == 0 {
        return true;
    }
    (elapsed.as_millis() / half_ms) % 2 == 0
}

/// Prescaler eines PCA9685 für die gewünschte PWM-Frequenz
///
/// `round(oscillator_hz / (4096 × pwm_hz)) - 1`, begrenzt auf 3..=255.
/// `pwm_hz == 0` zählt wie 1 Hz.
pub const fn pca9685_prescale(oscillator_hz: u32, pwm_hz: u32) -> u8 {
    let hz = if pwm_hz == 0 { 1 } else { pwm_hz };
    let divisor = 4096u32.saturating_mul(hz);
    let rounded = (oscillator_hz + divisor / 2) / divisor;
    let value = rounded.saturating_sub(1);
    if value < 3 {
        3
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// PWM-Kanäle (rot, grün, blau) eines Sequenz-Buttons
///
/// Button `i` belegt die Kanäle `3i..3i+3` in der Reihenfolge G, B, R.
pub const fn button_pwm_channels(button: usize) -> (u8, u8, u8) {
    let base = (button * 3) as u8;
    (base + 2, base, base + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_color_full_and_off() {
        let color = RGB8 { r: 10, g: 200, b: 255 };
        assert_eq!(scale_color(color, 255), color);
        assert_eq!(scale_color(color, 0), RGB8 { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_pulse_level_sine_points() {
        // t = 0 → sin(0) = 0 → halbe Helligkeit
        assert_eq!(pulse_level(Instant::from_millis(0), 1.0), 127);
        // t = 0.5 s → sin(π/2) = 1 → voll
        assert!(pulse_level(Instant::from_millis(500), 1.0) >= 254);
        // t = 1.5 s → sin(3π/2) = -1 → aus
        assert!(pulse_level(Instant::from_millis(1500), 1.0) <= 1);
    }

    #[test]
    fn test_pulse_level_periodic() {
        let a = pulse_level(Instant::from_millis(250), 1.0);
        let b = pulse_level(Instant::from_millis(2250), 1.0);
        let c = pulse_level(Instant::from_millis(1_000_250), 1.0);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_pulse_level_invalid_speed() {
        assert_eq!(pulse_level(Instant::from_millis(1234), 0.0), 255);
        assert_eq!(pulse_level(Instant::from_millis(1234), -1.0), 255);
        assert_eq!(pulse_level(Instant::from_millis(1234), f32::NAN), 255);
    }

    #[test]
    fn test_elapsed_pixels_floor_and_clamp() {
        let total = Duration::from_secs(12);
        assert_eq!(elapsed_pixels(Duration::from_millis(0), total, 12), 0);
        assert_eq!(elapsed_pixels(Duration::from_millis(999), total, 12), 0);
        assert_eq!(elapsed_pixels(Duration::from_millis(1000), total, 12), 1);
        assert_eq!(elapsed_pixels(Duration::from_millis(11_999), total, 12), 11);
        assert_eq!(elapsed_pixels(Duration::from_secs(12), total, 12), 12);
        assert_eq!(elapsed_pixels(Duration::from_secs(60), total, 12), 12);
    }

    #[test]
    fn test_elapsed_pixels_zero_total() {
        assert_eq!(elapsed_pixels(Duration::from_millis(0), Duration::from_millis(0), 12), 12);
    }

    #[test]
    fn test_flash_lit_half_periods() {
        let half = Duration::from_millis(500);
        assert!(flash_lit(Duration::from_millis(0), half));
        assert!(flash_lit(Duration::from_millis(499), half));
        assert!(!flash_lit(Duration::from_millis(500), half));
        assert!(!flash_lit(Duration::from_millis(999), half));
        assert!(flash_lit(Duration::from_millis(1000), half));
    }

    #[test]
    fn test_pca9685_prescale_common_frequencies() {
        const OSC: u32 = 25_000_000;
        assert_eq!(pca9685_prescale(OSC, 1000), 5);
        assert_eq!(pca9685_prescale(OSC, 200), 30);
        assert_eq!(pca9685_prescale(OSC, 50), 121);
    }

    #[test]
    fn test_pca9685_prescale_clamped() {
        const OSC: u32 = 25_000_000;
        assert_eq!(pca9685_prescale(OSC, 10_000), 3);
        assert_eq!(pca9685_prescale(OSC, 1), 255);
        assert_eq!(pca9685_prescale(OSC, 0), 255);
    }

    #[test]
    fn test_button_pwm_channels_layout() {
        assert_eq!(button_pwm_channels(0), (2, 0, 1));
        assert_eq!(button_pwm_channels(1), (5, 3, 4));
        assert_eq!(button_pwm_channels(8), (26, 24, 25));
    }

    #[test]
    fn test_button_pwm_channels_distinct() {
        let mut used = [false; 32];
        for button in 0..crate::types::BUTTON_COUNT {
            let (r, g, b) = button_pwm_channels(button);
            for channel in [r, g, b] {
                assert!(!used[usize::from(channel)], "channel {} used twice", channel);
                used[usize::from(channel)] = true;
            }
        }
    }
}
