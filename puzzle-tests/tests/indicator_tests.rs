//! Integration Tests für RGB-Anzeigen
//!
//! Digitale und PWM-Kanäle, beide Polaritäten

use puzzle_core::{Indicator, LedError, Polarity, RGB8, RgbIndicator};
use puzzle_tests::{MockIndicator, MockPin, MockPwm};

type TestIndicator = RgbIndicator<MockPin, MockPwm>;

const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};
const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

fn pwm(polarity: Polarity) -> TestIndicator {
    RgbIndicator::pwm(MockPwm::new(), MockPwm::new(), MockPwm::new(), polarity)
}

/// Schreibt `color` und liefert die Pegel der drei Pins
fn pin_levels(polarity: Polarity, color: RGB8) -> (Option<bool>, Option<bool>, Option<bool>) {
    let mut red = MockPin::default();
    let mut green = MockPin::default();
    let mut blue = MockPin::default();
    {
        let mut probe = RgbIndicator::<&mut MockPin, MockPwm>::digital(
            &mut red,
            &mut green,
            &mut blue,
            polarity,
        );
        probe.set_color(color).unwrap();
    }
    (red.high, green.high, blue.high)
}

fn pwm_duties(polarity: Polarity, color: RGB8) -> (Option<u16>, Option<u16>, Option<u16>) {
    let mut red = MockPwm::new();
    let mut green = MockPwm::new();
    let mut blue = MockPwm::new();
    {
        let mut probe =
            RgbIndicator::<MockPin, &mut MockPwm>::pwm(&mut red, &mut green, &mut blue, polarity);
        probe.set_color(color).unwrap();
    }
    (red.duty, green.duty, blue.duty)
}

// ============================================================================
// Tests: digitale Kanäle
// ============================================================================

#[test]
fn test_digital_active_high() {
    assert_eq!(
        pin_levels(Polarity::ActiveHigh, RED),
        (Some(true), Some(false), Some(false))
    );
}

#[test]
fn test_digital_active_low_inverts() {
    assert_eq!(
        pin_levels(Polarity::ActiveLow, RED),
        (Some(false), Some(true), Some(true))
    );
}

#[test]
fn test_digital_any_nonzero_level_is_on() {
    let dim = RGB8 { r: 1, g: 0, b: 200 };
    assert_eq!(
        pin_levels(Polarity::ActiveHigh, dim),
        (Some(true), Some(false), Some(true))
    );
}

#[test]
fn test_digital_write_failure_keeps_color() {
    let mut indicator = RgbIndicator::<MockPin, MockPwm>::digital(
        MockPin::default(),
        MockPin {
            high: None,
            fail: true,
        },
        MockPin::default(),
        Polarity::ActiveHigh,
    );

    assert_eq!(indicator.set_color(WHITE), Err(LedError::WriteFailed));
    assert_eq!(indicator.color(), OFF);
}

// ============================================================================
// Tests: PWM-Kanäle
// ============================================================================

#[test]
fn test_pwm_active_high_full_and_off() {
    assert_eq!(
        pwm_duties(Polarity::ActiveHigh, RED),
        (Some(MockPwm::MAX_DUTY), Some(0), Some(0))
    );
}

#[test]
fn test_pwm_active_low_inverts() {
    assert_eq!(pwm_duties(Polarity::ActiveLow, WHITE), (Some(0), Some(0), Some(0)));
    assert_eq!(
        pwm_duties(Polarity::ActiveLow, OFF),
        (
            Some(MockPwm::MAX_DUTY),
            Some(MockPwm::MAX_DUTY),
            Some(MockPwm::MAX_DUTY)
        )
    );
}

#[test]
fn test_pwm_scales_level_to_duty() {
    let half = RGB8 {
        r: 128,
        g: 51,
        b: 0,
    };
    // 128 * 4095 / 255 = 2055, 51 * 4095 / 255 = 819
    assert_eq!(
        pwm_duties(Polarity::ActiveHigh, half),
        (Some(2055), Some(819), Some(0))
    );
}

#[test]
fn test_pwm_remembers_color() {
    let mut indicator = pwm(Polarity::ActiveLow);
    assert_eq!(indicator.color(), OFF);

    indicator.set_color(RED).unwrap();
    assert_eq!(indicator.color(), RED);
    assert_eq!(indicator.polarity(), Polarity::ActiveLow);
}

// ============================================================================
// Tests: MockIndicator
// ============================================================================

#[test]
fn test_mock_indicator_recovers_after_fail() {
    let mut mock = MockIndicator::default();
    mock.fail_next_write = true;

    assert_eq!(mock.set_color(RED), Err(LedError::WriteFailed));
    assert_eq!(mock.color(), OFF);

    mock.set_color(RED).unwrap();
    assert_eq!(mock.color(), RED);
    assert_eq!(mock.write_count, 1);
}
