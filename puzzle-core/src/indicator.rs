//! RGB-Anzeigen über embedded-hal Kanäle
//!
//! Eine RGB LED besteht aus drei Kanälen. Jeder Kanal ist entweder ein
//! digitaler Pin (an/aus) oder ein PWM-Kanal (Helligkeit). Die Variante wird
//! beim Erstellen festgelegt, nicht pro Aufruf.
//!
//! Farbwerte kommen immer als `RGB8` (0-255) an und werden erst hier in
//! Geräte-Einheiten umgerechnet:
//! - **Digital:** an bei Wert != 0
//! - **PWM:** `wert / 255` des maximalen Duty-Cycles
//! - **ActiveLow** (gemeinsame Anode) invertiert vorher den Wert

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use rgb::RGB8;

use crate::color::OFF;
use crate::traits::{Indicator, LedError};

/// Verdrahtung der LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Gemeinsame Kathode: high/Duty = an
    ActiveHigh,
    /// Gemeinsame Anode: low/0 % Duty = an
    ActiveLow,
}

impl Polarity {
    /// Wandelt einen logischen Helligkeitswert in den Ausgangswert um
    pub const fn apply(self, level: u8) -> u8 {
        match self {
            Polarity::ActiveHigh => level,
            Polarity::ActiveLow => u8::MAX - level,
        }
    }
}

/// Ein Farbkanal einer RGB LED
pub enum IndicatorChannel<D, P> {
    Digital(D),
    Pwm(P),
}

impl<D: OutputPin, P: SetDutyCycle> IndicatorChannel<D, P> {
    /// Setzt den Kanal auf `level` (0 = aus, 255 = voll)
    pub fn set_level(&mut self, level: u8, polarity: Polarity) -> Result<(), LedError> {
        match self {
            IndicatorChannel::Digital(pin) => {
                let on = level != 0;
                let high = match polarity {
                    Polarity::ActiveHigh => on,
                    Polarity::ActiveLow => !on,
                };
                pin.set_state(PinState::from(high))
                    .map_err(|_| LedError::WriteFailed)
            }
            IndicatorChannel::Pwm(channel) => channel
                .set_duty_cycle_fraction(u16::from(polarity.apply(level)), u16::from(u8::MAX))
                .map_err(|_| LedError::WriteFailed),
        }
    }
}

/// RGB LED aus drei Kanälen
pub struct RgbIndicator<D, P> {
    red: IndicatorChannel<D, P>,
    green: IndicatorChannel<D, P>,
    blue: IndicatorChannel<D, P>,
    polarity: Polarity,
    current: RGB8,
}

impl<D: OutputPin, P: SetDutyCycle> RgbIndicator<D, P> {
    /// Erstellt eine RGB LED aus beliebigen Kanälen
    ///
    /// Schreibt noch nichts auf die Hardware.
    pub fn new(
        red: IndicatorChannel<D, P>,
        green: IndicatorChannel<D, P>,
        blue: IndicatorChannel<D, P>,
        polarity: Polarity,
    ) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
            current: OFF,
        }
    }

    /// RGB LED an drei digitalen Pins
    pub fn digital(red: D, green: D, blue: D, polarity: Polarity) -> Self {
        Self::new(
            IndicatorChannel::Digital(red),
            IndicatorChannel::Digital(green),
            IndicatorChannel::Digital(blue),
            polarity,
        )
    }

    /// RGB LED an drei PWM-Kanälen
    pub fn pwm(red: P, green: P, blue: P, polarity: Polarity) -> Self {
        Self::new(
            IndicatorChannel::Pwm(red),
            IndicatorChannel::Pwm(green),
            IndicatorChannel::Pwm(blue),
            polarity,
        )
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

impl<D: OutputPin, P: SetDutyCycle> Indicator for RgbIndicator<D, P> {
    /// Schreibt alle drei Kanäle
    ///
    /// Schlägt ein Kanal fehl, werden die übrigen trotzdem geschrieben und
    /// der erste Fehler zurückgegeben. Die gemerkte Farbe ändert sich dann nicht.
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError> {
        let red = self.red.set_level(color.r, self.polarity);
        let green = self.green.set_level(color.g, self.polarity);
        let blue = self.blue.set_level(color.b, self.polarity);

        red.and(green).and(blue)?;
        self.current = color;
        Ok(())
    }

    fn color(&self) -> RGB8 {
        self.current
    }
}
