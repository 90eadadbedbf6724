// SmartLED Writer für den Countdown-Ring
//
// Implementiert `puzzle_core::SmartLedWriter` über das RMT Peripheral
// (WS2812/Neopixel). Der Ring wird immer als kompletter Frame geschrieben.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use puzzle_core::{LedError, SmartLedWriter};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::RING_PIXELS;

/// Buffer-Größe für den Ring (3 Farben * 8 Bits pro Pixel + 1 Reset)
pub const RING_BUFFER_SIZE: usize = RING_PIXELS * 24 + 1;

/// Real Hardware LED Writer
///
/// Hinweis: Der Buffer muss länger leben als der Writer, daher wird er im
/// Task erstellt (`smart_led_buffer!(RING_PIXELS)`) und hier nur geliehen.
pub struct RmtLedWriter<'a> {
    led: SmartLedsAdapter<'a, RING_BUFFER_SIZE>,
}

impl<'a> RmtLedWriter<'a> {
    /// Erstellt einen neuen RmtLedWriter
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für die Datenleitung des Rings
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; RING_BUFFER_SIZE],
    ) -> Result<Self, esp_hal::rmt::Error> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))?;
        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self { led })
    }
}

impl SmartLedWriter for RmtLedWriter<'_> {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        self.led
            .write(pixels.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}
