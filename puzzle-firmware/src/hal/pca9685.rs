// PCA9685 PWM-Controller für die Button-LEDs
//
// Zwei Chips am selben I2C-Bus bilden eine Bank mit 32 Kanälen.
// Die Register übernimmt `pwm-pca9685`, jeder Chip bekommt ein eigenes
// `RefCellDevice` auf dem geteilten Bus.
// Jeder Kanal wird als eigener `embedded_hal::pwm::SetDutyCycle` herausgegeben,
// damit puzzle-core ihn wie jeden anderen PWM-Kanal ansteuern kann.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_hal_bus::i2c::RefCellDevice;
use pwm_pca9685::{Address, Channel, Error, Pca9685};
use puzzle_core::pca9685_prescale;

use crate::config::PCA9685_OSCILLATOR_HZ;

/// 12-bit Auflösung
pub const MAX_DUTY: u16 = 4095;

pub const CHANNELS_PER_CHIP: u8 = 16;

const CHIP_CHANNELS: [Channel; CHANNELS_PER_CHIP as usize] = [
    Channel::C0,
    Channel::C1,
    Channel::C2,
    Channel::C3,
    Channel::C4,
    Channel::C5,
    Channel::C6,
    Channel::C7,
    Channel::C8,
    Channel::C9,
    Channel::C10,
    Channel::C11,
    Channel::C12,
    Channel::C13,
    Channel::C14,
    Channel::C15,
];

/// Fehler beim Schreiben eines Kanals
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum PwmError {
    /// I2C-Transfer fehlgeschlagen
    Bus,
    /// Bank ist gerade von einem anderen Kanal belegt
    Busy,
    /// Kanal gibt es nicht in dieser Bank
    InvalidChannel,
}

impl pwm::Error for PwmError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// Mehrere PCA9685 an einem I2C-Bus
pub struct Pca9685Bank<'bus, I2C> {
    chips: [Pca9685<RefCellDevice<'bus, I2C>>; 2],
}

impl<'bus, I2C: I2c> Pca9685Bank<'bus, I2C> {
    /// Kanäle 0-15 gehören zur ersten Adresse, 16-31 zur zweiten
    pub fn new(bus: &'bus RefCell<I2C>, addresses: [u8; 2]) -> Result<Self, Error<I2C::Error>> {
        let [first, second] = addresses;
        Ok(Self {
            chips: [
                Pca9685::new(RefCellDevice::new(bus), Address::from(first))?,
                Pca9685::new(RefCellDevice::new(bus), Address::from(second))?,
            ],
        })
    }

    /// Setzt die Frequenz und weckt alle Chips auf
    pub fn init(
        &mut self,
        pwm_hz: u32,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<I2C::Error>> {
        let prescale = pca9685_prescale(PCA9685_OSCILLATOR_HZ, pwm_hz);

        for chip in self.chips.iter_mut() {
            chip.set_prescale(prescale)?;
            chip.enable()?;
        }
        // Oszillator braucht 500 µs nach dem Aufwachen
        delay.delay_us(500);

        defmt::info!(
            "PCA9685: {} chips at {} Hz (prescale {})",
            self.chips.len(),
            pwm_hz,
            prescale
        );
        Ok(())
    }

    /// Schreibt den Duty-Cycle eines Kanals (0 ..= `MAX_DUTY`)
    pub fn set_duty(&mut self, channel: u8, duty: u16) -> Result<(), PwmError> {
        let chip = self
            .chips
            .get_mut(usize::from(channel / CHANNELS_PER_CHIP))
            .ok_or(PwmError::InvalidChannel)?;
        let output = CHIP_CHANNELS[usize::from(channel % CHANNELS_PER_CHIP)];

        write_duty(chip, output, duty).map_err(|_| PwmError::Bus)
    }
}

fn write_duty<I2C: I2c>(
    chip: &mut Pca9685<I2C>,
    output: Channel,
    duty: u16,
) -> Result<(), Error<I2C::Error>> {
    match duty {
        0 => chip.set_channel_full_off(output),
        d if d >= MAX_DUTY => {
            // "Voll aus" hat Vorrang vor "voll an" und muss erst gelöscht werden
            chip.set_channel_off(output, 0)?;
            chip.set_channel_full_on(output, 0)
        }
        d => chip.set_channel_on_off(output, 0, d),
    }
}

/// Ein einzelner Kanal einer geteilten Bank
pub struct Pca9685Channel<'a, 'bus, I2C> {
    bank: &'a RefCell<Pca9685Bank<'bus, I2C>>,
    channel: u8,
}

impl<'a, 'bus, I2C: I2c> Pca9685Channel<'a, 'bus, I2C> {
    pub fn new(bank: &'a RefCell<Pca9685Bank<'bus, I2C>>, channel: u8) -> Self {
        Self { bank, channel }
    }
}

impl<I2C: I2c> pwm::ErrorType for Pca9685Channel<'_, '_, I2C> {
    type Error = PwmError;
}

impl<I2C: I2c> SetDutyCycle for Pca9685Channel<'_, '_, I2C> {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.bank
            .try_borrow_mut()
            .map_err(|_| PwmError::Busy)?
            .set_duty(self.channel, duty)
    }
}
