// Game Task - Spiel-Loop im 10 ms Takt
use core::cell::RefCell;

use defmt::{Debug2Format, error, info};
use embassy_time::{Duration, Instant, Ticker};
use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Output};
use esp_hal::i2c::master::I2c;
use esp_hal_smartled::smart_led_buffer;
use puzzle_core::{
    BUTTON_COUNT, GameConfig, GameController, Indicator, Link, Polarity, RawInputs, RgbIndicator,
    SmartLedWriter, button_pwm_channels,
};

use crate::config::{LOOP_PERIOD_MS, PCA9685_ADDRESSES, PCA9685_PWM_HZ, RING_PIXELS, RMT_CLOCK_MHZ};
use crate::hal::{Pca9685Bank, Pca9685Channel, RmtLedWriter};
use crate::tasks::link::{ChannelLink, LinkStatus};

/// Peripherie, die der Spiel-Loop exklusiv besitzt
///
/// Wird in `main()` zusammengestellt, damit die Pin-Zuordnung an einer
/// Stelle steht.
pub struct GameHardware {
    /// Sequenz-Buttons in Index-Reihenfolge (Pull-Up, gedrückt = low)
    pub buttons: [Input<'static>; BUTTON_COUNT],
    /// Talk-Button (Pull-Up, gedrückt = low)
    pub talk_button: Input<'static>,
    /// Talk-LED Pins in der Reihenfolge R, G, B
    pub talk_led: [Output<'static>; 3],
    /// I2C-Bus zu den PCA9685 der Button-LEDs
    pub i2c: I2c<'static, Blocking>,
    pub ring_pin: esp_hal::peripherals::GPIO8<'static>,
    pub rmt: esp_hal::peripherals::RMT<'static>,
}

/// Spiel-Loop - läuft nach der Hardware-Initialisierung endlos
///
/// Liest pro Durchlauf alle Pins, ruft `GameController::tick()` und wartet
/// auf den nächsten Takt. Meldet der Link einen fatalen Fehler, werden alle
/// Ausgänge zurückgesetzt und das Gerät neu gestartet.
pub async fn run_game_loop<L, W, I>(
    mut controller: GameController<L, W, I, RING_PIXELS>,
    buttons: &[Input<'_>; BUTTON_COUNT],
    talk_button: &Input<'_>,
    status: &LinkStatus,
) -> !
where
    L: Link,
    W: SmartLedWriter,
    I: Indicator,
{
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));

    loop {
        if status.is_fatal() {
            error!("Game: Link failed permanently, restarting device");
            controller.shutdown();
            esp_hal::system::software_reset();
        }

        let inputs = RawInputs {
            talk: talk_button.is_high(),
            buttons: core::array::from_fn(|index| buttons[index].is_high()),
        };
        controller.tick(Instant::now(), &inputs);

        ticker.next().await;
    }
}

/// Game Task - Embassy Task für den Spiel-Loop
///
/// Dieser Task übernimmt die Hardware-Initialisierung (Ring, PCA9685,
/// Anzeigen) und ruft dann `run_game_loop()` auf.
#[embassy_executor::task]
pub async fn game_task(hardware: GameHardware, link: ChannelLink, status: &'static LinkStatus) {
    let GameHardware {
        buttons,
        talk_button,
        talk_led,
        i2c,
        ring_pin,
        rmt,
    } = hardware;

    // LED-Ring: Buffer muss so lange leben wie der Writer
    let mut rmt_buffer = smart_led_buffer!(RING_PIXELS);
    let ring = match RmtLedWriter::new(ring_pin, rmt, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(ring) => ring,
        Err(e) => {
            error!("Game: Failed to initialize LED ring: {}", Debug2Format(&e));
            return;
        }
    };

    // Button-LEDs: zwei PCA9685, gemeinsame Anode (aktiv low)
    let bus = RefCell::new(i2c);
    let mut bank = match Pca9685Bank::new(&bus, PCA9685_ADDRESSES) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Game: Invalid PCA9685 address: {}", Debug2Format(&e));
            return;
        }
    };
    if let Err(e) = bank.init(PCA9685_PWM_HZ, &mut Delay::new()) {
        // Weiterlaufen: das Spiel ist auch ohne Button-LEDs spielbar
        error!("Game: PCA9685 init failed: {}", Debug2Format(&e));
    }
    let bank = RefCell::new(bank);

    let button_indicators = core::array::from_fn(|button| {
        let (red, green, blue) = button_pwm_channels(button);
        RgbIndicator::pwm(
            Pca9685Channel::new(&bank, red),
            Pca9685Channel::new(&bank, green),
            Pca9685Channel::new(&bank, blue),
            Polarity::ActiveLow,
        )
    });

    // Talk-LED: drei GPIOs, gemeinsame Kathode (aktiv high)
    let [red, green, blue] = talk_led;
    let talk_indicator = RgbIndicator::digital(red, green, blue, Polarity::ActiveHigh);

    let controller = match GameController::<_, _, _, RING_PIXELS>::new(
        GameConfig::default(),
        link,
        ring,
        talk_indicator,
        button_indicators,
    ) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Game: Invalid configuration: {}", e);
            return;
        }
    };

    info!("Game: Ready, waiting for peer");
    run_game_loop(controller, &buttons, &talk_button, status).await
}
