// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Ipv4Address, Ipv4Cidr, StackResources, StaticConfigV4};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use sequence_puzzle::CommandChannel;
use sequence_puzzle::config::{
    AP_ADDRESS, AP_PREFIX_LEN, EXTRA_HEAP_SIZE, I2C_FREQUENCY_KHZ, WIFI_HEAP_SIZE,
};
use sequence_puzzle::tasks::{
    ChannelLink, GameHardware, LinkStatus, access_point_task, game_task, link_task, net_task,
};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, Access Point, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Eingänge: alle Buttons gegen GND, interner Pull-Up
    let pull_up = InputConfig::default().with_pull(Pull::Up);
    let buttons = [
        Input::new(peripherals.GPIO0, pull_up),
        Input::new(peripherals.GPIO1, pull_up),
        Input::new(peripherals.GPIO2, pull_up),
        Input::new(peripherals.GPIO3, pull_up),
        Input::new(peripherals.GPIO4, pull_up),
        Input::new(peripherals.GPIO5, pull_up),
        Input::new(peripherals.GPIO6, pull_up),
        Input::new(peripherals.GPIO7, pull_up),
        Input::new(peripherals.GPIO18, pull_up),
    ];
    let talk_button = Input::new(peripherals.GPIO19, pull_up);

    // Talk-LED (drei GPIOs, startet aus)
    let talk_led = [
        Output::new(peripherals.GPIO20, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO21, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO22, Level::Low, OutputConfig::default()),
    ];

    // I2C-Bus für die PCA9685 der Button-LEDs
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .expect("Failed to initialize I2C")
    .with_sda(peripherals.GPIO23)
    .with_scl(peripherals.GPIO15);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Statische Adresse: der Peer verbindet sich direkt mit 192.168.4.1
    let [a, b, c, d] = AP_ADDRESS;
    let net_config = NetConfig::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(Ipv4Address::new(a, b, c, d), AP_PREFIX_LEN),
        gateway: None,
        dns_servers: Default::default(),
    });

    // Static resources für embassy-net (ein Link-Socket)
    static RESOURCES: static_cell::StaticCell<StackResources<2>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt AP interface)
    let (stack, runner) = embassy_net::new(wifi_interface.ap, net_config, resources, seed);

    // Link-Queues und Status (Spiel ↔ Link Task)
    static OUTBOUND: static_cell::StaticCell<CommandChannel> = static_cell::StaticCell::new();
    static INBOUND: static_cell::StaticCell<CommandChannel> = static_cell::StaticCell::new();
    static LINK_STATUS: static_cell::StaticCell<LinkStatus> = static_cell::StaticCell::new();
    let outbound = &*OUTBOUND.init(CommandChannel::new());
    let inbound = &*INBOUND.init(CommandChannel::new());
    let link_status = &*LINK_STATUS.init(LinkStatus::new());

    let link = ChannelLink::new(outbound.sender(), inbound.receiver(), link_status);

    // Spawn WiFi Tasks
    spawner.spawn(access_point_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();

    // Spawn Link Task (empfängt ausgehende, liefert eingehende Kommandos)
    spawner
        .spawn(link_task(
            stack,
            link_status,
            inbound.sender(),
            outbound.receiver(),
        ))
        .unwrap();

    // Spawn Game Task (besitzt alle Eingänge und LEDs)
    let hardware = GameHardware {
        buttons,
        talk_button,
        talk_led,
        i2c,
        ring_pin: peripherals.GPIO8,
        rmt: peripherals.RMT,
    };
    spawner
        .spawn(game_task(hardware, link, link_status))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
