// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Spiel-Zeiten und Farben liegen in puzzle_core::config.
// Hier nur, was vom konkreten Board abhängt.

// ============================================================================
// Spiel-Loop
// ============================================================================

/// Periode des Spiel-Loops in Millisekunden
pub const LOOP_PERIOD_MS: u64 = 10;

// ============================================================================
// LED-Ring Konfiguration
// ============================================================================

/// Anzahl der Pixel im Countdown-Ring
pub const RING_PIXELS: usize = 12;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// GPIO-Zuordnung (Dokumentation, die Pins selbst werden in main.rs gewählt)
// ============================================================================
//
// | Funktion              | GPIO                 |
// |-----------------------|----------------------|
// | Sequenz-Buttons 0..=7 | 0, 1, 2, 3, 4, 5, 6, 7 |
// | Sequenz-Button 8      | 18                   |
// | Talk-Button           | 19                   |
// | Talk-LED R / G / B    | 20 / 21 / 22         |
// | LED-Ring Daten        | 8                    |
// | I2C SDA / SCL         | 23 / 15              |
//
// Alle Buttons gegen GND mit internem Pull-Up: gedrückt = low.

// ============================================================================
// PCA9685 (Button-LEDs)
// ============================================================================

/// I2C-Adressen der beiden PWM-Controller
/// Kanäle 0-15 auf dem ersten, 16-31 auf dem zweiten Chip
pub const PCA9685_ADDRESSES: [u8; 2] = [0x40, 0x41];

/// PWM-Frequenz der Button-LEDs in Hz
pub const PCA9685_PWM_HZ: u32 = 1000;

/// I2C Busfrequenz in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 400;

/// Interner Oszillator der PCA9685
pub const PCA9685_OSCILLATOR_HZ: u32 = 25_000_000;

// ============================================================================
// Access Point Konfiguration
// ============================================================================

/// SSID des Access Points
/// Wird zur Build-Zeit aus der Environment Variable AP_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const AP_SSID: &str = env!(
    "AP_SSID",
    "AP SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Passwort des Access Points (WPA2, mindestens 8 Zeichen)
/// Wird zur Build-Zeit aus der Environment Variable AP_PASSWORD geladen
pub const AP_PASSWORD: &str = env!(
    "AP_PASSWORD",
    "AP Passwort nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Statische Adresse des Access Points
/// Der Peer verbindet sich mit fester Adresse, kein DHCP-Server
pub const AP_ADDRESS: [u8; 4] = [192, 168, 4, 1];

/// Präfix-Länge des AP-Netzes (/24)
pub const AP_PREFIX_LEN: u8 = 24;

/// Wartezeit nach AP-Start, bis Clients zuverlässig assoziieren
pub const AP_SETTLE_SECS: u64 = 3;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// Link Konfiguration
// ============================================================================

/// TCP-Port, auf dem der Peer sich verbindet
pub const LINK_PORT: u16 = 1235;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// Lese-Puffer pro `read()` in Bytes
pub const LINK_READ_BUFFER_SIZE: usize = 256;

/// Kapazität der Kommando-Queues (Spiel ↔ Link Task)
pub const LINK_QUEUE_DEPTH: usize = 8;

/// Keep-Alive für die Peer-Verbindung in Sekunden
pub const LINK_KEEP_ALIVE_SECS: u64 = 10;

/// Timeout für die Peer-Verbindung in Sekunden
pub const LINK_TIMEOUT_SECS: u64 = 30;
