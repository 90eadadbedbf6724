// Hardware Abstraction Layer (HAL) Module
//
// Bindet die Traits aus puzzle-core an die ESP32-C6 Peripherie.

pub mod led_writer;
pub mod pca9685;

pub use led_writer::{RING_BUFFER_SIZE, RmtLedWriter};
pub use pca9685::{Pca9685Bank, Pca9685Channel, PwmError};
