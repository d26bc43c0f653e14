//! Board pin assignments
//!
//! Raspberry Pi Pico style wiring: UART0 on GPIO0/1 for the host feed and
//! the matrix data line on GPIO6. PIO pins are bound at compile time, so a
//! config naming another data pin cannot be honored.

use defmt::*;

use airglow_core::config::MatrixConfig;

/// GPIO wired to the matrix data input
pub const DATA_PIN: u8 = 6;

/// UART0 TX to the host
pub const FEED_TX_PIN: u8 = 0;

/// UART0 RX from the host
pub const FEED_RX_PIN: u8 = 1;

/// Reconcile the configured data pin with the board wiring
pub fn check_pins(config: &mut MatrixConfig) {
    if config.data_pin == FEED_TX_PIN || config.data_pin == FEED_RX_PIN {
        error!("data_pin GPIO{} collides with the feed UART", config.data_pin);
    }
    if config.data_pin != DATA_PIN {
        error!(
            "data_pin GPIO{} is not wired on this board, using GPIO{}",
            config.data_pin, DATA_PIN
        );
        config.data_pin = DATA_PIN;
    }
}
