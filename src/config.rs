//! Build-time configuration: the transceiver list, interface-slot
//! provisioning and the sizing constants for per-interface storage.

use crate::band::Band;

/// Bus and pin assignment for one physical transceiver chip.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct TransceiverConfig {
    pub spi_bus: u8,
    pub spi_clk_hz: u32,
    pub cs_pin: u8,
    pub int_pin: u8,
    pub reset_pin: u8,
}

/// Compile-time list of the physical transceivers on this board, in
/// bring-up order.
pub const TRANSCEIVER_CONFIGS: [TransceiverConfig; 1] = [TransceiverConfig {
    spi_bus: 0,
    spi_clk_hz: 5_000_000,
    cs_pin: 17,
    int_pin: 20,
    reset_pin: 21,
}];

pub const TRANSCEIVER_COUNT: usize = TRANSCEIVER_CONFIGS.len();

/// Interface slots provisioned by the surrounding system. A dual-band chip
/// normally occupies one slot per band; deployments that provision a single
/// slot trigger the band downgrade in `BandSet::resolve`.
pub const NETIF_SLOT_COUNT: usize = if cfg!(feature = "single-netif") {
    1
} else {
    TRANSCEIVER_COUNT * Band::COUNT
};

/// Size of the working memory handed to each interface task.
pub const NETIF_STACK_SIZE: usize = 2048;

/// Interface task priority for the 2.4 GHz band.
pub const NETIF_PRIO: u8 = 2;

/// Interface task priority for the sub-GHz band.
pub const NETIF_PRIO_SUB_GHZ: u8 = NETIF_PRIO;

pub(crate) const TX_FRAME_QUEUE_SIZE: usize = 8;
pub(crate) const RX_FRAME_QUEUE_SIZE: usize = 8;
pub(crate) const RECEIVED_FRAME_QUEUE_SIZE: usize = 16;

pub(crate) const IEEE802154_DEFAULT_PAN_ID: u16 = 0x23;
