//! Per-band device state and the driver setup entry for one physical
//! dual-band transceiver chip.

use log::{log, Level};

use crate::band::Band;
use crate::config::{TransceiverConfig, IEEE802154_DEFAULT_PAN_ID};

/// Operating state of one band of a transceiver.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum RadioState {
    Off,
    TrxOff,
    Rx,
    Tx,
    Sleep,
}

/// Runtime state for one band of one physical transceiver.
///
/// A dual-band chip owns up to two of these, one per active band. The
/// register-level driver initializes the state in place through
/// [`setup_dual`]; afterwards the device belongs exclusively to the
/// interface task it was bound to.
pub struct BandRadio {
    state: RadioState,
    band: Option<Band>,
    chip_index: u8,
    channel: u16,
    pan_id: u16,
    short_addr: u16,
    frames_sent: u32,
}

impl BandRadio {
    pub const fn new() -> Self {
        BandRadio {
            state: RadioState::Off,
            band: None,
            chip_index: 0,
            channel: 0,
            pan_id: 0,
            short_addr: 0,
            frames_sent: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self.state, RadioState::Off)
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    pub fn channel(&self) -> u16 {
        self.channel
    }

    pub fn pan_id(&self) -> u16 {
        self.pan_id
    }

    pub fn short_addr(&self) -> u16 {
        self.short_addr
    }

    pub fn state(&self) -> RadioState {
        self.state
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub(crate) fn set_state(&mut self, state: RadioState) {
        self.state = state;
    }

    /// Push one assembled PSDU through the radio.
    pub(crate) fn transmit(&mut self, psdu: &[u8]) {
        if !self.is_initialized() {
            log!(Level::Warn, "transmit on uninitialized radio, dropping frame");
            return;
        }
        self.state = RadioState::Tx;
        self.frames_sent += 1;
        log!(
            Level::Trace,
            "chip {}: transmitted {} byte frame on channel {}",
            self.chip_index,
            psdu.len(),
            self.channel
        );
        self.state = RadioState::Rx;
    }

    fn configure(&mut self, band: Band, chip_index: u8) {
        self.band = Some(band);
        self.chip_index = chip_index;
        self.channel = band.default_channel();
        self.pan_id = IEEE802154_DEFAULT_PAN_ID;
        self.short_addr = ((chip_index as u16) << 8) | band as u16;
        self.state = RadioState::TrxOff;
        log!(
            Level::Debug,
            "chip {}: {} band configured on channel {}",
            chip_index,
            band.label(),
            self.channel
        );
    }
}

/// Driver setup for one physical chip.
///
/// Initializes whichever band halves the caller bound, in place. A band
/// that is not active is passed as `None` and its radio core stays in
/// reset. The chip comes up whole even when only one band is used.
pub(crate) fn setup_dual(
    sub_ghz: Option<&mut BandRadio>,
    band_24: Option<&mut BandRadio>,
    config: &TransceiverConfig,
    chip_index: u8,
) {
    if sub_ghz.is_none() && band_24.is_none() {
        log!(
            Level::Debug,
            "transceiver {}: no band enabled, chip left in reset",
            chip_index
        );
        return;
    }
    if let Some(radio) = sub_ghz {
        radio.configure(Band::SubGhz, chip_index);
    }
    if let Some(radio) = band_24 {
        radio.configure(Band::Band24Ghz, chip_index);
    }
    log!(
        Level::Debug,
        "transceiver {} set up on spi{}",
        chip_index,
        config.spi_bus
    );
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn test_config() -> TransceiverConfig {
        TransceiverConfig {
            spi_bus: 0,
            spi_clk_hz: 5_000_000,
            cs_pin: 1,
            int_pin: 2,
            reset_pin: 3,
        }
    }

    #[test]
    fn setup_dual_configures_both_band_halves() {
        let mut sub_ghz = BandRadio::new();
        let mut band_24 = BandRadio::new();
        setup_dual(Some(&mut sub_ghz), Some(&mut band_24), &test_config(), 0);

        assert!(sub_ghz.is_initialized());
        assert_eq!(sub_ghz.band(), Some(Band::SubGhz));
        assert_eq!(sub_ghz.channel(), 5);
        assert_eq!(sub_ghz.pan_id(), IEEE802154_DEFAULT_PAN_ID);

        assert!(band_24.is_initialized());
        assert_eq!(band_24.band(), Some(Band::Band24Ghz));
        assert_eq!(band_24.channel(), 26);
        assert_ne!(sub_ghz.short_addr(), band_24.short_addr());
    }

    #[test]
    fn setup_dual_with_one_band_leaves_the_other_untouched() {
        let mut band_24 = BandRadio::new();
        setup_dual(None, Some(&mut band_24), &test_config(), 1);
        assert!(band_24.is_initialized());
        assert_eq!(band_24.band(), Some(Band::Band24Ghz));
    }

    #[test]
    fn transmit_requires_an_initialized_radio() {
        let mut radio = BandRadio::new();
        radio.transmit(&[0u8; 10]);
        assert_eq!(radio.frames_sent(), 0);

        setup_dual(Some(&mut radio), None, &test_config(), 0);
        radio.transmit(&[0u8; 10]);
        assert_eq!(radio.frames_sent(), 1);
        assert_eq!(radio.state(), RadioState::Rx);
    }
}
