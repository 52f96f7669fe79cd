//! Radio band identities and the active-band resolution rule.
//!
//! A dual-band transceiver chip serves up to two independent frequency
//! bands at once. Which bands actually come up is decided once, at build
//! configuration time, by [`BandSet::resolve`].

use crate::config::{NETIF_PRIO, NETIF_PRIO_SUB_GHZ};

/// One of the two frequency bands a dual-band transceiver can serve.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum Band {
    SubGhz,
    Band24Ghz,
}

impl Band {
    pub const COUNT: usize = 2;

    /// IEEE 802.15.4 channel a freshly created interface starts on.
    pub const fn default_channel(self) -> u16 {
        match self {
            Band::SubGhz => 5,
            Band::Band24Ghz => 26,
        }
    }

    /// Priority of the interface task serving this band.
    pub const fn priority(self) -> u8 {
        match self {
            Band::SubGhz => NETIF_PRIO_SUB_GHZ,
            Band::Band24Ghz => NETIF_PRIO,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Band::SubGhz => "sub-GHz",
            Band::Band24Ghz => "2.4-GHz",
        }
    }
}

/// Resolved set of bands a build brings up.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct BandSet {
    sub_ghz: bool,
    band_24: bool,
}

impl BandSet {
    pub const EMPTY: BandSet = BandSet {
        sub_ghz: false,
        band_24: false,
    };

    /// Decide which of the requested bands come up, given the number of
    /// interface slots the surrounding system provisions.
    ///
    /// A dual-band chip needs one interface slot per band. When only a
    /// single slot is provisioned but both bands were requested, the
    /// sub-GHz band is dropped so the system still boots with the 2.4 GHz
    /// interface instead of failing to fit.
    pub const fn resolve(sub_ghz: bool, band_24: bool, netif_slots: usize) -> BandSet {
        if netif_slots == 1 && sub_ghz && band_24 {
            return BandSet {
                sub_ghz: false,
                band_24: true,
            };
        }
        BandSet { sub_ghz, band_24 }
    }

    pub const fn contains(self, band: Band) -> bool {
        match band {
            Band::SubGhz => self.sub_ghz,
            Band::Band24Ghz => self.band_24,
        }
    }

    pub const fn count(self) -> usize {
        self.sub_ghz as usize + self.band_24 as usize
    }

    pub const fn is_empty(self) -> bool {
        self.count() == 0
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn resolve_passes_requested_bands_through() {
        let bands = BandSet::resolve(true, true, 2);
        assert!(bands.contains(Band::SubGhz));
        assert!(bands.contains(Band::Band24Ghz));
        assert_eq!(bands.count(), 2);
    }

    #[test]
    fn resolve_downgrades_sub_ghz_with_a_single_interface_slot() {
        let bands = BandSet::resolve(true, true, 1);
        assert!(!bands.contains(Band::SubGhz));
        assert!(bands.contains(Band::Band24Ghz));
        assert_eq!(bands.count(), 1);
    }

    #[test]
    fn resolve_keeps_a_single_requested_band_on_a_single_slot() {
        // The downgrade only applies when both bands compete for one slot
        let sub_only = BandSet::resolve(true, false, 1);
        assert!(sub_only.contains(Band::SubGhz));
        assert_eq!(sub_only.count(), 1);

        let band_24_only = BandSet::resolve(false, true, 1);
        assert!(band_24_only.contains(Band::Band24Ghz));
        assert_eq!(band_24_only.count(), 1);
    }

    #[test]
    fn resolve_with_nothing_requested_is_empty() {
        let bands = BandSet::resolve(false, false, 2);
        assert!(bands.is_empty());
        assert_eq!(bands.count(), 0);
        assert_eq!(bands, BandSet::EMPTY);
    }

    #[test]
    fn band_defaults() {
        assert_eq!(Band::SubGhz.default_channel(), 5);
        assert_eq!(Band::Band24Ghz.default_channel(), 26);
        assert_eq!(Band::SubGhz.priority(), NETIF_PRIO_SUB_GHZ);
        assert_eq!(Band::Band24Ghz.priority(), NETIF_PRIO);
    }
}
