//! Media-access strategies for the created interfaces.
//!
//! Exactly one strategy is compiled into a build and applied uniformly to
//! every interface:
//!
//! - `ieee802154`: plain CSMA/CA, always-on receiver (the default)
//! - `lwmac`: duty-cycled listening with a fixed wake-up period
//! - `gomac`: duty-cycled superframe with separate control and data phases
//!
//! The selection is a build-time constant, not a per-interface choice.

#[cfg(feature = "gomac")]
pub(crate) mod gomac;

#[cfg(feature = "lwmac")]
pub(crate) mod lwmac;

#[cfg(not(any(feature = "gomac", feature = "lwmac")))]
pub(crate) mod ieee802154;

// Re-export the active strategy implementation
#[cfg(feature = "gomac")]
pub(crate) use gomac::{netif_task, NETIF_NAME};

#[cfg(feature = "lwmac")]
pub(crate) use lwmac::{netif_task, NETIF_NAME};

#[cfg(not(any(feature = "gomac", feature = "lwmac")))]
pub(crate) use ieee802154::{netif_task, NETIF_NAME};

/// The closed set of media-access strategies.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Debug))]
pub enum MacStrategy {
    Gomac,
    Lwmac,
    Ieee802154,
}

/// Strategy this build runs on every created interface.
pub const ACTIVE_STRATEGY: MacStrategy = if cfg!(feature = "gomac") {
    MacStrategy::Gomac
} else if cfg!(feature = "lwmac") {
    MacStrategy::Lwmac
} else {
    MacStrategy::Ieee802154
};

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn strategy_is_a_single_build_time_choice() {
        let expected_name = match ACTIVE_STRATEGY {
            MacStrategy::Gomac => "dualband-gomac",
            MacStrategy::Lwmac => "dualband-lwmac",
            MacStrategy::Ieee802154 => "dualband",
        };
        assert_eq!(NETIF_NAME, expected_name);

        if cfg!(feature = "gomac") {
            assert_eq!(ACTIVE_STRATEGY, MacStrategy::Gomac);
        } else if cfg!(feature = "lwmac") {
            assert_eq!(ACTIVE_STRATEGY, MacStrategy::Lwmac);
        } else {
            assert_eq!(ACTIVE_STRATEGY, MacStrategy::Ieee802154);
        }
    }
}
