use crate::band::{Band, BandSet};
use crate::config::TransceiverConfig;
use crate::slots::{NetifStack, SlotPool};
use crate::transceiver::{self, BandRadio};

/// One interface candidate produced by the binder: a device slot, its stack
/// slot, the band it serves and the priority of its interface task.
pub(crate) struct BoundInterface {
    pub(crate) device: &'static mut BandRadio,
    pub(crate) stack: &'static mut NetifStack,
    pub(crate) slot_index: usize,
    pub(crate) band: Band,
    pub(crate) priority: u8,
}

/// Walk the physical transceivers in configuration order and bind each one
/// to its slot pairs.
///
/// For every chip: take a slot pair for the sub-GHz band if it is active,
/// then one for the 2.4 GHz band, run the driver setup with whichever
/// candidates exist (both absent is legal and still sets the chip up), then
/// invoke `create` for the sub-GHz candidate followed by the 2.4 GHz one.
///
/// `create` receives `None` for a band that is not active and must treat it
/// as a skip, not an error. Slot pairs are consumed strictly in order, so a
/// chip's bands occupy consecutive slots and no two chips overlap.
pub(crate) fn bind_transceivers<F>(
    configs: &[TransceiverConfig],
    bands: BandSet,
    pool: &mut SlotPool,
    mut create: F,
) -> Result<(), ()>
where
    F: FnMut(Option<BoundInterface>) -> Result<(), ()>,
{
    for (chip_index, config) in configs.iter().enumerate() {
        let mut sub_ghz = if bands.contains(Band::SubGhz) {
            Some(pool.take_pair().ok_or(())?)
        } else {
            None
        };
        let mut band_24 = if bands.contains(Band::Band24Ghz) {
            Some(pool.take_pair().ok_or(())?)
        } else {
            None
        };

        transceiver::setup_dual(
            sub_ghz.as_mut().map(|(_, device, _)| &mut **device),
            band_24.as_mut().map(|(_, device, _)| &mut **device),
            config,
            chip_index as u8,
        );

        create(sub_ghz.map(|(slot_index, device, stack)| BoundInterface {
            device,
            stack,
            slot_index,
            band: Band::SubGhz,
            priority: Band::SubGhz.priority(),
        }))?;

        create(band_24.map(|(slot_index, device, stack)| BoundInterface {
            device,
            stack,
            slot_index,
            band: Band::Band24Ghz,
            priority: Band::Band24Ghz.priority(),
        }))?;
    }
    Ok(())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::config::{NETIF_PRIO, NETIF_PRIO_SUB_GHZ};

    fn leak_pool(slot_count: usize) -> SlotPool {
        let devices = Box::leak(
            (0..slot_count)
                .map(|_| BandRadio::new())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        );
        let stacks = Box::leak(
            (0..slot_count)
                .map(|_| NetifStack::new())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        );
        SlotPool::new(devices, stacks, slot_count).unwrap()
    }

    fn test_configs(count: usize) -> Vec<TransceiverConfig> {
        (0..count)
            .map(|i| TransceiverConfig {
                spi_bus: i as u8,
                spi_clk_hz: 5_000_000,
                cs_pin: 1,
                int_pin: 2,
                reset_pin: 3,
            })
            .collect()
    }

    /// Record of each factory invocation: `None` for a skipped band,
    /// otherwise (slot index, band, priority).
    fn bind_and_record(
        transceivers: usize,
        bands: BandSet,
        slot_count: usize,
    ) -> Vec<Option<(usize, Band, u8)>> {
        let configs = test_configs(transceivers);
        let mut pool = leak_pool(slot_count);
        let mut calls = Vec::new();
        bind_transceivers(&configs, bands, &mut pool, |candidate| {
            calls.push(candidate.map(|bound| {
                // setup runs before creation; the device must already be live
                assert!(bound.device.is_initialized());
                assert_eq!(bound.device.band(), Some(bound.band));
                (bound.slot_index, bound.band, bound.priority)
            }));
            Ok(())
        })
        .unwrap();
        calls
    }

    #[test]
    fn one_transceiver_sub_ghz_only() {
        let bands = BandSet::resolve(true, false, 2);
        let calls = bind_and_record(1, bands, 1);
        assert_eq!(
            calls,
            vec![Some((0, Band::SubGhz, NETIF_PRIO_SUB_GHZ)), None]
        );
    }

    #[test]
    fn two_transceivers_both_bands_alternate_in_slot_order() {
        let bands = BandSet::resolve(true, true, 4);
        let calls = bind_and_record(2, bands, 4);
        assert_eq!(
            calls,
            vec![
                Some((0, Band::SubGhz, NETIF_PRIO_SUB_GHZ)),
                Some((1, Band::Band24Ghz, NETIF_PRIO)),
                Some((2, Band::SubGhz, NETIF_PRIO_SUB_GHZ)),
                Some((3, Band::Band24Ghz, NETIF_PRIO)),
            ]
        );
    }

    #[test]
    fn empty_band_set_creates_no_interfaces() {
        let calls = bind_and_record(2, BandSet::EMPTY, 0);
        assert_eq!(calls, vec![None, None, None, None]);
    }

    #[test]
    fn downgraded_band_set_creates_only_the_24_ghz_interface() {
        let bands = BandSet::resolve(true, true, 1);
        let calls = bind_and_record(1, bands, 1);
        assert_eq!(calls, vec![None, Some((0, Band::Band24Ghz, NETIF_PRIO))]);
    }

    #[test]
    fn an_undersized_pool_is_an_error_not_an_overlap() {
        let configs = test_configs(2);
        let bands = BandSet::resolve(true, true, 4);
        // 2 chips x 2 bands need 4 pairs, only 2 provided
        let mut pool = leak_pool(2);
        let mut created = 0;
        let result = bind_transceivers(&configs, bands, &mut pool, |candidate| {
            if candidate.is_some() {
                created += 1;
            }
            Ok(())
        });
        assert!(result.is_err());
        assert!(created <= 2);
    }

    #[test]
    fn a_create_error_stops_the_bring_up() {
        let configs = test_configs(1);
        let bands = BandSet::resolve(true, true, 2);
        let mut pool = leak_pool(2);
        let result = bind_transceivers(&configs, bands, &mut pool, |_| Err(()));
        assert!(result.is_err());
    }
}
