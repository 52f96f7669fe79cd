//! Static slot storage backing the created interfaces.
//!
//! Every usable band of every transceiver occupies exactly one device slot
//! and one stack slot, reserved before any interface task starts. The pool
//! hands slot pairs out front to back; a pair that has been handed out can
//! never be reached again, so no two interfaces ever share storage.

use core::mem;

use crate::config::NETIF_STACK_SIZE;
use crate::transceiver::BandRadio;

/// Working memory handed to one interface task.
///
/// The task's own frame lives in the executor's static task arena; this is
/// the interface's dedicated workspace for frame assembly.
pub struct NetifStack {
    pub(crate) buf: [u8; NETIF_STACK_SIZE],
}

impl NetifStack {
    pub const fn new() -> Self {
        NetifStack {
            buf: [0; NETIF_STACK_SIZE],
        }
    }
}

/// Pre-sized pool of (device slot, stack slot) pairs.
pub(crate) struct SlotPool {
    devices: &'static mut [BandRadio],
    stacks: &'static mut [NetifStack],
    next_index: usize,
}

impl SlotPool {
    /// Pair up the two backing slices. Both must hold exactly `expected`
    /// slots; the count is fixed once the active bands are resolved.
    pub(crate) fn new(
        devices: &'static mut [BandRadio],
        stacks: &'static mut [NetifStack],
        expected: usize,
    ) -> Result<SlotPool, ()> {
        if devices.len() != stacks.len() || devices.len() != expected {
            return Err(());
        }
        Ok(SlotPool {
            devices,
            stacks,
            next_index: 0,
        })
    }

    /// Hand out the next slot pair, or `None` when the pool is exhausted.
    pub(crate) fn take_pair(
        &mut self,
    ) -> Option<(usize, &'static mut BandRadio, &'static mut NetifStack)> {
        let devices = mem::take(&mut self.devices);
        let (device, device_rest) = devices.split_first_mut()?;
        let stacks = mem::take(&mut self.stacks);
        let (stack, stack_rest) = stacks.split_first_mut()?;
        self.devices = device_rest;
        self.stacks = stack_rest;
        let index = self.next_index;
        self.next_index += 1;
        Some((index, device, stack))
    }

    pub(crate) fn remaining(&self) -> usize {
        self.devices.len()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn leak_devices(count: usize) -> &'static mut [BandRadio] {
        Box::leak(
            (0..count)
                .map(|_| BandRadio::new())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        )
    }

    fn leak_stacks(count: usize) -> &'static mut [NetifStack] {
        Box::leak(
            (0..count)
                .map(|_| NetifStack::new())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        )
    }

    #[test]
    fn new_rejects_mismatched_slice_lengths() {
        assert!(SlotPool::new(leak_devices(1), leak_stacks(2), 1).is_err());
        assert!(SlotPool::new(leak_devices(2), leak_stacks(2), 3).is_err());
    }

    #[test]
    fn take_pair_hands_out_sequential_slots_until_exhausted() {
        let mut pool = SlotPool::new(leak_devices(3), leak_stacks(3), 3).unwrap();
        assert_eq!(pool.remaining(), 3);

        for expected_index in 0..3 {
            let (index, _, _) = pool.take_pair().unwrap();
            assert_eq!(index, expected_index);
        }
        assert_eq!(pool.remaining(), 0);
        assert!(pool.take_pair().is_none());
    }

    #[test]
    fn an_empty_pool_is_valid_and_immediately_exhausted() {
        let mut pool = SlotPool::new(leak_devices(0), leak_stacks(0), 0).unwrap();
        assert!(pool.take_pair().is_none());
    }
}
