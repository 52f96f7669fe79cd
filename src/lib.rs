#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "gomac", feature = "lwmac"))]
compile_error!("Only one media-access strategy feature can be enabled at a time");

mod band;
mod binder;
mod config;
mod frame;
mod mac;
mod netif;
mod slots;
mod transceiver;

pub use band::{Band, BandSet};
pub use config::{
    TransceiverConfig, NETIF_PRIO, NETIF_PRIO_SUB_GHZ, NETIF_SLOT_COUNT, NETIF_STACK_SIZE,
    TRANSCEIVER_CONFIGS, TRANSCEIVER_COUNT,
};
pub use frame::{RadioFrame, ReceivedFrame, FRAME_SIZE};
pub use mac::{MacStrategy, ACTIVE_STRATEGY};
pub use netif::InterfaceInfo;
pub use slots::NetifStack;
pub use transceiver::{BandRadio, RadioState};

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use log::{log, Level};
use rand_core::{RngCore, SeedableRng};
use rand_wyrand::WyRand;

#[cfg(all(feature = "embedded", not(feature = "std")))]
use static_cell::StaticCell;

use binder::bind_transceivers;
use config::{RECEIVED_FRAME_QUEUE_SIZE, RX_FRAME_QUEUE_SIZE, TX_FRAME_QUEUE_SIZE};
use netif::{create_netif, InterfaceHandle};
use slots::SlotPool;

/// Bands this build brings up, after the interface-slot downgrade rule.
pub const ACTIVE_BANDS: BandSet = BandSet::resolve(
    cfg!(feature = "band-sub-ghz"),
    cfg!(feature = "band-24ghz"),
    NETIF_SLOT_COUNT,
);

/// Slot pairs backing the created interfaces: one per transceiver per
/// active band.
pub const SLOT_COUNT: usize = TRANSCEIVER_COUNT * ACTIVE_BANDS.count();

pub(crate) const MAX_INTERFACE_COUNT: usize = TRANSCEIVER_COUNT * Band::COUNT;
pub(crate) const NETIF_TASK_POOL: usize = if SLOT_COUNT == 0 { 1 } else { SLOT_COUNT };

pub(crate) type TxFrameQueue =
    embassy_sync::channel::Channel<CriticalSectionRawMutex, RadioFrame, TX_FRAME_QUEUE_SIZE>;
pub(crate) type TxFrameQueueSender =
    embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, RadioFrame, TX_FRAME_QUEUE_SIZE>;
pub(crate) type TxFrameQueueReceiver = embassy_sync::channel::Receiver<
    'static,
    CriticalSectionRawMutex,
    RadioFrame,
    TX_FRAME_QUEUE_SIZE,
>;

pub(crate) type RxFrameQueue =
    embassy_sync::channel::Channel<CriticalSectionRawMutex, ReceivedFrame, RX_FRAME_QUEUE_SIZE>;
pub(crate) type RxFrameQueueSender = embassy_sync::channel::Sender<
    'static,
    CriticalSectionRawMutex,
    ReceivedFrame,
    RX_FRAME_QUEUE_SIZE,
>;
pub(crate) type RxFrameQueueReceiver = embassy_sync::channel::Receiver<
    'static,
    CriticalSectionRawMutex,
    ReceivedFrame,
    RX_FRAME_QUEUE_SIZE,
>;

pub(crate) type ReceivedFrameQueue = embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    ReceivedFrame,
    RECEIVED_FRAME_QUEUE_SIZE,
>;
pub(crate) type ReceivedFrameQueueSender = embassy_sync::channel::Sender<
    'static,
    CriticalSectionRawMutex,
    ReceivedFrame,
    RECEIVED_FRAME_QUEUE_SIZE,
>;
pub(crate) type ReceivedFrameQueueReceiver = embassy_sync::channel::Receiver<
    'static,
    CriticalSectionRawMutex,
    ReceivedFrame,
    RECEIVED_FRAME_QUEUE_SIZE,
>;

#[cfg(all(feature = "embedded", not(feature = "std")))]
static DEVICE_SLOTS: StaticCell<[BandRadio; SLOT_COUNT]> = StaticCell::new();

#[cfg(all(feature = "embedded", not(feature = "std")))]
static STACK_SLOTS: StaticCell<[NetifStack; SLOT_COUNT]> = StaticCell::new();

#[cfg(all(feature = "embedded", not(feature = "std")))]
static TX_FRAME_QUEUES: [TxFrameQueue; SLOT_COUNT] = [const { Channel::new() }; SLOT_COUNT];

#[cfg(all(feature = "embedded", not(feature = "std")))]
static RX_FRAME_QUEUES: [RxFrameQueue; SLOT_COUNT] = [const { Channel::new() }; SLOT_COUNT];

#[cfg(all(feature = "embedded", not(feature = "std")))]
static RECEIVED_FRAME_QUEUE: ReceivedFrameQueue = Channel::new();

pub enum SendFrameError {
    ChannelFull,
    NotInited,
    NoSuchInterface,
}

pub enum ReceiveFrameError {
    NotInited,
}

enum RadioNetifManagerState {
    Uninitialized,
    Initialized {
        interfaces: Vec<InterfaceHandle, MAX_INTERFACE_COUNT>,
        received_frame_receiver: ReceivedFrameQueueReceiver,
    },
}

/// Owns the one-shot bring-up of every transceiver band and the frame
/// surface of the created interfaces.
///
/// `initialize` runs the whole sequence exactly once: it resolves the
/// active bands, pairs each transceiver with its device and stack slots,
/// runs the driver setup per chip and spawns one interface task per bound
/// slot. Calling it a second time is rejected before any storage is
/// touched.
pub struct RadioNetifManager {
    state: RadioNetifManagerState,
}

impl RadioNetifManager {
    pub const fn new() -> Self {
        RadioNetifManager {
            state: RadioNetifManagerState::Uninitialized,
        }
    }

    #[cfg(all(feature = "embedded", not(feature = "std")))]
    pub fn initialize(&mut self, spawner: Spawner, rng_seed: u64) -> Result<(), ()> {
        if let RadioNetifManagerState::Initialized { .. } = self.state {
            return Err(());
        }
        let device_slots = DEVICE_SLOTS
            .try_init([const { BandRadio::new() }; SLOT_COUNT])
            .ok_or(())?;
        let stack_slots = STACK_SLOTS
            .try_init([const { NetifStack::new() }; SLOT_COUNT])
            .ok_or(())?;
        return self.initialize_common(
            spawner,
            rng_seed,
            device_slots,
            stack_slots,
            &TX_FRAME_QUEUES,
            &RX_FRAME_QUEUES,
            &RECEIVED_FRAME_QUEUE,
        );
    }

    #[cfg(feature = "std")]
    pub fn initialize(&mut self, spawner: Spawner, rng_seed: u64) -> Result<(), ()> {
        if let RadioNetifManagerState::Initialized { .. } = self.state {
            return Err(());
        }
        let device_slots: &'static mut [BandRadio; SLOT_COUNT] =
            Box::leak(Box::new([const { BandRadio::new() }; SLOT_COUNT]));
        let stack_slots: &'static mut [NetifStack; SLOT_COUNT] =
            Box::leak(Box::new([const { NetifStack::new() }; SLOT_COUNT]));
        let tx_frame_queues: &'static [TxFrameQueue; SLOT_COUNT] =
            Box::leak(Box::new([const { Channel::new() }; SLOT_COUNT]));
        let rx_frame_queues: &'static [RxFrameQueue; SLOT_COUNT] =
            Box::leak(Box::new([const { Channel::new() }; SLOT_COUNT]));
        let received_frame_queue: &'static ReceivedFrameQueue = Box::leak(Box::new(Channel::new()));
        return self.initialize_common(
            spawner,
            rng_seed,
            device_slots,
            stack_slots,
            tx_frame_queues,
            rx_frame_queues,
            received_frame_queue,
        );
    }

    fn initialize_common(
        &mut self,
        spawner: Spawner,
        rng_seed: u64,
        device_slots: &'static mut [BandRadio],
        stack_slots: &'static mut [NetifStack],
        tx_frame_queues: &'static [TxFrameQueue],
        rx_frame_queues: &'static [RxFrameQueue],
        received_frame_queue: &'static ReceivedFrameQueue,
    ) -> Result<(), ()> {
        if cfg!(feature = "band-sub-ghz")
            && cfg!(feature = "band-24ghz")
            && !ACTIVE_BANDS.contains(Band::SubGhz)
        {
            log!(
                Level::Warn,
                "only one interface slot is provisioned, disabling the sub-GHz band"
            );
        }
        if ACTIVE_BANDS.is_empty() {
            log!(Level::Warn, "no radio band enabled, transceivers stay in reset");
        }

        let mut pool = SlotPool::new(device_slots, stack_slots, SLOT_COUNT)?;
        let mut rng = WyRand::seed_from_u64(rng_seed);
        let mut interfaces: Vec<InterfaceHandle, MAX_INTERFACE_COUNT> = Vec::new();

        bind_transceivers(&TRANSCEIVER_CONFIGS, ACTIVE_BANDS, &mut pool, |candidate| {
            let created = create_netif(
                &spawner,
                candidate,
                tx_frame_queues,
                rx_frame_queues,
                received_frame_queue.sender(),
                rng.next_u64(),
            )?;
            if let Some(handle) = created {
                interfaces.push(handle).map_err(|_| ())?;
            }
            Ok(())
        })?;

        if pool.remaining() != 0 {
            log!(Level::Warn, "{} slot pair(s) left unbound", pool.remaining());
        }
        log!(Level::Info, "{} radio interface(s) up", interfaces.len());

        self.state = RadioNetifManagerState::Initialized {
            interfaces,
            received_frame_receiver: received_frame_queue.receiver(),
        };
        Ok(())
    }

    pub fn interface_count(&self) -> usize {
        match &self.state {
            RadioNetifManagerState::Uninitialized => 0,
            RadioNetifManagerState::Initialized { interfaces, .. } => interfaces.len(),
        }
    }

    pub fn interface(&self, index: usize) -> Option<InterfaceInfo> {
        match &self.state {
            RadioNetifManagerState::Uninitialized => None,
            RadioNetifManagerState::Initialized { interfaces, .. } => {
                interfaces.get(index).map(|handle| handle.info)
            }
        }
    }

    /// Queue one outgoing frame on interface `index` (creation order).
    pub fn send_frame(&self, index: usize, frame: RadioFrame) -> Result<(), SendFrameError> {
        let interfaces = match &self.state {
            RadioNetifManagerState::Uninitialized => {
                return Err(SendFrameError::NotInited);
            }
            RadioNetifManagerState::Initialized { interfaces, .. } => interfaces,
        };
        let handle = interfaces
            .get(index)
            .ok_or(SendFrameError::NoSuchInterface)?;
        handle
            .tx_sender
            .try_send(frame)
            .map_err(|_| SendFrameError::ChannelFull)?;
        Ok(())
    }

    /// Wait for the next frame any interface received.
    pub async fn receive_frame(&self) -> Result<ReceivedFrame, ReceiveFrameError> {
        let receiver = match &self.state {
            RadioNetifManagerState::Uninitialized => {
                return Err(ReceiveFrameError::NotInited);
            }
            RadioNetifManagerState::Initialized {
                received_frame_receiver,
                ..
            } => received_frame_receiver,
        };
        return Ok(receiver.receive().await);
    }

    /// Push one frame into interface `index` as if its radio had received
    /// it. Driver interrupt glue and host-side simulations feed interfaces
    /// through this.
    pub fn inject_received_frame(
        &self,
        index: usize,
        received: ReceivedFrame,
    ) -> Result<(), SendFrameError> {
        let interfaces = match &self.state {
            RadioNetifManagerState::Uninitialized => {
                return Err(SendFrameError::NotInited);
            }
            RadioNetifManagerState::Initialized { interfaces, .. } => interfaces,
        };
        let handle = interfaces
            .get(index)
            .ok_or(SendFrameError::NoSuchInterface)?;
        handle
            .rx_injector
            .try_send(received)
            .map_err(|_| SendFrameError::ChannelFull)?;
        Ok(())
    }
}
