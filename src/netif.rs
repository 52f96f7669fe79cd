use embassy_executor::Spawner;
use log::{log, Level};

use crate::band::Band;
use crate::binder::BoundInterface;
use crate::frame::{RadioFrame, ReceivedFrame};
use crate::mac;
use crate::slots::NetifStack;
use crate::transceiver::{BandRadio, RadioState};
use crate::{
    ReceivedFrameQueueSender, RxFrameQueue, RxFrameQueueReceiver, RxFrameQueueSender,
    TxFrameQueue, TxFrameQueueReceiver, TxFrameQueueSender,
};

/// Description of one created network interface.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct InterfaceInfo {
    pub band: Band,
    pub slot_index: usize,
    pub priority: u8,
    pub name: &'static str,
}

pub(crate) struct InterfaceHandle {
    pub(crate) info: InterfaceInfo,
    pub(crate) tx_sender: TxFrameQueueSender,
    pub(crate) rx_injector: RxFrameQueueSender,
}

/// State owned by one interface task: the device slot, the stack slot and
/// the queue endpoints wiring the interface into the rest of the system.
pub(crate) struct Netif {
    pub(crate) device: &'static mut BandRadio,
    pub(crate) stack: &'static mut NetifStack,
    pub(crate) band: Band,
    pub(crate) priority: u8,
    pub(crate) tx_receiver: TxFrameQueueReceiver,
    pub(crate) rx_receiver: RxFrameQueueReceiver,
    pub(crate) upper_sender: ReceivedFrameQueueSender,
    pub(crate) rng_seed: u64,
}

impl Netif {
    /// Assemble one outgoing frame in the interface workspace and push it
    /// through the radio.
    pub(crate) fn transmit(&mut self, frame: &RadioFrame) {
        let payload = frame.payload();
        let psdu_len = payload.len().min(self.stack.buf.len());
        self.stack.buf[..psdu_len].copy_from_slice(&payload[..psdu_len]);
        self.device.transmit(&self.stack.buf[..psdu_len]);
    }

    /// Hand one received frame to the upper layer.
    pub(crate) fn deliver(&self, received: ReceivedFrame) {
        match self.upper_sender.try_send(received) {
            Ok(_) => {}
            Err(embassy_sync::channel::TrySendError::Full(_)) => {
                log!(
                    Level::Warn,
                    "received-frame queue full, dropping {} frame",
                    self.band.label()
                );
            }
        }
    }

    pub(crate) fn enter_rx(&mut self) {
        self.device.set_state(RadioState::Rx);
    }

    #[cfg(any(feature = "gomac", feature = "lwmac"))]
    pub(crate) fn enter_sleep(&mut self) {
        self.device.set_state(RadioState::Sleep);
    }
}

/// Create one network-interface execution unit for a bound slot.
///
/// `None` means the band is not active for this transceiver; nothing is
/// created and the call is a deliberate no-op. For a bound candidate the
/// slot's queues are wired up and one interface task is spawned running the
/// build's media-access strategy; the task is fire-and-forget and lives for
/// the rest of the process.
pub(crate) fn create_netif(
    spawner: &Spawner,
    candidate: Option<BoundInterface>,
    tx_queues: &'static [TxFrameQueue],
    rx_queues: &'static [RxFrameQueue],
    upper_sender: ReceivedFrameQueueSender,
    rng_seed: u64,
) -> Result<Option<InterfaceHandle>, ()> {
    let Some(bound) = candidate else {
        return Ok(None);
    };

    let tx_queue = tx_queues.get(bound.slot_index).ok_or(())?;
    let rx_queue = rx_queues.get(bound.slot_index).ok_or(())?;

    let info = InterfaceInfo {
        band: bound.band,
        slot_index: bound.slot_index,
        priority: bound.priority,
        name: mac::NETIF_NAME,
    };

    let netif = Netif {
        device: bound.device,
        stack: bound.stack,
        band: bound.band,
        priority: bound.priority,
        tx_receiver: tx_queue.receiver(),
        rx_receiver: rx_queue.receiver(),
        upper_sender,
        rng_seed,
    };

    spawner.spawn(mac::netif_task(netif)).map_err(|_| ())?;
    log!(
        Level::Info,
        "{} interface created for the {} band (slot {}, priority {})",
        info.name,
        info.band.label(),
        info.slot_index,
        info.priority
    );

    Ok(Some(InterfaceHandle {
        info,
        tx_sender: tx_queue.sender(),
        rx_injector: rx_queue.sender(),
    }))
}
