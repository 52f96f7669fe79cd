use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use log::{log, Level};
use rand_core::{RngCore, SeedableRng};
use rand_wyrand::WyRand;

use crate::netif::Netif;
use crate::NETIF_TASK_POOL;

pub(crate) const NETIF_NAME: &str = "dualband";

// aUnitBackoffPeriod: 20 symbols at 16 us per symbol
const UNIT_BACKOFF_US: u64 = 320;
const MIN_BACKOFF_EXPONENT: u8 = 3;
const MAX_BACKOFF_EXPONENT: u8 = 5;

/// Unslotted CSMA/CA backoff drawn before a transmission: a random number
/// of unit backoff periods in `[0, 2^BE)`.
pub(crate) fn backoff_duration(backoff_exponent: u8, rng: &mut WyRand) -> Duration {
    let exponent = backoff_exponent.clamp(MIN_BACKOFF_EXPONENT, MAX_BACKOFF_EXPONENT);
    let slots = rng.next_u32() % (1u32 << exponent);
    Duration::from_micros(slots as u64 * UNIT_BACKOFF_US)
}

/// Plain IEEE 802.15.4 interface task: the receiver stays on permanently,
/// outgoing frames go through one CSMA/CA backoff each.
#[embassy_executor::task(pool_size = NETIF_TASK_POOL)]
pub(crate) async fn netif_task(mut netif: Netif) -> ! {
    let mut rng = WyRand::seed_from_u64(netif.rng_seed);
    log!(
        Level::Info,
        "{} interface task started on the {} band (priority {})",
        NETIF_NAME,
        netif.band.label(),
        netif.priority
    );
    netif.enter_rx();
    loop {
        let event = select(netif.tx_receiver.receive(), netif.rx_receiver.receive()).await;
        match event {
            Either::First(frame) => {
                Timer::after(backoff_duration(MIN_BACKOFF_EXPONENT, &mut rng)).await;
                netif.transmit(&frame);
            }
            Either::Second(received) => {
                netif.deliver(received);
            }
        }
    }
}
