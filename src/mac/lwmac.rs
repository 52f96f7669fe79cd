use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Instant, Timer};
use log::{log, Level};
use rand_core::{RngCore, SeedableRng};
use rand_wyrand::WyRand;

use crate::netif::Netif;
use crate::NETIF_TASK_POOL;

pub(crate) const NETIF_NAME: &str = "dualband-lwmac";

const WAKEUP_PERIOD: Duration = Duration::from_millis(6);
const CYCLE_PERIOD: Duration = Duration::from_millis(100);
const TX_JITTER_MAX_US: u64 = 500;

/// Time left to sleep after an awake phase of the given length.
pub(crate) fn sleep_period(awake: Duration) -> Duration {
    match CYCLE_PERIOD.checked_sub(awake) {
        Some(left) => left,
        None => Duration::from_micros(0),
    }
}

/// LWMAC interface task: the radio listens during a short wake-up window of
/// every cycle and sleeps for the remainder. Outgoing frames are served
/// inside the wake-up window with a small random offset so neighbors on the
/// same cycle do not collide systematically.
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
    loop {
        // wake-up phase: listen and flush pending traffic
        let wakeup_start = Instant::now();
        netif.enter_rx();
        let wakeup_end = wakeup_start + WAKEUP_PERIOD;
        loop {
            let event = select3(
                netif.tx_receiver.receive(),
                netif.rx_receiver.receive(),
                Timer::at(wakeup_end),
            )
            .await;
            match event {
                Either3::First(frame) => {
                    Timer::after(Duration::from_micros(rng.next_u64() % TX_JITTER_MAX_US)).await;
                    netif.transmit(&frame);
                }
                Either3::Second(received) => {
                    netif.deliver(received);
                }
                Either3::Third(()) => break,
            }
        }

        // sleep phase until the next cycle
        netif.enter_sleep();
        Timer::after(sleep_period(wakeup_start.elapsed())).await;
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn sleep_fills_the_rest_of_the_cycle() {
        let awake = Duration::from_millis(6);
        assert_eq!(sleep_period(awake), Duration::from_millis(94));
    }

    #[test]
    fn an_overlong_awake_phase_skips_the_sleep() {
        let awake = Duration::from_millis(250);
        assert_eq!(sleep_period(awake), Duration::from_micros(0));
    }
}
