use embassy_futures::select::{select, select3, Either, Either3};
use embassy_time::{Duration, Instant, Timer};
use log::{log, Level};
use rand_core::{RngCore, SeedableRng};
use rand_wyrand::WyRand;

use crate::netif::Netif;
use crate::NETIF_TASK_POOL;

pub(crate) const NETIF_NAME: &str = "dualband-gomac";

const CONTROL_PERIOD: Duration = Duration::from_millis(10);
const DATA_PERIOD: Duration = Duration::from_millis(40);
const CYCLE_PERIOD: Duration = Duration::from_millis(200);
const TX_BACKOFF_MAX_US: u64 = 2000;

/// Time left to sleep after the control and data phases of one cycle.
pub(crate) fn sleep_period(awake: Duration) -> Duration {
    match CYCLE_PERIOD.checked_sub(awake) {
        Some(left) => left,
        None => Duration::from_micros(0),
    }
}

/// GoMAC interface task: each cycle starts with a control phase in which the
/// radio only listens, followed by a data phase serving queued
/// transmissions with a random backoff each, and ends asleep until the next
/// cycle.
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
        // control phase: receive only, transmissions stay queued
        let cycle_start = Instant::now();
        netif.enter_rx();
        let control_end = cycle_start + CONTROL_PERIOD;
        loop {
            let event = select(netif.rx_receiver.receive(), Timer::at(control_end)).await;
            match event {
                Either::First(received) => netif.deliver(received),
                Either::Second(()) => break,
            }
        }

        // data phase: serve queued transmissions
        let data_end = control_end + DATA_PERIOD;
        loop {
            let event = select3(
                netif.tx_receiver.receive(),
                netif.rx_receiver.receive(),
                Timer::at(data_end),
            )
            .await;
            match event {
                Either3::First(frame) => {
                    Timer::after(Duration::from_micros(rng.next_u64() % TX_BACKOFF_MAX_US)).await;
                    netif.transmit(&frame);
                }
                Either3::Second(received) => {
                    netif.deliver(received);
                }
                Either3::Third(()) => break,
            }
        }

        // sleep until the next cycle
        netif.enter_sleep();
        Timer::after(sleep_period(cycle_start.elapsed())).await;
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn sleep_fills_the_rest_of_the_cycle() {
        let awake = CONTROL_PERIOD + DATA_PERIOD;
        assert_eq!(sleep_period(awake), Duration::from_millis(150));
    }

    #[test]
    fn an_overlong_cycle_skips_the_sleep() {
        assert_eq!(sleep_period(Duration::from_millis(500)), Duration::from_micros(0));
    }
}
