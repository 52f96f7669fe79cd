// Host-mode bring-up demo: initializes every configured transceiver band,
// then loops frames through the created interfaces.

use dualband_radio_netif::{RadioFrame, RadioNetifManager, ReceivedFrame};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use env_logger::Builder;
use log::LevelFilter;
use log::{log, Level};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    Builder::new().filter_level(LevelFilter::Debug).init();

    log!(Level::Info, "bringing up radio interfaces");
    let mut manager_temp = RadioNetifManager::new();
    if manager_temp.initialize(spawner, 0x1234).is_err() {
        log!(Level::Error, "radio interface bring-up failed");
        return;
    }
    let manager: &'static RadioNetifManager = Box::leak(Box::new(manager_temp));

    for index in 0..manager.interface_count() {
        if let Some(info) = manager.interface(index) {
            log!(
                Level::Info,
                "interface {}: {} on the {} band (slot {}, priority {})",
                index,
                info.name,
                info.band.label(),
                info.slot_index,
                info.priority
            );
        }
    }

    let mut sequence: u8 = 0;
    loop {
        sequence = sequence.wrapping_add(1);
        for index in 0..manager.interface_count() {
            let payload = [sequence; 16];
            if manager
                .send_frame(index, RadioFrame::new_from_slice(&payload))
                .is_err()
            {
                log!(Level::Error, "failed to queue frame on interface {}", index);
            }
            // pretend the radio heard its own transmission
            let echoed = ReceivedFrame {
                frame: RadioFrame::new_from_slice(&payload),
                link_quality: 63,
            };
            if manager.inject_received_frame(index, echoed).is_err() {
                log!(Level::Error, "failed to inject frame on interface {}", index);
            }
        }

        for _ in 0..manager.interface_count() {
            if let Ok(received) = manager.receive_frame().await {
                log!(
                    Level::Info,
                    "received {} byte frame (link quality {})",
                    received.frame.length,
                    received.link_quality
                );
            }
        }
        Timer::after(Duration::from_secs(5)).await;
    }
}
