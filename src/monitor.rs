use crossbeam_channel::{never, select, Receiver};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::detection::{detect, Alert};
use crate::models::TrafficWindow;
use crate::parser::decode;
use crate::report::WindowReporter;
use crate::sniff::CapturedPacket;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub packets: u64,
    pub alerts: u64,
    pub reports: u64,
}

/// Counts the packet against its network protocol and checks its payload for the
/// alert marker. Either check is skipped when the layer it needs is missing.
pub fn classify(packet: &CapturedPacket, window: &mut TrafficWindow) -> Option<Alert> {
    let decoded = decode(packet);

    if let Some(protocol) = decoded.network {
        window.record(protocol.as_str(), decoded.length as u64);
    }

    decoded.payload.and_then(detect)
}

/// Drives classification and reporting from a single wait point so the two never
/// interleave. Returns when the packet stream disconnects.
pub fn run(
    packets: &Receiver<CapturedPacket>,
    ticks: &Receiver<Instant>,
    window: &mut TrafficWindow,
    reporter: &WindowReporter,
) -> LoopStats {
    let mut stats = LoopStats::default();
    let mut ticks = ticks.clone();

    loop {
        select! {
            recv(packets) -> msg => match msg {
                Ok(packet) => {
                    stats.packets += 1;
                    if let Some(alert) = classify(&packet, window) {
                        stats.alerts += 1;
                        alert.emit();
                    }
                }
                Err(_) => {
                    info!("Packet stream closed after {} packets", stats.packets);
                    break;
                }
            },
            recv(ticks) -> tick => match tick {
                Ok(_) => {
                    debug!("Reporting window");
                    reporter.report(window);
                    stats.reports += 1;
                }
                Err(_) => {
                    warn!("Report timer closed, no further windows will be reported");
                    ticks = never();
                }
            },
        }
    }

    stats
}
