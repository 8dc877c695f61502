// src/sniff.rs
use crossbeam_channel::{unbounded, Receiver};
use pcap::{Active, Capture, Device, Linktype};
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

use crate::config::CaptureConfig;
use crate::error::CaptureError;

/// Link-layer framing of captured data, taken from the capture's datalink type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayer {
    Ethernet,
    RawIp,
    /// Linux cooked capture, used by the `any` device.
    LinuxSll,
    /// BSD loopback with a 4 byte address family header.
    Null,
    Unsupported,
}

impl From<Linktype> for LinkLayer {
    fn from(linktype: Linktype) -> Self {
        match linktype {
            Linktype::ETHERNET => LinkLayer::Ethernet,
            Linktype::RAW | Linktype::IPV4 | Linktype::IPV6 => LinkLayer::RawIp,
            Linktype::LINUX_SLL => LinkLayer::LinuxSll,
            Linktype::NULL | Linktype::LOOP => LinkLayer::Null,
            _ => LinkLayer::Unsupported,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedPacket {
    pub data: Vec<u8>,
    pub link: LinkLayer,
}

impl CapturedPacket {
    pub fn ethernet(data: Vec<u8>) -> Self {
        Self {
            data,
            link: LinkLayer::Ethernet,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn list_devices() -> Result<Vec<Device>, CaptureError> {
    let devices = Device::list().map_err(CaptureError::DeviceList)?;
    if devices.is_empty() {
        return Err(CaptureError::NoDevices);
    }
    Ok(devices)
}

pub fn open_capture(config: &CaptureConfig) -> Result<Capture<Active>, CaptureError> {
    list_devices()?;

    let device = match config.device.as_deref() {
        Some(name) => Device::from(name),
        None => Device::lookup()
            .map_err(CaptureError::DeviceList)?
            .ok_or(CaptureError::NoDefaultDevice)?,
    };
    let name = device.name.clone();

    let open_err = |source| CaptureError::Open {
        device: name.clone(),
        source,
    };
    let cap = Capture::from_device(device)
        .map_err(open_err)?
        .promisc(config.promiscuous)
        .snaplen(config.snaplen)
        .immediate_mode(true)
        .open()
        .map_err(open_err)?;

    info!("Capturing on {} (snaplen {})", name, config.snaplen);
    Ok(cap)
}

/// Moves the capture onto its own thread. The returned receiver disconnects
/// once the capture ends or fails.
pub fn spawn_capture(mut cap: Capture<Active>) -> (Receiver<CapturedPacket>, JoinHandle<()>) {
    let (tx, rx) = unbounded();
    let link = LinkLayer::from(cap.get_datalink());
    if link == LinkLayer::Unsupported {
        warn!("Unsupported link type {:?}, packets will not be classified", cap.get_datalink());
    }

    let handle = thread::spawn(move || loop {
        match cap.next_packet() {
            Ok(packet) => {
                let packet = CapturedPacket {
                    data: packet.data.to_vec(),
                    link,
                };
                if tx.send(packet).is_err() {
                    break;
                }
            }
            Err(pcap::Error::TimeoutExpired) => continue,
            Err(pcap::Error::NoMorePackets) => {
                info!("Capture finished");
                break;
            }
            Err(e) => {
                warn!("Packet capture error: {}", e);
                break;
            }
        }
    });

    (rx, handle)
}
