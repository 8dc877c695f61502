use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No capture devices found. Try running with sudo or setting capabilities: sudo setcap cap_net_raw,cap_net_admin=eip ./netwatch")]
    NoDevices,

    #[error("Failed to list capture devices: {0}")]
    DeviceList(#[source] pcap::Error),

    #[error("No default capture device; set CAPTURE_DEVICE or pass --interface")]
    NoDefaultDevice,

    #[error("Failed to open capture on '{device}': {source}")]
    Open {
        device: String,
        #[source]
        source: pcap::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a TCP port number, got '{0}'")]
    InvalidPort(String),
}
