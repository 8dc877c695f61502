pub mod config;
pub mod detection;
pub mod error;
pub mod intake;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod parser;
pub mod relay;
pub mod report;
pub mod sniff;

pub use models::{TrafficWindow, WindowSnapshot};
pub use sniff::{CapturedPacket, LinkLayer};
