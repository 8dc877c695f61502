use clap::Parser;
use crossbeam_channel::tick;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use netwatch::config::{self, CaptureConfig};
use netwatch::monitor;
use netwatch::report::WindowReporter;
use netwatch::sniff;
use netwatch::{logging, TrafficWindow};

/// Counts live traffic per network protocol and reports it every window.
#[derive(Parser, Debug)]
#[command(name = "netwatch", version)]
struct Cli {
    /// Capture interface; overrides CAPTURE_DEVICE
    #[arg(short, long)]
    interface: Option<String>,

    /// Reporting window in seconds
    #[arg(long, default_value_t = config::DEFAULT_REPORT_INTERVAL.as_secs())]
    interval: u64,

    /// Append-only traffic log
    #[arg(long, default_value = config::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Print the capture devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    config::load_env();
    let cli = Cli::parse();

    if cli.list_devices {
        for device in sniff::list_devices()? {
            println!("{}\t{}", device.name, device.desc.as_deref().unwrap_or(""));
        }
        return Ok(());
    }

    let mut settings = CaptureConfig::from_env();
    if cli.interface.is_some() {
        settings.device = cli.interface;
    }
    settings.report_interval = Duration::from_secs(cli.interval.max(1));
    settings.log_file = cli.log_file;

    let cap = sniff::open_capture(&settings)?;
    let (packets, capture_thread) = sniff::spawn_capture(cap);

    let reporter = WindowReporter::new(&settings.log_file, settings.report_interval);
    let ticks = tick(settings.report_interval);
    let mut window = TrafficWindow::new();

    let stats = monitor::run(&packets, &ticks, &mut window, &reporter);
    info!(
        "Capture ended: {} packets, {} alerts, {} reports",
        stats.packets, stats.alerts, stats.reports
    );

    if capture_thread.join().is_err() {
        warn!("Capture thread panicked");
    }
    Ok(())
}
