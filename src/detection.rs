use tracing::warn;

/// Literal payload that raises the DNS alert. This is a placeholder signal, not a
/// real anomaly detector: only an exact match counts.
pub const SUSPICIOUS_DNS_MARKER: &[u8] = b"unusual DNS query pattern";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    UnusualDnsQuery,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::UnusualDnsQuery => "Alert: Unusual DNS query pattern detected!",
        }
    }

    pub fn emit(&self) {
        println!("{}", self.message());
        warn!("{}", self.message());
    }
}

pub fn detect(payload: &[u8]) -> Option<Alert> {
    (payload == SUSPICIOUS_DNS_MARKER).then_some(Alert::UnusualDnsQuery)
}
