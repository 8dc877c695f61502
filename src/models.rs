pub mod domain {
    use std::collections::HashMap;

    use super::dto::WindowSnapshot;

    /// Per-protocol packet counts and byte usage for the current reporting window.
    ///
    /// Keys are never removed: `reset` zeroes every entry so protocols seen in an
    /// earlier window keep showing up with zero values.
    #[derive(Debug, Default, Clone)]
    pub struct TrafficWindow {
        protocol_counts: HashMap<String, u64>,
        bandwidth_usage: HashMap<String, u64>,
    }

    impl TrafficWindow {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn record(&mut self, protocol: &str, bytes: u64) {
            *self.protocol_counts.entry(protocol.to_string()).or_insert(0) += 1;
            *self.bandwidth_usage.entry(protocol.to_string()).or_insert(0) += bytes;
        }

        pub fn count(&self, protocol: &str) -> Option<u64> {
            self.protocol_counts.get(protocol).copied()
        }

        pub fn bytes(&self, protocol: &str) -> Option<u64> {
            self.bandwidth_usage.get(protocol).copied()
        }

        pub fn is_empty(&self) -> bool {
            self.protocol_counts.is_empty() && self.bandwidth_usage.is_empty()
        }

        pub fn snapshot(&self) -> WindowSnapshot {
            WindowSnapshot {
                protocol_counts: self
                    .protocol_counts
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
                bandwidth_usage: self
                    .bandwidth_usage
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
            }
        }

        pub fn reset(&mut self) {
            self.protocol_counts.values_mut().for_each(|v| *v = 0);
            self.bandwidth_usage.values_mut().for_each(|v| *v = 0);
        }
    }
}

pub mod dto {
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize, Clone, PartialEq, Eq)]
    pub struct WindowSnapshot {
        pub protocol_counts: BTreeMap<String, u64>,
        pub bandwidth_usage: BTreeMap<String, u64>,
    }
}

pub use domain::TrafficWindow;
pub use dto::WindowSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_per_protocol() {
        let mut window = TrafficWindow::new();
        window.record("IPv4", 60);
        window.record("IPv4", 1500);
        window.record("IPv6", 86);

        assert_eq!(window.count("IPv4"), Some(2));
        assert_eq!(window.bytes("IPv4"), Some(1560));
        assert_eq!(window.count("IPv6"), Some(1));
        assert_eq!(window.bytes("IPv6"), Some(86));
        assert_eq!(window.count("ARP"), None);
    }

    #[test]
    fn reset_zeroes_values_and_keeps_keys() {
        let mut window = TrafficWindow::new();
        window.record("IPv4", 60);
        window.record("IPv6", 86);
        window.reset();

        let snapshot = window.snapshot();
        assert_eq!(snapshot.protocol_counts.len(), 2);
        assert!(snapshot.protocol_counts.values().all(|v| *v == 0));
        assert!(snapshot.bandwidth_usage.values().all(|v| *v == 0));
        assert_eq!(window.count("IPv4"), Some(0));
        assert_eq!(window.bytes("IPv6"), Some(0));
        assert!(!window.is_empty());
    }

    #[test]
    fn counts_restart_after_reset() {
        let mut window = TrafficWindow::new();
        window.record("IPv4", 100);
        window.reset();
        window.record("IPv4", 40);

        assert_eq!(window.count("IPv4"), Some(1));
        assert_eq!(window.bytes("IPv4"), Some(40));
    }

    #[test]
    fn snapshot_is_sorted_by_protocol() {
        let mut window = TrafficWindow::new();
        window.record("IPv6", 1);
        window.record("IPv4", 2);

        let snapshot = window.snapshot();
        let keys: Vec<_> = snapshot.protocol_counts.keys().cloned().collect();
        assert_eq!(keys, vec!["IPv4".to_string(), "IPv6".to_string()]);
    }
}
