use std::time::Duration;

use shared::DEFAULT_PORT;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Period of the hub's stats log line; `None` turns it off.
    pub stats_interval: Option<Duration>,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, stats_interval_secs: u64) -> Self {
        Self {
            bind_addr: format!("{}:{}", host, port),
            stats_interval: (stats_interval_secs > 0)
                .then(|| Duration::from_secs(stats_interval_secs)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_PORT, 60)
    }
}
