use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "collab-server", about = "Relay server for the collaborative workspace")]
pub struct Config {
    #[arg(long, env = "COLLAB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "COLLAB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Artificial latency of the compile endpoint.
    #[arg(long, env = "COLLAB_EXECUTION_DELAY_MS", default_value_t = 1000)]
    pub execution_delay_ms: u64,

    /// Origin allowed by CORS. Any origin when omitted.
    #[arg(long, env = "COLLAB_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Capacity of each connection's outbound queue.
    #[arg(long, env = "COLLAB_CHANNEL_CAPACITY", default_value_t = 64)]
    pub channel_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub channel_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct ExecutionSettings {
    pub delay: Duration,
}

impl Config {
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            channel_capacity: self.channel_capacity.max(1),
        }
    }

    pub fn execution_settings(&self) -> ExecutionSettings {
        ExecutionSettings {
            delay: Duration::from_millis(self.execution_delay_ms),
        }
    }
}
