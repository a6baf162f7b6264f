use std::env;

use log::*;

const DEFAULT_BZR_HOST: &str = "127.0.0.1";
const DEFAULT_BZR_PORT: u16 = 8460;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 32;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Capacity of each in-process event channel. Publication applies backpressure once a
    /// channel is full.
    pub event_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BZR_HOST.to_string(),
            port: DEFAULT_BZR_PORT,
            database_url: String::default(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BZR_HOST").ok().unwrap_or_else(|| DEFAULT_BZR_HOST.into());
        let port = env::var("BZR_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for BZR_PORT. {e} Using the default, {DEFAULT_BZR_PORT}, instead.");
                    DEFAULT_BZR_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BZR_PORT);
        let database_url = env::var("BZR_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ BZR_DATABASE_URL is not set. Please set it to the URL for the Bazaar database.");
            String::default()
        });
        let event_buffer_size = env::var("BZR_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| {
                s.parse::<usize>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for BZR_EVENT_BUFFER_SIZE. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        Self { host, port, database_url, event_buffer_size }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8460);
        assert_eq!(config.event_buffer_size, 32);
    }
}
