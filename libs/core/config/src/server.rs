use crate::{ConfigError, FromEnv, env_parse};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Listen address of an HTTP binary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080)
    }
}

/// Environment variables:
/// - `HOST` (default: 0.0.0.0)
/// - `PORT` (default: 8080)
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_parse("HOST", "0.0.0.0")?,
            port: env_parse("PORT", "8080")?,
        })
    }
}
