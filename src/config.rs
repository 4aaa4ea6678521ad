//! Connection and polling configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::CommInterface;

/// Connection settings for reaching a controller.
///
/// The defaults match a factory-configured controller on its point-to-point
/// network. Construct with [`Default::default`] and override via the `with_*`
/// builders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectionConfig {
    /// Controller IP address.
    pub ip_address: String,
    /// Netmask for the control link.
    pub netmask: String,
    /// Gateway for the control link.
    pub gateway: String,
    /// Control port.
    pub port: u16,
    /// Host-to-controller communication interface.
    pub interface: CommInterface,
    /// Device number, for hosts with more than one controller attached.
    pub device_number: u8,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            ip_address: "192.168.200.1".to_string(),
            netmask: "255.255.255.0".to_string(),
            gateway: "0.0.0.0".to_string(),
            port: 5005,
            interface: CommInterface::default(),
            device_number: 0,
        }
    }
}

impl ConnectionConfig {
    /// Set the controller IP address (builder pattern).
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = ip_address.into();
        self
    }

    /// Set the communication interface (builder pattern).
    pub fn with_interface(mut self, interface: CommInterface) -> Self {
        self.interface = interface;
        self
    }

    /// Set the device number (builder pattern).
    pub fn with_device_number(mut self, device_number: u8) -> Self {
        self.device_number = device_number;
        self
    }

    /// Set the control port (builder pattern).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Run-state polling parameters.
///
/// State waits sleep for `interval` between queries instead of spinning, and
/// give up after `timeout`; `None` waits forever, preserving the blocking
/// behavior of a hardware run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PollConfig {
    /// Sleep between consecutive state queries.
    pub interval: Duration,
    /// Give up after this long; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5),
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl PollConfig {
    /// Set the polling interval (builder pattern).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the timeout; `None` waits forever (builder pattern).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_defaults_match_factory_settings() {
        let config = ConnectionConfig::default();
        assert_eq!(config.ip_address, "192.168.200.1");
        assert_eq!(config.netmask, "255.255.255.0");
        assert_eq!(config.gateway, "0.0.0.0");
        assert_eq!(config.port, 5005);
        assert_eq!(config.interface, CommInterface::Usb2);
        assert_eq!(config.device_number, 0);
    }

    #[test]
    fn test_connection_builders_override_defaults() {
        let config = ConnectionConfig::default()
            .with_ip_address("10.0.0.2")
            .with_interface(CommInterface::Usb3)
            .with_device_number(2)
            .with_port(6000);
        assert_eq!(config.ip_address, "10.0.0.2");
        assert_eq!(config.interface, CommInterface::Usb3);
        assert_eq!(config.device_number, 2);
        assert_eq!(config.port, 6000);
    }

    #[test]
    fn test_poll_defaults_are_bounded() {
        let config = PollConfig::default();
        assert!(config.interval > Duration::ZERO);
        assert!(config.timeout.is_some());
    }
}
