//! Builder for device sessions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use super::actor::spawn_session;
use super::handle::SessionHandle;
use crate::catalog::CommandCatalog;
use crate::error::{Result, SessionError};
use crate::transport::{AuthMethod, ConnectionConfig, Connector, HostKeyVerification, SshConnector};

/// Builder for configuring and starting a session.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use netcli::{CommandCatalog, SessionBuilder};
///
/// # async fn example() -> Result<(), netcli::Error> {
/// let mut session = SessionBuilder::new("192.168.1.1")
///     .username("admin")
///     .device_type("juniper_junos")
///     .spawn(Arc::new(CommandCatalog::new()))?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    target: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    key_path: Option<PathBuf>,
    passphrase: Option<String>,
    device_type: Option<String>,
    timeout: Duration,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            port: 22,
            username: None,
            password: None,
            key_path: None,
            passphrase: None,
            device_type: None,
            timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication. Without a password, key authentication
    /// is used.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Use a specific private key instead of the default identities.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.key_path = Some(key_path.into());
        self
    }

    /// Set the passphrase for an encrypted private key.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Set the device type (e.g., "cisco_ios", "juniper_junos").
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    /// Set the connection and per-command timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Accept any host key. For lab use only.
    pub fn danger_disable_host_key_verification(self) -> Self {
        self.host_key_verification(HostKeyVerification::Disabled)
    }

    /// Use a custom known_hosts file.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the connection configuration without starting a session.
    pub fn build(self) -> Result<ConnectionConfig> {
        let user = self.username.ok_or_else(|| SessionError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        let device_type = self.device_type.ok_or_else(|| SessionError::InvalidConfig {
            message: "Device type must be specified".to_string(),
        })?;

        if self.target.trim().is_empty() {
            return Err(SessionError::InvalidConfig {
                message: "Target host is required".to_string(),
            }
            .into());
        }

        let auth = match self.password {
            Some(password) => AuthMethod::Password(SecretString::from(password)),
            None => AuthMethod::PrivateKey {
                path: self.key_path,
                passphrase: self.passphrase.map(SecretString::from),
            },
        };

        Ok(ConnectionConfig {
            target: self.target,
            port: self.port,
            user,
            auth,
            device_type,
            timeout: self.timeout,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        })
    }

    /// Start an SSH session.
    ///
    /// Must be called from within a tokio runtime. The connection is
    /// attempted in the background; await
    /// [`SessionHandle::connected`] for the outcome.
    pub fn spawn(self, catalog: Arc<CommandCatalog>) -> Result<SessionHandle> {
        self.spawn_with(SshConnector::new(), catalog)
    }

    /// Start a session over any connector.
    pub fn spawn_with<C: Connector>(
        self,
        connector: C,
        catalog: Arc<CommandCatalog>,
    ) -> Result<SessionHandle> {
        let config = self.build()?;
        Ok(spawn_session(config, catalog, connector))
    }
}
