//! Device connection configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys.
    Strict,

    /// Accept and auto-learn unknown keys, but reject changed keys.
    #[default]
    AcceptNew,

    /// Accept all keys without checking. For lab use only.
    Disabled,
}

/// How the session authenticates.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Password authentication.
    Password(SecretString),

    /// Public key authentication.
    ///
    /// Tried in order: the explicit key `path` (or, without one, the default
    /// identities `~/.ssh/id_ed25519`, `id_ecdsa`, `id_rsa` that exist), then
    /// every identity of the ssh-agent when `SSH_AUTH_SOCK` is set.
    PrivateKey {
        path: Option<PathBuf>,
        passphrase: Option<SecretString>,
    },
}

/// Everything needed to open one device session.
///
/// Immutable once handed to a session.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Target host (hostname or IP address).
    pub target: String,

    /// SSH port (default: 22).
    pub port: u16,

    /// Username for authentication.
    pub user: String,

    /// Authentication method; key based when no password was given.
    pub auth: AuthMethod,

    /// Vendor tag selecting catalog templates and the prompt profile.
    pub device_type: String,

    /// Connection and per-command timeout.
    pub timeout: Duration,

    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file (default: `~/.ssh/known_hosts`).
    pub known_hosts_path: Option<PathBuf>,
}

impl ConnectionConfig {
    /// Create a configuration, choosing password auth when a password is
    /// given and key auth otherwise.
    pub fn new(
        target: impl Into<String>,
        user: impl Into<String>,
        password: Option<String>,
        device_type: impl Into<String>,
    ) -> Self {
        let auth = match password {
            Some(password) => AuthMethod::Password(SecretString::from(password)),
            None => AuthMethod::PrivateKey {
                path: None,
                passphrase: None,
            },
        };

        Self {
            target: target.into(),
            port: 22,
            user: user.into(),
            auth,
            device_type: device_type.into(),
            timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.target, self.port)
    }

    /// Check if password authentication is configured.
    pub fn uses_password(&self) -> bool {
        matches!(self.auth, AuthMethod::Password(_))
    }
}
