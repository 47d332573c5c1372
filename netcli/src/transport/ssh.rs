//! SSH transport implementation using russh.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use russh::client::{self, Handle};
use russh::keys::agent::client::AgentClient;
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use secrecy::ExposeSecret;

use super::config::{AuthMethod, ConnectionConfig, HostKeyVerification};
use super::{Connector, Transport};
use crate::channel::PtyChannel;
use crate::error::{Result, TransportError};
use crate::platform::{PlatformDefinition, PlatformRegistry};

/// Keepalive interval for idle interactive sessions.
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Identities tried, in order, when no key path is configured.
const DEFAULT_IDENTITIES: [&str; 3] = ["id_ed25519", "id_ecdsa", "id_rsa"];

/// Opens [`SshTransport`]s, picking the prompt profile from the device type.
#[derive(Debug, Clone)]
pub struct SshConnector {
    registry: Arc<PlatformRegistry>,
}

impl SshConnector {
    /// Create a connector using the built-in platforms.
    pub fn new() -> Self {
        Self::with_registry(PlatformRegistry::with_builtin_platforms())
    }

    /// Create a connector with a custom platform registry.
    pub fn with_registry(registry: PlatformRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

impl Default for SshConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for SshConnector {
    type Transport = SshTransport;

    async fn connect(&self, config: &ConnectionConfig) -> Result<SshTransport> {
        let platform = self.registry.resolve(&config.device_type);
        SshTransport::connect(config, platform).await
    }
}

/// SSH transport driving an interactive shell on the device.
pub struct SshTransport {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// Interactive shell channel.
    channel: PtyChannel,

    /// Prompt profile for the device type.
    platform: PlatformDefinition,

    /// Per-command timeout.
    timeout: Duration,
}

impl SshTransport {
    /// Connect, authenticate, open a shell and prepare the terminal.
    pub async fn connect(config: &ConnectionConfig, platform: PlatformDefinition) -> Result<Self> {
        let ssh_config = Arc::new(client::Config {
            keepalive_interval: Some(KEEPALIVE_INTERVAL),
            ..Default::default()
        });

        let host_key_error: Arc<Mutex<Option<TransportError>>> = Arc::new(Mutex::new(None));

        let handler = SshHandler {
            host: config.target.clone(),
            port: config.port,
            host_key_verification: config.host_key_verification.clone(),
            known_hosts_path: config.known_hosts_path.clone(),
            host_key_error: host_key_error.clone(),
        };

        debug!("connecting to {} as {}", config.socket_addr(), config.user);
        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(ssh_config, (config.target.as_str(), config.port), handler),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|e| {
            // Prefer the detailed host key error over russh's generic one
            host_key_error
                .lock()
                .ok()
                .and_then(|mut slot| slot.take())
                .unwrap_or(TransportError::Ssh(e))
        })?;

        Self::authenticate(&mut session, config).await?;

        let channel = session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;
        channel
            .request_pty(
                true,
                "xterm",
                platform.terminal_width,
                platform.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(TransportError::Ssh)?;
        channel
            .request_shell(true)
            .await
            .map_err(TransportError::Ssh)?;

        let mut transport = Self {
            session,
            channel: PtyChannel::new(channel),
            platform,
            timeout: config.timeout,
        };

        transport
            .channel
            .read_until_prompt(&transport.platform.prompt_pattern, transport.timeout)
            .await?;

        for command in transport.platform.on_open_commands.clone() {
            debug!("{}: on open: {}", transport.platform.name, command);
            transport.send_command(&command).await?;
        }

        Ok(transport)
    }

    /// Get the platform profile in use.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Authenticate with the server.
    async fn authenticate(session: &mut Handle<SshHandler>, config: &ConnectionConfig) -> Result<()> {
        let success = match &config.auth {
            AuthMethod::Password(password) => session
                .authenticate_password(&config.user, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::PrivateKey { path, passphrase } => {
                let candidates = match path {
                    Some(path) => vec![path.clone()],
                    None => default_identities(),
                };
                let use_agent = std::env::var_os("SSH_AUTH_SOCK").is_some();
                ensure_key_source(&candidates, use_agent)?;

                let passphrase = passphrase.as_ref().map(|p| p.expose_secret());
                let mut success = false;
                for candidate in &candidates {
                    match Self::authenticate_key(session, &config.user, candidate, passphrase).await
                    {
                        Ok(true) => {
                            success = true;
                            break;
                        }
                        Ok(false) => {}
                        // Move on to the next default identity
                        Err(e) if path.is_none() => warn!("Skipping identity: {}", e),
                        Err(e) => return Err(e),
                    }
                }

                if !success && use_agent {
                    success = Self::authenticate_agent(session, &config.user).await?;
                }
                success
            }
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.user.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Try a single private key.
    async fn authenticate_key(
        session: &mut Handle<SshHandler>,
        user: &str,
        path: &Path,
        passphrase: Option<&str>,
    ) -> Result<bool> {
        let key = load_secret_key(path, passphrase)
            .map_err(|e| TransportError::Key(format!("{}: {}", path.display(), e)))?;

        // Get the best RSA hash algorithm supported by the server
        let hash_alg = session
            .best_supported_rsa_hash()
            .await
            .map_err(TransportError::Ssh)?
            .flatten();

        let result = session
            .authenticate_publickey(user, PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg))
            .await
            .map_err(TransportError::Ssh)?;

        debug!("public key {} accepted: {}", path.display(), result.success());
        Ok(result.success())
    }

    /// Offer every identity held by the ssh-agent at `SSH_AUTH_SOCK`.
    async fn authenticate_agent(session: &mut Handle<SshHandler>, user: &str) -> Result<bool> {
        let mut agent = AgentClient::connect_env()
            .await
            .map_err(|e| TransportError::Key(format!("ssh-agent: {}", e)))?;
        let identities = agent
            .request_identities()
            .await
            .map_err(|e| TransportError::Key(format!("ssh-agent: {}", e)))?;

        let rsa_hash = session
            .best_supported_rsa_hash()
            .await
            .map_err(TransportError::Ssh)?
            .flatten();

        for key in identities {
            let hash_alg = if key.algorithm().is_rsa() { rsa_hash } else { None };
            let result = session
                .authenticate_publickey_with(user, key, hash_alg, &mut agent)
                .await
                .map_err(|e| TransportError::Key(format!("ssh-agent: {}", e)))?;
            if result.success() {
                debug!("ssh-agent identity accepted for {}", user);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Transport for SshTransport {
    async fn send_command(&mut self, command: &str) -> Result<String> {
        self.channel.send_line(command).await?;
        let raw = self
            .channel
            .read_until_prompt(&self.platform.prompt_pattern, self.timeout)
            .await?;
        Ok(self.platform.normalize_output(&raw, command))
    }

    async fn close(self) -> Result<()> {
        if let Err(e) = self.channel.close().await {
            debug!("closing shell channel: {}", e);
        }
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// Existing default identity files under `~/.ssh`.
fn default_identities() -> Vec<PathBuf> {
    match std::env::var_os("HOME") {
        Some(home) => identities_in(&PathBuf::from(home).join(".ssh")),
        None => vec![],
    }
}

/// Default identity files present in `ssh_dir`, in preference order.
fn identities_in(ssh_dir: &Path) -> Vec<PathBuf> {
    DEFAULT_IDENTITIES
        .iter()
        .map(|name| ssh_dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Fail early when key authentication has nothing to offer.
fn ensure_key_source(
    candidates: &[PathBuf],
    use_agent: bool,
) -> std::result::Result<(), TransportError> {
    if candidates.is_empty() && !use_agent {
        return Err(TransportError::Key(
            "no password given, no private key found in ~/.ssh and no ssh-agent".to_string(),
        ));
    }
    Ok(())
}

/// SSH client handler for russh.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Stores a detailed host-key error so connect() can surface it
    /// instead of the generic russh::Error::UnknownKey.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    /// Apply the configured host key policy to the server's key.
    fn verify_host_key(&self, key: &PublicKey) -> std::result::Result<(), TransportError> {
        if self.host_key_verification == HostKeyVerification::Disabled {
            return Ok(());
        }

        let known = match &self.known_hosts_path {
            Some(path) => russh::keys::check_known_hosts_path(&self.host, self.port, key, path),
            None => russh::keys::check_known_hosts(&self.host, self.port, key),
        }
        .map_err(|e| match e {
            russh::keys::Error::KeyChanged { line } => TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            },
            other => TransportError::KnownHosts(other.to_string()),
        })?;

        match (known, &self.host_key_verification) {
            (true, _) | (_, HostKeyVerification::Disabled) => Ok(()),
            (false, HostKeyVerification::Strict) => Err(TransportError::HostKeyUnknown {
                host: self.host.clone(),
                port: self.port,
            }),
            (false, HostKeyVerification::AcceptNew) => {
                let learned = match &self.known_hosts_path {
                    Some(path) => russh::keys::known_hosts::learn_known_hosts_path(
                        &self.host, self.port, key, path,
                    ),
                    None => russh::keys::known_hosts::learn_known_hosts(&self.host, self.port, key),
                };
                // An unsaved key is still accepted for this connection
                if let Err(e) = learned {
                    warn!("Failed to save host key for {}: {}", self.host, e);
                }
                Ok(())
            }
        }
    }

    /// Record why a key was refused so `connect` can report it.
    fn reject(&self, error: TransportError) -> bool {
        if let Ok(mut slot) = self.host_key_error.lock() {
            *slot = Some(error);
        }
        false
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(match self.verify_host_key(server_public_key) {
            Ok(()) => true,
            Err(e) => self.reject(e),
        })
    }
}
