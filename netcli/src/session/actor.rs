//! The session actor: a background task owning one device connection.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use super::handle::SessionHandle;
use super::response::Response;
use crate::catalog::CommandCatalog;
use crate::command::{CommandLine, Request, grep_lines, resolve_vendor_command};
use crate::transport::{ConnectionConfig, Connector, Transport};

/// Background worker for one device session.
///
/// The actor connects as soon as it runs and publishes the outcome as the
/// first [`Response`]. After that it answers each command request with
/// exactly one response, in order, until it receives [`Request::Terminate`]
/// or the caller drops its end of the channel. A failed connection publishes
/// one failed response and stops without reading any request.
pub struct SessionActor<C: Connector> {
    config: ConnectionConfig,
    catalog: Arc<CommandCatalog>,
    connector: C,
    requests: mpsc::Receiver<Request>,
    responses: mpsc::Sender<Response>,
}

impl<C: Connector> SessionActor<C> {
    /// Create an actor from its channel endpoints.
    pub fn new(
        config: ConnectionConfig,
        catalog: Arc<CommandCatalog>,
        connector: C,
        requests: mpsc::Receiver<Request>,
        responses: mpsc::Sender<Response>,
    ) -> Self {
        Self {
            config,
            catalog,
            connector,
            requests,
            responses,
        }
    }

    /// Run the session to completion.
    pub async fn run(mut self) {
        let mut transport = match self.connector.connect(&self.config).await {
            Ok(transport) => transport,
            Err(e) => {
                warn!("{}: connection failed: {}", self.config.target, e);
                let message = format!("ERROR: Unable to connect to device: {}", e);
                let _ = self.responses.send(Response::failure(message)).await;
                return;
            }
        };

        info!(
            "Connected to {} ({})",
            self.config.target, self.config.device_type
        );

        if self.responses.send(Response::success("")).await.is_ok() {
            while let Some(request) = self.requests.recv().await {
                let text = match request {
                    Request::Command(text) if !Request::is_terminator(&text) => text,
                    _ => break,
                };

                let response = execute(
                    &mut transport,
                    &text,
                    &self.config.device_type,
                    &self.catalog,
                )
                .await;

                if self.responses.send(response).await.is_err() {
                    break;
                }
            }
        }

        if let Err(e) = transport.close().await {
            debug!("{}: error while closing: {}", self.config.target, e);
        }
        info!("Disconnected from {}", self.config.target);
    }
}

/// Resolve, send and filter one command line.
async fn execute<T: Transport>(
    transport: &mut T,
    text: &str,
    device_type: &str,
    catalog: &CommandCatalog,
) -> Response {
    let line = CommandLine::parse(text);

    let vendor_command = match line {
        CommandLine::Raw(raw) => raw.to_string(),
        CommandLine::Templated { command, .. } => {
            match resolve_vendor_command(command, device_type, catalog) {
                Ok(resolved) => resolved,
                Err(e) => return Response::failure(e.to_string()),
            }
        }
    };

    debug!("Running vendor command: {}", vendor_command);
    let output = match transport.send_command(&vendor_command).await {
        Ok(output) => output,
        Err(e) => return Response::failure(e.to_string()),
    };

    match line {
        CommandLine::Templated {
            filter: Some(term), ..
        } => Response::success(grep_lines(&output, term)),
        _ => Response::success(output),
    }
}

/// Start a session actor on the current tokio runtime.
///
/// Requests and responses each travel over a channel of capacity one, so
/// there is never more than one request in flight per session.
pub fn spawn_session<C: Connector>(
    config: ConnectionConfig,
    catalog: Arc<CommandCatalog>,
    connector: C,
) -> SessionHandle {
    let (request_tx, request_rx) = mpsc::channel(1);
    let (response_tx, response_rx) = mpsc::channel(1);

    let target = config.target.clone();
    let device_type = config.device_type.clone();
    let actor = SessionActor::new(config, catalog, connector, request_rx, response_tx);
    let task = tokio::spawn(actor.run());

    SessionHandle::new(target, device_type, request_tx, response_rx, task)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use tokio_test::assert_ok;

    use super::*;
    use crate::catalog::CustomCommand;
    use crate::error::{Result, TransportError};

    /// What the scripted device saw.
    #[derive(Default)]
    struct Record {
        sent: Mutex<Vec<String>>,
        closed: AtomicBool,
    }

    struct ScriptedConnector {
        refuse: bool,
        outputs: HashMap<String, String>,
        record: Arc<Record>,
    }

    struct ScriptedTransport {
        outputs: HashMap<String, String>,
        record: Arc<Record>,
    }

    impl Connector for ScriptedConnector {
        type Transport = ScriptedTransport;

        async fn connect(&self, config: &ConnectionConfig) -> Result<ScriptedTransport> {
            if self.refuse {
                return Err(TransportError::AuthenticationFailed {
                    user: config.user.clone(),
                }
                .into());
            }
            Ok(ScriptedTransport {
                outputs: self.outputs.clone(),
                record: self.record.clone(),
            })
        }
    }

    impl Transport for ScriptedTransport {
        async fn send_command(&mut self, command: &str) -> Result<String> {
            self.record.sent.lock().unwrap().push(command.to_string());
            match self.outputs.get(command) {
                Some(output) => Ok(output.clone()),
                None => Err(TransportError::Timeout(Duration::from_secs(30)).into()),
            }
        }

        async fn close(self) -> Result<()> {
            self.record.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn catalog() -> Arc<CommandCatalog> {
        Arc::new(
            CommandCatalog::new()
                .with_command(
                    "show-int",
                    CustomCommand::new()
                        .with_type("cisco", "show interface [port]")
                        .with_arg("port", "all"),
                )
                .with_command(
                    "version",
                    CustomCommand::new().with_type("juniper_junos", "show version"),
                ),
        )
    }

    fn config() -> ConnectionConfig {
        ConnectionConfig::new("10.0.0.1", "admin", Some("secret".into()), "cisco")
    }

    fn start(refuse: bool) -> (SessionHandle, Arc<Record>) {
        let record = Arc::new(Record::default());
        let outputs = HashMap::from([
            ("show interface all".to_string(), "a\nb\nc".to_string()),
            ("show interface eth0".to_string(), "eth0 is up".to_string()),
            ("show version".to_string(), "IOS 15.2".to_string()),
        ]);
        let connector = ScriptedConnector {
            refuse,
            outputs,
            record: record.clone(),
        };
        (spawn_session(config(), catalog(), connector), record)
    }

    fn sent(record: &Record) -> Vec<String> {
        record.sent.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_connect_success_publishes_empty_ok() {
        let (mut session, _) = start(false);
        assert_eq!(session.connected().await, Response::success(""));
        assert_ok!(session.close().await);
    }

    #[tokio::test]
    async fn test_connect_failure_publishes_one_failure() {
        let (mut session, record) = start(true);

        let response = session.connected().await;
        assert!(!response.ok);
        assert!(
            response
                .payload
                .starts_with("ERROR: Unable to connect to device:")
        );
        assert!(response.payload.contains("admin"));

        // Nothing is processed after a failed connect
        assert_eq!(session.request("show-int").await, None);
        assert_eq!(session.request("r- show version").await, None);
        assert!(sent(&record).is_empty());
    }

    #[tokio::test]
    async fn test_request_without_connected_skips_connect_reply() {
        let (mut session, record) = start(false);

        let response = session.request("r- show version").await.unwrap();
        assert_eq!(response, Response::success("IOS 15.2"));
        let response = session.request("show-int").await.unwrap();
        assert_eq!(response, Response::success("a\nb\nc"));

        // The connect outcome stays available afterwards
        assert_eq!(session.connected().await, Response::success(""));
        assert_eq!(sent(&record), vec!["show version", "show interface all"]);
    }

    #[tokio::test]
    async fn test_request_without_connected_after_failed_connect() {
        let (mut session, record) = start(true);

        assert_eq!(session.request("r- show version").await, None);
        assert!(!session.connected().await.ok);
        assert!(sent(&record).is_empty());
    }

    #[tokio::test]
    async fn test_templated_command_uses_defaults() {
        let (mut session, record) = start(false);
        session.connected().await;

        let response = session.request("show-int").await.unwrap();
        assert_eq!(response, Response::success("a\nb\nc"));
        assert_eq!(sent(&record), vec!["show interface all"]);
    }

    #[tokio::test]
    async fn test_explicit_argument() {
        let (mut session, record) = start(false);
        session.connected().await;

        let response = session.request("show-int[port:eth0]").await.unwrap();
        assert_eq!(response.payload, "eth0 is up");
        assert_eq!(sent(&record), vec!["show interface eth0"]);
    }

    #[tokio::test]
    async fn test_grep_filter() {
        let (mut session, _) = start(false);
        session.connected().await;

        let response = session.request("show-int | b").await.unwrap();
        assert!(response.ok);
        assert_eq!(response.payload, "\nb");
    }

    #[tokio::test]
    async fn test_raw_mode_bypasses_resolver_and_filter() {
        let (mut session, record) = start(false);
        session.connected().await;

        // "show" is not a catalog command; raw mode does not care
        let response = session.request("r- show version").await.unwrap();
        assert_eq!(response, Response::success("IOS 15.2"));

        let response = session.request("r- show interface all | b").await.unwrap();
        assert!(!response.ok, "raw text is sent verbatim, filter included");

        assert_eq!(
            sent(&record),
            vec!["show version", "show interface all | b"]
        );
    }

    #[tokio::test]
    async fn test_resolver_failures_do_not_touch_transport() {
        let (mut session, record) = start(false);
        session.connected().await;

        let response = session.request("bogus").await.unwrap();
        assert_eq!(
            response,
            Response::failure("Custom command bogus not recognized. Use help")
        );

        let response = session.request("version").await.unwrap();
        assert_eq!(
            response,
            Response::failure("Command version not implemented for vendor cisco")
        );

        let response = session.request("show-int[speed:10g]").await.unwrap();
        assert_eq!(response, Response::failure("Unknown argument: speed"));

        assert!(sent(&record).is_empty());

        // The session is still usable afterwards
        assert!(session.request("show-int").await.unwrap().ok);
    }

    #[tokio::test]
    async fn test_transport_timeout_is_reported() {
        let (mut session, _) = start(false);
        session.connected().await;

        let response = session.request("r- show tech-support").await.unwrap();
        assert!(!response.ok);
        assert!(response.payload.contains("timed out"));

        assert!(session.request("show-int").await.unwrap().ok);
    }

    #[tokio::test]
    async fn test_lock_step_responses_in_order() {
        let (mut session, record) = start(false);
        session.connected().await;

        let requests = ["show-int", "bogus", "show-int[port:eth0]", "r- show version"];
        let mut responses = Vec::new();
        for text in requests {
            responses.push(session.request(text).await.unwrap());
        }

        assert_eq!(responses.len(), requests.len());
        assert_eq!(responses[0].payload, "a\nb\nc");
        assert!(!responses[1].ok);
        assert_eq!(responses[2].payload, "eth0 is up");
        assert_eq!(responses[3].payload, "IOS 15.2");

        assert_eq!(session.request("exit").await, None);
        assert_eq!(sent(&record).len(), 3);
    }

    #[tokio::test]
    async fn test_terminators_close_without_response() {
        for terminator in ["End", "EXIT", "quit"] {
            let (mut session, record) = start(false);
            session.connected().await;

            assert_eq!(session.request(terminator).await, None);
            // The actor is gone; nothing else is ever answered
            assert_eq!(session.request("show-int").await, None);
            assert!(record.closed.load(Ordering::SeqCst));
            assert!(sent(&record).is_empty());
        }
    }

    #[tokio::test]
    async fn test_close_releases_transport() {
        let (mut session, record) = start(false);
        session.connected().await;
        assert_ok!(session.close().await);
        assert!(record.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_actor() {
        let record = Arc::new(Record::default());
        let connector = ScriptedConnector {
            refuse: false,
            outputs: HashMap::new(),
            record: record.clone(),
        };
        let (request_tx, request_rx) = mpsc::channel(1);
        let (response_tx, mut response_rx) = mpsc::channel(1);
        let actor = SessionActor::new(config(), catalog(), connector, request_rx, response_tx);
        let task = tokio::spawn(actor.run());

        assert!(response_rx.recv().await.unwrap().ok);
        drop(request_tx);

        assert_ok!(task.await);
        assert!(record.closed.load(Ordering::SeqCst));
        assert_eq!(response_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_independent_sessions_share_catalog() {
        let shared = catalog();
        let mut sessions = Vec::new();
        for target in ["r1", "r2"] {
            let connector = ScriptedConnector {
                refuse: false,
                outputs: HashMap::from([(
                    "show interface all".to_string(),
                    format!("{} ok", target),
                )]),
                record: Arc::new(Record::default()),
            };
            let config = ConnectionConfig::new(target, "admin", None, "cisco");
            sessions.push(spawn_session(config, shared.clone(), connector));
        }

        for session in &mut sessions {
            assert!(session.connected().await.ok);
        }
        assert_eq!(sessions[1].request("show-int").await.unwrap().payload, "r2 ok");
        assert_eq!(sessions[0].request("show-int").await.unwrap().payload, "r1 ok");

        for session in sessions {
            assert_ok!(session.close().await);
        }
    }
}
