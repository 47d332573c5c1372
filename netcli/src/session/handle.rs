//! Caller side of a session.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::response::Response;
use crate::command::Request;
use crate::error::{Result, SessionError};

/// Handle to a running session actor.
///
/// Requests are strictly alternated with responses: each call to
/// [`request`](Self::request) waits for the reply before returning, so at
/// most one command is ever in flight.
pub struct SessionHandle {
    target: String,
    device_type: String,
    requests: mpsc::Sender<Request>,
    responses: mpsc::Receiver<Response>,
    task: JoinHandle<()>,
    /// Connect reply, once it has been read off the response channel.
    connect_outcome: Option<Response>,
}

impl SessionHandle {
    pub(crate) fn new(
        target: String,
        device_type: String,
        requests: mpsc::Sender<Request>,
        responses: mpsc::Receiver<Response>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            target,
            device_type,
            requests,
            responses,
            task,
            connect_outcome: None,
        }
    }

    /// Wait for the outcome of the connection attempt.
    ///
    /// The first reply of a session is always the connect outcome. It is read
    /// once and kept, so later calls return the same response.
    pub async fn connected(&mut self) -> Response {
        if let Some(outcome) = &self.connect_outcome {
            return outcome.clone();
        }
        let outcome = self
            .responses
            .recv()
            .await
            .unwrap_or_else(|| Response::failure(SessionError::Closed.to_string()));
        self.connect_outcome = Some(outcome.clone());
        outcome
    }

    /// Submit one line and wait for its response.
    ///
    /// Returns `None` when the line is a terminator (the session closes
    /// without replying; this waits until it has shut down) or when the
    /// session has already stopped. The connect outcome is consumed first if
    /// [`connected`](Self::connected) was never awaited; a failed connect
    /// also yields `None`.
    pub async fn request(&mut self, text: impl Into<String>) -> Option<Response> {
        if !self.connected().await.ok {
            return None;
        }

        let request = Request::parse(text);
        let terminate = request == Request::Terminate;

        self.requests.send(request).await.ok()?;

        if terminate {
            while self.responses.recv().await.is_some() {}
            return None;
        }
        self.responses.recv().await
    }

    /// Terminate the session and wait for the actor to finish.
    pub async fn close(self) -> Result<()> {
        // The actor may already be gone after a failed connect
        let _ = self.requests.send(Request::Terminate).await;
        drop(self.requests);
        self.task.await.map_err(|_| SessionError::Closed)?;
        Ok(())
    }

    /// Check if the session task has finished.
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    /// Get the device this session talks to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the vendor tag used to resolve custom commands.
    pub fn device_type(&self) -> &str {
        &self.device_type
    }
}
