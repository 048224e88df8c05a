/// The current state of a URLRequestHttpJob.
///
/// One hop walks `Connecting -> SendingRequest -> ReadingResponse ->
/// ParsingResponse`, then the job either follows a redirect (`Redirecting`,
/// after which a fresh hop starts at `Connecting`), finishes (`Done`) or
/// aborts (`Failed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The request has not started.
    #[default]
    Idle,

    /// Resolving the host and opening the TCP/TLS connection.
    Connecting,

    /// Writing the serialized request.
    SendingRequest,

    /// Reading until the server closes the connection.
    ReadingResponse,

    /// Splitting the raw bytes into status line, headers and body.
    ParsingResponse,

    /// A redirect was accepted and the next hop is pending.
    Redirecting,

    /// A final response is available.
    Done,

    /// The request aborted with a terminal error.
    Failed,
}

impl LoadState {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Done | LoadState::Failed)
    }
}
