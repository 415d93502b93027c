//! Connection lifecycle state machine.
//!
//! [`Lifecycle`] is owned exclusively by the connection task; every state
//! change goes through one of its transition methods, and observers only see
//! read-only [`ConnState`] snapshots published over a watch channel. This
//! replaces ad-hoc "should reconnect" flags shared between threads.

/// Lifecycle state of the single outbound connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnState {
    /// No live transport handle.
    #[default]
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// Handshake complete; frames are being serviced.
    Established,
    /// Orderly shutdown in progress.
    Closing,
}

impl std::fmt::Display for ConnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Established => write!(f, "established"),
            Self::Closing => write!(f, "closing"),
        }
    }
}

/// Tracks the connection state plus the pending-reconnect indicator.
///
/// Invariants:
/// - `reconnect_pending` is set only by [`Lifecycle::connection_lost`] and
///   cleared only by [`Lifecycle::established`].
/// - At most one reconnect attempt is in flight at a time; the single
///   connection task drives all transitions sequentially.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: ConnState,
    reconnect_pending: bool,
}

impl Lifecycle {
    /// New tracker in the `Disconnected` state with no reconnect pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    pub fn state(&self) -> ConnState {
        self.state
    }

    /// Whether a closure or error has been observed since the last
    /// successful establishment.
    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    /// A connect attempt is starting. `Disconnected → Connecting`.
    ///
    /// No-op while `Closing`: a shutdown in progress is never re-entered.
    pub fn connect_started(&mut self) {
        if self.state == ConnState::Disconnected {
            self.state = ConnState::Connecting;
        }
    }

    /// The transport reported a completed handshake.
    /// `Connecting → Established`, clearing the pending-reconnect indicator.
    ///
    /// Idempotent while already `Established`.
    pub fn established(&mut self) {
        if matches!(self.state, ConnState::Connecting | ConnState::Established) {
            self.state = ConnState::Established;
            self.reconnect_pending = false;
        }
    }

    /// The transport reported closure or a connection error.
    /// `Established|Connecting → Disconnected`, setting pending-reconnect.
    pub fn connection_lost(&mut self) {
        if matches!(self.state, ConnState::Connecting | ConnState::Established) {
            self.state = ConnState::Disconnected;
            self.reconnect_pending = true;
        }
    }

    /// Orderly shutdown requested. Terminal: every state maps to `Closing`
    /// and no reconnect will be attempted afterwards.
    pub fn shutdown(&mut self) {
        self.state = ConnState::Closing;
        self.reconnect_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected_with_no_pending_reconnect() {
        let lc = Lifecycle::new();
        assert_eq!(lc.state(), ConnState::Disconnected);
        assert!(!lc.reconnect_pending());
    }

    #[test]
    fn connect_then_establish() {
        let mut lc = Lifecycle::new();
        lc.connect_started();
        assert_eq!(lc.state(), ConnState::Connecting);
        lc.established();
        assert_eq!(lc.state(), ConnState::Established);
        assert!(!lc.reconnect_pending());
    }

    #[test]
    fn close_while_established_sets_pending_reconnect() {
        let mut lc = Lifecycle::new();
        lc.connect_started();
        lc.established();
        lc.connection_lost();
        assert_eq!(lc.state(), ConnState::Disconnected);
        assert!(lc.reconnect_pending());
    }

    #[test]
    fn failed_connect_attempt_sets_pending_reconnect() {
        let mut lc = Lifecycle::new();
        lc.connect_started();
        lc.connection_lost();
        assert_eq!(lc.state(), ConnState::Disconnected);
        assert!(lc.reconnect_pending());
    }

    #[test]
    fn successful_reconnect_clears_pending() {
        let mut lc = Lifecycle::new();
        lc.connect_started();
        lc.established();
        lc.connection_lost();

        lc.connect_started();
        lc.established();
        assert_eq!(lc.state(), ConnState::Established);
        assert!(!lc.reconnect_pending());

        // A repeated establish event while already up changes nothing.
        lc.established();
        assert_eq!(lc.state(), ConnState::Established);
        assert!(!lc.reconnect_pending());
    }

    #[test]
    fn lost_while_disconnected_is_a_no_op() {
        let mut lc = Lifecycle::new();
        lc.connection_lost();
        assert_eq!(lc.state(), ConnState::Disconnected);
        assert!(!lc.reconnect_pending());
    }

    #[test]
    fn shutdown_is_terminal() {
        let mut lc = Lifecycle::new();
        lc.connect_started();
        lc.established();
        lc.shutdown();
        assert_eq!(lc.state(), ConnState::Closing);
        assert!(!lc.reconnect_pending());

        lc.connect_started();
        assert_eq!(lc.state(), ConnState::Closing);
    }
}
