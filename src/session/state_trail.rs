use crate::session::peer_connection::PeerConnection;
use std::fmt;

/// Successive values of one connection state, rendered `new -> gathering -> complete`.
/// Repeated observations of the same value are recorded once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateTrail {
    states: Vec<String>,
}

impl StateTrail {
    pub fn new(initial: impl fmt::Display) -> Self {
        Self {
            states: vec![initial.to_string()],
        }
    }

    /// Returns `true` when `state` differs from the last recorded value.
    pub fn observe(&mut self, state: impl fmt::Display) -> bool {
        let s = state.to_string();
        if self.states.last() == Some(&s) {
            return false;
        }
        self.states.push(s);
        true
    }

    pub fn last(&self) -> Option<&str> {
        self.states.last().map(String::as_str)
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }
}

impl fmt::Display for StateTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.states.join(" -> "))
    }
}

/// Trails for the three states a session reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTrails {
    pub ice_gathering: StateTrail,
    pub ice_connection: StateTrail,
    pub signaling: StateTrail,
}

impl SessionTrails {
    pub fn new<P: PeerConnection>(peer: &P) -> Self {
        Self {
            ice_gathering: StateTrail::new(peer.ice_gathering_state()),
            ice_connection: StateTrail::new(peer.ice_connection_state()),
            signaling: StateTrail::new(peer.signaling_state()),
        }
    }

    pub fn observe<P: PeerConnection>(&mut self, peer: &P) {
        self.ice_gathering.observe(peer.ice_gathering_state());
        self.ice_connection.observe(peer.ice_connection_state());
        self.signaling.observe(peer.signaling_state());
    }
}
