//! Gets the current session state and converts it to JSON.

use std::sync::{Arc, Mutex};

use log::{debug, error};

use crate::error::Result;
use crate::logic::Session;

use super::controller::lock_session;

/// セッションの状態をスナップショットにして JSON 文字列で返します。
/// (GameApp::state_json のロジック)
pub fn session_state_json(session: &Arc<Mutex<Session>>) -> Result<String> {
    let snapshot = lock_session(session).snapshot();
    debug!(
        "Serializing session state: {} cards, phase {:?}",
        snapshot.cards.len(),
        snapshot.phase
    );
    serde_json::to_string(&snapshot).map_err(|e| {
        error!("Failed to serialize session state: {}", e);
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SessionPhase;
    use crate::config::SymbolPool;
    use crate::logic::SessionSnapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shared_session() -> Arc<Mutex<Session>> {
        let session = Session::with_rng(SymbolPool::emoji(), StdRng::seed_from_u64(3));
        Arc::new(Mutex::new(session))
    }

    #[test]
    fn idle_session_serializes_as_empty_board() {
        let session = shared_session();
        let json = session_state_json(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["moves"], 0);
        assert_eq!(value["cards"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["phase"]["state"], "idle");
    }

    #[test]
    fn json_reflects_a_pending_first_pick() {
        let session = shared_session();
        {
            let mut guard = session.lock().unwrap();
            guard.start(4).unwrap();
            guard.reveal_card(5);
        }
        let json = session_state_json(&session).unwrap();
        let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.phase, SessionPhase::AwaitingSecond { first: 5 });
        assert!(parsed.cards[5].is_revealed);
        assert_eq!(parsed, session.lock().unwrap().snapshot());
    }
}
