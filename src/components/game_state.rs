// src/components/game_state.rs

use serde::{Deserialize, Serialize};

/// セッションの状態機械の状態だよ！
///
/// 「めくり中のカード (pending selection)」も状態の中に持たせてるのがポイント。
/// `Resolving` の時だけ2枚 pending で入力ロック、という約束が型で守られるんだ。🔒
///
/// ```text
/// Idle → Ready → AwaitingSecond → Resolving → Ready / Won
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionPhase {
    /// まだ盤面がない。
    Idle,
    /// 盤面あり、めくり中のカードなし。
    Ready,
    /// 1枚目をめくった。
    AwaitingSecond { first: usize },
    /// 2枚めくって判定待ち。入力はロック中。
    Resolving { first: usize, second: usize },
    /// 全ペア揃った！🏆
    Won,
}

impl SessionPhase {
    pub fn is_input_locked(&self) -> bool {
        matches!(self, SessionPhase::Resolving { .. })
    }
}

/// 勝利時の結果。勝利オーバーレイに出す値だよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    pub moves: u32,
    pub elapsed_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resolving_locks_input() {
        assert!(!SessionPhase::Idle.is_input_locked());
        assert!(!SessionPhase::Ready.is_input_locked());
        assert!(!SessionPhase::AwaitingSecond { first: 0 }.is_input_locked());
        assert!(SessionPhase::Resolving { first: 0, second: 1 }.is_input_locked());
        assert!(!SessionPhase::Won.is_input_locked());
    }

    #[test]
    fn phase_serializes_with_tag() {
        let json = serde_json::to_string(&SessionPhase::AwaitingSecond { first: 2 }).unwrap();
        assert_eq!(json, r#"{"state":"awaiting_second","first":2}"#);
        let json = serde_json::to_string(&SessionPhase::Won).unwrap();
        assert_eq!(json, r#"{"state":"won"}"#);
    }
}
