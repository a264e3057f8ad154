// src/components/mod.rs

// ゲームの状態を作る小さなデータ型たち。
pub mod card;
pub mod game_state;

pub use card::{Card, CardView};
pub use game_state::{SessionPhase, WinSummary};
