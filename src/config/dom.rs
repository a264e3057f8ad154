// src/config/dom.rs
//! HTML 側と約束している要素 ID と CSS クラス名。

pub const BOARD_ID: &str = "board";
pub const MOVES_ID: &str = "moves";
pub const TIMER_ID: &str = "timer";
pub const START_BUTTON_ID: &str = "startBtn";
pub const RESTART_BUTTON_ID: &str = "restartBtn";
pub const PLAY_AGAIN_BUTTON_ID: &str = "playAgainBtn";
pub const DIFFICULTY_ID: &str = "difficulty";
pub const WIN_OVERLAY_ID: &str = "winOverlay";
pub const WIN_TIME_ID: &str = "winTime";
pub const WIN_MOVES_ID: &str = "winMoves";

pub const CARD_CLASS: &str = "card";
pub const FLIPPED_CLASS: &str = "flipped";
pub const MATCHED_CLASS: &str = "matched";
pub const PRESSING_CLASS: &str = "pressing";
pub const HIDDEN_CLASS: &str = "hidden";

pub const CARD_ARIA_LABEL: &str = "Memory card";
