// src/config/game.rs
//! 盤面サイズとタイミングの設定だよ！⏱️

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// カードが合わなかった時、裏返すまで待つ時間 (ミリ秒)。
/// 見た目の調整用の値なので、正しさには関係ないよ。
pub const MISMATCH_DELAY_MS: u32 = 900;
/// 経過時間タイマーの刻み (ミリ秒)。1 tick = 1 秒として数えるので、
/// 実行時設定からは変えられないよ。
pub const TICK_MS: u32 = 1000;
/// 設定がない時に使う盤面サイズ。
pub const DEFAULT_BOARD_SIZE: BoardSize = BoardSize::Four;

/// 画面から選べる盤面サイズ (4x4, 6x6, 8x8)。
///
/// `Session::start` 自体は偶数ならどんなサイズでも受け付けるけど、
/// UI から選べるのはこの3つだけ！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BoardSize {
    Four = 4,
    Six = 6,
    Eight = 8,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Four, BoardSize::Six, BoardSize::Eight];

    /// 一辺のカード枚数。
    pub fn dimension(self) -> usize {
        self as usize
    }

    pub fn pair_count(self) -> usize {
        self.dimension() * self.dimension() / 2
    }

    /// `<select id="difficulty">` の value を読む。
    ///
    /// 数字として読めない値 (空文字とか) は `fallback` にしちゃう。
    /// 数字だけど 4/6/8 じゃない時はちゃんとエラーを返すよ。
    pub fn from_select_value(value: &str, fallback: BoardSize) -> Result<Self> {
        match value.trim().parse::<usize>() {
            Ok(0) | Err(_) => Ok(fallback),
            Ok(n) => BoardSize::try_from(n),
        }
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = GameError;

    fn try_from(value: usize) -> Result<Self> {
        BoardSize::ALL
            .into_iter()
            .find(|size| size.dimension() == value)
            .ok_or(GameError::InvalidSize(value))
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> usize {
        size.dimension()
    }
}

/// 遅延コールバックの時間設定。
///
/// `tick_ms` はテストで時計を細かく刻む時だけ変える。ブラウザでは常に `TICK_MS`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub mismatch_delay_ms: u32,
    pub tick_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            tick_ms: TICK_MS,
        }
    }
}

/// JS から JSON で渡せる実行時設定。足りない項目はデフォルト値で埋めるよ。
///
/// ```json
/// { "default_size": 6, "mismatch_delay_ms": 800 }
/// ```
///
/// `default_size` は難易度セレクトが読めない時の盤面サイズ。
/// 知らない項目 (`tick_ms` とか) はエラーにする。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub default_size: BoardSize,
    pub mismatch_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_BOARD_SIZE,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 時計の刻みはいつも `TICK_MS` (1 tick = 1 秒)。
    pub fn timing(&self) -> Timing {
        Timing {
            mismatch_delay_ms: self.mismatch_delay_ms,
            tick_ms: TICK_MS,
        }
    }
}
