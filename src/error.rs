// src/error.rs
//! クレート全体で使うエラー型だよ！

use thiserror::Error;
use wasm_bindgen::JsValue;

/// ゲームの設定ミスやブラウザ API の失敗を表すエラー。
///
/// `reveal_card` に変なインデックスが来た、みたいな「よくある入力」はエラーにしないよ。
/// そっちは黙って無視する (no-op) 決まりだからね。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid board size: {0} (must be a positive even number)")]
    InvalidSize(usize),

    #[error("not enough symbols: {requested} pairs requested, pool has {available}")]
    InsufficientSymbols { requested: usize, available: usize },

    #[error("duplicate symbol in pool: {0}")]
    DuplicateSymbol(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("scheduler error: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    /// JS 側から飛んできた `JsValue` のエラーを DOM エラーとして包む。
    pub fn dom(value: JsValue) -> Self {
        GameError::Dom(format!("{:?}", value))
    }
}

// wasm_bindgen の境界では JS の Error として投げ返す。
impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}
