// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;        // ブラウザ側 (DOM・タイマー・GameApp)
pub mod components; // カードやゲームの段階など小さなデータ型
pub mod config;     // 定数と実行時設定
pub mod error;      // GameError
pub mod logic;      // デッキ作りとセッションの状態機械 (ブラウザ非依存)

pub use app::game_app::GameApp;
pub use error::{GameError, Result};
pub use logic::{build_deck, Generation, RevealOutcome, Session, SessionSnapshot};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    // 2回目以降の初期化 (テストランナーなど) は失敗するけど気にしない
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::info!("Logger initialized, panic hook set!");
    }
}
