// src/app/mod.rs
//! GameApp の内部ロジックを役割ごとに分割して置くモジュールだよ！

pub mod browser_event_manager; // DOM リスナーの付け外し
pub mod controller;            // セッション + タイマー + 画面更新のまとめ役
pub mod game_app;              // JS に公開する GameApp
pub mod presenter;             // 画面更新の trait
pub mod renderer;              // Presenter の DOM 実装
pub mod scheduler;             // setTimeout / setInterval
pub mod state_getter;          // 状態の JSON 化

#[cfg(test)]
mod test_support;
