// src/config/mod.rs
//! ゲームの設定値 (定数と、JS から渡せる実行時設定) をまとめるよ。

pub mod game;
pub mod symbols;
pub mod dom;

pub use game::{BoardSize, GameConfig, Timing};
pub use symbols::{SymbolPool, EMOJI_POOL};
