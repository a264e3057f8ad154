// src/config/symbols.rs
//! カードの絵柄 (シンボル) プールだよ！🐶🐱🦊

use itertools::Itertools;

use crate::error::{GameError, Result};

/// デフォルトの絵文字プール。8x8 (32ペア) でも足りるように 40 個あるよ。
/// 並び順に意味があって、盤面には先頭から必要な数だけ使われる。
pub const EMOJI_POOL: [&str; 40] = [
    "🐶", "🐱", "🦊", "🐼", "🐨", "🦁", "🐷", "🐸",
    "🐵", "🐔", "🦉", "🐙", "🦄", "🐝", "🦋", "🐢",
    "🍎", "🍌", "🍇", "🍓", "🍍", "🥝", "🍉", "🍒",
    "⚽", "🏀", "🏈", "🎾", "🎲", "🎮", "🎧", "🎸",
    "🚗", "✈️", "🚀", "⏰", "🔑", "💡", "🎁", "🔥",
];

/// 重複なしのシンボル列。作る時に重複をチェックするので、
/// 「同じシンボルはちょうど2枚」の約束がプール側から崩れることはないよ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPool {
    symbols: Vec<String>,
}

impl SymbolPool {
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if let Some(dup) = symbols.iter().duplicates().next() {
            return Err(GameError::DuplicateSymbol(dup.clone()));
        }
        Ok(Self { symbols })
    }

    pub fn emoji() -> Self {
        Self {
            symbols: EMOJI_POOL.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self::emoji()
    }
}
