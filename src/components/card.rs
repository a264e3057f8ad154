// src/components/card.rs

use serde::{Deserialize, Serialize};

/// 盤面のカード1枚だよ！🃏
///
/// - `symbol`: 絵柄。同じ絵柄のカードは盤面にちょうど2枚ある。
/// - `is_revealed`: 表向きかどうか。
/// - `is_matched`: ペアが揃ったかどうか。一度 true になったら戻らないよ。
///
/// カードの「ID」は盤面 `Vec` の中のインデックス (左上から行優先)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: String,
    pub is_revealed: bool,
    pub is_matched: bool,
}

impl Card {
    /// 裏向きの新しいカード。
    pub fn face_down(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            is_revealed: false,
            is_matched: false,
        }
    }

    pub fn view(&self, index: usize) -> CardView {
        CardView {
            index,
            symbol: self.symbol.clone(),
            is_revealed: self.is_revealed,
            is_matched: self.is_matched,
        }
    }
}

/// 描画側に渡すカード情報 (インデックス付き)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: usize,
    pub symbol: String,
    pub is_revealed: bool,
    pub is_matched: bool,
}

impl CardView {
    /// 表の面を見せるべきか (めくられている or 揃っている)。
    pub fn is_face_up(&self) -> bool {
        self.is_revealed || self.is_matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_is_face_down() {
        let card = Card::face_down("🐶");
        assert_eq!(card.symbol, "🐶");
        assert!(!card.is_revealed);
        assert!(!card.is_matched);
        assert!(!card.view(0).is_face_up());
    }

    #[test]
    fn view_carries_index_and_flags() {
        let mut card = Card::face_down("🦊");
        card.is_revealed = true;
        let view = card.view(7);
        assert_eq!(
            view,
            CardView { index: 7, symbol: "🦊".to_string(), is_revealed: true, is_matched: false }
        );
        assert!(view.is_face_up());
    }

    #[test]
    fn matched_card_stays_face_up_after_hiding() {
        let mut card = Card::face_down("🐙");
        card.is_matched = true;
        card.is_revealed = false;
        assert!(card.view(0).is_face_up());
    }
}
