// src/app/renderer.rs
//! DOM に盤面やカウンタを描く Presenter 実装。

use log::{debug, error};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement};

use crate::components::{CardView, WinSummary};
use crate::config::dom::*;
use crate::config::BoardSize;
use crate::error::{GameError, Result};
use crate::logic::SessionSnapshot;

use super::presenter::{format_time, Presenter};

/// HTML 側の要素をまとめて持っておく Presenter だよ。
pub struct DomPresenter {
    document: Document,
    board: HtmlElement,
    moves: Element,
    timer: Element,
    difficulty: HtmlSelectElement,
    win_overlay: Element,
    win_time: Element,
    win_moves: Element,
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GameError::Dom(format!("missing element #{}", id)))
}

impl DomPresenter {
    pub fn from_document(document: Document) -> Result<Self> {
        let board = element_by_id(&document, BOARD_ID)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GameError::Dom(format!("#{} is not an HTML element", BOARD_ID)))?;
        let difficulty = element_by_id(&document, DIFFICULTY_ID)?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| GameError::Dom(format!("#{} is not a <select>", DIFFICULTY_ID)))?;
        Ok(Self {
            moves: element_by_id(&document, MOVES_ID)?,
            timer: element_by_id(&document, TIMER_ID)?,
            win_overlay: element_by_id(&document, WIN_OVERLAY_ID)?,
            win_time: element_by_id(&document, WIN_TIME_ID)?,
            win_moves: element_by_id(&document, WIN_MOVES_ID)?,
            document,
            board,
            difficulty,
        })
    }

    pub fn board(&self) -> &HtmlElement {
        &self.board
    }

    /// 難易度セレクトで選ばれている盤面サイズ。読めなければ `fallback`。
    pub fn selected_size(&self, fallback: BoardSize) -> Result<BoardSize> {
        BoardSize::from_select_value(&self.difficulty.value(), fallback)
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element> {
        let el = self.document.create_element(tag).map_err(GameError::dom)?;
        el.set_class_name(class);
        Ok(el)
    }

    /// カード1枚分の要素を作る。
    ///
    /// ```html
    /// <div class="card" role="button" aria-label="Memory card" tabindex="0" data-index="3">
    ///   <div class="card-inner">
    ///     <div class="card-face card-front"></div>
    ///     <div class="card-face card-back"><span class="icon">🐶</span></div>
    ///   </div>
    /// </div>
    /// ```
    fn create_card(&self, card: &CardView) -> Result<Element> {
        let el = self.create("div", CARD_CLASS)?;
        el.set_attribute("role", "button").map_err(GameError::dom)?;
        el.set_attribute("aria-label", CARD_ARIA_LABEL).map_err(GameError::dom)?;
        el.set_attribute("tabindex", "0").map_err(GameError::dom)?;
        el.set_attribute("data-index", &card.index.to_string()).map_err(GameError::dom)?;

        let inner = self.create("div", "card-inner")?;
        let front = self.create("div", "card-face card-front")?;
        let back = self.create("div", "card-face card-back")?;
        let icon = self.create("span", "icon")?;
        // 絵柄はテキストとして入れる (HTML として解釈させない)
        icon.set_text_content(Some(&card.symbol));

        back.append_child(&icon).map_err(GameError::dom)?;
        inner.append_child(&front).map_err(GameError::dom)?;
        inner.append_child(&back).map_err(GameError::dom)?;
        el.append_child(&inner).map_err(GameError::dom)?;

        apply_card_classes(&el, card)?;
        Ok(el)
    }

    fn try_render_board(&self, snapshot: &SessionSnapshot) -> Result<()> {
        self.board.set_inner_html("");
        self.board
            .style()
            .set_property("grid-template-columns", &format!("repeat({}, 1fr)", snapshot.size))
            .map_err(GameError::dom)?;
        for card in &snapshot.cards {
            let el = self.create_card(card)?;
            self.board.append_child(&el).map_err(GameError::dom)?;
        }
        debug!("DomPresenter: rendered {} cards", snapshot.cards.len());
        Ok(())
    }

    fn try_update_card(&self, card: &CardView) -> Result<()> {
        let selector = format!(".{}[data-index=\"{}\"]", CARD_CLASS, card.index);
        let el = self
            .board
            .query_selector(&selector)
            .map_err(GameError::dom)?
            .ok_or_else(|| GameError::Dom(format!("card {} is not on the board", card.index)))?;
        apply_card_classes(&el, card)
    }

    fn set_overlay_hidden(&self, hidden: bool) -> Result<()> {
        self.win_overlay
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, hidden)
            .map(|_| ())
            .map_err(GameError::dom)
    }
}

/// カードの状態を CSS クラスに反映する。揃ったカードは `flipped` + `matched`。
fn apply_card_classes(el: &Element, card: &CardView) -> Result<()> {
    let classes = el.class_list();
    classes
        .toggle_with_force(FLIPPED_CLASS, card.is_face_up())
        .map_err(GameError::dom)?;
    classes
        .toggle_with_force(MATCHED_CLASS, card.is_matched)
        .map_err(GameError::dom)?;
    classes.remove_1(PRESSING_CLASS).map_err(GameError::dom)?;
    Ok(())
}

impl Presenter for DomPresenter {
    fn render_board(&self, snapshot: &SessionSnapshot) {
        if let Err(e) = self.try_render_board(snapshot) {
            error!("DomPresenter: failed to render board: {}", e);
        }
    }

    fn update_card(&self, card: &CardView) {
        if let Err(e) = self.try_update_card(card) {
            error!("DomPresenter: failed to update card {}: {}", card.index, e);
        }
    }

    fn update_moves(&self, moves: u32) {
        self.moves.set_text_content(Some(&moves.to_string()));
    }

    fn update_time(&self, elapsed_seconds: u32) {
        self.timer.set_text_content(Some(&format_time(elapsed_seconds)));
    }

    fn show_win(&self, summary: &WinSummary) {
        self.win_time.set_text_content(Some(&format_time(summary.elapsed_seconds)));
        self.win_moves.set_text_content(Some(&summary.moves.to_string()));
        if let Err(e) = self.set_overlay_hidden(false) {
            error!("DomPresenter: failed to show win overlay: {}", e);
        }
    }

    fn hide_win(&self) {
        if let Err(e) = self.set_overlay_hidden(true) {
            error!("DomPresenter: failed to hide win overlay: {}", e);
        }
    }
}
