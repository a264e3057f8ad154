// src/app/browser_event_manager.rs
//! Attaches the DOM listeners (card clicks, keyboard, pointer press visual, buttons).

use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::config::dom::*;
use crate::config::BoardSize;
use crate::error::{GameError, Result};

use super::controller::GameController;
use super::game_app::start_selected;
use super::renderer::{element_by_id, DomPresenter};

/// 登録したリスナー1個分。drop されたら自動で外れるよ。
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    fn attach<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(GameError::dom)?;
        debug!("Attached {} listener", kind);
        Ok(Self { target: target.clone(), kind, closure })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            error!("Failed to detach {} listener: {:?}", self.kind, e);
        }
    }
}

/// イベントのターゲットから一番近い `.card` 要素を探す。
fn closest_card(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(&format!(".{}", CARD_CLASS)).ok().flatten()
}

fn card_index(card: &Element) -> Option<usize> {
    card.get_attribute("data-index")?.parse().ok()
}

/// ゲームに必要なリスナーを全部つけて、その一覧を返す。
pub fn attach_game_listeners(
    document: &Document,
    controller: &Rc<GameController>,
    presenter: &Rc<DomPresenter>,
    default_size: BoardSize,
) -> Result<Vec<EventListener>> {
    let board: &EventTarget = presenter.board();
    let mut listeners = Vec::new();

    // --- カードのクリック (board に委譲) ---
    {
        let controller = Rc::clone(controller);
        listeners.push(EventListener::attach(board, "click", move |event: Event| {
            if let Some(index) = closest_card(&event).as_ref().and_then(card_index) {
                controller.reveal_card(index);
            }
        })?);
    }

    // --- キーボード: フォーカス中のカードで Enter / Space ---
    {
        let document = document.clone();
        listeners.push(EventListener::attach(board, "keydown", move |event: Event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = key_event.key();
            if key != "Enter" && key != " " {
                return;
            }
            let focused = document
                .active_element()
                .filter(|el| el.class_list().contains(CARD_CLASS))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(card) = focused {
                // Space でページがスクロールしないように
                event.prevent_default();
                card.click();
            }
        })?);
    }

    // --- 押している間の見た目 ---
    listeners.push(EventListener::attach(board, "pointerdown", |event: Event| {
        if let Some(card) = closest_card(&event) {
            let classes = card.class_list();
            if !classes.contains(FLIPPED_CLASS) && !classes.contains(MATCHED_CLASS) {
                if let Err(e) = classes.add_1(PRESSING_CLASS) {
                    error!("Failed to add pressing class: {:?}", e);
                }
            }
        }
    })?);
    {
        let doc = document.clone();
        listeners.push(EventListener::attach(document, "pointerup", move |_event: Event| {
            clear_pressing(&doc);
        })?);
    }

    // --- Start / Restart / Play again は全部「選択中の難易度で新しいゲーム」 ---
    for id in [START_BUTTON_ID, RESTART_BUTTON_ID, PLAY_AGAIN_BUTTON_ID] {
        let button = element_by_id(document, id)?;
        let controller = Rc::clone(controller);
        let presenter = Rc::clone(presenter);
        listeners.push(EventListener::attach(&button, "click", move |_event: Event| {
            if let Err(e) = start_selected(&controller, &presenter, default_size) {
                error!("Failed to start a new game: {}", e);
            }
        })?);
    }

    Ok(listeners)
}

fn clear_pressing(document: &Document) {
    let selector = format!(".{}.{}", CARD_CLASS, PRESSING_CLASS);
    let pressed = match document.query_selector_all(&selector) {
        Ok(list) => list,
        Err(e) => {
            error!("Failed to query pressed cards: {:?}", e);
            return;
        }
    };
    for i in 0..pressed.length() {
        if let Some(card) = pressed.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            if let Err(e) = card.class_list().remove_1(PRESSING_CLASS) {
                error!("Failed to remove pressing class: {:?}", e);
            }
        }
    }
}
