// src/app/game_app.rs

use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::{BoardSize, GameConfig, SymbolPool};
use crate::error::{GameError, Result};
use crate::logic::Session;

use super::browser_event_manager::{self, EventListener};
use super::controller::GameController;
use super::renderer::DomPresenter;
use super::scheduler::BrowserScheduler;
use super::state_getter;

/// 難易度セレクトの値で新しいゲームを始める (ボタン共通の処理)。
/// セレクトが読めない時は設定の `default_size` を使う。
pub(crate) fn start_selected(
    controller: &GameController,
    presenter: &DomPresenter,
    default_size: BoardSize,
) -> Result<()> {
    let size = presenter.selected_size(default_size)?;
    info!("GameApp: starting {}x{} game", size.dimension(), size.dimension());
    controller.start(size.dimension())
}

/// JS から使うゲーム本体だよ！
///
/// ```js
/// import init, { GameApp } from "./pkg/flip_memory_wasm.js";
/// await init();
/// const app = new GameApp();          // DOM を探してリスナーをつけ、最初のゲームを開始
/// app.start(6);                       // 6x6 でやり直し
/// console.log(JSON.parse(app.state_json()));
/// ```
#[wasm_bindgen]
pub struct GameApp {
    controller: Rc<GameController>,
    presenter: Rc<DomPresenter>,
    default_size: BoardSize,
    // drop されるとリスナーも外れるので持っておく
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl GameApp {
    /// デフォルト設定で作る。
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<GameApp, JsValue> {
        Self::build(GameConfig::default()).map_err(JsValue::from)
    }

    /// JSON の設定 (`{"default_size": 6, "mismatch_delay_ms": 800}` など) で作る。
    pub fn with_config(config_json: &str) -> std::result::Result<GameApp, JsValue> {
        let config = GameConfig::from_json(config_json)?;
        Self::build(config).map_err(JsValue::from)
    }

    /// 指定サイズで新しいゲーム。サイズがおかしい時は JS の Error になるよ。
    pub fn start(&self, size: usize) -> std::result::Result<(), JsValue> {
        self.controller.start(size).map_err(JsValue::from)
    }

    /// 難易度セレクトの値で新しいゲーム。
    pub fn start_selected(&self) -> std::result::Result<(), JsValue> {
        start_selected(&self.controller, &self.presenter, self.default_size).map_err(JsValue::from)
    }

    /// カードをめくる。無視された時は false。
    pub fn reveal_card(&self, index: usize) -> bool {
        self.controller.reveal_card(index) != crate::logic::RevealOutcome::Ignored
    }

    pub fn moves(&self) -> u32 {
        self.controller.moves()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.controller.elapsed_seconds()
    }

    pub fn matched_pairs(&self) -> usize {
        self.controller.matched_pairs()
    }

    pub fn is_won(&self) -> bool {
        self.controller.is_won()
    }

    /// セッションの状態を JSON 文字列で返す (デバッグ・テスト用)。
    pub fn state_json(&self) -> std::result::Result<String, JsValue> {
        state_getter::session_state_json(self.controller.session()).map_err(JsValue::from)
    }
}

impl GameApp {
    fn build(config: GameConfig) -> Result<GameApp> {
        info!("GameApp: initializing with {:?}", config);
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::Dom("no document".to_string()))?;

        let presenter = Rc::new(DomPresenter::from_document(document.clone())?);
        let controller = Rc::new(GameController::new(
            Session::new(SymbolPool::emoji()),
            Rc::new(BrowserScheduler::new()),
            presenter.clone(),
            config.timing(),
        ));
        let default_size = config.default_size;
        let listeners =
            browser_event_manager::attach_game_listeners(&document, &controller, &presenter, default_size)?;

        // ページを開いたらすぐ遊べるように、選択中 (読めなければ設定のデフォルト) で開始
        let size = presenter.selected_size(default_size).unwrap_or(default_size);
        controller.start(size.dimension())?;

        info!("GameApp: ready");
        Ok(GameApp {
            controller,
            presenter,
            default_size,
            _listeners: listeners,
        })
    }
}
