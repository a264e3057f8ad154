// src/app/controller.rs
//! Session + Scheduler + Presenter をつなぐコントローラだよ！
//!
//! ここが「いつ」を担当する。Session は「何が起きるか」だけを決めて、
//! タイマーの予約や画面への通知はこっちでやるんだ。

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, warn};

use crate::components::CardView;
use crate::config::Timing;
use crate::error::Result;
use crate::logic::{Generation, RevealOutcome, Session, SessionSnapshot};

use super::presenter::Presenter;
use super::scheduler::{Scheduler, TimerHandle};

/// Mutex が poison してても中身を取り出して続行する。
/// ゲームの状態が壊れるわけじゃないので、止まるよりマシ。
pub(crate) fn lock_session(session: &Arc<Mutex<Session>>) -> MutexGuard<'_, Session> {
    match session.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Session mutex was poisoned! Recovering.");
            poisoned.into_inner()
        }
    }
}

pub struct GameController {
    session: Arc<Mutex<Session>>,
    scheduler: Rc<dyn Scheduler>,
    presenter: Rc<dyn Presenter>,
    timing: Timing,
    // 動いてる経過時間タイマー (あれば)
    ticker: RefCell<Option<TimerHandle>>,
}

impl GameController {
    pub fn new(
        session: Session,
        scheduler: Rc<dyn Scheduler>,
        presenter: Rc<dyn Presenter>,
        timing: Timing,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            scheduler,
            presenter,
            timing,
            ticker: RefCell::new(None),
        }
    }

    /// 新しいゲームを始める。失敗したら今のゲームはそのまま続くよ。
    pub fn start(&self, size: usize) -> Result<()> {
        let snapshot = {
            let mut session = lock_session(&self.session);
            session.start(size)?;
            session.snapshot()
        };
        self.stop_ticker();

        self.presenter.hide_win();
        self.presenter.render_board(&snapshot);
        self.presenter.update_moves(snapshot.moves);
        self.presenter.update_time(snapshot.elapsed_seconds);
        Ok(())
    }

    /// カードをめくって、結果に応じてタイマー予約と画面更新をする。
    pub fn reveal_card(&self, index: usize) -> RevealOutcome {
        // ロックは presenter を呼ぶ前に手放す
        let (outcome, generation, moves, changed) = {
            let mut session = lock_session(&self.session);
            let outcome = session.reveal_card(index);
            let touched: Vec<usize> = match outcome {
                RevealOutcome::Ignored => Vec::new(),
                RevealOutcome::FirstPick { index, .. } => vec![index],
                RevealOutcome::Matched { pair, .. } | RevealOutcome::Mismatched { pair, .. } => pair.to_vec(),
            };
            let changed: Vec<CardView> = touched.into_iter().filter_map(|i| session.card_view(i)).collect();
            (outcome, session.generation(), session.moves(), changed)
        };

        if outcome == RevealOutcome::Ignored {
            return outcome;
        }
        if outcome.timer_started() {
            self.start_ticker(generation);
        }
        for card in &changed {
            self.presenter.update_card(card);
        }

        match outcome {
            RevealOutcome::Ignored | RevealOutcome::FirstPick { .. } => {}
            RevealOutcome::Matched { win, .. } => {
                self.presenter.update_moves(moves);
                if let Some(summary) = win {
                    self.stop_ticker();
                    self.presenter.show_win(&summary);
                }
            }
            RevealOutcome::Mismatched { .. } => {
                self.presenter.update_moves(moves);
                self.schedule_hide(generation);
            }
        }
        outcome
    }

    pub fn moves(&self) -> u32 {
        lock_session(&self.session).moves()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        lock_session(&self.session).elapsed_seconds()
    }

    pub fn matched_pairs(&self) -> usize {
        lock_session(&self.session).matched_pairs()
    }

    pub fn is_won(&self) -> bool {
        lock_session(&self.session).is_won()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock_session(&self.session).snapshot()
    }

    pub(crate) fn session(&self) -> &Arc<Mutex<Session>> {
        &self.session
    }

    fn schedule_hide(&self, generation: Generation) {
        let session = Arc::clone(&self.session);
        let presenter = Rc::clone(&self.presenter);
        let task = Box::new(move || hide_mismatched_pair(&session, presenter.as_ref(), generation));
        if let Err(e) = self.scheduler.schedule_once(self.timing.mismatch_delay_ms, task) {
            // 予約できないとロックが解けなくなるので、その場で裏返す
            warn!("GameController: could not schedule un-reveal ({}), hiding now", e);
            hide_mismatched_pair(&self.session, self.presenter.as_ref(), generation);
        }
    }

    fn start_ticker(&self, generation: Generation) {
        self.stop_ticker();
        let session = Arc::clone(&self.session);
        let presenter = Rc::clone(&self.presenter);
        let task = Box::new(move || {
            let elapsed = lock_session(&session).tick(generation);
            if let Some(seconds) = elapsed {
                presenter.update_time(seconds);
            }
        });
        match self.scheduler.schedule_repeating(self.timing.tick_ms, task) {
            Ok(handle) => {
                debug!("GameController: ticker {:?} started for generation {}", handle, generation.0);
                *self.ticker.borrow_mut() = Some(handle);
            }
            Err(e) => error!("GameController: failed to start ticker: {}", e),
        }
    }

    fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.borrow_mut().take() {
            self.scheduler.cancel(handle);
            debug!("GameController: ticker {:?} stopped", handle);
        }
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn hide_mismatched_pair(session: &Arc<Mutex<Session>>, presenter: &dyn Presenter, generation: Generation) {
    let changed: Vec<CardView> = {
        let mut session = lock_session(session);
        match session.hide_mismatched(generation) {
            Some(pair) => pair.iter().filter_map(|&i| session.card_view(i)).collect(),
            None => return,
        }
    };
    for card in &changed {
        presenter.update_card(card);
    }
}
