// src/app/test_support.rs
//! テスト用の偽スケジューラと記録するだけのプレゼンター。

use std::cell::RefCell;
use std::collections::HashSet;

use crate::components::{CardView, WinSummary};
use crate::error::{GameError, Result};
use crate::logic::SessionSnapshot;

use super::presenter::Presenter;
use super::scheduler::{Scheduler, TimerHandle};

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeating { period: u64, task: Box<dyn FnMut()> },
}

struct Pending {
    handle: TimerHandle,
    due: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: i32,
    queue: Vec<Pending>,
    cancelled: HashSet<TimerHandle>,
}

/// `advance` で手動で時計を進めるスケジューラ。
#[derive(Default)]
pub struct ManualScheduler {
    clock: RefCell<Clock>,
    fail: bool,
}

impl ManualScheduler {
    /// 予約を全部失敗させる版。
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// まだ実行されてない予約の数。
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// 時計を `ms` 進めて、期限が来たものを期限順に実行する。
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            // 実行中のタスクが schedule/cancel できるように、取り出してから借用を手放す
            let next = {
                let mut clock = self.clock.borrow_mut();
                let position = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.handle.0))
                    .map(|(i, _)| i);
                position.map(|i| {
                    let pending = clock.queue.remove(i);
                    clock.now = pending.due;
                    pending
                })
            };
            let Some(Pending { handle, due, task }) = next else {
                break;
            };
            match task {
                Task::Once(task) => task(),
                Task::Repeating { period, mut task } => {
                    task();
                    let mut clock = self.clock.borrow_mut();
                    if !clock.cancelled.contains(&handle) {
                        clock.queue.push(Pending {
                            handle,
                            due: due + period,
                            task: Task::Repeating { period, task },
                        });
                    }
                }
            }
        }
        self.clock.borrow_mut().now = target;
    }

    fn push(&self, delay_ms: u32, task: Task) -> Result<TimerHandle> {
        if self.fail {
            return Err(GameError::Scheduler("scheduler unavailable".to_string()));
        }
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let handle = TimerHandle(clock.next_id);
        let due = clock.now + u64::from(delay_ms);
        clock.queue.push(Pending { handle, due, task });
        Ok(handle)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<TimerHandle> {
        self.push(delay_ms, Task::Once(task))
    }

    fn schedule_repeating(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Result<TimerHandle> {
        self.push(period_ms, Task::Repeating { period: u64::from(period_ms), task })
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut clock = self.clock.borrow_mut();
        clock.queue.retain(|p| p.handle != handle);
        clock.cancelled.insert(handle);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    RenderBoard { cards: usize },
    Card(CardView),
    Moves(u32),
    Time(u32),
    ShowWin(WinSummary),
    HideWin,
}

/// 呼ばれた通知を順番に記録するだけのプレゼンター。
#[derive(Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn last_time(&self) -> Option<u32> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            PresenterEvent::Time(t) => Some(*t),
            _ => None,
        })
    }

    pub fn last_moves(&self) -> Option<u32> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            PresenterEvent::Moves(m) => Some(*m),
            _ => None,
        })
    }

    fn record(&self, event: PresenterEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn render_board(&self, snapshot: &SessionSnapshot) {
        self.record(PresenterEvent::RenderBoard { cards: snapshot.cards.len() });
    }

    fn update_card(&self, card: &CardView) {
        self.record(PresenterEvent::Card(card.clone()));
    }

    fn update_moves(&self, moves: u32) {
        self.record(PresenterEvent::Moves(moves));
    }

    fn update_time(&self, elapsed_seconds: u32) {
        self.record(PresenterEvent::Time(elapsed_seconds));
    }

    fn show_win(&self, summary: &WinSummary) {
        self.record(PresenterEvent::ShowWin(*summary));
    }

    fn hide_win(&self) {
        self.record(PresenterEvent::HideWin);
    }
}
