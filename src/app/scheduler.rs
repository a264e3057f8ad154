// src/app/scheduler.rs
//! Delayed and periodic callbacks. The browser version uses `gloo_timers` (`setTimeout` / `setInterval`).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::debug;

use crate::error::Result;

/// 予約したタイマーのハンドル。`cancel` に渡して止めるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// 一回きり / 周期実行のコールバックを予約できるもの。
///
/// コントローラはこれ越しにしか時間を扱わないので、テストでは
/// 手動で時計を進める偽物に差し替えられるよ。
pub trait Scheduler {
    /// `delay_ms` 後に一回だけ `task` を実行する。
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<TimerHandle>;

    /// `period_ms` ごとに `task` を実行する。`cancel` されるまで続くよ。
    fn schedule_repeating(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Result<TimerHandle>;

    /// 予約を取り消す。もう終わってるハンドルでも大丈夫。
    fn cancel(&self, handle: TimerHandle);
}

#[derive(Default)]
struct Timers {
    timeouts: HashMap<TimerHandle, Timeout>,
    intervals: HashMap<TimerHandle, Interval>,
}

/// `gloo_timers` の `Timeout` / `Interval` を持っておくスケジューラ。
///
/// gloo のタイマーは drop されると clear されるので、`cancel` は表から外すだけ。
/// スケジューラごと drop すれば残りの予約も全部止まるよ。
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<i32>,
    timers: Rc<RefCell<Timers>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> TimerHandle {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        TimerHandle(id)
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<TimerHandle> {
        let handle = self.next_handle();
        let timers = Rc::downgrade(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            // 発火したものは表から外す
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().timeouts.remove(&handle);
            }
            task();
        });
        self.timers.borrow_mut().timeouts.insert(handle, timeout);
        debug!("BrowserScheduler: timeout {:?} scheduled in {}ms", handle, delay_ms);
        Ok(handle)
    }

    fn schedule_repeating(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Result<TimerHandle> {
        let handle = self.next_handle();
        let interval = Interval::new(period_ms, task);
        self.timers.borrow_mut().intervals.insert(handle, interval);
        debug!("BrowserScheduler: interval {:?} every {}ms", handle, period_ms);
        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut timers = self.timers.borrow_mut();
        let removed = timers.timeouts.remove(&handle).is_some() | timers.intervals.remove(&handle).is_some();
        if removed {
            debug!("BrowserScheduler: cancelled {:?}", handle);
        }
    }
}
