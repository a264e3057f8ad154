// src/app/presenter.rs
//! Presentation hooks the controller pushes changes into.

use crate::components::{CardView, WinSummary};
use crate::logic::SessionSnapshot;

/// 画面側が受け取る通知。
///
/// DOM 版は `renderer::DomPresenter`、テストでは呼ばれた内容を記録するだけの偽物を使うよ。
pub trait Presenter {
    /// 盤面を丸ごと描き直す (ゲーム開始時)。
    fn render_board(&self, snapshot: &SessionSnapshot);

    /// カード1枚の見た目を更新する。
    fn update_card(&self, card: &CardView);

    fn update_moves(&self, moves: u32);

    fn update_time(&self, elapsed_seconds: u32);

    fn show_win(&self, summary: &WinSummary);

    fn hide_win(&self);
}

/// 秒数を `MM:SS` にする。60分を超えても分はそのまま増えるよ。
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
