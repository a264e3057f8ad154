// src/logic/session.rs
//! 神経衰弱の1ゲーム分の状態と、ターン判定の状態機械だよ！🧠
//!
//! ブラウザの型は一切使わない純粋なロジック。タイマーや遅延処理は
//! 外 (`app::controller`) が持っていて、ここには「時間が来たよ」と
//! `tick` / `hide_mismatched` を呼んでもらうだけ。

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::components::{Card, CardView, SessionPhase, WinSummary};
use crate::config::SymbolPool;
use crate::error::{GameError, Result};
use crate::logic::deck::build_deck;

/// セッションの世代番号。`start` のたびに 1 増える。
///
/// 遅延コールバックは予約した時の世代を覚えておいて、実行時に今の世代と
/// 違ったら何もしない。これで古いゲームのタイマーが新しい盤面を触る事故を防ぐよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// `reveal_card` の結果。呼び出し側 (コントローラ) はこれを見て
/// タイマー開始や遅延処理の予約、画面更新を決めるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// 無視された (ロック中・範囲外・揃い済み・同じカードの再クリックなど)。
    Ignored,
    /// 1枚目をめくった。
    FirstPick { index: usize, timer_started: bool },
    /// 2枚目でペアが揃った。最後のペアなら `win` が入ってる。
    Matched {
        pair: [usize; 2],
        timer_started: bool,
        win: Option<WinSummary>,
    },
    /// 2枚目が外れた。`hide_mismatched` が呼ばれるまで入力はロック。
    Mismatched { pair: [usize; 2], timer_started: bool },
}

impl RevealOutcome {
    /// この reveal でゲーム時計が動き出したか。
    pub fn timer_started(&self) -> bool {
        match *self {
            RevealOutcome::Ignored => false,
            RevealOutcome::FirstPick { timer_started, .. }
            | RevealOutcome::Matched { timer_started, .. }
            | RevealOutcome::Mismatched { timer_started, .. } => timer_started,
        }
    }
}

/// セッション全体の読み取り専用スナップショット。
/// JSON にして JS に渡したり、テストで「状態が変わってないか」を比べたりするのに使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub generation: Generation,
    pub phase: SessionPhase,
    pub size: usize,
    pub pair_count: usize,
    pub matched_pairs: usize,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub timer_active: bool,
    pub input_locked: bool,
    pub cards: Vec<CardView>,
}

/// 1ゲーム分の状態を全部持つ構造体。
///
/// グローバル変数は使わず、これを1個作って参照で回す。
/// テストでは何個でも同時に作れるよ。
#[derive(Debug)]
pub struct Session {
    pool: SymbolPool,
    rng: StdRng,
    board: Vec<Card>,
    size: usize,
    pair_count: usize,
    matched_pairs: usize,
    moves: u32,
    elapsed_seconds: u32,
    timer_active: bool,
    phase: SessionPhase,
    generation: Generation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SymbolPool::default())
    }
}

impl Session {
    /// OS (ブラウザなら `crypto.getRandomValues`) の乱数で初期化する。
    pub fn new(pool: SymbolPool) -> Self {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// 乱数源を指定して作る。テストではシード固定の `StdRng` を渡すよ。
    pub fn with_rng(pool: SymbolPool, rng: StdRng) -> Self {
        Self {
            pool,
            rng,
            board: Vec::new(),
            size: 0,
            pair_count: 0,
            matched_pairs: 0,
            moves: 0,
            elapsed_seconds: 0,
            timer_active: false,
            phase: SessionPhase::Idle,
            generation: Generation::default(),
        }
    }

    /// 新しいゲームを始める (リスタートも同じ)。
    ///
    /// デッキ作りに失敗したら今のゲームには一切触らずにエラーを返す。
    /// 成功したらタイマーを止めて、カウンタを全部リセットして `Ready` へ。
    pub fn start(&mut self, size: usize) -> Result<()> {
        if size == 0 || size % 2 != 0 {
            return Err(GameError::InvalidSize(size));
        }
        let symbols = build_deck(size, self.pool.as_slice(), &mut self.rng)?;

        self.timer_active = false;
        self.elapsed_seconds = 0;
        self.moves = 0;
        self.matched_pairs = 0;
        self.board = symbols.into_iter().map(Card::face_down).collect();
        self.size = size;
        self.pair_count = self.board.len() / 2;
        self.phase = SessionPhase::Ready;
        self.generation = self.generation.next();

        info!(
            "Session: started {}x{} board ({} pairs), generation {}",
            size, size, self.pair_count, self.generation.0
        );
        Ok(())
    }

    /// カードをめくる。
    ///
    /// 次の場合は何もしない (エラーにもしない):
    /// - 入力ロック中 (`Resolving`)、盤面なし、勝利済み
    /// - インデックスが範囲外
    /// - 既に揃ったカード
    /// - 1枚目としてめくってあるカードをもう一度
    pub fn reveal_card(&mut self, index: usize) -> RevealOutcome {
        let first = match self.phase {
            SessionPhase::Ready => None,
            SessionPhase::AwaitingSecond { first } => Some(first),
            SessionPhase::Idle | SessionPhase::Resolving { .. } | SessionPhase::Won => {
                debug!("Session: reveal {} ignored in phase {:?}", index, self.phase);
                return RevealOutcome::Ignored;
            }
        };
        match self.board.get(index) {
            Some(card) if !card.is_matched && first != Some(index) => {}
            _ => {
                debug!("Session: reveal {} ignored", index);
                return RevealOutcome::Ignored;
            }
        }

        // 時計は最初の「意味のある」めくりで動き出す。
        let timer_started = !self.timer_active;
        self.timer_active = true;
        self.board[index].is_revealed = true;

        let Some(first) = first else {
            self.phase = SessionPhase::AwaitingSecond { first: index };
            return RevealOutcome::FirstPick { index, timer_started };
        };

        let second = index;
        self.phase = SessionPhase::Resolving { first, second };
        self.moves += 1;

        if self.board[first].symbol != self.board[second].symbol {
            debug!("Session: move {} mismatched ({}, {})", self.moves, first, second);
            return RevealOutcome::Mismatched { pair: [first, second], timer_started };
        }

        self.board[first].is_matched = true;
        self.board[second].is_matched = true;
        self.matched_pairs += 1;
        debug!(
            "Session: move {} matched ({}, {}), {}/{} pairs",
            self.moves, first, second, self.matched_pairs, self.pair_count
        );

        let win = if self.matched_pairs == self.pair_count {
            self.timer_active = false;
            self.phase = SessionPhase::Won;
            let summary = self.win_summary();
            info!("Session: won in {} moves, {} seconds", summary.moves, summary.elapsed_seconds);
            Some(summary)
        } else {
            self.phase = SessionPhase::Ready;
            None
        };
        RevealOutcome::Matched { pair: [first, second], timer_started, win }
    }

    /// 外れた2枚を裏返してロックを解く (遅延コールバックから呼ばれる)。
    ///
    /// 世代が古い、もしくは判定待ちじゃない時は `None`。
    pub fn hide_mismatched(&mut self, generation: Generation) -> Option<[usize; 2]> {
        if generation != self.generation {
            debug!("Session: stale hide_mismatched (generation {} != {})", generation.0, self.generation.0);
            return None;
        }
        let SessionPhase::Resolving { first, second } = self.phase else {
            return None;
        };
        self.board[first].is_revealed = false;
        self.board[second].is_revealed = false;
        self.phase = SessionPhase::Ready;
        Some([first, second])
    }

    /// 1秒分進める (周期タイマーから呼ばれる)。新しい経過秒数を返す。
    pub fn tick(&mut self, generation: Generation) -> Option<u32> {
        if generation != self.generation || !self.timer_active {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.elapsed_seconds)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cards(&self) -> &[Card] {
        &self.board
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer_active
    }

    pub fn is_input_locked(&self) -> bool {
        self.phase.is_input_locked()
    }

    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// 勝利済みならその結果。
    pub fn win_summary_if_won(&self) -> Option<WinSummary> {
        self.is_won().then(|| self.win_summary())
    }

    fn win_summary(&self) -> WinSummary {
        WinSummary {
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    pub fn card_view(&self, index: usize) -> Option<CardView> {
        self.board.get(index).map(|card| card.view(index))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            phase: self.phase,
            size: self.size,
            pair_count: self.pair_count,
            matched_pairs: self.matched_pairs,
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
            timer_active: self.timer_active,
            input_locked: self.is_input_locked(),
            cards: self
                .board
                .iter()
                .enumerate()
                .map(|(index, card)| card.view(index))
                .collect(),
        }
    }
}
