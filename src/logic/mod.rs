// src/logic/mod.rs
//! ゲームのルール部分。ブラウザに依存しない純粋なロジックだけ置くよ！

pub mod deck;
pub mod session;


pub use deck::{build_deck, shuffle};
pub use session::{Generation, RevealOutcome, Session, SessionSnapshot};
