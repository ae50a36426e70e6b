//! Card piles for combat.
//!
//! ## Key Types
//!
//! - `Piles`: draw pile, hand and discard pile, with reshuffle-on-empty
//! - `DrawReport`: what a draw request actually produced
//! - `PileKind`: names a pile when locating a card

pub mod piles;

pub use piles::{DrawReport, PileKind, Piles};
