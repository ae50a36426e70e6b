//! Draw pile, hand and discard pile.
//!
//! The three piles together always hold exactly the permanent deck for the
//! current level: cards only ever move between them. Piles are `im`
//! vectors, so a UI snapshot per frame clones in O(1).
//!
//! ## Ordering
//!
//! The draw pile's top is its **back**; drawing pops from the back. The
//! hand keeps draw order. The discard pile appends to its back.
//!
//! ## Reshuffle
//!
//! When a draw finds the draw pile empty and the discard pile non-empty,
//! the discard pile is shuffled and becomes the draw pile, and the draw
//! continues. With both empty the draw stops short; that is reported, not
//! an error.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardTemplateId, HandPassive};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// Outcome of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    pub requested: usize,
    /// Ids drawn, in draw order.
    pub drawn: Vec<EntityId>,
    /// Whether the discard pile was reshuffled during this draw.
    pub reshuffled: bool,
}

impl DrawReport {
    /// Whether fewer cards came out than were asked for.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.drawn.len() < self.requested
    }
}

/// Which pile a card is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Draw,
    Hand,
    Discard,
}

/// The three combat piles.
///
/// ## Usage
///
/// ```
/// use deck_descent::cards::{card_definition, CardInstance, CardTemplateId};
/// use deck_descent::core::{EntityId, GameRng};
/// use deck_descent::zones::Piles;
///
/// let strike = card_definition(CardTemplateId::Strike);
/// let deck: im::Vector<_> = (0..5)
///     .map(|i| CardInstance::from_definition(EntityId(i), &strike))
///     .collect();
///
/// let mut rng = GameRng::new(1);
/// let mut piles = Piles::new();
/// piles.reset(&deck, &mut rng);
///
/// let report = piles.draw(3, &mut rng);
/// assert_eq!(report.drawn.len(), 3);
/// assert_eq!(piles.hand().len(), 3);
/// assert_eq!(piles.total(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    draw: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    discard: Vector<CardInstance>,
}

impl Piles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Level start: the whole deck, shuffled, into the draw pile.
    ///
    /// Panics if the deck holds the same card id twice.
    pub fn reset(&mut self, deck: &Vector<CardInstance>, rng: &mut GameRng) {
        let mut seen = FxHashSet::default();
        for card in deck {
            if !seen.insert(card.id) {
                panic!("Card {} appears twice in the deck", card.id);
            }
        }

        let mut cards: Vec<CardInstance> = deck.iter().cloned().collect();
        rng.shuffle(&mut cards);

        self.draw = cards.into_iter().collect();
        self.hand = Vector::new();
        self.discard = Vector::new();
    }

    /// Move the first draw-pile card of `template` into the hand.
    ///
    /// Matches by identity, not position. Returns the id moved, or `None`
    /// when no such card is in the draw pile.
    pub fn pull_to_hand(&mut self, template: CardTemplateId) -> Option<EntityId> {
        let idx = self.draw.iter().position(|c| c.template == template)?;
        let card = self.draw.remove(idx);
        let id = card.id;
        self.hand.push_back(card);
        Some(id)
    }

    /// Draw up to `count` cards, reshuffling the discard pile if needed.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> DrawReport {
        let mut report = DrawReport {
            requested: count,
            ..Default::default()
        };

        for _ in 0..count {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle(rng);
                report.reshuffled = true;
            }
            let Some(card) = self.draw.pop_back() else {
                break;
            };
            report.drawn.push(card.id);
            self.hand.push_back(card);
        }

        report
    }

    /// Draw until the hand holds `limit` cards (never discards down).
    pub fn draw_to(&mut self, limit: usize, rng: &mut GameRng) -> DrawReport {
        let missing = limit.saturating_sub(self.hand.len());
        self.draw(missing, rng)
    }

    fn reshuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardInstance> = std::mem::take(&mut self.discard).into_iter().collect();
        rng.shuffle(&mut cards);
        self.draw.extend(cards);
    }

    /// Remove a card from the hand. `None` if it is not in hand.
    pub fn take_from_hand(&mut self, id: EntityId) -> Option<CardInstance> {
        let idx = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(idx))
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: CardInstance) {
        self.discard.push_back(card);
    }

    /// Move the whole hand to the discard pile. Returns how many moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        let hand = std::mem::take(&mut self.hand);
        self.discard.append(hand);
        count
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardInstance> {
        &self.draw
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardInstance> {
        &self.discard
    }

    #[must_use]
    pub fn in_hand(&self, id: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Which pile holds `id`, if any.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<PileKind> {
        if self.hand.iter().any(|c| c.id == id) {
            Some(PileKind::Hand)
        } else if self.draw.iter().any(|c| c.id == id) {
            Some(PileKind::Draw)
        } else if self.discard.iter().any(|c| c.id == id) {
            Some(PileKind::Discard)
        } else {
            None
        }
    }

    /// Cards across all three piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }

    /// Every card id across all piles, sorted.
    #[must_use]
    pub fn all_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .draw
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    }

    /// Flat damage bonus from DamageBoost cards currently held.
    #[must_use]
    pub fn hand_damage_boost(&self) -> i32 {
        self.hand.iter().map(CardInstance::damage_boost).sum()
    }

    /// Block and heal granted by held cards at turn end.
    #[must_use]
    pub fn hand_turn_end_passives(&self) -> Vec<(EntityId, HandPassive)> {
        self.hand
            .iter()
            .filter_map(|c| match c.passive {
                Some(p @ (HandPassive::HealOnTurnEnd(_) | HandPassive::BlockOnTurnEnd(_))) => Some((c.id, p)),
                _ => None,
            })
            .collect()
    }
}
