//! Shared draw and discard piles.
//!
//! Both piles are ordered with the top at the end of the vector: draws pop
//! from the back of the draw pile, discards push onto the back of the
//! discard pile.
//!
//! ## Recycling
//!
//! When a draw finds the draw pile empty, the whole discard pile is shuffled
//! and becomes the new draw pile. Callers never see this: they receive as
//! many cards as both piles hold between them.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::GameRng;

/// The draw pile and the discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    /// Face-down cards. Top = last.
    pub draw_pile: Vector<Card>,
    /// Face-up cards. Most recent = last.
    pub discard_pile: Vector<Card>,
}

impl Piles {
    /// Create piles from a shuffled draw pile.
    #[must_use]
    pub fn new(draw_pile: Vector<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile: Vector::new(),
        }
    }

    /// Cards available to draw, counting recyclable discards.
    #[must_use]
    pub fn available(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Top of the discard pile.
    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push_back(card);
    }

    /// Put several cards on the discard pile, in order.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    /// Shuffle the discard pile into the draw pile.
    ///
    /// Returns false if there was nothing to recycle.
    pub fn recycle(&mut self, rng: &mut GameRng) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }

        let cards = rng.shuffled(std::mem::take(&mut self.discard_pile));
        self.draw_pile.append(cards);
        tracing::debug!(cards = self.draw_pile.len(), "recycled discard pile");
        true
    }

    /// Draw one card, recycling the discard pile if needed.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw_pile.is_empty() && !self.recycle(rng) {
            return None;
        }
        self.draw_pile.pop_back()
    }

    /// Draw up to `count` cards.
    ///
    /// Returns fewer only when both piles run dry.
    pub fn draw_many(&mut self, count: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            match self.draw(rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Color};

    fn cards(ids: std::ops::Range<u32>) -> Vector<Card> {
        ids.map(|i| Card::module(CardId::new(i), Color::Backend)).collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut rng = GameRng::new(42);
        let mut piles = Piles::new(cards(0..3));

        assert_eq!(piles.draw(&mut rng).map(|c| c.id), Some(CardId::new(2)));
        assert_eq!(piles.draw_pile.len(), 2);
    }

    #[test]
    fn test_draw_recycles_discard() {
        let mut rng = GameRng::new(42);
        let mut piles = Piles::new(cards(0..1));
        piles.discard_all(cards(10..30));

        let drawn = piles.draw_many(3, &mut rng);

        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].id, CardId::new(0));
        assert!(piles.discard_pile.is_empty());
        assert_eq!(piles.draw_pile.len(), 18);
    }

    #[test]
    fn test_draw_stops_when_both_piles_empty() {
        let mut rng = GameRng::new(42);
        let mut piles = Piles::new(cards(0..1));
        piles.discard(Card::bug(CardId::new(5), Color::Mobile));

        let drawn = piles.draw_many(3, &mut rng);

        assert_eq!(drawn.len(), 2);
        assert_eq!(piles.available(), 0);
        assert!(piles.draw(&mut rng).is_none());
    }

    #[test]
    fn test_recycle_empty_discard() {
        let mut rng = GameRng::new(42);
        let mut piles = Piles::default();
        assert!(!piles.recycle(&mut rng));
    }

    #[test]
    fn test_discard_top() {
        let mut piles = Piles::default();
        piles.discard(Card::bug(CardId::new(1), Color::Mobile));
        piles.discard(Card::bug(CardId::new(2), Color::Mobile));

        assert_eq!(piles.discard_top().map(|c| c.id), Some(CardId::new(2)));
    }
}
