use log::trace;

use crate::technique::{self, Technique};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<usize>,
}

impl Deck {
    pub fn new(cards_n: usize) -> Self {
        Self {
            cards: (0..cards_n).collect(),
        }
    }

    pub fn run(cards_n: usize, text: &str) -> Self {
        technique::parse_techniques(text)
            .iter()
            .fold(Self::new(cards_n), |deck, tech| deck.apply(tech))
    }

    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find(&self, card: usize) -> Option<usize> {
        self.cards.iter().position(|c| *c == card)
    }

    pub fn shuffle(&mut self, tech: &Technique) {
        *self = self.apply(tech);
    }

    pub fn apply(&self, tech: &Technique) -> Self {
        trace!("Apply ({}) to deck of {} cards.", tech, self.len());
        let cards = match tech {
            Technique::NewStack => self.cards.iter().rev().copied().collect(),
            Technique::Cut(n) => self.cut(*n),
            Technique::Increment(n) => self.deal_with_inc(*n),
            Technique::Unknown(_) => self.cards.clone(),
        };

        Self { cards }
    }

    fn cut(&self, n: i64) -> Vec<usize> {
        if self.cards.is_empty() {
            return Vec::new();
        }

        // Negative cut takes cards from the bottom, same as cutting len + n from the top.
        let split_ind = i128::from(n).rem_euclid(self.cards.len() as i128) as usize;
        self.cards[split_ind..]
            .iter()
            .chain(&self.cards[..split_ind])
            .copied()
            .collect()
    }

    fn deal_with_inc(&self, n: u64) -> Vec<usize> {
        let cards_n = self.cards.len() as u128;
        let mut cards = vec![0; self.cards.len()];
        for (ind, card) in self.cards.iter().enumerate() {
            let target_ind = (ind as u128 * u128::from(n) % cards_n) as usize;
            cards[target_ind] = *card;
        }

        cards
    }
}

#[test]
fn test_new_stack() {
    let deck = Deck::run(10, "deal into new stack");
    assert_eq!(deck.cards(), &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn test_cut() {
    assert_eq!(
        Deck::run(10, "cut 3").cards(),
        &[3, 4, 5, 6, 7, 8, 9, 0, 1, 2]
    );
    assert_eq!(
        Deck::run(10, "cut -4").cards(),
        &[6, 7, 8, 9, 0, 1, 2, 3, 4, 5]
    );
    assert_eq!(Deck::run(10, "cut 13"), Deck::run(10, "cut 3"));
}

#[test]
fn test_deal_with_increment() {
    assert_eq!(
        Deck::run(10, "deal with increment 3").cards(),
        &[0, 7, 4, 1, 8, 5, 2, 9, 6, 3]
    );
}

#[test]
fn test_example_sequences() {
    let cases = [
        (
            "deal with increment 7\ndeal into new stack\ndeal into new stack",
            [0, 3, 6, 9, 2, 5, 8, 1, 4, 7],
        ),
        (
            "cut 3\ndeal with increment 7\ndeal into new stack",
            [0, 7, 4, 1, 8, 5, 2, 9, 6, 3],
        ),
        (
            "cut 6\ndeal with increment 7\ndeal into new stack",
            [3, 0, 7, 4, 1, 8, 5, 2, 9, 6],
        ),
        (
            "deal with increment 7\ndeal with increment 9\ncut -2",
            [6, 3, 0, 7, 4, 1, 8, 5, 2, 9],
        ),
        (
            "deal into new stack\ncut -2\ndeal with increment 7\ncut 8\ncut -4\ndeal with increment 7\ncut 3\ndeal with increment 9\ndeal with increment 3\ncut -1",
            [9, 2, 5, 8, 1, 4, 7, 0, 3, 6],
        ),
    ];
    for (text, expect_cards) in cases {
        assert_eq!(Deck::run(10, text).cards(), &expect_cards, "shuffle: {:?}", text);
    }
}

#[test]
fn test_techniques_keep_permutation() {
    let techs = [
        Technique::NewStack,
        Technique::Cut(3),
        Technique::Cut(-4),
        Technique::Cut(27),
        Technique::Increment(3),
        Technique::Increment(7),
        Technique::Increment(13),
    ];
    for cards_n in [10, 11] {
        for tech in &techs {
            let mut cards = Deck::new(cards_n).apply(tech).cards().to_vec();
            cards.sort_unstable();
            assert_eq!(cards, (0..cards_n).collect::<Vec<_>>(), "technique: {}", tech);
        }
    }
}

#[test]
fn test_identity_techniques() {
    let deck = Deck::run(10, "cut 6\ndeal with increment 7");
    assert_eq!(deck.apply(&Technique::Cut(0)), deck);
    assert_eq!(deck.apply(&Technique::Increment(1)), deck);
    assert_eq!(deck.apply(&Technique::Unknown("bogus".to_string())), deck);
}

#[test]
fn test_shuffle_in_place_and_find() {
    let mut deck = Deck::new(10);
    deck.shuffle(&Technique::NewStack);
    deck.shuffle(&Technique::Cut(2));
    assert_eq!(deck.find(0), Some(7));
    assert_eq!(deck.find(10), None);
}

#[test]
fn test_unknown_line_is_skipped() {
    assert_eq!(
        Deck::run(10, "deal into new stack\nshuffle wildly\ncut 2\n"),
        Deck::run(10, "deal into new stack\ncut 2")
    );
}
