use std::fmt::Display;

use log::{debug, trace};
use num_bigint::{BigInt, Sign};

use crate::{technique::Technique, Error};

// Card at position p is offset + increment * p, modulo a prime count of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckShuffle {
    cards_n: BigInt,
    offset: BigInt,
    increment: BigInt,
}

impl Display for DeckShuffle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "card(p) = {} + {} * p (mod {})",
            self.offset, self.increment, self.cards_n
        )
    }
}

impl DeckShuffle {
    pub fn new<'a, I: IntoIterator<Item = &'a Technique>>(
        iter: I,
        cards_n: u64,
    ) -> Result<Self, Error> {
        let shuffle = iter.into_iter().fold(Self::ident(cards_n)?, |mut res, tech| {
            res.combine(tech);
            res
        });
        debug!("Composed shuffle: {}.", shuffle);

        Ok(shuffle)
    }

    pub fn ident(cards_n: u64) -> Result<Self, Error> {
        if cards_n < 2 {
            return Err(Error::InvalidDeckSize(cards_n));
        }

        Ok(Self {
            cards_n: BigInt::from(cards_n),
            offset: BigInt::from(0),
            increment: BigInt::from(1),
        })
    }

    pub fn deck_size(&self) -> &BigInt {
        &self.cards_n
    }

    pub fn offset(&self) -> &BigInt {
        &self.offset
    }

    pub fn increment(&self) -> &BigInt {
        &self.increment
    }

    pub fn combine(&mut self, tech: &Technique) {
        match tech {
            Technique::NewStack => {
                self.increment = self.reduce(-&self.increment);
                self.offset = self.reduce(&self.offset + &self.increment);
            }
            Technique::Cut(n) => {
                self.offset = self.reduce(&self.offset + BigInt::from(*n) * &self.increment)
            }
            Technique::Increment(n) => {
                self.increment =
                    self.reduce(&self.increment * mod_inverse(&BigInt::from(*n), &self.cards_n))
            }
            Technique::Unknown(_) => {}
        }
        trace!("After ({}): {}.", tech, self);
    }

    pub fn repeat(&self, count: u64) -> Self {
        let one = BigInt::from(1);
        let count = BigInt::from(count);
        let increment = self.increment.modpow(&count, &self.cards_n);
        // Offset sums up offset * increment^k for k in 0..count.
        let offset = if self.increment == one {
            self.reduce(&self.offset * &count)
        } else {
            let series_factor = self.reduce(&one - &increment)
                * mod_inverse(&self.reduce(&one - &self.increment), &self.cards_n);
            self.reduce(&self.offset * series_factor)
        };
        let repeated = Self {
            cards_n: self.cards_n.clone(),
            offset,
            increment,
        };
        debug!("Shuffle repeated {} times: {}.", count, repeated);

        repeated
    }

    pub fn card_at(&self, position: u64) -> BigInt {
        self.reduce(&self.offset + &self.increment * BigInt::from(position))
    }

    pub fn position_of(&self, card: u64) -> BigInt {
        self.reduce(
            (BigInt::from(card) - &self.offset) * mod_inverse(&self.increment, &self.cards_n),
        )
    }

    fn reduce(&self, n: BigInt) -> BigInt {
        normalize(n, &self.cards_n)
    }
}

pub fn normalize(n: BigInt, m: &BigInt) -> BigInt {
    let rem = n % m;
    if rem.sign() == Sign::Minus {
        rem + m
    } else {
        rem
    }
}

// m must be a prime, n^(m - 1) = 1 (mod m).
pub fn mod_inverse(n: &BigInt, m: &BigInt) -> BigInt {
    normalize(n.clone(), m).modpow(&(m - BigInt::from(2)), m)
}

#[cfg(test)]
fn example_text() -> &'static str {
    "deal into new stack\ncut -2\ndeal with increment 7\ncut 8\ncut -4\ndeal with increment 7\ncut 3\ndeal with increment 9\ndeal with increment 3\ncut -1"
}

#[test]
fn test_mod_inverse() {
    assert_eq!(
        mod_inverse(&BigInt::from(3), &BigInt::from(7)),
        BigInt::from(5)
    );
    assert_eq!(
        mod_inverse(&BigInt::from(-3), &BigInt::from(7)),
        BigInt::from(2)
    );
    let m = BigInt::from(crate::COMPOSED_DECK_SIZE);
    let n = BigInt::from(101741582076661u64);
    assert_eq!(normalize(&n * mod_inverse(&n, &m), &m), BigInt::from(1));
}

#[test]
fn test_normalize_negative() {
    let m = BigInt::from(11);
    assert_eq!(normalize(BigInt::from(-5), &m), BigInt::from(6));
    assert_eq!(normalize(BigInt::from(-22), &m), BigInt::from(0));
    assert_eq!(normalize(BigInt::from(25), &m), BigInt::from(3));

    let shuffle = DeckShuffle::new(&[Technique::Cut(-5)], 11).unwrap();
    assert_eq!(shuffle.offset(), &BigInt::from(6));
    let shuffle = DeckShuffle::new(&[Technique::NewStack, Technique::Cut(-20)], 11).unwrap();
    assert!(shuffle.offset().sign() != Sign::Minus && shuffle.offset() < shuffle.deck_size());
    assert!(shuffle.increment().sign() != Sign::Minus);
}

#[test]
fn test_increments_agree_with_deck() {
    use crate::deck::Deck;

    let cards_n = 13;
    for n in 1..cards_n {
        for m in 1..cards_n {
            let techs = [Technique::Increment(n), Technique::Increment(m)];
            let deck = techs
                .iter()
                .fold(Deck::new(cards_n as usize), |deck, tech| deck.apply(tech));
            let shuffle = DeckShuffle::new(&techs, cards_n).unwrap();
            for (pos, card) in deck.cards().iter().enumerate() {
                assert_eq!(shuffle.card_at(pos as u64), BigInt::from(*card));
            }
        }
    }
}

#[test]
fn test_single_shuffle_agrees_with_deck() {
    use crate::{deck::Deck, technique};

    let cards_n = 10007;
    let deck = Deck::run(cards_n, example_text());
    let shuffle =
        DeckShuffle::new(&technique::parse_techniques(example_text()), cards_n as u64).unwrap().repeat(1);
    for (pos, card) in deck.cards().iter().enumerate() {
        assert_eq!(shuffle.card_at(pos as u64), BigInt::from(*card));
    }
    for card in [0, 1, 2019, 10006] {
        assert_eq!(
            shuffle.position_of(card as u64),
            BigInt::from(deck.find(card).unwrap())
        );
    }
}

#[test]
fn test_repeated_shuffle_agrees_with_deck() {
    use crate::{deck::Deck, technique};

    let cards_n = 10007;
    let text = std::iter::repeat(example_text()).take(3).collect::<Vec<_>>().join("\n");
    let deck = Deck::run(cards_n, &text);
    let shuffle =
        DeckShuffle::new(&technique::parse_techniques(example_text()), cards_n as u64).unwrap().repeat(3);
    for (pos, card) in deck.cards().iter().enumerate() {
        assert_eq!(shuffle.card_at(pos as u64), BigInt::from(*card));
    }
}

#[test]
fn test_repeat_cut_only() {
    // Increment stays 1, the series has no closed form through inverse(1 - increment).
    let shuffle = DeckShuffle::new(&[Technique::Cut(3)], 11).unwrap().repeat(5);
    assert_eq!(shuffle.increment(), &BigInt::from(1));
    assert_eq!(shuffle.card_at(2), BigInt::from(6));
}

#[test]
fn test_repeat_zero_is_ident() {
    let shuffle = DeckShuffle::new(&crate::technique::parse_techniques(example_text()), 10007).unwrap();
    assert_eq!(shuffle.repeat(0), DeckShuffle::ident(10007).unwrap());
}

#[test]
fn test_identity_techniques() {
    let ident = DeckShuffle::ident(10007).unwrap();
    assert_eq!(DeckShuffle::new(&[Technique::Cut(0)], 10007).unwrap(), ident);
    assert_eq!(DeckShuffle::new(&[Technique::Increment(1)], 10007).unwrap(), ident);
    assert_eq!(
        DeckShuffle::new(&[Technique::Unknown("bogus".to_string())], 10007).unwrap(),
        ident
    );
}

#[test]
fn test_new_stack_twice() {
    let shuffle = DeckShuffle::new(&[Technique::NewStack], 10007).unwrap();
    assert_eq!(shuffle.card_at(2020), BigInt::from(7986));
    assert_eq!(shuffle.repeat(2), DeckShuffle::ident(10007).unwrap());
    assert_eq!(shuffle.repeat(3).card_at(2020), BigInt::from(7986));
}

#[test]
fn test_too_small_deck() {
    assert!(matches!(DeckShuffle::ident(1), Err(Error::InvalidDeckSize(1))));
    assert!(matches!(
        DeckShuffle::new(&[Technique::Cut(1)], 0),
        Err(Error::InvalidDeckSize(0))
    ));
    assert!(DeckShuffle::ident(2).is_ok());
}
