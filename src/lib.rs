use std::{
    error,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use num_bigint::BigInt;

pub mod deck;
pub mod shuffle;
pub mod technique;

pub use deck::Deck;
pub use shuffle::DeckShuffle;
pub use technique::{check_techniques, parse_techniques, Technique};

pub const DIRECT_DECK_SIZE: usize = 10007;
pub const DIRECT_TARGET_CARD: usize = 2019;
pub const COMPOSED_DECK_SIZE: u64 = 119315717514047;
pub const COMPOSED_REPEAT_COUNT: u64 = 101741582076661;
pub const COMPOSED_QUERY_POSITION: u64 = 2020;

#[derive(Debug)]
pub enum Error {
    InvalidTechStr(String),
    InvalidTechLine(usize, String), // (line number counted from 1, text of line)
    CardNotFound(usize, usize),     // (card, count of cards in deck)
    InvalidDeckSize(u64),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidTechStr(s) => write!(f, "Invalid shuffle technique description({})", s),
            Error::InvalidTechLine(line_n, s) => write!(
                f,
                "Invalid shuffle technique description({}) at line {}",
                s, line_n
            ),
            Error::CardNotFound(card, cards_n) => {
                write!(f, "Card({}) isn't in deck with {} cards", card, cards_n)
            }
            Error::InvalidDeckSize(cards_n) => write!(
                f,
                "Invalid deck size {} for composed shuffle, expect at least 2 cards",
                cards_n
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct DirectArgs {
    pub input_path: PathBuf,
    /// Count of cards in deck
    #[arg(long, default_value_t = DIRECT_DECK_SIZE)]
    pub deck_size: usize,
    /// Card to find after shuffle
    #[arg(long, default_value_t = DIRECT_TARGET_CARD)]
    pub card: usize,
    /// Fail on lines which aren't shuffle techniques instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Parser)]
pub struct ComposedArgs {
    pub input_path: PathBuf,
    /// Count of cards in deck, must be a prime
    #[arg(long, default_value_t = COMPOSED_DECK_SIZE, value_parser = clap::value_parser!(u64).range(2..))]
    pub deck_size: u64,
    /// Times to repeat the whole shuffle
    #[arg(long, default_value_t = COMPOSED_REPEAT_COUNT)]
    pub repeat: u64,
    /// Position to look up after all shuffles
    #[arg(long, default_value_t = COMPOSED_QUERY_POSITION)]
    pub position: u64,
    /// Fail on lines which aren't shuffle techniques instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

pub fn read_techniques_text<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(&path).with_context(|| {
        format!(
            "Failed to read shuffle techniques from given file({}).",
            path.as_ref().display()
        )
    })
}

pub fn find_card_position(text: &str, cards_n: usize, card: usize) -> Option<usize> {
    let deck = Deck::run(cards_n, text);
    debug!("Shuffled deck of {} cards by simulation.", deck.len());
    deck.find(card)
}

// cards_n must be a prime.
pub fn card_at_after_repeats(
    text: &str,
    cards_n: u64,
    repeat_count: u64,
    position: u64,
) -> Result<BigInt, Error> {
    let techs = technique::parse_techniques(text);
    Ok(DeckShuffle::new(&techs, cards_n)?
        .repeat(repeat_count)
        .card_at(position))
}

pub fn solve_direct_query(text: &str) -> Option<usize> {
    find_card_position(text, DIRECT_DECK_SIZE, DIRECT_TARGET_CARD)
}

pub fn solve_composed_query(text: &str) -> Result<String, Error> {
    card_at_after_repeats(
        text,
        COMPOSED_DECK_SIZE,
        COMPOSED_REPEAT_COUNT,
        COMPOSED_QUERY_POSITION,
    )
    .map(|card| card.to_string())
}

#[test]
fn test_solve_direct_query() {
    assert_eq!(solve_direct_query("deal into new stack\n"), Some(7987));
    assert_eq!(solve_direct_query("cut 2019"), Some(0));
    assert_eq!(find_card_position("deal into new stack", 10, 2019), None);
}

#[test]
fn test_solve_composed_query() {
    // Odd count of reversals leaves the deck reversed.
    assert_eq!(
        solve_composed_query("deal into new stack").unwrap(),
        "119315717512026"
    );
    assert_eq!(solve_composed_query("cut 1").unwrap(), "101741582078681");
    assert_eq!(solve_composed_query("").unwrap(), "2020");
}

#[test]
fn test_composed_query_rejects_tiny_deck() {
    for cards_n in [0, 1] {
        assert!(matches!(
            card_at_after_repeats("cut 1", cards_n, 5, 0),
            Err(Error::InvalidDeckSize(n)) if n == cards_n
        ));
    }
}

#[test]
fn test_queries_agree_on_prime_deck() {
    let text = "deal with increment 7\ncut 6\ndeal into new stack\ncut -4321\ndeal with increment 55";
    let deck = Deck::run(DIRECT_DECK_SIZE, text);
    for pos in [0, 17, 2020, 10006] {
        assert_eq!(
            card_at_after_repeats(text, DIRECT_DECK_SIZE as u64, 1, pos as u64).unwrap(),
            BigInt::from(deck.cards()[pos])
        );
    }
}
