use std::fmt::Display;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Technique {
    NewStack,
    Cut(i64),
    Increment(u64),
    Unknown(String), // Text of a line matching none of the techniques, applying it changes nothing.
}

impl Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::NewStack => write!(f, "deal into new stack"),
            Technique::Cut(n) => write!(f, "cut {}", n),
            Technique::Increment(n) => write!(f, "deal with increment {}", n),
            Technique::Unknown(s) => write!(f, "{}", s),
        }
    }
}

impl TryFrom<&str> for Technique {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match Self::parse(value) {
            Technique::Unknown(s) => Err(Error::InvalidTechStr(s)),
            tech => Ok(tech),
        }
    }
}

impl Technique {
    pub fn parse(s: &str) -> Self {
        type TechConFn = fn(&str) -> Option<Technique>;
        static TECH_CONSTRUCTORS: Lazy<Vec<TechConFn>> = Lazy::new(|| {
            vec![
                Technique::try_into_new_stack as TechConFn,
                Technique::try_into_cut as TechConFn,
                Technique::try_into_inc as TechConFn,
            ]
        });

        TECH_CONSTRUCTORS
            .iter()
            .find_map(|c| c(s))
            .unwrap_or_else(|| Self::Unknown(s.to_string()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Technique::Unknown(_))
    }

    fn try_into_new_stack(s: &str) -> Option<Self> {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)^\s*deal\s+into\s+new\s+stack\s*$").unwrap());
        PATTERN.is_match(s).then_some(Self::NewStack)
    }

    fn try_into_cut(s: &str) -> Option<Self> {
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*cut\s+(-?\d+)\s*$").unwrap());
        PATTERN
            .captures(s)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .map(Self::Cut)
    }

    fn try_into_inc(s: &str) -> Option<Self> {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)^\s*deal\s+with\s+increment\s+(\d+)\s*$").unwrap());
        PATTERN
            .captures(s)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .map(Self::Increment)
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
}

pub fn parse_techniques(text: &str) -> Vec<Technique> {
    let techs = non_blank_lines(text)
        .map(|(ind, line)| {
            let tech = Technique::parse(line);
            if tech.is_unknown() {
                warn!(
                    "Skip unrecognized shuffle technique at line {}: {}",
                    ind + 1,
                    line.trim()
                );
            }
            tech
        })
        .collect::<Vec<_>>();
    debug!("Parsed {} shuffle techniques.", techs.len());

    techs
}

pub fn check_techniques(text: &str) -> Result<(), Error> {
    non_blank_lines(text).try_for_each(|(ind, line)| {
        Technique::try_from(line)
            .map(|_| ())
            .map_err(|_| Error::InvalidTechLine(ind + 1, line.trim().to_string()))
    })
}

#[test]
fn test_parse_known_techniques() {
    assert_eq!(Technique::parse("deal into new stack"), Technique::NewStack);
    assert_eq!(Technique::parse("cut 3"), Technique::Cut(3));
    assert_eq!(Technique::parse("cut -2"), Technique::Cut(-2));
    assert_eq!(
        Technique::parse("deal with increment 7"),
        Technique::Increment(7)
    );
}

#[test]
fn test_parse_ignores_case_and_spacing() {
    assert_eq!(Technique::parse("  Deal  into new\tSTACK "), Technique::NewStack);
    assert_eq!(Technique::parse("CUT   -4\r"), Technique::Cut(-4));
    assert_eq!(
        Technique::parse("deal With  increment 9 "),
        Technique::Increment(9)
    );
}

#[test]
fn test_parse_unknown() {
    assert!(Technique::parse("shuffle wildly").is_unknown());
    assert!(Technique::parse("cut").is_unknown());
    assert!(Technique::parse("deal with increment -3").is_unknown());
    assert!(Technique::parse("cut 99999999999999999999999").is_unknown());
    assert!(Technique::parse("please deal into new stack now").is_unknown());
}

#[test]
fn test_parse_is_repeatable() {
    for line in ["deal into new stack", "cut -7", "deal with increment 3", "wat"] {
        assert_eq!(Technique::parse(line), Technique::parse(line));
    }
}

#[test]
fn test_display_parses_back() {
    for tech in [Technique::NewStack, Technique::Cut(-12), Technique::Increment(31)] {
        assert_eq!(Technique::parse(&tech.to_string()), tech);
    }
}

#[test]
fn test_parse_techniques_keeps_order_and_unknown() {
    let techs = parse_techniques("cut 6\nbogus\ndeal with increment 7\n\ndeal into new stack\n");
    assert_eq!(
        techs,
        vec![
            Technique::Cut(6),
            Technique::Unknown("bogus".to_string()),
            Technique::Increment(7),
            Technique::NewStack,
        ]
    );
}

#[test]
fn test_check_techniques() {
    assert!(check_techniques("cut 6\n\ndeal into new stack\n").is_ok());
    match check_techniques("cut 6\ndeal into new stack\nbogus line\n") {
        Err(Error::InvalidTechLine(line_n, s)) => {
            assert_eq!(line_n, 3);
            assert_eq!(s, "bogus line");
        }
        other => panic!("Expect invalid line error, get {:?}", other),
    }
}

#[test]
fn test_try_from_rejects_unknown() {
    assert!(matches!(
        Technique::try_from("cut 5"),
        Ok(Technique::Cut(5))
    ));
    assert!(matches!(
        Technique::try_from("cut five"),
        Err(Error::InvalidTechStr(_))
    ));
}
