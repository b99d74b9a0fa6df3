use std::iter;

use tracing::{debug, trace};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    Char(char),
    Dot, // .
}

impl Atom {
    pub fn matches(&self, c: char) -> bool {
        match self {
            Atom::Dot => true,
            Atom::Char(expected) => *expected == c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Atom(Atom),
    Star(Atom), // *
    EndAnchor,  // $, always the last token
}

/// A tokenized pattern, produced by [`crate::parse_regex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    anchored: bool,
    tokens: Vec<Token>,
}

/// Resource ceilings for a single evaluation. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested single-position match frames.
    pub max_depth: Option<usize>,
    /// Maximum number of single-position match attempts overall.
    pub max_steps: Option<u64>,
}

impl Limits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    #[error("match depth limit of {0} exceeded")]
    Depth(usize),

    #[error("step budget of {0} exhausted")]
    Steps(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NoMatch,
    Inconclusive(LimitExceeded),
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Matched)
    }

    pub fn into_result(self) -> Result<bool> {
        match self {
            Outcome::Matched => Ok(true),
            Outcome::NoMatch => Ok(false),
            Outcome::Inconclusive(limit) => Err(Error::Limit(limit)),
        }
    }
}

impl Regex {
    pub(crate) fn new(anchored: bool, tokens: Vec<Token>) -> Self {
        Self { anchored, tokens }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Reports whether some substring of `text` matches, with no resource limits.
    pub fn find_match(&self, text: &str) -> bool {
        self.evaluate(text, &Limits::unlimited()).is_match()
    }

    /// Runs the leftmost search under `limits`.
    ///
    /// Start offsets are tried in increasing order (only offset 0 when the
    /// pattern is anchored) and the first success wins. A starred atom first
    /// tries zero repetitions, then extends one character at a time. Once a
    /// limit trips the search stops and the result is
    /// [`Outcome::Inconclusive`], even if a later offset might have matched.
    pub fn evaluate(&self, text: &str, limits: &Limits) -> Outcome {
        let mut matcher = Matcher {
            text,
            limits,
            steps: 0,
        };

        let result = if self.anchored {
            matcher.match_here(&self.tokens, 0, 1)
        } else {
            matcher.search(&self.tokens)
        };

        let outcome = match result {
            Ok(true) => Outcome::Matched,
            Ok(false) => Outcome::NoMatch,
            Err(limit) => {
                debug!(%limit, steps = matcher.steps, "evaluation stopped");
                Outcome::Inconclusive(limit)
            }
        };
        debug!(?outcome, steps = matcher.steps, "evaluated");
        outcome
    }
}

type Step = std::result::Result<bool, LimitExceeded>;

struct Matcher<'a> {
    text: &'a str,
    limits: &'a Limits,
    steps: u64,
}

impl Matcher<'_> {
    fn search(&mut self, tokens: &[Token]) -> Step {
        let text = self.text;
        let starts = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()));

        for start in starts {
            trace!(start, "attempting match");
            if self.match_here(tokens, start, 1)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn match_here(&mut self, tokens: &[Token], pos: usize, depth: usize) -> Step {
        self.enter(depth)?;

        let Some((first, rest)) = tokens.split_first() else {
            return Ok(true);
        };

        match first {
            Token::EndAnchor => Ok(pos == self.text.len()),
            Token::Star(atom) => {
                let mut pos = pos;
                loop {
                    if self.match_here(rest, pos, depth + 1)? {
                        return Ok(true);
                    }
                    match self.peek(pos) {
                        Some(c) if atom.matches(c) => pos += c.len_utf8(),
                        _ => return Ok(false),
                    }
                }
            }
            Token::Atom(atom) => match self.peek(pos) {
                Some(c) if atom.matches(c) => self.match_here(rest, pos + c.len_utf8(), depth + 1),
                _ => Ok(false),
            },
        }
    }

    fn peek(&self, pos: usize) -> Option<char> {
        self.text[pos..].chars().next()
    }

    fn enter(&mut self, depth: usize) -> std::result::Result<(), LimitExceeded> {
        self.steps += 1;
        if let Some(max) = self.limits.max_depth {
            if depth > max {
                return Err(LimitExceeded::Depth(max));
            }
        }
        if let Some(max) = self.limits.max_steps {
            if self.steps > max {
                return Err(LimitExceeded::Steps(max));
            }
        }
        Ok(())
    }
}
