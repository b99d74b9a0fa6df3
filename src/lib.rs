pub mod error;
pub mod parser;
pub mod regex;

pub use error::{Error, Result};
pub use parser::parse_regex;
pub use regex::{Atom, LimitExceeded, Limits, Outcome, Regex, Token};

/// Reports whether `text` contains a match for `pattern`.
///
/// Every pattern is valid: characters with no special meaning at their
/// position are literals, and there is no escape syntax.
pub fn is_match(pattern: &str, text: &str) -> bool {
    parse_regex(pattern).is_ok_and(|regex| regex.find_match(text))
}
