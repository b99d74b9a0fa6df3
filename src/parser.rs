use nom::{
    branch::alt,
    character::complete::{anychar, char},
    combinator::{eof, map, opt, value},
    multi::many0,
    sequence::terminated,
    IResult,
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::regex::{Atom, Regex, Token};

/// Tokenizes a pattern.
///
/// The grammar is total: a leading `^` anchors, `$` anchors only as the very
/// last character, `*` quantifies the character right before it (whatever
/// that character is), and everything else is an atom.
pub fn parse_regex(input: &str) -> Result<Regex> {
    match pattern(input) {
        Ok(("", (anchored, tokens))) => {
            debug!(pattern = input, anchored, ?tokens, "parsed pattern");
            Ok(Regex::new(anchored, tokens))
        }
        Ok((remaining, _)) => Err(Error::Parse(format!("unexpected input: {}", remaining))),
        Err(e) => Err(Error::Parse(e.to_string())),
    }
}

fn pattern(input: &str) -> IResult<&str, (bool, Vec<Token>)> {
    let (input, anchor) = opt(char('^'))(input)?;
    let (input, tokens) = many0(token)(input)?;
    Ok((input, (anchor.is_some(), tokens)))
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((end_anchor, starred, single))(input)
}

fn end_anchor(input: &str) -> IResult<&str, Token> {
    value(Token::EndAnchor, terminated(char('$'), eof))(input)
}

fn starred(input: &str) -> IResult<&str, Token> {
    map(terminated(atom, char('*')), Token::Star)(input)
}

fn single(input: &str) -> IResult<&str, Token> {
    map(atom, Token::Atom)(input)
}

fn atom(input: &str) -> IResult<&str, Atom> {
    alt((value(Atom::Dot, char('.')), map(anychar, Atom::Char)))(input)
}
