//! Line matchers for declarations and connections.
//!
//! Each matcher must consume the whole (already trimmed) line; anything left
//! over is a mismatch. Word characters are ASCII letters, digits and `_`.

use winnow::{
    Parser as _,
    error::{ContextError, ErrMode, ModalResult},
    stream::Stream,
    token::{literal, take_while},
};

use crate::ast::Position;

type IResult<O> = ModalResult<O>;

/// A matched declaration line, borrowing from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawDeclaration<'s> {
    pub type_name: &'s str,
    pub id: &'s str,
    pub position: Option<Position>,
}

/// A matched connection line, borrowing from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawConnection<'s> {
    pub from: (&'s str, &'s str),
    pub to: (&'s str, &'s str),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., is_word_char).parse_next(input)
}

fn space0(input: &mut &str) -> IResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

fn space1(input: &mut &str) -> IResult<()> {
    take_while(1.., char::is_whitespace).void().parse_next(input)
}

fn coordinate(input: &mut &str) -> IResult<u32> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .try_map(str::parse::<u32>)
        .parse_next(input)
}

/// Pin tokens are word characters plus `+` and `-`, but a `-` that starts
/// the `->` arrow ends the token.
fn pin<'s>(input: &mut &'s str) -> IResult<&'s str> {
    let mut chars = input.char_indices().peekable();
    let mut len = 0;
    while let Some((offset, c)) = chars.next() {
        let accepted = match c {
            '-' => !matches!(chars.peek(), Some((_, '>'))),
            '+' => true,
            c => is_word_char(c),
        };
        if !accepted {
            break;
        }
        len = offset + c.len_utf8();
    }

    if len == 0 {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(input.next_slice(len))
}

fn endpoint<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    let component = word(input)?;
    '.'.parse_next(input)?;
    let pin = pin(input)?;
    Ok((component, pin))
}

/// `<type> <id> at (<x>, <y>)`
fn placed_declaration<'s>(input: &mut &'s str) -> IResult<RawDeclaration<'s>> {
    let type_name = word(input)?;
    space1(input)?;
    let id = word(input)?;
    space1(input)?;
    literal("at").parse_next(input)?;
    space1(input)?;
    '('.parse_next(input)?;
    let x = coordinate(input)?;
    ','.parse_next(input)?;
    space0(input)?;
    let y = coordinate(input)?;
    ')'.parse_next(input)?;

    Ok(RawDeclaration {
        type_name,
        id,
        position: Some(Position::new(x, y)),
    })
}

/// `<type> <id>`
fn bare_declaration<'s>(input: &mut &'s str) -> IResult<RawDeclaration<'s>> {
    let type_name = word(input)?;
    space1(input)?;
    let id = word(input)?;

    Ok(RawDeclaration {
        type_name,
        id,
        position: None,
    })
}

fn connection_line<'s>(input: &mut &'s str) -> IResult<RawConnection<'s>> {
    let from = endpoint(input)?;
    space0(input)?;
    literal("->").parse_next(input)?;
    space0(input)?;
    let to = endpoint(input)?;

    Ok(RawConnection { from, to })
}

/// Match a declaration line, trying the positioned form first.
pub(crate) fn declaration(line: &str) -> Option<RawDeclaration<'_>> {
    placed_declaration
        .parse(line)
        .ok()
        .or_else(|| bare_declaration.parse(line).ok())
}

/// Match a connection line.
pub(crate) fn connection(line: &str) -> Option<RawConnection<'_>> {
    connection_line.parse(line).ok()
}
