//! Line lexer shared by edge lists and coordinate tables.
//!
//! Both formats are lines of whitespace-separated fields where `#` starts a
//! comment that runs to the end of the line. Every field keeps its byte
//! offset into the whole source so errors can point at it.

use std::ops::Range;

use winnow::{
    ModalResult, Parser as _,
    combinator::{opt, preceded, repeat},
    stream::{LocatingSlice, Location, Stream as _},
    token::{take_till, take_while},
};

use crate::input::InputError;

type Input<'a> = LocatingSlice<&'a str>;

/// A field and its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub offset: usize,
    pub text: &'a str,
}

impl Token<'_> {
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Whitespace that does not end the line.
fn blanks<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    take_while(0.., |c: char| c.is_whitespace() && c != '\n').parse_next(input)
}

fn comment<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded('#', take_till(0.., '\n')).parse_next(input)
}

fn field<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    take_till(1.., |c: char| c.is_whitespace() || c == '#')
        .with_span()
        .map(|(text, span)| Token {
            offset: span.start,
            text,
        })
        .parse_next(input)
}

/// One line including its terminating newline, if any.
fn line<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Token<'a>>> {
    let fields: Vec<Token<'a>> = repeat(0.., preceded(blanks, field)).parse_next(input)?;
    (blanks, opt(comment), opt('\n')).void().parse_next(input)?;
    Ok(fields)
}

/// Splits `source` into lines of fields with comments removed.
///
/// Lines without fields are skipped.
///
/// # Errors
///
/// Returns an error pointing at the first character no field, blank or
/// comment can start with.
pub(crate) fn tokenize_lines(source: &str) -> Result<Vec<Vec<Token<'_>>>, InputError> {
    let mut input = LocatingSlice::new(source);
    let mut lines = Vec::new();

    while input.eof_offset() > 0 {
        let start = input.current_token_start();
        let fields = line(&mut input).ok().filter(|_| input.current_token_start() > start);
        let Some(fields) = fields else {
            return Err(InputError::new(
                "unexpected character",
                start..start + 1,
                "cannot be read here",
            ));
        };
        if !fields.is_empty() {
            lines.push(fields);
        }
    }

    Ok(lines)
}
