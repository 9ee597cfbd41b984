//! Board text scanner
//!
//! A board string is a run of stack tokens `<names><location>`, e.g.
//! `wQ+0+0 bS1bQ+1+0 2@wA`. Tokens are normally separated by whitespace but
//! the compact form `wQ+0+0bQ+1+0` is accepted as well. A row number never
//! ends right before an `@`, so `+0+12@wA` reads as `+0+1` then `2@wA`.

use crate::error::BoardError;

/// The piece part of a stack token
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Names<'a> {
    /// Explicit piece names, top first
    Pieces(Vec<&'a str>),
    /// `N@pool`: the top N pieces of that pool
    Top(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StackToken<'a> {
    pub names: Names<'a>,
    pub location: &'a str,
}

/// Split board text into stack tokens
pub(crate) fn scan(text: &str) -> Result<Vec<StackToken<'_>>, BoardError> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut rest = chunk;
        while !rest.is_empty() {
            let (token, len) = scan_stack(rest).ok_or_else(|| BoardError::Parse {
                token: rest.to_string(),
            })?;
            tokens.push(token);
            rest = &rest[len..];
        }
    }
    Ok(tokens)
}

fn scan_stack(s: &str) -> Option<(StackToken<'_>, usize)> {
    let bytes = s.as_bytes();
    let names_len = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphabetic() || (b'1'..=b'9').contains(&b))
        .count();
    if names_len == 0 {
        return None;
    }
    let location_len = scan_location(&bytes[names_len..])?;
    let names = &s[..names_len];
    let location = &s[names_len..names_len + location_len];

    let names = match names {
        "1" | "2" | "3" if location.starts_with('@') => Names::Top(usize::from(bytes[0] - b'0')),
        _ => Names::Pieces(split_names(names)?),
    };
    Some((StackToken { names, location }, names_len + location_len))
}

/// Length of the location at the start of `b`
fn scan_location(b: &[u8]) -> Option<usize> {
    match b.first()? {
        b'@' => {
            let ok = b.len() >= 3 && matches!(b[1], b'w' | b'b') && b[2].is_ascii_alphabetic();
            ok.then_some(3)
        }
        b'+' | b'-' => {
            let col_digits = count_digits(&b[1..]);
            if col_digits == 0 {
                return None;
            }
            let row_sign = 1 + col_digits;
            if !matches!(b.get(row_sign), Some(b'+' | b'-')) {
                return None;
            }
            let mut row_digits = count_digits(&b[row_sign + 1..]);
            if row_digits > 0 && b.get(row_sign + 1 + row_digits) == Some(&b'@') {
                row_digits -= 1;
            }
            (row_digits > 0).then_some(row_sign + 1 + row_digits)
        }
        _ => None,
    }
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Split `wQbS1` into `wQ`, `bS1`
fn split_names(mut names: &str) -> Option<Vec<&str>> {
    let mut out = Vec::new();
    while !names.is_empty() {
        let b = names.as_bytes();
        if b.len() < 2 || !matches!(b[0], b'w' | b'b') || !b[1].is_ascii_alphabetic() {
            return None;
        }
        let len = if b.get(2).is_some_and(|d| (b'1'..=b'9').contains(d)) { 3 } else { 2 };
        out.push(&names[..len]);
        names = &names[len..];
    }
    Some(out)
}
