//! Typing of unquoted Mojangson literals. A bare literal is a number when its
//! shape and suffix say so, and a string otherwise.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use crate::Value;

/// Type a bare literal. Suffixed numbers are tried first, then plain ints,
/// then plain doubles (which need a `.`); anything else is a string.
pub(crate) fn classify(literal: &str) -> Value {
    if let Some((body, suffix)) = split_suffix(literal) {
        let typed = match suffix {
            b'b' | b'B' => parse_int(body).map(Value::Byte),
            b's' | b'S' => parse_int(body).map(Value::Short),
            b'l' | b'L' => parse_int(body).map(Value::Long),
            b'f' | b'F' => parse_float(body).map(Value::Float),
            b'd' | b'D' => parse_float(body).map(Value::Double),
            _ => None,
        };
        if let Some(value) = typed {
            return value;
        }
    }

    if let Some(v) = parse_int(literal) {
        return Value::Int(v);
    }
    if literal.contains('.') {
        if let Some(v) = parse_float(literal) {
            return Value::Double(v);
        }
    }
    Value::String(literal.to_owned())
}

/// An element of a typed array: a plain integer, optionally carrying one of
/// the given suffixes.
pub(crate) fn array_element<T: FromStr>(literal: &str, suffixes: &[u8]) -> Option<T> {
    let body = match split_suffix(literal) {
        Some((body, suffix)) if suffixes.contains(&suffix) => body,
        _ => literal,
    };
    parse_int(body)
}

fn split_suffix(literal: &str) -> Option<(&str, u8)> {
    let (&last, _) = literal.as_bytes().split_last()?;
    if !last.is_ascii_alphabetic() {
        return None;
    }
    Some((&literal[..literal.len() - 1], last))
}

pub(crate) fn parse_int<T: FromStr>(s: &str) -> Option<T> {
    let (_, s) = all_consuming(integer)(s).ok()?;
    s.parse().ok()
}

pub(crate) fn parse_float<T: FromStr>(s: &str) -> Option<T> {
    let (_, s) = all_consuming(float)(s).ok()?;
    s.parse().ok()
}

fn sign(input: &str) -> IResult<&str, Option<char>> {
    opt(one_of("+-"))(input)
}

fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(sign, digit1))(input)
}

fn float(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        sign,
        alt((
            tag_no_case("infinity"),
            tag_no_case("inf"),
            tag_no_case("nan"),
            recognize(pair(
                alt((
                    recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                    recognize(pair(char('.'), digit1)),
                )),
                opt(tuple((one_of("eE"), sign, digit1))),
            )),
        )),
    ))(input)
}
