//! 单行扫描器：空白跳过、字段跳过、名字记号（含花括号引用与反斜杠转义）以及整数解析。
//!
//! 输入按原始字节处理，名字不做任何编码转换。
use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{take_till, take_till1, take_while};
use nom::character::complete::{char, digit0, one_of};
use nom::combinator::opt;
use nom::error::{Error, ErrorKind};
use nom::multi::many0;
use nom::sequence::{preceded, terminated};

use crate::error::{Result, TranslateError};

type Res<'a, O> = IResult<&'a [u8], O>;

/// Field separators of the NDR format.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Whitespace skipped by C `atoi`.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t' | b'\x0b' | b'\x0c')
}

fn space(input: &[u8]) -> Res<'_, &[u8]> {
    take_while(is_space).parse(input)
}

fn field(input: &[u8]) -> Res<'_, &[u8]> {
    take_till1(is_space).parse(input)
}

fn c_space(input: &[u8]) -> Res<'_, &[u8]> {
    take_while(is_c_space).parse(input)
}

fn sign(input: &[u8]) -> Res<'_, Option<char>> {
    opt(one_of("+-")).parse(input)
}

fn open_brace(input: &[u8]) -> Res<'_, char> {
    char('{').parse(input)
}

fn bare_name(input: &[u8]) -> Res<'_, &[u8]> {
    take_till(|b| is_space(b) || b == b'*' || b == b'?').parse(input)
}

/// `{...}` up to the first `}` not preceded by an unescaped backslash. Braces and
/// backslashes stay in the token. Hitting the end of the line is a failure whose input
/// points at the stopping position.
fn braced_name(input: &[u8]) -> Res<'_, &[u8]> {
    let (mut rest, _) = open_brace(input)?;
    let mut escaped = false;
    loop {
        match rest.split_first() {
            None | Some((&b'\n', _)) | Some((&b'\r', _)) => {
                return Err(nom::Err::Failure(Error::new(rest, ErrorKind::Char)));
            }
            Some((&b, tail)) => {
                rest = tail;
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'}' {
                    break;
                }
            }
        }
    }
    let len = input.len() - rest.len();
    Ok((rest, &input[..len]))
}

fn name(input: &[u8]) -> Res<'_, &[u8]> {
    alt((braced_name, bare_name)).parse(input)
}

fn integer(input: &[u8]) -> Res<'_, i64> {
    let (input, _) = c_space(input)?;
    let (input, sign) = sign(input)?;
    let (input, digits) = digit0(input)?;
    let value = digits.iter().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Ok((input, if sign == Some('-') { -value } else { value }))
}

/// Parses a leading integer the way C `atoi` does: optional whitespace and sign, then
/// as many digits as follow. Anything unparsable yields 0.
pub fn atoi(text: &[u8]) -> i64 {
    integer(text).map(|(_, value)| value).unwrap_or(0)
}

/// The integer just before the last token of `line`: the weight of an `e` directive.
pub fn trailing_weight(line: &[u8]) -> i64 {
    let tokens = preceded(space, many0(terminated(field, space)))
        .parse(line)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default();
    tokens.iter().rev().nth(1).map_or(0, |token| atoi(token))
}

/// Position within one input line.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self { rest: text }
    }

    pub fn rest(&self) -> &'a [u8] {
        self.rest
    }

    pub fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest.first().copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let (&b, tail) = self.rest.split_first()?;
        self.rest = tail;
        Some(b)
    }

    pub fn skip_space(&mut self) {
        if let Ok((rest, _)) = space(self.rest) {
            self.rest = rest;
        }
    }

    /// Skips one whitespace-delimited field without interpreting it.
    pub fn skip_field(&mut self) {
        if let Ok((rest, _)) = field(self.rest) {
            self.rest = rest;
        }
    }

    /// Skips one field, but only when it starts with an ASCII digit.
    pub fn skip_numeric_field(&mut self) {
        if self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.skip_field();
        }
    }

    /// Reads a name token.
    ///
    /// A token opening with `{` runs to the first `}` not preceded by an unescaped
    /// backslash and keeps its braces and backslashes. Any other token ends at whitespace,
    /// `*` or `?`.
    pub fn name(&mut self) -> Result<&'a [u8]> {
        let start = self.rest;
        match name(start) {
            Ok((rest, token)) => {
                self.rest = rest;
                Ok(token)
            }
            Err(nom::Err::Failure(err)) | Err(nom::Err::Error(err)) => {
                self.rest = err.input;
                let read = &start[..start.len() - err.input.len()];
                Err(TranslateError::UnterminatedName {
                    text: String::from_utf8_lossy(read).into_owned(),
                })
            }
            Err(nom::Err::Incomplete(_)) => {
                self.rest = &[];
                Err(TranslateError::UnterminatedName {
                    text: String::from_utf8_lossy(start).into_owned(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoi_matches_c() {
        assert_eq!(atoi(b"42 n"), 42);
        assert_eq!(atoi(b"  -7x"), -7);
        assert_eq!(atoi(b"+3"), 3);
        assert_eq!(atoi(b"n"), 0);
        assert_eq!(atoi(b""), 0);
        assert_eq!(atoi(b"2.5"), 2);
        assert_eq!(atoi(b"-"), 0);
        assert_eq!(atoi(b"99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn trailing_weight_reads_second_to_last_token() {
        assert_eq!(trailing_weight(b"e p1 t1 2 n\n"), 2);
        assert_eq!(trailing_weight(b"e t1 0.5 30 p2 7 n   "), 7);
        assert_eq!(trailing_weight(b"e p1 t1 n"), 0);
        assert_eq!(trailing_weight(b"  e p1 t1 4 n\r\n"), 4);
        assert_eq!(trailing_weight(b""), 0);
    }

    #[test]
    fn bare_names_stop_at_star_and_question_mark() {
        let mut cursor = Cursor::new(b"abc*2 rest");
        assert_eq!(cursor.name().unwrap(), b"abc");
        assert_eq!(cursor.rest(), b"*2 rest");

        let mut cursor = Cursor::new(b"x?1");
        assert_eq!(cursor.name().unwrap(), b"x");

        let mut cursor = Cursor::new(b"tab\tsep");
        assert_eq!(cursor.name().unwrap(), b"tab");
    }

    #[test]
    fn quoted_name_keeps_escaped_brace() {
        let mut cursor = Cursor::new(br"{a\}b} 3");
        assert_eq!(cursor.name().unwrap(), br"{a\}b}");
        cursor.skip_space();
        assert_eq!(atoi(cursor.rest()), 3);
    }

    #[test]
    fn quoted_name_spans_whitespace() {
        let mut cursor = Cursor::new(b"{two words} tail");
        assert_eq!(cursor.name().unwrap(), b"{two words}");
        assert_eq!(cursor.rest(), b" tail");
    }

    #[test]
    fn escaped_backslash_does_not_escape_brace() {
        let mut cursor = Cursor::new(br"{a\\}b}");
        assert_eq!(cursor.name().unwrap(), br"{a\\}");
        assert_eq!(cursor.rest(), b"b}");
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let mut cursor = Cursor::new(b"{open name\n");
        let err = cursor.name().unwrap_err();
        assert!(matches!(err, TranslateError::UnterminatedName { text } if text == "{open name"));
        assert_eq!(cursor.rest(), b"\n");
    }

    #[test]
    fn names_are_raw_bytes() {
        let mut cursor = Cursor::new(b"\xe0\xff rest");
        assert_eq!(cursor.name().unwrap(), b"\xe0\xff");
    }

    #[test]
    fn numeric_fields_are_optional() {
        let mut cursor = Cursor::new(b"0.5 t1");
        cursor.skip_numeric_field();
        cursor.skip_space();
        assert_eq!(cursor.rest(), b"t1");

        let mut cursor = Cursor::new(b"t1 2");
        cursor.skip_numeric_field();
        assert_eq!(cursor.rest(), b"t1 2");
    }
}
