use crate::list::{InvariantViolation, List};
use crate::tokens::{tokenize, Token, Tokens};
use crate::types::{Int, Value};
use derive_more::{Deref, DerefMut};
use std::convert::TryFrom;
use std::fmt;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    BrokenList(InvariantViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BrokenList(e) => write!(f, "read error: {}", e),
        }
    }
}

impl From<InvariantViolation> for Error {
    fn from(e: InvariantViolation) -> Self {
        Self::BrokenList(e)
    }
}

/// The top-level forms of a program text, in order.
#[derive(Deref, DerefMut, Debug, Default, PartialEq)]
pub struct Program(pub Vec<Value>);

/// Reads one form. Running out of tokens yields `nil`; running out inside a list yields
/// what was read so far.
pub fn parse_one(tokens: &mut Tokens<'_>) -> Result {
    match tokens.next() {
        None => Ok(Value::Nil),
        Some(Token::OpenRoundBracket) => read_list(tokens).map(Value::List),
        Some(token) => Ok(read_atom(token.as_str())),
    }
}

fn read_list(tokens: &mut Tokens<'_>) -> Result<List> {
    let mut elements = List::new();
    loop {
        match tokens.peek() {
            None => break,
            Some(Token::CloseRoundBracket) => {
                tokens.next();
                break;
            }
            Some(_) => elements.push_back(parse_one(tokens)?)?,
        }
    }
    Ok(elements)
}

fn read_atom(chars: &str) -> Value {
    // Printed nil must read back as nil, so `nil` is a literal and can never be bound.
    if chars == "nil" {
        return Value::Nil;
    }
    match parse_int(chars) {
        Some(i) => Value::Integer(i),
        None => Value::text(chars),
    }
}

/// Accepts an optional sign then `0x`/`0X` hex, `0`-prefixed octal or plain decimal. The
/// whole token has to be digits and fit in an `Int`.
fn parse_int(chars: &str) -> Option<Int> {
    let (negative, unsigned) = match chars.as_bytes().first()? {
        b'-' => (true, &chars[1..]),
        b'+' => (false, &chars[1..]),
        _ => (false, chars),
    };
    let (radix, digits) = if unsigned.starts_with("0x") || unsigned.starts_with("0X") {
        (16, &unsigned[2..])
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Int::try_from(if negative { -magnitude } else { magnitude }).ok()
}

pub fn parse_program(input: &str) -> Result<Program> {
    let mut tokens = tokenize(input);
    let mut forms = Program::default();
    while tokens.peek().is_some() {
        forms.push(parse_one(&mut tokens)?);
    }
    log::debug!("parsed {} top-level forms", forms.len());
    Ok(forms)
}

/// Reads the first form of `input` and ignores the rest.
pub fn read_str(input: &str) -> Result {
    parse_one(&mut tokenize(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::repr;

    fn list(elements: Vec<Value>) -> Value {
        Value::wrap_list(elements)
    }

    #[test]
    fn atoms() {
        assert_eq!(read_str("42").unwrap(), Value::Integer(42));
        assert_eq!(read_str("-7").unwrap(), Value::Integer(-7));
        assert_eq!(read_str("+7").unwrap(), Value::Integer(7));
        assert_eq!(read_str("foo").unwrap(), Value::text("foo"));
        assert_eq!(read_str("#t").unwrap(), Value::text("#t"));
        assert_eq!(read_str("-").unwrap(), Value::text("-"));
        assert_eq!(read_str("nil").unwrap(), Value::Nil);
        assert_eq!(read_str("").unwrap(), Value::Nil);
    }

    #[test]
    fn integers_respect_base_prefixes() {
        assert_eq!(parse_int("0x1f"), Some(31));
        assert_eq!(parse_int("0X1F"), Some(31));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("017"), Some(15));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("-9223372036854775808"), Some(Int::min_value()));
        assert_eq!(parse_int("9223372036854775808"), None);
        assert_eq!(parse_int("08"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("12abc"), None);
        assert_eq!(parse_int("1-"), None);
    }

    #[test]
    fn nested_lists() {
        assert_eq!(
            read_str("(1 (2 3) ())").unwrap(),
            list(vec![
                Value::Integer(1),
                list(vec![Value::Integer(2), Value::Integer(3)]),
                Value::new_list(),
            ])
        );
    }

    #[test]
    fn unterminated_list_returns_what_was_read() {
        assert_eq!(
            read_str("(1 (2").unwrap(),
            list(vec![Value::Integer(1), list(vec![Value::Integer(2)])])
        );
        assert_eq!(read_str("(").unwrap(), Value::new_list());
    }

    #[test]
    fn stray_close_bracket_is_text() {
        assert_eq!(read_str(")").unwrap(), Value::text(")"));
    }

    #[test]
    fn program_is_every_top_level_form() {
        let program = parse_program("(define x 1) x\n(+ x 2)").unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(program[1], Value::text("x"));
        assert!(parse_program("   ").unwrap().is_empty());
    }

    #[test]
    fn printed_data_reads_back() {
        let values = vec![
            Value::Nil,
            Value::Integer(-12),
            Value::new_list(),
            list(vec![
                Value::Nil,
                Value::Integer(0),
                list(vec![Value::new_list(), Value::Integer(Int::max_value())]),
            ]),
        ];
        for value in values {
            assert_eq!(read_str(&repr(&value)).unwrap(), value);
        }
    }
}
