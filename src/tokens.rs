use regex::{Matches, Regex};
use std::iter::Peekable;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    PlainChars(&'a str),
}

impl<'a> Token<'a> {
    fn from_match(captured: &'a str) -> Self {
        match captured {
            "(" => Token::OpenRoundBracket,
            ")" => Token::CloseRoundBracket,
            _ => Token::PlainChars(captured),
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Token::OpenRoundBracket => "(",
            Token::CloseRoundBracket => ")",
            Token::PlainChars(chars) => *chars,
        }
    }
}

/// Lazily splits the input into tokens; nothing is scanned until asked for.
pub struct Tokenizer<'a> {
    matches: Matches<'static, 'a>,
}

pub type Tokens<'a> = Peekable<Tokenizer<'a>>;

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| Token::from_match(m.as_str()))
    }
}

pub fn tokenize(input: &str) -> Tokens<'_> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                # ignore whitespace in this pattern & allow comments
                [()]               # a single bracket
                |[^\s()]+          # or a run of anything else that isn't whitespace
            "#
        )
        .unwrap();
    }
    Tokenizer {
        matches: TOKEN_RE.find_iter(input),
    }
    .peekable()
}
