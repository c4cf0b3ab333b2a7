//! Template keyword definitions.
use std::fmt;

use phf::phf_map;
use strum_macros::AsRefStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Keyword {
    Forall,
    Exists,
    Lambda,
    Choose,
    Let,
    In,
    If,
    Else,
    True,
    False,
    Is,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "forall" => Keyword::Forall,
    "exists" => Keyword::Exists,
    "lambda" => Keyword::Lambda,
    "choose" => Keyword::Choose,
    "let" => Keyword::Let,
    "in" => Keyword::In,
    "if" => Keyword::If,
    "else" => Keyword::Else,
    "true" => Keyword::True,
    "false" => Keyword::False,
    "is" => Keyword::Is,
};

/// Check if the given identifier text is a keyword.
pub fn ident_is_keyword(ident: &str) -> Option<Keyword> {
    KEYWORDS.get(ident).copied()
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
