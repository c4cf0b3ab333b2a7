//! Parsing binary operators from the token stream.
use quasi_template::Expr;
use quasi_token::{Token, TokenKind};
use quasi_trees::Operator;

use super::TemplateGen;

/// The binary operators of the template language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    /// `==>`
    Implies,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    LShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `++`
    Concat,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl BinOp {
    /// Compute the binding power of the operator, the left and right values
    /// differ in order to encode associativity.
    pub(crate) fn infix_binding_power(&self) -> (u8, u8) {
        match self {
            BinOp::Implies => (2, 1),
            BinOp::Or => (3, 4),
            BinOp::And => (5, 6),
            BinOp::BitOr => (7, 8),
            BinOp::BitXor => (9, 10),
            BinOp::BitAnd => (11, 12),
            BinOp::EqEq | BinOp::NotEq => (13, 14),
            BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => (15, 16),
            BinOp::Shl | BinOp::Shr | BinOp::LShr => (17, 18),
            BinOp::Add | BinOp::Sub | BinOp::Concat => (19, 20),
            BinOp::Mul | BinOp::Div | BinOp::Mod => (21, 22),
        }
    }

    /// Build the template of `lhs op rhs`.
    pub(crate) fn apply(&self, lhs: Expr, rhs: Expr) -> Expr {
        let operator = match self {
            BinOp::Implies => Operator::Implies,
            BinOp::Or => Operator::Or,
            BinOp::And => Operator::And,
            BinOp::BitOr => Operator::BVOr,
            BinOp::BitXor => Operator::BVXor,
            BinOp::BitAnd => Operator::BVAnd,
            BinOp::EqEq => Operator::Equals,
            BinOp::NotEq => {
                let equals = Expr::prim(Operator::Equals, vec![lhs, rhs]);
                return Expr::prim(Operator::Not, vec![equals]);
            }
            BinOp::Lt => Operator::LessThan,
            BinOp::Gt => Operator::GreaterThan,
            BinOp::LtEq => Operator::LessEquals,
            BinOp::GtEq => Operator::GreaterEquals,
            BinOp::Shl => Operator::BVShiftLeft,
            BinOp::Shr => Operator::BVAShiftRight,
            BinOp::LShr => Operator::BVLShiftRight,
            BinOp::Add => Operator::Plus,
            BinOp::Sub => Operator::Minus,
            BinOp::Concat => Operator::StringConcat,
            BinOp::Mul => Operator::Times,
            BinOp::Div => Operator::Division,
            BinOp::Mod => Operator::Remainder,
        };

        Expr::prim(operator, vec![lhs, rhs])
    }
}

impl<'s> TemplateGen<'s> {
    /// Peek at the token `at` positions ahead if it is of the given kind and
    /// directly follows `prev`, without whitespace in between.
    fn glued(&self, prev: &Token, at: usize, kind: TokenKind) -> Option<&'s Token> {
        self.peek_nth(at)
            .filter(|token| token.has_kind(kind) && prev.span.is_right_before(token.span))
    }

    /// This function is used to pickup 'glued' operator tokens to form more
    /// complex binary operators that might be made up of multiple tokens.
    /// The function will peek ahead (3 tokens at most, for `>>>`). The
    /// function returns an optional derived operator, and the number of
    /// tokens that was consumed deriving the operator, it is the
    /// responsibility of the caller to increment the token stream by the
    /// provided number.
    pub(crate) fn parse_binary_operator(&self) -> (Option<BinOp>, u8) {
        let Some(token) = self.peek() else {
            return (None, 0);
        };

        match token.kind {
            TokenKind::Eq => match self.glued(token, 1, TokenKind::Eq) {
                Some(_) => (Some(BinOp::EqEq), 2),
                None => match self.glued(token, 1, TokenKind::FatArrow) {
                    Some(_) => (Some(BinOp::Implies), 2),
                    None => (None, 0),
                },
            },
            TokenKind::Lt => match self.glued(token, 1, TokenKind::Eq) {
                Some(_) => (Some(BinOp::LtEq), 2),
                None => match self.glued(token, 1, TokenKind::Lt) {
                    Some(_) => (Some(BinOp::Shl), 2),
                    None => (Some(BinOp::Lt), 1),
                },
            },
            TokenKind::Gt => match self.glued(token, 1, TokenKind::Eq) {
                Some(_) => (Some(BinOp::GtEq), 2),
                None => match self.glued(token, 1, TokenKind::Gt) {
                    Some(second) => match self.glued(second, 2, TokenKind::Gt) {
                        Some(_) => (Some(BinOp::LShr), 3),
                        None => (Some(BinOp::Shr), 2),
                    },
                    None => (Some(BinOp::Gt), 1),
                },
            },
            TokenKind::Plus => match self.glued(token, 1, TokenKind::Plus) {
                Some(_) => (Some(BinOp::Concat), 2),
                None => (Some(BinOp::Add), 1),
            },
            TokenKind::Minus => (Some(BinOp::Sub), 1),
            TokenKind::Star => (Some(BinOp::Mul), 1),
            TokenKind::Slash => (Some(BinOp::Div), 1),
            TokenKind::Percent => (Some(BinOp::Mod), 1),
            TokenKind::Caret => (Some(BinOp::BitXor), 1),
            TokenKind::Amp => match self.glued(token, 1, TokenKind::Amp) {
                Some(_) => (Some(BinOp::And), 2),
                None => (Some(BinOp::BitAnd), 1),
            },
            TokenKind::Pipe => match self.glued(token, 1, TokenKind::Pipe) {
                Some(_) => (Some(BinOp::Or), 2),
                None => (Some(BinOp::BitOr), 1),
            },
            TokenKind::Exclamation => match self.glued(token, 1, TokenKind::Eq) {
                Some(_) => (Some(BinOp::NotEq), 2),
                None => (None, 0), // this is a unary operator '!'
            },
            _ => (None, 0),
        }
    }
}
