//! The host syntax tree that templates compile into and are matched
//! against: expressions, types, literals, primitive operators and the symbol
//! table of declared functions and algebraic data types.
pub mod expr;
pub mod lit;
pub mod ops;
pub mod symbols;
pub mod ty;
mod typing;

pub use expr::{Expr, ValDef};
pub use lit::Lit;
pub use ops::{Arity, Operator};
pub use symbols::{AdtConstructor, AdtSort, FunDef, Symbols};
pub use ty::Type;
