//! The template IR for expressions and types, resolution of type templates
//! to host types, and compilation of templates into host trees.
pub mod compile;
pub mod expr;
pub mod lit;
pub mod resolve;
pub mod ty;
pub mod value;

pub use expr::{Binding, Expr, Ident, LetBinding, LitTemplate, OpName, Quantifier};
pub use ty::Type;
pub use value::Value;
