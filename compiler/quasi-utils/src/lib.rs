//! Quasi general utilities shared by the lexer, parser, template and matcher
//! crates.

pub mod highlight;
pub mod logging;
pub mod printing;

// Re-export commonly used vector packages
pub use bitflags;
pub use itertools;
// Re-export logging utility
pub use log;
pub use smallvec;
