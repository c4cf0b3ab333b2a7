//! Utilities for printing sequences of items in human readable error
//! messages.
use std::fmt;

/// How the items of a [SequenceDisplay] relate to one another: either any of
/// them is acceptable, or all of them are required.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SequenceJoinKind {
    Either,
    All,
}

impl SequenceJoinKind {
    pub fn as_conjunctive(&self) -> &'static str {
        match self {
            SequenceJoinKind::Either => "or",
            SequenceJoinKind::All => "and",
        }
    }
}

/// Display a list of items as "either a `a`, `b`, or `c`". With a single
/// item, no conjunctive is used.
pub struct SequenceDisplay<'a, T: 'a> {
    pub items: &'a [T],
    mode: SequenceJoinKind,
}

impl<'a, T: 'a> SequenceDisplay<'a, T> {
    /// Create a [SequenceDisplay] with the join mode as
    /// [SequenceJoinKind::Either]
    pub fn either(items: &'a [T]) -> Self {
        Self { items, mode: SequenceJoinKind::Either }
    }

    /// Create a [SequenceDisplay] with the join mode as [SequenceJoinKind::All]
    pub fn all(items: &'a [T]) -> Self {
        Self { items, mode: SequenceJoinKind::All }
    }
}

impl<'a, T: fmt::Display + 'a> fmt::Display for SequenceDisplay<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items {
            [] => Ok(()),
            [item] if self.mode == SequenceJoinKind::Either => write!(f, "a `{item}`"),
            [item] => write!(f, "`{item}`"),
            [init @ .., last] => {
                if self.mode == SequenceJoinKind::Either {
                    write!(f, "either a ")?;
                }

                for (index, item) in init.iter().enumerate() {
                    if index + 1 == init.len() {
                        write!(f, "`{item}`, {} ", self.mode.as_conjunctive())?;
                    } else {
                        write!(f, "`{item}`, ")?;
                    }
                }

                write!(f, "`{last}`")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_sequences() {
        assert_eq!(SequenceDisplay::either(&["("]).to_string(), "a `(`");
        assert_eq!(
            SequenceDisplay::either(&["identifier", "(", "{"]).to_string(),
            "either a `identifier`, `(`, or `{`"
        );
    }

    #[test]
    fn all_sequences() {
        assert_eq!(SequenceDisplay::all(&["x", "y"]).to_string(), "`x`, and `y`");
        assert_eq!(SequenceDisplay::<&str>::all(&[]).to_string(), "");
    }
}
