//! Source locations within the text parts of a template.
use std::fmt;

/// A byte range `[start, end)` into the template text. Offsets are counted
/// over the concatenation of all text parts, splice positions are zero
/// sized.
#[derive(Debug, Eq, Hash, Clone, Copy, PartialEq, Default)]
pub struct ByteRange(u32, u32);

impl ByteRange {
    /// Create a [ByteRange] by providing a start and end byte position.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "invalid range: start needs to be smaller than end");
        ByteRange(start as u32, end as u32)
    }

    /// Join `self` with a range that ends after it. If `end` does not lie
    /// after `self`, `self` is returned unchanged.
    #[must_use]
    pub fn join(&self, end: Self) -> Self {
        if self.end() <= end.end() && self.start() <= end.start() {
            return ByteRange::new(self.start(), end.end());
        }

        *self
    }

    pub fn start(&self) -> usize {
        self.0 as usize
    }

    pub fn end(&self) -> usize {
        self.1 as usize
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `self` ends exactly where `other` begins, with no whitespace
    /// in between.
    pub fn is_right_before(&self, other: Self) -> bool {
        self.end() == other.start()
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_ranges() {
        let a = ByteRange::new(0, 3);
        let b = ByteRange::new(5, 9);
        assert_eq!(a.join(b), ByteRange::new(0, 9));
        assert_eq!(b.join(a), b);
        assert!(a.is_right_before(ByteRange::new(3, 4)));
        assert!(!a.is_right_before(b));
    }
}
