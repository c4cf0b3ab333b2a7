//! Settings that change how a [crate::Quote] reads and compiles templates.

/// Various settings that are present on a [crate::Quote] when it is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteSettings {
    /// Whether names that are neither bound nor declared compile to fresh
    /// variables. When unset, such names are reported as unknown.
    pub allow_free_names: bool,

    /// Whether debugging log statements are enabled.
    pub debug: bool,
}

impl QuoteSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_free_names(mut self, allow: bool) -> Self {
        self.allow_free_names = allow;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
