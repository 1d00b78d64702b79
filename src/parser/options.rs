//! Parsing options and configuration.

/// Options for scanning block markup.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Count text inside `script` and `style` elements toward word counts
    pub count_raw_text: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (degrade instead of failing).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Count `script`/`style` text as words.
    pub fn with_raw_text(mut self, count: bool) -> Self {
        self.count_raw_text = count;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any scanner error or unclosed element
    #[default]
    Strict,
    /// Treat unscannable input or unclosed elements as one raw block
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().with_raw_text(true);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.count_raw_text);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.count_raw_text);
    }
}
