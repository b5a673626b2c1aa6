//! Configuration options for reading and writing bracketed-table text.
//!
//! [`OplOptions`] is passed explicitly into every parse and serialize call;
//! nothing is read from the environment.
//!
//! ## Examples
//!
//! ```rust
//! use opl_text::{from_str_with_options, OplOptions};
//!
//! // A truncated document is an error by default...
//! assert!(opl_text::from_str("a = {\n<1>\n").is_err());
//!
//! // ...but lenient reading returns whatever was collected.
//! let tables = from_str_with_options("a = {\n<1>\n", OplOptions::lenient()).unwrap();
//! assert_eq!(tables["a"].len(), 1);
//! ```

/// Configuration options for the parser and serializer.
///
/// # Examples
///
/// ```rust
/// use opl_text::OplOptions;
///
/// let options = OplOptions::new();
/// assert!(options.strict);
/// assert!(options.check_shape);
///
/// let options = OplOptions::new().with_check_shape(false);
/// assert!(!options.check_shape);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OplOptions {
    /// Fail when input ends anywhere other than between tables.
    pub strict: bool,
    /// Check the whole dataset against the schema before writing anything.
    pub check_shape: bool,
}

impl Default for OplOptions {
    fn default() -> Self {
        OplOptions {
            strict: true,
            check_shape: true,
        }
    }
}

impl OplOptions {
    /// Creates default options (strict end-of-input, shape checks on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept truncated input and skip the up-front shape check.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::OplOptions;
    ///
    /// let options = OplOptions::lenient();
    /// assert!(!options.strict);
    /// assert!(!options.check_shape);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        OplOptions {
            strict: false,
            check_shape: false,
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_check_shape(mut self, check_shape: bool) -> Self {
        self.check_shape = check_shape;
        self
    }
}
