use derive_more::Display;
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorKind
///
/// Setup errors describe a malformed annotation setup (bad meta-annotation
/// chains, serializers without the required supertype, missing start
/// destinations, unmappable argument types).
/// Validation errors describe an assembled model that breaks a navigation
/// invariant (unknown deep link arguments, duplicate default graphs, ...).
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    #[display("setup")]
    Setup,

    #[display("validation")]
    Validation,
}

///
/// NavError
///
/// A fatal processing error tied to the declaration that caused it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
#[error("{kind} error in '{declaration}': {message}")]
pub struct NavError {
    pub kind: ErrorKind,
    pub declaration: String,
    pub message: String,
}

impl NavError {
    pub fn new(kind: ErrorKind, declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            declaration: declaration.into(),
            message: message.into(),
        }
    }

    /// Construct a setup (configuration) error.
    pub fn setup(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Setup, declaration, message)
    }

    /// Construct a model validation error.
    pub fn validation(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, declaration, message)
    }

    #[must_use]
    pub const fn is_setup(&self) -> bool {
        matches!(self.kind, ErrorKind::Setup)
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation)
    }
}

///
/// ErrorTree
///
/// Collects every violation found by a validation pass so the whole set is
/// reported at once.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    errors: Vec<NavError>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, err: impl Into<NavError>) {
        self.errors.push(err.into());
    }

    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[NavError] {
        &self.errors
    }

    /// True if any collected error mentions `needle` in its message.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.message.contains(needle))
    }

    pub fn result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

impl From<NavError> for ErrorTree {
    fn from(err: NavError) -> Self {
        Self { errors: vec![err] }
    }
}

// err
// push a validation error for a declaration onto an ErrorTree
#[macro_export]
macro_rules! err {
    ($errs:expr, $decl:expr, $($arg:tt)*) => {
        $errs.add($crate::error::NavError::validation($decl, format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn err_macro_records_validation_error() {
        let mut errs = ErrorTree::new();
        err!(errs, "app.Screen", "unknown argument '{}'", "userId");

        let err = errs.result().expect_err("tree with one error must fail");
        assert_eq!(err.len(), 1);
        assert!(err.errors()[0].is_validation());
        assert_eq!(
            err.to_string(),
            "validation error in 'app.Screen': unknown argument 'userId'"
        );
    }
}
