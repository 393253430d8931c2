//! Error types for OBJ/MTL conversion and BOM encoding
//!
//! All errors carry an error code for categorization. Errors raised while
//! parsing a text document are usually wrapped in [`Error::Located`], which
//! adds the document name and line number through an [`ErrorContext`].
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Text and binary syntax errors
//! - **E3xxx**: Model errors
//! - **E4xxx**: Unsupported features
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error (including truncated containers)
//! - `E1002`: Named input or material library cannot be opened
//! - `E2001`: Malformed directive
//! - `E2002`: Numeric parse error
//! - `E2003`: Malformed BOM container
//! - `E3001`: Model cannot be encoded
//! - `E3002`: Vertex index out of range
//! - `E3003`: Unknown material
//! - `E4001`: Unsupported feature

use std::io;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Additional context for errors
///
/// Provides optional supplementary information to help with debugging:
/// - The document being parsed
/// - The 1-based line number of the offending directive
/// - A helpful hint for resolving common issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The document where the error occurred
    pub document: Option<String>,

    /// 1-based line number of the offending directive
    pub line: Option<usize>,

    /// A helpful hint for resolving the error
    pub hint: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context
    pub fn new() -> Self {
        Self {
            document: None,
            line: None,
            hint: None,
        }
    }

    /// Create an error context with just a hint
    pub fn with_hint(hint: impl Into<String>) -> Self {
        Self {
            document: None,
            line: None,
            hint: Some(hint.into()),
        }
    }

    /// Set the document name
    pub fn document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Set the line number
    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        match (&self.document, self.line) {
            (Some(document), Some(line)) => parts.push(format!("Location: {}:{}", document, line)),
            (Some(document), None) => parts.push(format!("Document: {}", document)),
            (None, Some(line)) => parts.push(format!("Line: {}", line)),
            (None, None) => {}
        }

        if let Some(ref hint) = self.hint {
            parts.push(format!("Hint: {}", hint));
        }

        if !parts.is_empty() {
            write!(f, "\n{}", parts.join("\n"))
        } else {
            Ok(())
        }
    }
}

/// Errors that can occur while converting documents or handling BOM containers
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Insufficient permissions
    /// - Disk full while writing the container
    /// - Container truncated (surfaces as `UnexpectedEof`)
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named input document or material library cannot be opened
    ///
    /// **Error Code**: E1002
    ///
    /// **Suggestions**:
    /// - `mtllib` references are resolved relative to the geometry document
    /// - Check the spelling and case of the file name
    #[error("[E1002] Cannot open: {0}")]
    MissingFile(String),

    /// Malformed directive in a text document
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Missing directive arguments
    /// - A face line that matches none of the vertex reference forms
    #[error("[E2001] Syntax error: {0}")]
    Syntax(String),

    /// Parse error for numeric values
    ///
    /// **Error Code**: E2002
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    #[error("[E2002] Parse error: {0}")]
    ParseError(String),

    /// Malformed BOM container
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Wrong file signature
    /// - Strings that are not valid UTF-8
    /// - Enumerations with out-of-range values
    #[error("[E2003] Invalid BOM container: {0}")]
    InvalidFormat(String),

    /// The model cannot be represented in the container
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - More than 65535 materials, assets, objects or groups
    /// - More than 65536 vertices in one object
    /// - Vertex buffers of unequal length
    /// - Groups referencing materials that are not part of the container
    #[error("[E3001] Invalid model: {0}")]
    InvalidModel(String),

    /// Vertex index outside its pool
    ///
    /// **Error Code**: E3002
    ///
    /// **Common Causes**:
    /// - 1-based index larger than the number of `v`/`vt`/`vn` lines so far
    /// - Relative index reaching before the first element
    /// - Index `0`, which is never valid
    #[error("[E3002] Invalid index: {0}")]
    InvalidIndex(String),

    /// `usemtl` names a material that no active library defines
    ///
    /// **Error Code**: E3003
    #[error("[E3003] Unknown material: {0}")]
    UnknownMaterial(String),

    /// Unsupported feature
    ///
    /// **Error Code**: E4001
    ///
    /// **Common Causes**:
    /// - Faces with five or more vertices
    /// - Point, line, curve or surface primitives
    /// - Containers written by a newer format version
    #[error("[E4001] Unsupported feature: {0}")]
    Unsupported(String),

    /// An error with the document and line where it occurred
    #[error("{source}{context}")]
    Located {
        /// The underlying error
        source: Box<Error>,
        /// Where the error occurred
        context: ErrorContext,
    },
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::InvalidFormat(format!("String is not valid UTF-8: {}", err))
    }
}

impl Error {
    /// Create a Syntax error for a directive
    ///
    /// # Arguments
    /// * `directive` - The directive keyword (e.g. "newmtl")
    /// * `message` - Description of the error
    pub fn directive(directive: &str, message: &str) -> Self {
        Error::Syntax(format!("'{}': {}", directive, message))
    }

    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "Ns specular exponent")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "floating-point number")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'",
            field_name, expected_type, value
        ))
    }

    /// Attach a document name and line number
    ///
    /// An error that already carries a location is returned unchanged.
    pub fn at(self, document: &str, line: usize) -> Self {
        match self {
            Error::Located { source, context } if context.document.is_none() => Error::Located {
                source,
                context: context.document(document).line(line),
            },
            Error::Located { .. } => self,
            other => Error::Located {
                source: Box::new(other),
                context: ErrorContext::new().document(document).line(line),
            },
        }
    }

    /// Attach a resolution hint
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            Error::Located { source, context } => Error::Located {
                source,
                context: context.hint(hint),
            },
            other => Error::Located {
                source: Box::new(other),
                context: ErrorContext::with_hint(hint),
            },
        }
    }

    /// The underlying error, without location information
    pub fn kind(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.kind(),
            other => other,
        }
    }
}
