//! Parser error handling module
//!
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages
//! - Hints and related spans (e.g., "opened here" for unclosed braces)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, SyntaxError};
