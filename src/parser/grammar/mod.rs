//! Grammar rules for the Java front-end
//!
//! The grammar is split by level:
//! - `items` - Files, type declarations, bodies and members
//! - `statements` - Blocks and the statements inside method bodies
//! - `expressions` - Precedence-climbing expression parser
//!
//! Every rule is a free function over [`Parser`](crate::parser::parser::Parser)
//! and must either consume a token or report an error, so parsing always
//! terminates.

mod expressions;
mod items;
mod statements;

pub(crate) use items::source_file;
