//! Output formatting for the command-line front end.

pub mod json;
pub mod markdown;
