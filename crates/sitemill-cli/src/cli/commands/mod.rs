//! CLI command handlers, one file per command.

mod check_url;
mod completions;
mod detect;
mod parse;

pub use check_url::run_check_url;
pub use completions::run_completions;
pub use detect::run_detect;
pub use parse::{run_parse, ParseOptions};
