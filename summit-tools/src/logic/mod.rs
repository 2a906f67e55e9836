pub mod reports;

pub use reports::{generate_console_report, generate_json_report, generate_markdown_report};
