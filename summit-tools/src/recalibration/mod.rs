pub mod reports;
pub mod swift;

pub use reports::{change_summary_lines, generate_fix_report};
pub use swift::generate_swift_definitions;
