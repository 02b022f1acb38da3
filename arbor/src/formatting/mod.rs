//! CLI formatting utilities.
//!
//! Consistent colors and layout for ecosystem, package, and bootstrap output.

mod headers;
mod output;
mod progress;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use output::{print_key_value, print_summary_box};
pub use progress::create_spinner;
pub use status::{print_error, print_info, print_success, print_warning, Status};
pub use tables::print_table;
