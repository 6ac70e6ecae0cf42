pub mod input_parser;
pub mod script_parser;
pub mod task_serializer;

pub use input_parser::{InputError, parse_due_date, parse_estimate};
pub use script_parser::split_words;
pub use task_serializer::{format_elapsed, format_task};
