mod format;
mod path;

pub use format::{format_duration, format_number, format_size, format_timestamp, percent};
pub use path::extension_label;
