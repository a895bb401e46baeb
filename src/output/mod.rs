pub mod formatter;

pub use formatter::{
    format_age, format_airport_table, format_airports_json, format_attribute, format_score,
    should_use_colors, truncate_text,
};
