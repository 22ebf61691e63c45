//! Report Rendering
//!
//! Turns an [`AggregateIndex`](crate::aggregate::AggregateIndex) into output:
//!
//! - **text**: the plain summary printed by `searchlog report`
//! - **json**: the same summary as a JSON document
//! - **tree**: year → month → query outline used by the browse session

mod json;
mod text;
mod tree;

pub use json::{render_json, JsonReport, RankedTerm};
pub use text::render_text;
pub use tree::render_tree;

use chrono::Month;

/// English month name for 1-12, the number itself otherwise
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(3), "March");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "0");
        assert_eq!(month_name(13), "13");
        assert_eq!(month_name(300), "300");
    }
}
