//! Collapsible tree outline
//!
//! ```text
//! + 2021 (1)
//! - 2020 (3)
//!     March (2)
//!       paris to london
//!       weather today
//!     May (1)
//!       london eye tickets
//! ```
//!
//! Newest year first. Counts are taken from the tree being rendered, so a
//! filtered tree shows match counts.

use super::month_name;
use crate::aggregate::QueryTree;
use std::fmt::Write;

/// Render `tree`, showing months and queries only for expanded years
pub fn render_tree<F>(tree: &QueryTree, is_expanded: F) -> String
where
    F: Fn(i32) -> bool,
{
    if tree.is_empty() {
        return "(no matching queries)\n".to_string();
    }

    let mut out = String::new();
    for (year, months) in tree.years().iter().rev() {
        let expanded = is_expanded(*year);
        let marker = if expanded { '-' } else { '+' };
        let _ = writeln!(out, "{} {} ({})", marker, year, tree.year_total(*year));

        if !expanded {
            continue;
        }

        for (month, queries) in months {
            let _ = writeln!(out, "    {} ({})", month_name(*month), queries.len());
            for query in queries {
                let _ = writeln!(out, "      {}", query);
            }
        }
    }

    out
}
