//! Query tree filtering
//!
//! Produces a pruned copy of a [`QueryTree`] holding only the queries that
//! contain a search term, plus the year and month branches leading to them.
//!
//! An absent or blank term resets to the full tree. A term with no matches
//! yields an empty tree, which is a normal result rather than an error.

use crate::aggregate::{QueryTree, YearBranch};
use std::collections::BTreeMap;

/// Result of a filter request
///
/// Always freshly built; never shares state with the tree it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredTree {
    term: Option<String>,
    tree: QueryTree,
}

impl FilteredTree {
    /// Unfiltered view over the full tree
    pub fn full(tree: &QueryTree) -> Self {
        Self {
            term: None,
            tree: tree.clone(),
        }
    }

    /// Normalized term this view was filtered by, `None` for the full tree
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn tree(&self) -> &QueryTree {
        &self.tree
    }

    pub fn into_tree(self) -> QueryTree {
        self.tree
    }

    /// Whether this is the reset (unfiltered) view
    pub fn is_reset(&self) -> bool {
        self.term.is_none()
    }

    /// Whether the filter matched nothing
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.tree.leaf_count()
    }
}

/// Trim and lowercase a user-supplied term; blank terms become `None`
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty())
}

/// Filter `tree` down to queries containing `term`
pub fn filter_tree(tree: &QueryTree, term: Option<&str>) -> FilteredTree {
    match normalize_term(term) {
        None => FilteredTree::full(tree),
        Some(term) => {
            let pruned = filter_years(tree.years(), &term);
            FilteredTree {
                term: Some(term),
                tree: QueryTree::from(pruned),
            }
        }
    }
}

fn filter_years(years: &BTreeMap<i32, YearBranch>, term: &str) -> BTreeMap<i32, YearBranch> {
    years
        .iter()
        .filter_map(|(year, months)| {
            let kept = filter_months(months, term);
            (!kept.is_empty()).then_some((*year, kept))
        })
        .collect()
}

fn filter_months(months: &YearBranch, term: &str) -> YearBranch {
    months
        .iter()
        .filter_map(|(month, queries)| {
            let kept = filter_queries(queries, term);
            (!kept.is_empty()).then_some((*month, kept))
        })
        .collect()
}

fn filter_queries(queries: &[String], term: &str) -> Vec<String> {
    queries
        .iter()
        .filter(|query| query.contains(term))
        .cloned()
        .collect()
}
