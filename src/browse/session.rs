//! Browse Session
//!
//! Owns the aggregate and the current tree view for an interactive run.
//! Each command replaces the view wholesale; the aggregate only changes on a
//! successful reload.

use super::command::{Command, HELP};
use crate::aggregate::{aggregate_pattern, AggregateIndex, AnalysisOptions};
use crate::filter::{filter_tree, FilteredTree};
use crate::ingest::IngestResult;
use crate::report::{render_text, render_tree};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Where a session gets a fresh aggregate from on `reload`
pub trait IndexSource {
    /// Short description for log lines
    fn describe(&self) -> String;

    /// Run discovery and aggregation again
    fn load(&self) -> IngestResult<AggregateIndex>;
}

/// Reloads by expanding a glob pattern
#[derive(Debug, Clone)]
pub struct PatternSource {
    pub pattern: String,
    pub options: AnalysisOptions,
}

impl IndexSource for PatternSource {
    fn describe(&self) -> String {
        self.pattern.clone()
    }

    fn load(&self) -> IngestResult<AggregateIndex> {
        aggregate_pattern(&self.pattern, &self.options)
    }
}

/// Result of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and keep reading
    Continue(String),
    Quit,
}

/// Interactive state: aggregate, current view, and which years are open
pub struct Session {
    index: AggregateIndex,
    view: FilteredTree,
    expanded: BTreeSet<i32>,
    top_n: usize,
    source: Option<Box<dyn IndexSource>>,
}

impl Session {
    pub fn new(index: AggregateIndex, top_n: usize) -> Self {
        let view = FilteredTree::full(index.query_tree());
        Self {
            index,
            view,
            expanded: BTreeSet::new(),
            top_n,
            source: None,
        }
    }

    /// Attach a source used by the `reload` command
    pub fn with_source(mut self, source: impl IndexSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn index(&self) -> &AggregateIndex {
        &self.index
    }

    pub fn view(&self) -> &FilteredTree {
        &self.view
    }

    pub fn is_expanded(&self, year: i32) -> bool {
        self.expanded.contains(&year)
    }

    /// Apply one command
    pub fn handle(&mut self, command: Command) -> Outcome {
        let output = match command {
            Command::Filter(term) => self.apply_filter(Some(&term)),
            Command::Reset => self.apply_filter(None),
            Command::Expand(Some(year)) => {
                if self.view.tree().year(year).is_none() {
                    return Outcome::Continue(format!("No year {} in the current view\n", year));
                }
                self.expanded.insert(year);
                self.render_view()
            }
            Command::Expand(None) => {
                self.expanded = self.view.tree().years().keys().copied().collect();
                self.render_view()
            }
            Command::Collapse(Some(year)) => {
                self.expanded.remove(&year);
                self.render_view()
            }
            Command::Collapse(None) => {
                self.expanded.clear();
                self.render_view()
            }
            Command::Top(n) => self.render_top(n.unwrap_or(self.top_n)),
            Command::Show => self.render_view(),
            Command::Summary => render_text(&self.index, self.top_n),
            Command::Reload => self.reload(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
            Command::Noop => String::new(),
        };
        Outcome::Continue(output)
    }

    fn apply_filter(&mut self, term: Option<&str>) -> String {
        self.view = filter_tree(self.index.query_tree(), term);

        match self.view.term() {
            Some(term) => {
                tracing::debug!("Filter {:?} matched {} queries", term, self.view.match_count());
                // Matches are only useful when visible
                self.expanded = self.view.tree().years().keys().copied().collect();
                format!(
                    "Filter {:?}: {} matching queries\n{}",
                    term,
                    self.view.match_count(),
                    self.render_view()
                )
            }
            None => {
                self.expanded.clear();
                format!("Filter cleared\n{}", self.render_view())
            }
        }
    }

    fn render_view(&self) -> String {
        render_tree(self.view.tree(), |year| self.expanded.contains(&year))
    }

    fn render_top(&self, n: usize) -> String {
        let top = self.index.top_terms(n);
        if top.is_empty() {
            return "No terms\n".to_string();
        }
        top.iter()
            .map(|(term, count)| format!("{}: {}\n", term, count))
            .collect()
    }

    fn reload(&mut self) -> String {
        let Some(source) = &self.source else {
            return "Reload is not available for this session\n".to_string();
        };

        match source.load() {
            Ok(index) => {
                tracing::info!("Reloaded {} events from {}", index.total_events(), source.describe());
                let term = self.view.term().map(str::to_string);
                self.index = index;
                self.view = filter_tree(self.index.query_tree(), term.as_deref());
                let years: BTreeSet<i32> = self.view.tree().years().keys().copied().collect();
                self.expanded.retain(|year| years.contains(year));
                format!(
                    "Reloaded {} queries\n{}",
                    self.index.total_events(),
                    self.render_view()
                )
            }
            Err(e) => {
                tracing::error!("Reload from {} failed: {}", source.describe(), e);
                format!("Reload failed, keeping previous data: {}\n", e)
            }
        }
    }

    /// Read commands from `input` until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(
            output,
            "{} queries loaded. Type 'help' for commands.\n{}",
            self.index.total_events(),
            self.render_view()
        )?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line?;

            match Command::parse(&line) {
                Ok(command) => match self.handle(command) {
                    Outcome::Continue(text) => write!(output, "{}", text)?,
                    Outcome::Quit => break,
                },
                Err(message) => writeln!(output, "{}", message)?,
            }
        }

        Ok(())
    }
}
