//! Browse Commands
//!
//! Typed commands accepted by the interactive session, parsed from one
//! input line each.

/// A command entered at the browse prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keep only queries containing the text
    Filter(String),
    /// Drop the filter and show the full tree
    Reset,
    /// Expand one year, or every year when `None`
    Expand(Option<i32>),
    /// Collapse one year, or every year when `None`
    Collapse(Option<i32>),
    /// List the highest-count terms; `None` uses the configured count and
    /// `top all` maps to `usize::MAX`
    Top(Option<usize>),
    /// Re-render the current view
    Show,
    /// Print the text summary
    Summary,
    /// Re-read the export files
    Reload,
    Help,
    Quit,
    /// Blank line
    Noop,
}

impl Command {
    /// Parse one input line
    ///
    /// A leading `/` is shorthand for `filter`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Noop);
        }

        if let Some(term) = line.strip_prefix('/') {
            return Ok(Command::Filter(term.to_string()));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "filter" | "f" => Ok(Command::Filter(rest.to_string())),
            "reset" | "r" => Ok(Command::Reset),
            "expand" | "e" => parse_year(rest).map(Command::Expand),
            "collapse" | "c" => parse_year(rest).map(Command::Collapse),
            "top" | "t" => parse_count(rest).map(Command::Top),
            "tree" | "show" => Ok(Command::Show),
            "summary" | "stats" => Ok(Command::Summary),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command {:?}. Type 'help' for commands.", other)),
        }
    }
}

fn parse_year(arg: &str) -> Result<Option<i32>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| format!("Invalid year: {}", arg))
}

fn parse_count(arg: &str) -> Result<Option<usize>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    if arg.eq_ignore_ascii_case("all") {
        return Ok(Some(usize::MAX));
    }
    arg.parse()
        .map(Some)
        .map_err(|_| format!("Invalid count: {}", arg))
}

/// Help text shown by the `help` command
pub const HELP: &str = "\
Commands:
  filter <text> | /<text>   show only queries containing <text>
  reset                     show the full tree
  expand [year]             expand one year or all years
  collapse [year]           collapse one year or all years
  top [n|all]               list the top n terms (configured count by default)
  tree                      show the current tree
  summary                   print the text report
  reload                    re-read the export files
  quit                      leave the session
";
