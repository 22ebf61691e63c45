//! Interactive Browsing
//!
//! A terminal session over the query tree: typed commands in, rendered
//! views out. Nothing here knows about a particular UI toolkit; a front end
//! only has to turn its events into [`Command`]s and print the [`Outcome`]s.

mod command;
mod session;

pub use command::{Command, HELP};
pub use session::{IndexSource, Outcome, PatternSource, Session};
