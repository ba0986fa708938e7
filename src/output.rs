//! Status lines for the nanopages CLI.
//!
//! Verbs are right-aligned in a fixed column, Cargo style, and written to
//! stderr so stdout only ever carries rendered pages or listings.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const VERB_WIDTH: usize = 12;

/// ANSI colour of a verb or highlighted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Green,
    Yellow,
    Cyan,
    Dim,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Yellow => "\x1b[33m",
            Tone::Cyan => "\x1b[36m",
            Tone::Dim => "\x1b[2m",
        }
    }
}

/// Writes status lines to stderr, coloured only when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Something was produced: `    Rendered pages/about.html (html)`.
    pub fn status(&self, verb: &str, message: &str) {
        self.line(Tone::Green, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.line(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.line(Tone::Yellow, verb, message);
    }

    /// Greyed-out fragment, e.g. the arrow in a route listing.
    pub fn dim(&self, text: &str) -> String {
        self.paint(Tone::Dim, text)
    }

    /// Highlighted path or URL.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(Tone::Cyan, text)
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if self.color {
            format!("{}{text}\x1b[0m", tone.code())
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) {
        let verb = format!("{verb:>VERB_WIDTH$}");
        let verb = if self.color {
            format!("\x1b[1m{}", self.paint(tone, &verb))
        } else {
            verb
        };
        let _ = writeln!(io::stderr().lock(), "{verb} {message}");
    }
}

/// `plural(1, "page", "pages")` -> `1 page`.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let word = if n == 1 { singular } else { pluralized };
    format!("{n} {word}")
}

/// Path relative to the working directory when it lies under it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
