//! Line tokenizer and log processor
//!
//! A battle log is one protocol message per line, each starting with `|`.
//! Replays also carry chat, HTML widgets and error annotations on the same
//! channel; those are dropped here so nothing downstream ever sees them.

mod tests;

use std::str::Lines;

/// Field delimiter; every protocol line starts with it
pub const DELIMITER: char = '|';

/// Lines starting with these are chat, HTML payloads or error annotations
const NOISE_PREFIXES: &[&str] = &[
    "|c|",
    "|c:|",
    "|chat|",
    "|html|",
    "|uhtml|",
    "|uhtmlchange|",
    "|raw|",
    "|error|",
];

/// Commands that end the meaningful part of a battle log
const TERMINAL_COMMANDS: &[&str] = &["win", "tie", "forcewin"];

/// One tokenized protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Field 0 after the leading delimiter (e.g. `move`, `-damage`)
    pub command: String,
    /// Remaining fields, verbatim
    pub args: Vec<String>,
    /// The trimmed source line
    pub raw: String,
}

impl LogLine {
    /// Tokenize a single line.
    ///
    /// Returns `None` for blank lines, lines that don't start with the
    /// delimiter, and chat/HTML/error lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if line.is_empty() || is_noise(line) {
            return None;
        }

        let rest = line.strip_prefix(DELIMITER)?;
        let mut fields = rest.split(DELIMITER);
        let command = fields.next()?.to_string();
        let args = fields.map(str::to_string).collect();

        Some(LogLine {
            command,
            args,
            raw: line.to_string(),
        })
    }

    /// Argument at `index` (0 = first field after the command)
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Whether this line ends the battle (`win`, `tie`, `forcewin`)
    pub fn is_terminal(&self) -> bool {
        let command = self.command.trim_start_matches('-');
        TERMINAL_COMMANDS.contains(&command)
    }
}

/// Whether a trimmed line is non-protocol content that must be discarded
pub fn is_noise(line: &str) -> bool {
    !line.starts_with(DELIMITER) || NOISE_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Lazy tokenizer over a full log.
///
/// Yields lines in order and stops right after the first terminal line;
/// nothing after it is ever tokenized.
#[derive(Debug, Clone)]
pub struct LogLines<'a> {
    lines: Lines<'a>,
    finished: bool,
}

impl<'a> LogLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            finished: false,
        }
    }
}

impl Iterator for LogLines<'_> {
    type Item = LogLine;

    fn next(&mut self) -> Option<LogLine> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some(parsed) = LogLine::parse(trimmed) else {
                tracing::trace!(line = trimmed, "skipping non-protocol line");
                continue;
            };

            if parsed.is_terminal() {
                self.finished = true;
            }
            return Some(parsed);
        }

        self.finished = true;
        None
    }
}

/// Tokenize a full log into its ordered event lines
pub fn process_log(text: &str) -> Vec<LogLine> {
    LogLines::new(text).collect()
}
