//! Shell-style command lines for the stop/start hooks.
//!
//! Commands are configured as a single string and split on whitespace into
//! an argv list. There is no quoting or variable expansion: wrap anything
//! fancier in a script.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An argv-style command: program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    argv: Vec<String>,
}

impl CommandLine {
    /// Tokenize a command line on whitespace.
    pub fn parse(line: &str) -> Self {
        Self {
            argv: line.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// The program to execute, if any.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

impl Serialize for CommandLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CommandLine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let line = String::deserialize(deserializer)?;
        Ok(Self::parse(&line))
    }
}
