// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flag-style parameter parsing for plugins.
//!
//! ```text
//! ["-repourl", "https://..", "-repofolder=src", "extra"]
//!     |             |               |              |
//!   name          value      name=value      stops parsing
//! ```
//!
//! Grammar follows Go's `flag` package, which is what plugin parameters
//! are written against: one or two leading dashes, value either inline
//! after `=` or in the next token, `--` or the first non-flag token ends
//! parsing. Only string flags exist.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::FlagError;

#[derive(Debug, Clone)]
struct StringFlag {
    usage: &'static str,
    default: String,
    value: String,
}

/// Set of declared string flags for one plugin.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    flags: BTreeMap<&'static str, StringFlag>,
    args: Vec<String>,
}

impl FlagSet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: BTreeMap::new(),
            args: Vec::new(),
        }
    }

    /// Declares a string flag.
    #[must_use]
    pub fn string(mut self, name: &'static str, default: &str, usage: &'static str) -> Self {
        self.flags.insert(
            name,
            StringFlag {
                usage,
                default: default.to_string(),
                value: default.to_string(),
            },
        );
        self
    }

    /// Parses `arguments`, stopping at the first error.
    ///
    /// Flags parsed before the error keep their values.
    ///
    /// # Errors
    ///
    /// Returns the first [`FlagError`] encountered.
    pub fn parse<S: AsRef<str>>(&mut self, arguments: &[S]) -> Result<(), FlagError> {
        let mut rest: &[S] = arguments;
        while let Some(consumed) = self.parse_one(rest)? {
            rest = &rest[consumed..];
        }
        Ok(())
    }

    /// Parses one flag, returning how many tokens it consumed.
    ///
    /// `Ok(None)` means parsing is over and the remaining tokens (minus a
    /// leading `--`) are positional.
    fn parse_one<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Option<usize>, FlagError> {
        let Some(first) = args.first() else {
            self.args.clear();
            return Ok(None);
        };
        let token = first.as_ref();
        if token.len() < 2 || !token.starts_with('-') {
            self.args = to_owned(args);
            return Ok(None);
        }

        let mut name = &token[1..];
        if let Some(stripped) = name.strip_prefix('-') {
            if stripped.is_empty() {
                self.args = to_owned(&args[1..]);
                return Ok(None);
            }
            name = stripped;
        }
        if name.is_empty() || name.starts_with('-') || name.starts_with('=') {
            return Err(FlagError::BadSyntax(token.to_string()));
        }

        let (name, inline) = match name.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (name, None),
        };

        let Some(flag) = self.flags.get_mut(name) else {
            if name == "help" || name == "h" {
                return Err(FlagError::HelpRequested);
            }
            return Err(FlagError::Undefined(name.to_string()));
        };

        match (inline, args.get(1)) {
            (Some(value), _) => {
                flag.value = value.to_string();
                Ok(Some(1))
            }
            (None, Some(next)) => {
                flag.value = next.as_ref().to_string();
                Ok(Some(2))
            }
            (None, None) => Err(FlagError::MissingValue(name.to_string())),
        }
    }

    /// Current value of a declared flag.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(|flag| flag.value.as_str())
    }

    /// Positional tokens left after parsing stopped.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Help text listing every flag, sorted by name.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = format!("Usage of {}:\n", self.name);
        for (name, flag) in &self.flags {
            let _ = writeln!(out, "  -{name} string");
            let _ = write!(out, "    \t{}", flag.usage);
            if !flag.default.is_empty() {
                let _ = write!(out, " (default {:?})", flag.default);
            }
            out.push('\n');
        }
        out
    }
}

fn to_owned<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter().map(|arg| arg.as_ref().to_string()).collect()
}
