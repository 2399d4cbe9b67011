//! # Source Pattern Expansion
//!
//! File: cli/src/common/fs/pattern.rs
//!
//! ## Overview
//!
//! Turns a resolved source pattern into the list of concrete paths to copy.
//! The semantics follow a shell glob with brace alternation:
//!
//! - `{a,b}` groups are expanded first, left to right, nested groups included.
//!   Each alternative is globbed on its own and the results are concatenated in
//!   alternative order (every alternative's matches sorted by `glob`).
//! - `*`, `?` and `[...]` never cross a `/` and do not match a leading dot.
//! - Directory matches are marked with a trailing `/`.
//! - A pattern ending in `/` only matches directories.
//!
//! ```text
//! /p/vendor/acme/theme/{css,js}/*.min.*   ->  /p/vendor/acme/theme/css/app.min.css
//!                                              /p/vendor/acme/theme/js/app.min.js
//! ```
//!
use crate::core::error::{FileCopyError, Result};
use glob::MatchOptions;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Expands `pattern` into matching paths; directories carry a trailing `/`.
pub fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut matches = Vec::new();
    for alternative in expand_braces(pattern) {
        let dirs_only = alternative.len() > 1 && alternative.ends_with('/');
        let trimmed = if dirs_only {
            alternative.trim_end_matches('/')
        } else {
            alternative.as_str()
        };
        debug!("Globbing {}", trimmed);

        let paths = glob::glob_with(trimmed, options).map_err(|e| {
            FileCopyError::Config(format!("Invalid source pattern '{}': {}", alternative, e))
        })?;
        for entry in paths {
            match entry {
                Ok(path) if dirs_only && !path.is_dir() => continue,
                Ok(path) => matches.push(mark(path)),
                Err(e) => warn!("Skipping unreadable path {:?}: {}", e.path(), e.error()),
            }
        }
    }
    Ok(matches)
}

fn mark(path: PathBuf) -> PathBuf {
    if path.is_dir() {
        let mut marked = path.into_os_string();
        marked.push("/");
        PathBuf::from(marked)
    } else {
        path
    }
}

/// Expands brace groups: `a{b,c}d` -> `abd`, `acd`. A `{` without a matching
/// `}` is kept literally.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let group = (0..chars.len())
        .filter(|&i| chars[i] == '{')
        .find_map(|open| matching_close(&chars, open).map(|close| (open, close)));

    let Some((open, close)) = group else {
        return vec![pattern.to_string()];
    };

    let prefix: String = chars[..open].iter().collect();
    let suffix: String = chars[close + 1..].iter().collect();
    split_alternatives(&chars[open + 1..close])
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

fn matching_close(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits the inside of a brace group on commas that are not nested deeper.
fn split_alternatives(inner: &[char]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for &c in inner {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}
