//! Test case discovery and selection.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{HarnessError, Result};

/// Extension of converter inputs.
pub const INPUT_EXTENSION: &str = "txt";

/// Lists every `*.txt` file under `root`, recursively, sorted by path.
pub fn discover_inputs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_inputs(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_inputs(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let read_error = |source| HarnessError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        // Symlinked directories are not descended into.
        let is_dir = entry.file_type().map_err(read_error)?.is_dir();
        let path = entry.path();
        if is_dir {
            collect_inputs(&path, files)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(INPUT_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}

/// Path of `path` relative to `root`, with `/` separators.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

/// Which discovered inputs become cases.
#[derive(Debug, Clone)]
pub enum CaseFilter {
    All,
    Exact(String),
    Wildcard(Regex),
}

impl CaseFilter {
    /// Builds a filter from an optional pattern.
    ///
    /// Patterns containing `*`, `?`, or `[` are shell-style wildcards over the
    /// whole relative path; anything else must equal the relative path.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self> {
        let Some(pattern) = pattern else {
            return Ok(CaseFilter::All);
        };
        let normalized = pattern.replace('\\', "/");
        if !normalized.contains(['*', '?', '[']) {
            return Ok(CaseFilter::Exact(normalized));
        }
        let regex = Regex::new(&wildcard_to_regex(&normalized)).map_err(|source| {
            HarnessError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(CaseFilter::Wildcard(regex))
    }

    pub fn matches(&self, relative: &str) -> bool {
        match self {
            CaseFilter::All => true,
            CaseFilter::Exact(expected) => relative == expected,
            CaseFilter::Wildcard(regex) => regex.is_match(relative),
        }
    }
}

/// Translates a shell-style wildcard into an anchored regex.
///
/// `*` matches any run of characters including `/`, `?` one character,
/// `[...]` a class (`[!...]` negated). An unterminated `[` is literal.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    let escaped = escape_class(&chars[i + 1..end]);
                    let body = if let Some(rest) = escaped.strip_prefix('!') {
                        format!("^{rest}")
                    } else if let Some(rest) = escaped.strip_prefix('^') {
                        format!("\\^{rest}")
                    } else {
                        escaped
                    };
                    out.push('[');
                    out.push_str(&body);
                    out.push(']');
                    i = end;
                }
                None => out.push_str("\\["),
            },
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out.push('$');
    out
}

/// Escapes class members the regex crate would otherwise read as nested
/// classes or set operators (`&&`, `--`, `~~`).
fn escape_class(members: &[char]) -> String {
    let mut out = String::with_capacity(members.len() * 2);
    for (k, &c) in members.iter().enumerate() {
        let doubled_dash = c == '-'
            && (members.get(k + 1) == Some(&'-') || (k > 0 && members[k - 1] == '-'));
        if matches!(c, '\\' | '[' | '&' | '~') || doubled_dash {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Index of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    // A leading `]` is part of the class.
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() {
        if chars[j] == ']' {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Applies the filter to discovered inputs, keeping discovery order.
pub fn select_cases(root: &Path, inputs: Vec<PathBuf>, filter: &CaseFilter) -> Vec<PathBuf> {
    inputs
        .into_iter()
        .filter(|path| filter.matches(&relative_key(root, path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wildcard(pattern: &str) -> CaseFilter {
        CaseFilter::from_pattern(Some(pattern)).unwrap()
    }

    #[test]
    fn test_star_crosses_directories() {
        let filter = wildcard("user-1/*.txt");
        assert!(filter.matches("user-1/input-1-1.txt"));
        assert!(filter.matches("user-1/nested/input.txt"));
        assert!(!filter.matches("user-2/input.txt"));
    }

    #[test]
    fn test_question_mark_and_class() {
        assert!(wildcard("input-?.txt").matches("input-7.txt"));
        assert!(!wildcard("input-?.txt").matches("input-17.txt"));
        assert!(wildcard("input-[12].txt").matches("input-2.txt"));
        assert!(!wildcard("input-[!12].txt").matches("input-2.txt"));
        assert!(wildcard("input-[!12].txt").matches("input-3.txt"));
    }

    #[test]
    fn test_literal_characters_are_escaped() {
        assert!(!wildcard("a.txt*").matches("abtxt"));
        assert!(wildcard("a+b*").matches("a+b.txt"));
        assert!(wildcard("x[*").matches("x[1.txt"));
    }

    #[test]
    fn test_set_operator_characters_are_literal() {
        let filter = wildcard("input-[a&&b].txt");
        assert!(filter.matches("input-&.txt"));
        assert!(filter.matches("input-a.txt"));
        assert!(wildcard("input-[x~~y].txt").matches("input-~.txt"));
        let dashes = wildcard("input-[a--z].txt");
        assert!(dashes.matches("input--.txt"));
        assert!(dashes.matches("input-z.txt"));
        assert!(!dashes.matches("input-m.txt"));
        assert!(wildcard("input-[1-3].txt").matches("input-2.txt"));
    }

    #[test]
    fn test_exact_match() {
        let filter = CaseFilter::from_pattern(Some("user-1\\input-1-1.txt")).unwrap();
        assert!(filter.matches("user-1/input-1-1.txt"));
        assert!(!filter.matches("user-1/input-1-10.txt"));
    }
}
