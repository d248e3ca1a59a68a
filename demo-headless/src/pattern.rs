//! Spread pattern files
//!
//! One row per line, either as a compact run of digits (`010`) or as
//! whitespace-separated tokens (`0 1 0`). Blank lines are skipped. Shape checks
//! (rectangular, odd sides) are left to `Kernel::custom`.

use std::fmt;
use std::fs;
use std::path::Path;

/// Errors that can occur while reading a spread pattern
#[derive(Debug)]
pub enum PatternError {
    /// Failed to read the file
    LoadFailed(String),
    /// A token other than `0` or `1`
    InvalidToken {
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::LoadFailed(msg) => write!(f, "Failed to load spread pattern: {msg}"),
            PatternError::InvalidToken { line, token } => {
                write!(f, "Spread pattern line {line}: expected 0 or 1, got '{token}'")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Read and parse a pattern file
///
/// # Errors
///
/// Returns `LoadFailed` if the file cannot be read, or `InvalidToken` from
/// [`parse_pattern`].
pub fn load_pattern<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<i32>>, PatternError> {
    let contents =
        fs::read_to_string(path).map_err(|e| PatternError::LoadFailed(e.to_string()))?;
    parse_pattern(&contents)
}

/// Parse pattern text into rows of 0/1 values
///
/// # Errors
///
/// Returns `InvalidToken` for anything other than `0` or `1`.
pub fn parse_pattern(text: &str) -> Result<Vec<Vec<i32>>, PatternError> {
    let mut rows = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = if line.contains(char::is_whitespace) {
            line.split_whitespace().collect()
        } else {
            line.char_indices()
                .map(|(i, c)| &line[i..i + c.len_utf8()])
                .collect()
        };

        let row = tokens
            .into_iter()
            .map(|token| match token {
                "0" => Ok(0),
                "1" => Ok(1),
                other => Err(PatternError::InvalidToken {
                    line: line_no + 1,
                    token: other.to_string(),
                }),
            })
            .collect::<Result<Vec<i32>, _>>()?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_rows() {
        let rows = parse_pattern("010\n111\n010\n").unwrap();
        assert_eq!(rows, vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn parses_whitespace_tokens_and_skips_blank_lines() {
        let rows = parse_pattern("  0 1 0\n\n1  1 1 \r\n0 1 0").unwrap();
        assert_eq!(rows, vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn rejects_other_tokens() {
        let err = parse_pattern("010\n0x0\n").unwrap_err();
        match err {
            PatternError::InvalidToken { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            PatternError::LoadFailed(_) => panic!("unexpected load failure"),
        }
    }

    #[test]
    fn empty_text_gives_no_rows() {
        assert!(parse_pattern("\n\n").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_load_error() {
        assert!(matches!(
            load_pattern("/nonexistent/spread.txt"),
            Err(PatternError::LoadFailed(_))
        ));
    }
}
