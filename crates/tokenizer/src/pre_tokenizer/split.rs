//! Text splitting for pre-tokenization.
//!
//! The splitter cuts text into chunks along word, number, punctuation and
//! whitespace boundaries. Each chunk is encoded on its own, so no merge ever
//! spans two chunks.

use bytemerge_core::{Result, TokenizerError};
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GPT-2 style split pattern.
pub const GPT2_SPLIT_PATTERN: &str =
    r"'(?:[sdmt]|ll|ve|re)| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// GPT-4 style split pattern.
pub const GPT4_SPLIT_PATTERN: &str = r"'(?i:[sdmt]|ll|ve|re)|[^\r\n\p{L}\p{N}]?+\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]++[\r\n]*|\s*[\r\n]|\s+(?!\S)|\s+";

/// Splitting patterns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPattern {
    /// No splitting: the whole text is one chunk
    NoSplit,
    /// GPT-2 word/number/punctuation/whitespace classes
    Gpt2,
    /// GPT-4 classes (case-insensitive contractions, numbers of up to 3 digits)
    #[default]
    Gpt4,
    /// Custom regex pattern; text it does not match is dropped
    Custom(String),
}

impl SplitPattern {
    /// The regex source, or `None` for [`SplitPattern::NoSplit`].
    pub fn regex_source(&self) -> Option<&str> {
        match self {
            SplitPattern::NoSplit => None,
            SplitPattern::Gpt2 => Some(GPT2_SPLIT_PATTERN),
            SplitPattern::Gpt4 => Some(GPT4_SPLIT_PATTERN),
            SplitPattern::Custom(pattern) => Some(pattern),
        }
    }
}

impl FromStr for SplitPattern {
    type Err = TokenizerError;

    /// Parses `none`, `gpt2`, `gpt4`, or anything else as a custom regex.
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "" => {
                return Err(TokenizerError::InvalidConfig(
                    "split pattern must not be empty".to_string(),
                ))
            }
            "none" => SplitPattern::NoSplit,
            "gpt2" => SplitPattern::Gpt2,
            "gpt4" => SplitPattern::Gpt4,
            custom => SplitPattern::Custom(custom.to_string()),
        })
    }
}

impl fmt::Display for SplitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPattern::NoSplit => write!(f, "none"),
            SplitPattern::Gpt2 => write!(f, "gpt2"),
            SplitPattern::Gpt4 => write!(f, "gpt4"),
            SplitPattern::Custom(pattern) => write!(f, "{}", pattern),
        }
    }
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    /// Pattern to split on
    pattern: SplitPattern,
    /// Compiled pattern (absent for `NoSplit`)
    regex: Option<Regex>,
}

impl Splitter {
    /// Create a new splitter, compiling its pattern.
    pub fn new(pattern: SplitPattern) -> Result<Self> {
        let regex = pattern
            .regex_source()
            .map(Regex::new)
            .transpose()
            .map_err(|e| {
                TokenizerError::InvalidConfig(format!("invalid split pattern {}: {}", pattern, e))
            })?;

        Ok(Self { pattern, regex })
    }

    /// The pattern this splitter uses.
    pub fn pattern(&self) -> &SplitPattern {
        &self.pattern
    }

    /// Split text into chunks, in order.
    ///
    /// Empty text gives no chunks.
    pub fn split<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let Some(regex) = &self.regex else {
            return Ok(vec![text]);
        };

        let mut chunks = Vec::new();
        for found in regex.find_iter(text) {
            let found = found.map_err(|e| {
                TokenizerError::Tokenization(format!("split pattern failed to match: {}", e))
            })?;
            if !found.as_str().is_empty() {
                chunks.push(found.as_str());
            }
        }

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(pattern: SplitPattern, text: &str) -> Vec<String> {
        Splitter::new(pattern)
            .unwrap()
            .split(text)
            .unwrap()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_nosplit() {
        assert_eq!(
            split(SplitPattern::NoSplit, "hello world  test"),
            vec!["hello world  test"]
        );
    }

    #[test]
    fn test_gpt2_split() {
        assert_eq!(
            split(SplitPattern::Gpt2, "Hello world, it's 2024!"),
            vec!["Hello", " world", ",", " it", "'s", " 2024", "!"]
        );
    }

    #[test]
    fn test_gpt4_split() {
        assert_eq!(
            split(SplitPattern::Gpt4, "I'VE got 12345 apples"),
            vec!["I", "'VE", " got", " ", "123", "45", " apples"]
        );
    }

    #[test]
    fn test_trailing_whitespace_kept_apart() {
        // Runs of spaces leave the last one to prefix the next word.
        assert_eq!(
            split(SplitPattern::Gpt2, "go   to"),
            vec!["go", "  ", " to"]
        );
    }

    #[test]
    fn test_builtin_patterns_cover_all_text() {
        let text = "Tabs\tand\nnewlines\r\n  mixed with ünïcödé, 数字 123 and émojis 🎉!!";
        for pattern in [SplitPattern::Gpt2, SplitPattern::Gpt4] {
            assert_eq!(split(pattern, text).concat(), text);
        }
    }

    #[test]
    fn test_custom_split() {
        assert_eq!(
            split(SplitPattern::Custom(r"\w+|\s+".to_string()), "hello  world"),
            vec!["hello", "  ", "world"]
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let err = Splitter::new(SplitPattern::Custom("(unclosed".to_string())).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_backtracking_limit_is_an_error() {
        // `\s*[\r\n]` overflows the backtracking stack on a long run of spaces.
        let splitter = Splitter::new(SplitPattern::Gpt4).unwrap();
        let text = format!("{}a", " ".repeat(2_000_000));

        let err = splitter.split(&text).unwrap_err();
        assert!(matches!(err, TokenizerError::Tokenization(_)));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(split(SplitPattern::Gpt4, ""), Vec::<String>::new());
        assert_eq!(split(SplitPattern::NoSplit, ""), Vec::<String>::new());
    }

    #[test]
    fn test_pattern_from_str() {
        assert_eq!("none".parse::<SplitPattern>().unwrap(), SplitPattern::NoSplit);
        assert_eq!("gpt2".parse::<SplitPattern>().unwrap(), SplitPattern::Gpt2);
        assert_eq!("gpt4".parse::<SplitPattern>().unwrap(), SplitPattern::Gpt4);
        assert_eq!(
            r"\S+".parse::<SplitPattern>().unwrap(),
            SplitPattern::Custom(r"\S+".to_string())
        );
        assert!("".parse::<SplitPattern>().is_err());
    }
}
