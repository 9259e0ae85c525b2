//! Special-token extraction.
//!
//! Reserved literals are cut out of the text before regular splitting so
//! they never go through BPE.

use bytemerge_core::{Result, SpecialTokens, TokenizerError};
use regex::Regex;

/// A piece of text after special-token extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// A special token occurrence, by ID
    Special(u32),
    /// Ordinary text between special tokens
    Text(&'t str),
}

/// Splits text around special-token literals.
#[derive(Debug, Clone)]
pub struct SpecialSplitter {
    tokens: SpecialTokens,
    /// Alternation of escaped literals, longest first (absent if no tokens)
    regex: Option<Regex>,
}

impl SpecialSplitter {
    /// Build a splitter for the given special tokens.
    pub fn new(tokens: &SpecialTokens) -> Result<Self> {
        let mut literals: Vec<&str> = tokens.iter().map(|(literal, _)| literal).collect();
        // Longest first, so a literal that prefixes another never wins.
        literals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let regex = if literals.is_empty() {
            None
        } else {
            let pattern = literals
                .iter()
                .map(|literal| regex::escape(literal))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&pattern).map_err(|e| {
                TokenizerError::InvalidConfig(format!("invalid special tokens: {}", e))
            })?;
            Some(regex)
        };

        Ok(Self {
            tokens: tokens.clone(),
            regex,
        })
    }

    /// The special tokens this splitter recognizes.
    pub fn tokens(&self) -> &SpecialTokens {
        &self.tokens
    }

    /// Split text into special tokens and the text around them, in order.
    ///
    /// Concatenating the text segments with the special literals reproduces
    /// the input exactly.
    pub fn split<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let Some(regex) = &self.regex else {
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Text(text)]
            };
        };

        let mut segments = Vec::new();
        let mut last = 0;

        for found in regex.find_iter(text) {
            if found.start() > last {
                segments.push(Segment::Text(&text[last..found.start()]));
            }
            match self.tokens.get_id(found.as_str()) {
                Some(id) => segments.push(Segment::Special(id)),
                None => segments.push(Segment::Text(found.as_str())),
            }
            last = found.end();
        }

        if last < text.len() {
            segments.push(Segment::Text(&text[last..]));
        }

        segments
    }

    /// The text segments only, with special literals removed.
    pub fn strip<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.split(text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text),
                Segment::Special(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(pairs: &[(&str, u32)]) -> SpecialSplitter {
        let tokens = SpecialTokens::from_pairs(pairs.iter().copied()).unwrap();
        SpecialSplitter::new(&tokens).unwrap()
    }

    #[test]
    fn test_no_special_tokens() {
        let splitter = splitter(&[]);
        assert_eq!(splitter.split("a <X> b"), vec![Segment::Text("a <X> b")]);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_split_around_literal() {
        let splitter = splitter(&[("<X>", 999)]);
        assert_eq!(
            splitter.split("<X> hi<X>"),
            vec![
                Segment::Special(999),
                Segment::Text(" hi"),
                Segment::Special(999)
            ]
        );
    }

    #[test]
    fn test_longest_literal_wins() {
        let splitter = splitter(&[("<|end|>", 1000), ("<|end|><|end|>", 1001)]);
        assert_eq!(
            splitter.split("a<|end|><|end|>b<|end|>"),
            vec![
                Segment::Text("a"),
                Segment::Special(1001),
                Segment::Text("b"),
                Segment::Special(1000)
            ]
        );
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let splitter = splitter(&[("[.*]", 500)]);
        assert_eq!(
            splitter.split("x[.*]y.z"),
            vec![Segment::Text("x"), Segment::Special(500), Segment::Text("y.z")]
        );
    }

    #[test]
    fn test_strip_keeps_boundary_text() {
        let splitter = splitter(&[("<s>", 700)]);
        assert_eq!(splitter.strip("ab<s>cd<s><s>e"), vec!["ab", "cd", "e"]);
    }
}
