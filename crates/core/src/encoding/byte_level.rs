//! Byte-level BPE encoding and decoding.
//!
//! Text is treated as raw UTF-8 bytes: symbols 0-255 are the bytes themselves,
//! so every input is representable without an unknown-token fallback.

use crate::core::pairs::merge_pair;
use crate::core::vocab::SpecialTokens;
use crate::core::BpeModel;
use crate::Result;
use std::sync::Arc;

/// Byte-level BPE encoder/decoder over a shared, read-only model.
#[derive(Debug, Clone)]
pub struct ByteLevelEncoder {
    model: Arc<BpeModel>,
}

impl ByteLevelEncoder {
    /// Create a new encoder, taking ownership of the model.
    pub fn new(model: BpeModel) -> Self {
        Self::with_arc(Arc::new(model))
    }

    /// Create a new encoder sharing an existing model.
    pub fn with_arc(model: Arc<BpeModel>) -> Self {
        Self { model }
    }

    /// The model this encoder applies.
    #[inline]
    pub fn model(&self) -> &Arc<BpeModel> {
        &self.model
    }

    /// Encode one pretokenized chunk.
    ///
    /// Merges never cross the chunk's boundaries.
    pub fn encode_chunk(&self, chunk: &[u8]) -> Vec<u32> {
        let mut symbols: Vec<u32> = chunk.iter().map(|&b| u32::from(b)).collect();
        self.apply_bpe_merges(&mut symbols);
        symbols
    }

    /// Apply merge rules to a symbol sequence, lowest rank first.
    ///
    /// A rule can only apply once every rule its operands depend on has run,
    /// so repeatedly taking the lowest-ranked pair present replays training
    /// order. Each pass shortens the sequence, bounding the loop.
    fn apply_bpe_merges(&self, symbols: &mut Vec<u32>) {
        let merges = self.model.merges();

        while symbols.len() >= 2 {
            let best = symbols
                .windows(2)
                .filter_map(|window| {
                    let pair = (window[0], window[1]);
                    merges.get(pair).map(|(rank, new_id)| (rank, pair, new_id))
                })
                .min_by_key(|&(rank, _, _)| rank);

            let Some((_, pair, new_id)) = best else {
                break;
            };
            *symbols = merge_pair(symbols, pair, new_id);
        }
    }

    /// Concatenate the byte strings of `ids`.
    ///
    /// With `special` set, its reserved IDs decode to their literal text.
    /// Any other undefined ID fails with `UnknownSymbol`.
    pub fn decode_bytes(&self, ids: &[u32], special: Option<&SpecialTokens>) -> Result<Vec<u8>> {
        let vocab = self.model.vocab();
        let mut bytes = Vec::with_capacity(ids.len() * 2);

        for &id in ids {
            match special.and_then(|table| table.get_literal(id)) {
                Some(literal) => bytes.extend_from_slice(literal.as_bytes()),
                None => bytes.extend_from_slice(vocab.bytes_of(id)?),
            }
        }

        Ok(bytes)
    }

    /// Decode token IDs back to text.
    ///
    /// Byte sequences that are not valid UTF-8 become U+FFFD instead of
    /// failing: token boundaries need not fall on code-point boundaries.
    pub fn decode(&self, ids: &[u32], special: Option<&SpecialTokens>) -> Result<String> {
        let bytes = self.decode_bytes(ids, special)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenizerError;

    fn model(pairs: &[(u32, u32)]) -> BpeModel {
        BpeModel::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_encode_without_merges() {
        let encoder = ByteLevelEncoder::new(BpeModel::byte_level());
        assert_eq!(encoder.encode_chunk(b"hi"), vec![104, 105]);
        assert_eq!(encoder.encode_chunk(b""), Vec::<u32>::new());
    }

    #[test]
    fn test_encode_applies_lowest_rank_first() {
        // 256 = (a, a), 257 = (256, b), 258 = (a, b)
        let encoder = ByteLevelEncoder::new(model(&[(97, 97), (256, 98), (97, 98)]));

        // "aab": (a,a) has rank 0 and wins over (a,b), then (256,b) applies.
        assert_eq!(encoder.encode_chunk(b"aab"), vec![257]);
        // "ab": only (a,b) is present.
        assert_eq!(encoder.encode_chunk(b"ab"), vec![258]);
    }

    #[test]
    fn test_encode_stops_when_nothing_merges() {
        let encoder = ByteLevelEncoder::new(model(&[(120, 121)]));
        assert_eq!(encoder.encode_chunk(b"abc"), vec![97, 98, 99]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let encoder = ByteLevelEncoder::new(model(&[(108, 108), (101, 256)]));

        let text = "Hello, world! héllo";
        let ids = encoder.encode_chunk(text.as_bytes());
        assert_eq!(encoder.decode(&ids, None).unwrap(), text);
    }

    #[test]
    fn test_decode_unknown_symbol() {
        let encoder = ByteLevelEncoder::new(BpeModel::byte_level());
        let err = encoder.decode(&[100_000], None).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownSymbol(100_000)));
    }

    #[test]
    fn test_decode_special_tokens() {
        let encoder = ByteLevelEncoder::new(BpeModel::byte_level());
        let special = SpecialTokens::from_pairs([("<X>", 999)]).unwrap();

        let text = encoder.decode(&[999, 104, 105], Some(&special)).unwrap();
        assert_eq!(text, "<X>hi");

        // Without the table the reserved id is just undefined.
        let err = encoder.decode(&[999], None).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownSymbol(999)));
    }

    #[test]
    fn test_decode_invalid_utf8_is_replaced() {
        let encoder = ByteLevelEncoder::new(BpeModel::byte_level());
        // First byte of a two-byte sequence, then ASCII.
        let text = encoder.decode(&[0xC3, 104], None).unwrap();
        assert_eq!(text, "\u{FFFD}h");
    }
}
