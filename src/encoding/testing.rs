//! Provides utilities for testing codec code.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::encoding::TextCodec;

/// Byte strings of every length from empty up to a few blocks of any codec,
/// with a bias towards short inputs where padding edge cases live.
pub fn arbitrary_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => vec(any::<u8>(), 0..16),
        1 => vec(any::<u8>(), 0..1024),
    ]
}

/// Encodes then decodes `input` with `codec`, asserting the output matches.
pub fn roundtrip(codec: TextCodec, input: &[u8]) {
    let encoded = codec.encode(input);
    let output = codec.decode(&encoded).unwrap();
    assert_eq!(output, input);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    use super::{arbitrary_bytes, roundtrip};
    use crate::encoding::TextCodec;

    #[test]
    fn arbitrary_bytes_can_be_empty() {
        let mut runner = TestRunner::deterministic();
        let strategy = arbitrary_bytes();
        let found_empty = (0..1000).any(|_| {
            strategy
                .new_tree(&mut runner)
                .map(|tree| tree.current().is_empty())
                .unwrap_or(false)
        });
        assert!(found_empty);
    }

    #[test]
    fn roundtrip_all_codecs() {
        for &codec in TextCodec::ALL {
            roundtrip(codec, b"");
            roundtrip(codec, b"hello world!");
        }
    }

    proptest! {
        #[test]
        fn roundtrip_any_codec(index in 0..TextCodec::ALL.len(), bytes in arbitrary_bytes()) {
            roundtrip(TextCodec::ALL[index], &bytes);
        }
    }
}
