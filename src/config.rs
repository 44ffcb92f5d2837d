use wirecodec::encoding::TextCodec;

/// Codec used when none is given on the command line.
pub const DEFAULT_CODEC: TextCodec = TextCodec::Base32;

/// Inputs larger than this are rejected rather than read into memory.
pub const MAX_INPUT_LEN: usize = 1 << 20; // 1 MiB
