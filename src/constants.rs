pub const MAX_DEPTH: usize = 256;

pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

/// Parallel deep copy kicks in at this many children.
#[cfg(feature = "parallel")]
pub(crate) const PARALLEL_THRESHOLD: usize = 256;

#[inline]
pub fn is_number_start(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b'.' || byte == b'-'
}

#[inline]
pub fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'.' | b'+' | b'-' | b'e' | b'E')
}
