use crate::ber::{BerError, BerResult};

/// Two's-complement signed integer, 1 to 8 payload bytes.
pub fn decode_integer(input: &[u8]) -> BerResult<i64> {
    if input.is_empty() {
        return Err(BerError::BadLength);
    }
    if input.len() > 8 {
        return Err(BerError::IntegerOverflow);
    }

    // Seed with the sign so short payloads extend correctly.
    let mut value: i64 = if (input[0] & 0x80) != 0 { -1 } else { 0 };

    for &byte in input {
        value = (value << 8) | i64::from(byte);
    }

    Ok(value)
}

/// Unsigned 32-bit payload (Counter32 / Gauge32 / TimeTicks), 1 to 4 bytes,
/// zero-extended on the left.
pub fn decode_unsigned_integer(input: &[u8]) -> BerResult<u32> {
    if input.is_empty() {
        return Err(BerError::BadLength);
    }
    if input.len() > 4 {
        return Err(BerError::IntegerOverflow);
    }

    let mut value: u32 = 0;
    for &byte in input {
        value = (value << 8) | u32::from(byte);
    }
    Ok(value)
}

/// Unsigned 64-bit payload (Counter64), 1 to 8 bytes, zero-extended.
pub fn decode_unsigned_integer64(input: &[u8]) -> BerResult<u64> {
    if input.is_empty() {
        return Err(BerError::BadLength);
    }
    if input.len() > 8 {
        return Err(BerError::IntegerOverflow);
    }

    let mut value: u64 = 0;
    for &byte in input {
        value = (value << 8) | u64::from(byte);
    }
    Ok(value)
}
