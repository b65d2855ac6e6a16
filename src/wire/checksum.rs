//! RFC 1071 Internet checksum.

fn propagate_carries(word: u32) -> u16 {
    let sum = (word >> 16) + (word & 0xffff);
    ((sum >> 16) as u16) + (sum as u16)
}

/// Compute an RFC 1071 compliant checksum (without the final complement).
///
/// Data is summed as big-endian 16-bit words; an odd trailing byte is padded
/// with zero on the right. Callers complement the result to obtain the value
/// transmitted on the wire.
pub fn data(mut data: &[u8]) -> u16 {
    let mut accum = 0u32;
    while data.len() >= 2 {
        accum += u32::from(u16::from_be_bytes([data[0], data[1]]));
        data = &data[2..];
    }

    // Add the last remaining odd byte, if any.
    if let Some(&value) = data.first() {
        accum += u32::from(value) << 8;
    }

    propagate_carries(accum)
}

/// Combine several RFC 1071 compliant checksums.
pub fn combine(checksums: &[u16]) -> u16 {
    let mut accum: u32 = 0;
    for &word in checksums {
        accum += u32::from(word);
    }
    propagate_carries(accum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_address_mask_request() {
        // Type 17, code 0, zeroed checksum/identifier/sequence, followed by
        // the ASCII form of 192.168.54.11. Folded by hand: 0x7231, so the
        // transmitted checksum is 0x8dce.
        let mut segment = vec![17, 0, 0, 0, 0, 0, 0, 0];
        segment.extend_from_slice(b"192.168.54.11");
        assert_eq!(data(&segment), 0x7231);
        assert_eq!(!data(&segment), 0x8dce);
    }

    #[test]
    fn odd_trailing_byte_is_right_padded() {
        assert_eq!(data(&[0xab]), 0xab00);
        assert_eq!(data(&[0x12, 0x34, 0xab]), combine(&[0x1234, 0xab00]));
    }

    #[test]
    fn carries_wrap_around() {
        // 0xffff + 0x0001 overflows into the carry bit, which folds back in.
        assert_eq!(data(&[0xff, 0xff, 0x00, 0x01]), 0x0001);
    }

    #[test]
    fn combine_matches_single_pass() {
        let left = [0x45, 0x00, 0x00, 0x54];
        let right = [0x40, 0x01, 0xf7, 0x23];
        let mut whole = left.to_vec();
        whole.extend_from_slice(&right);
        assert_eq!(combine(&[data(&left), data(&right)]), data(&whole));
    }
}
