//! Property-based tests for the round-trip and idempotence guarantees of `Buffer`.

use bitbyte_buffer::{Buffer, BufferError};
use proptest::prelude::*;

/// A non-empty buffer together with a byte offset inside it.
fn bytes_and_offset() -> impl Strategy<Value = (Vec<u8>, usize)> {
    prop::collection::vec(any::<u8>(), 1..64)
        .prop_flat_map(|bytes| {
            let len = bytes.len();
            (Just(bytes), 0..len)
        })
}

/// A buffer, a bit offset and a field width such that the field fits.
fn bit_field() -> impl Strategy<Value = (Vec<u8>, i64, u32)> {
    (prop::collection::vec(any::<u8>(), 8..24), 1u32..=64).prop_flat_map(|(bytes, n)| {
        let max_offset = bytes.len() as i64 * 8 - i64::from(n);
        (Just(bytes), 0..=max_offset, Just(n))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn byte_round_trip((bytes, offset) in bytes_and_offset(), value in any::<u8>()) {
        let mut buf = Buffer::from(bytes);
        let offset = offset as i64;
        buf.write_byte(offset, value).unwrap();
        prop_assert_eq!(buf.read_byte(offset), Ok(value));
    }

    #[test]
    fn u16_round_trip(values in prop::collection::vec(any::<u16>(), 0..16), pad in 0usize..4) {
        let mut buf = Buffer::from(vec![0u8; pad + values.len() * 2]);
        let offset = pad as i64;

        buf.write_u16_le(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u16_le(offset, values.len()), Ok(values.clone()));
        buf.write_u16_be(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u16_be(offset, values.len()), Ok(values.clone()));

        buf.seek_byte(offset, false);
        buf.write_u16_be_next(&values).unwrap();
        prop_assert_eq!(buf.byte_offset(), offset + 2 * values.len() as i64);
        buf.seek_byte(offset, false);
        prop_assert_eq!(buf.read_u16_be_next(values.len()), Ok(values.clone()));
        prop_assert_eq!(buf.byte_offset(), offset + 2 * values.len() as i64);
    }

    #[test]
    fn u32_round_trip(values in prop::collection::vec(any::<u32>(), 0..16), pad in 0usize..4) {
        let mut buf = Buffer::from(vec![0u8; pad + values.len() * 4]);
        let offset = pad as i64;

        buf.write_u32_le(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u32_le(offset, values.len()), Ok(values.clone()));
        buf.write_u32_be(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u32_be(offset, values.len()), Ok(values.clone()));

        buf.seek_byte(offset, false);
        buf.write_u32_le_next(&values).unwrap();
        prop_assert_eq!(buf.byte_offset(), offset + 4 * values.len() as i64);
        buf.seek_byte(offset, false);
        prop_assert_eq!(buf.read_u32_le_next(values.len()), Ok(values.clone()));
        prop_assert_eq!(buf.byte_offset(), offset + 4 * values.len() as i64);
    }

    #[test]
    fn u64_round_trip(values in prop::collection::vec(any::<u64>(), 0..16), pad in 0usize..4) {
        let mut buf = Buffer::from(vec![0u8; pad + values.len() * 8]);
        let offset = pad as i64;

        buf.write_u64_le(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u64_le(offset, values.len()), Ok(values.clone()));
        buf.write_u64_be(offset, &values).unwrap();
        prop_assert_eq!(buf.read_u64_be(offset, values.len()), Ok(values.clone()));

        buf.seek_byte(offset, false);
        buf.write_u64_be_next(&values).unwrap();
        prop_assert_eq!(buf.byte_offset(), offset + 8 * values.len() as i64);
        buf.seek_byte(offset, false);
        prop_assert_eq!(buf.read_u64_be_next(values.len()), Ok(values.clone()));
        prop_assert_eq!(buf.byte_offset(), offset + 8 * values.len() as i64);
    }

    #[test]
    fn endianness_only_reverses_bytes(value in any::<u32>()) {
        let mut buf = Buffer::from(vec![0u8; 4]);
        buf.write_u32_le(0, &[value]).unwrap();
        prop_assert_eq!(buf.read_u32_be(0, 1), Ok(vec![value.swap_bytes()]));
    }

    #[test]
    fn bit_field_round_trip((bytes, offset, n) in bit_field(), value in any::<u64>()) {
        let mut buf = Buffer::from(bytes);
        buf.set_bits(offset, value, n).unwrap();
        let expected = if n == 64 { value } else { value & ((1u64 << n) - 1) };
        prop_assert_eq!(buf.read_bits(offset, n), Ok(expected));
    }

    #[test]
    fn set_bits_leaves_neighbours_alone((bytes, offset, n) in bit_field(), value in any::<u64>()) {
        let mut buf = Buffer::from(bytes.clone());
        buf.set_bits(offset, value, n).unwrap();
        let original = Buffer::from(bytes);
        for bit in 0..buf.bit_capacity() {
            if bit < offset || bit >= offset + i64::from(n) {
                prop_assert_eq!(buf.read_bit(bit), original.read_bit(bit));
            }
        }
    }

    #[test]
    fn bit_field_matches_single_bits((bytes, offset, n) in bit_field()) {
        let mut buf = Buffer::from(bytes);
        let field = buf.read_bits(offset, n).unwrap();
        buf.seek_bit(offset, false);
        let mut assembled = 0u64;
        for _ in 0..n {
            assembled = (assembled << 1) | u64::from(buf.read_bit_next().unwrap());
        }
        prop_assert_eq!(field, assembled);
        prop_assert_eq!(buf.bit_offset(), offset + i64::from(n));
    }

    #[test]
    fn clear_all_bits_is_idempotent(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = Buffer::from(bytes.clone());
        buf.clear_all_bits();
        let once = buf.bytes().to_vec();
        buf.clear_all_bits();
        prop_assert_eq!(buf.bytes(), &once[..]);
        prop_assert!(once.iter().all(|&b| b == 0));
        prop_assert_eq!(once.len(), bytes.len());
    }

    #[test]
    fn flip_all_bits_twice_is_identity(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = Buffer::from(bytes.clone());
        buf.flip_all_bits();
        buf.flip_all_bits();
        prop_assert_eq!(buf.bytes(), &bytes[..]);
    }

    #[test]
    fn bounds_at_capacity(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut buf = Buffer::from(bytes);
        let bytes_cap = buf.byte_capacity();
        let bits_cap = buf.bit_capacity();

        prop_assert_eq!(buf.read_byte(bytes_cap), Err(BufferError::Overread));
        prop_assert_eq!(buf.read_byte(-1), Err(BufferError::Underread));
        prop_assert_eq!(buf.write_byte(bytes_cap, 0), Err(BufferError::Overwrite));
        prop_assert_eq!(buf.write_byte(-1, 0), Err(BufferError::Underwrite));
        prop_assert_eq!(buf.read_bit(bits_cap), Err(BufferError::Overread));
        prop_assert_eq!(buf.read_bit(-1), Err(BufferError::Underread));
        prop_assert_eq!(buf.flip_bit(bits_cap), Err(BufferError::Overwrite));
        prop_assert_eq!(buf.flip_bit(-1), Err(BufferError::Underwrite));
    }

    #[test]
    fn failed_writes_change_nothing(
        bytes in prop::collection::vec(any::<u8>(), 0..16),
        values in prop::collection::vec(any::<u32>(), 1..8),
    ) {
        let mut buf = Buffer::from(bytes.clone());
        let offset = buf.byte_capacity() - 3;
        prop_assert!(buf.write_u32_be(offset, &values).is_err());
        prop_assert_eq!(buf.bytes(), &bytes[..]);
    }

    #[test]
    fn extreme_cursors_fail_at_next_access(
        byte_seeks in prop::collection::vec((any::<i64>(), any::<bool>()), 1..4),
        bit_seeks in prop::collection::vec((any::<i64>(), any::<bool>()), 1..4),
        align in 0u8..3,
    ) {
        let mut buf = Buffer::from(vec![0u8; 4]);
        for (offset, relative) in byte_seeks {
            buf.seek_byte(offset, relative);
        }
        for (offset, relative) in bit_seeks {
            buf.seek_bit(offset, relative);
        }
        match align {
            0 => buf.align_bit(),
            1 => buf.align_byte(),
            _ => {}
        }
        let _ = buf.after_byte();
        let _ = buf.after_bit();

        let byte = buf.byte_offset();
        let read = buf.read_byte_next();
        if (0..4).contains(&byte) {
            prop_assert!(read.is_ok());
        } else if byte < 0 {
            prop_assert_eq!(read, Err(BufferError::Underread));
        } else {
            prop_assert_eq!(read, Err(BufferError::Overread));
        }

        let bit = buf.bit_offset();
        let read = buf.read_bit_next();
        if (0..32).contains(&bit) {
            prop_assert!(read.is_ok());
        } else if bit < 0 {
            prop_assert_eq!(read, Err(BufferError::Underread));
        } else {
            prop_assert_eq!(read, Err(BufferError::Overread));
        }
    }

    #[test]
    fn truncation_keeps_cursors_in_range(
        len in 0i64..32,
        cut in 0i64..32,
        byte_offset in 0i64..40,
        bit_offset in 0i64..300,
        left in any::<bool>(),
    ) {
        let mut buf = Buffer::from(vec![0u8; len as usize]);
        buf.seek_byte(byte_offset, false);
        buf.seek_bit(bit_offset, false);

        let result = if left { buf.truncate_left(cut) } else { buf.truncate_right(cut) };
        if cut > len {
            prop_assert_eq!(result, Err(BufferError::InvalidCount));
            prop_assert_eq!(buf.byte_capacity(), len);
        } else {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(buf.byte_capacity(), len - cut);
            prop_assert_eq!(buf.bit_capacity(), (len - cut) * 8);
            prop_assert_eq!(buf.byte_offset(), byte_offset.min(len - cut));
            prop_assert_eq!(buf.bit_offset(), bit_offset.min((len - cut) * 8));
        }
    }
}
