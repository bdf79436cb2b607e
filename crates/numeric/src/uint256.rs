// 256-bit unsigned integer type.
//
// Wraps `crypto_bigint::U256` with the limb and byte-buffer helpers the
// field layer needs at its serialization boundary. Limbs are little-endian
// (index 0 is least significant), the same layout crypto-bigint uses.

use crypto_bigint::{Encoding, Uint};

/// 256-bit unsigned integer, backed by `crypto_bigint::U256`.
pub type U256 = Uint<4>;

/// Width of a `U256` in bytes.
pub const U256_BYTES: usize = 32;

pub trait U256Ext: Sized {
    /// Construct from 4 x u64 limbs in little-endian limb order.
    fn from_limbs(limbs: [u64; 4]) -> Self;

    /// Access the raw u64 limbs in little-endian limb order.
    fn limbs(&self) -> [u64; 4];

    /// Parse a big-endian buffer of at most 32 bytes, left-padding with zeros.
    ///
    /// Returns `None` when the buffer is longer than 32 bytes.
    fn from_be_padded(bytes: &[u8]) -> Option<Self>;

    /// Write the low `width` bytes of the big-endian encoding into `out`.
    ///
    /// Any nonzero byte above `width` is silently dropped, so callers must
    /// only use this for values known to fit.
    fn write_be_trimmed(&self, width: usize, out: &mut Vec<u8>);
}

impl U256Ext for U256 {
    fn from_limbs(limbs: [u64; 4]) -> Self {
        U256::from_words(limbs)
    }

    fn limbs(&self) -> [u64; 4] {
        *self.as_words()
    }

    fn from_be_padded(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > U256_BYTES {
            return None;
        }
        let mut buf = [0u8; U256_BYTES];
        buf[U256_BYTES - bytes.len()..].copy_from_slice(bytes);
        Some(U256::from_be_bytes(buf))
    }

    fn write_be_trimmed(&self, width: usize, out: &mut Vec<u8>) {
        let width = width.min(U256_BYTES);
        let bytes = self.to_be_bytes();
        out.extend_from_slice(&bytes[U256_BYTES - width..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_limbs_roundtrip() {
        let limbs = [0x1111_2222_3333_4444u64, 0x5555_6666_7777_8888, 0x9999_aaaa_bbbb_cccc, 0xdddd_eeee_ffff_0000];
        let val = U256::from_limbs(limbs);
        assert_eq!(val.limbs(), limbs);
    }

    #[test]
    fn from_be_padded_short_buffer() {
        let val = U256::from_be_padded(&[0x01, 0x02]).unwrap();
        assert_eq!(val.limbs(), [0x0102, 0, 0, 0]);
    }

    #[test]
    fn from_be_padded_full_buffer() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        bytes[31] = 0x01;
        let val = U256::from_be_padded(&bytes).unwrap();
        assert_eq!(val.limbs(), [1, 0, 0, 0x8000_0000_0000_0000]);
    }

    #[test]
    fn from_be_padded_rejects_long_buffer() {
        assert!(U256::from_be_padded(&[0u8; 33]).is_none());
    }

    #[test]
    fn write_be_trimmed_keeps_low_bytes() {
        let val = U256::from_limbs([0xAABB, 0, 0, 0]);
        let mut out = Vec::new();
        val.write_be_trimmed(3, &mut out);
        assert_eq!(out, vec![0x00, 0xAA, 0xBB]);

        out.clear();
        val.write_be_trimmed(32, &mut out);
        assert_eq!(out.len(), 32);
        assert_eq!(U256::from_be_padded(&out).unwrap(), val);
    }

    #[test]
    fn div_rem_basic() {
        let a = U256::from_limbs([100, 0, 0, 0]);
        let b = U256::from_limbs([7, 0, 0, 0]);
        let (q, r) = a.div_rem(&b.to_nz().unwrap());
        assert_eq!(q, U256::from_limbs([14, 0, 0, 0]));
        assert_eq!(r, U256::from_limbs([2, 0, 0, 0]));
    }
}
