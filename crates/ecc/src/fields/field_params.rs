/// Trait defining the parameters for a prime field in Montgomery form.
///
/// All constants use 4 x u64 limbs in little-endian order.
/// Montgomery form: elements are stored as `a * R mod p` where `R = 2^256`.
/// `Field::validate_params` checks these constants against each other.
pub trait FieldParams: 'static + Send + Sync + Sized {
    /// The prime modulus p, split into 4 little-endian 64-bit limbs.
    const MODULUS: [u64; 4];

    /// R^2 mod p, used to convert into Montgomery form.
    const R_SQUARED: [u64; 4];

    /// -(p^{-1}) mod 2^64, used in Montgomery reduction.
    const R_INV: u64;

    /// Bit length of the modulus.
    const MODULUS_BITS: u32 = {
        let m = Self::MODULUS;
        let mut i = 3;
        while i > 0 && m[i] == 0 {
            i -= 1;
        }
        (i as u32) * 64 + (64 - m[i].leading_zeros())
    };

    /// Width of one serialized element: ceil(bits(p) / 8).
    const ENCODED_LEN: usize = (Self::MODULUS_BITS as usize + 7) / 8;
}
