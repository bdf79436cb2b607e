// Double-width unsigned integer (512-bit).
//
// A 512-bit value is what `Field::reduce_wide` folds back into the field:
// random sampling draws one, and external callers hand over concatenation
// buffers of this width.

use crypto_bigint::Uint;

use crate::U256;

/// 512-bit unsigned integer.
pub type U512 = Uint<8>;

/// `.lo` / `.hi` access to the two 256-bit halves.
pub trait U512Ext {
    /// Extract the low 256 bits.
    fn lo(&self) -> U256;

    /// Extract the high 256 bits.
    fn hi(&self) -> U256;

    /// Construct from a (lo, hi) pair.
    fn from_lo_hi(lo: U256, hi: U256) -> Self;
}

impl U512Ext for U512 {
    fn lo(&self) -> U256 {
        let (lo, _hi) = self.split();
        lo
    }

    fn hi(&self) -> U256 {
        let (_lo, hi) = self.split();
        hi
    }

    fn from_lo_hi(lo: U256, hi: U256) -> Self {
        lo.concat(&hi)
    }
}
