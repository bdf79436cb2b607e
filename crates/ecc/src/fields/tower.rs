// The capability set shared by every layer of the tower.
//
// Extensions are generic over an inner field implementing `TowerField`, so
// a further layer (the degree-2 extension over the cubic used by pairings)
// reuses the quadratic machinery as-is.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field_params::FieldParams;
use crate::error::{FieldError, FieldResult};

/// How decoding treats a component whose integer value is `>= p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Reject with `FieldError::MalformedEncoding`.
    #[default]
    Strict,
    /// Reduce the value modulo p.
    Reduce,
}

pub(crate) fn check_length(bytes: &[u8], expected: usize) -> FieldResult<()> {
    if bytes.len() != expected {
        return Err(FieldError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

pub trait TowerField:
    Copy
    + Debug
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    /// Parameters of the prime field at the bottom of the tower.
    type BaseParams: FieldParams;

    /// Degree over the prime field.
    const DEGREE: usize;

    /// Serialized width in bytes: one prime-field encoding per coefficient.
    const ENCODED_LEN: usize = Self::DEGREE * <Self::BaseParams as FieldParams>::ENCODED_LEN;

    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn sqr(&self) -> Self;

    /// Multiplicative inverse. Fails with `DivisionByZero` exactly when `self` is zero.
    fn invert(&self) -> FieldResult<Self>;

    fn random_element() -> Self;
    fn to_montgomery_form(&self) -> Self;
    fn from_montgomery_form(&self) -> Self;

    /// Norm down to the prime field (product of all conjugates).
    fn norm(&self) -> Field<Self::BaseParams>;

    /// Check this layer's constants, including every layer below it.
    fn validate_params() -> FieldResult<()>;

    /// Append the big-endian encoding of every prime-field coefficient, lowest first.
    fn write_be_bytes(&self, out: &mut Vec<u8>);

    /// Decode from exactly `ENCODED_LEN` bytes.
    fn read_be_bytes(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self>;

    fn to_buffer(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        self.write_be_bytes(&mut out);
        out
    }

    fn from_buffer(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self> {
        check_length(bytes, Self::ENCODED_LEN)?;
        Self::read_be_bytes(bytes, policy)
    }

    /// Square-and-multiply over little-endian exponent limbs.
    ///
    /// Runs in time bounded by `64 * exponent.len()` squarings.
    fn pow(&self, exponent: &[u64]) -> Self {
        let mut accumulator = Self::one();
        let mut started = false;
        for limb in exponent.iter().rev() {
            for bit in (0..64).rev() {
                if started {
                    accumulator = accumulator.sqr();
                }
                if (limb >> bit) & 1 == 1 {
                    accumulator *= *self;
                    started = true;
                }
            }
        }
        accumulator
    }
}
