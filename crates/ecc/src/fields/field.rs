use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::NonZero;
use fieldtower_numeric::random;
use fieldtower_numeric::{U256, U256Ext, U512, U512Ext};

use super::field_params::FieldParams;
use super::tower::{DecodePolicy, TowerField};
use crate::error::{FieldError, FieldResult};

// ---------------------------------------------------------------------------
// Limb helpers
// ---------------------------------------------------------------------------

/// Multiply-accumulate: a + b*c + carry_in -> (result, carry_out).
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128) + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Add with carry: a + b + carry_in -> (result, carry_out).
#[inline(always)]
const fn addc(a: u64, b: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Subtract with borrow: a - b - (borrow_in >> 63) -> (result, borrow_out).
/// borrow_out is all-ones on underflow and zero otherwise.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow_in: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + (borrow_in >> 63) as u128);
    (res as u64, (res >> 64) as u64)
}

#[inline(always)]
fn add_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut out = [0u64; 4];
    let mut carry = 0u64;
    for i in 0..4 {
        let (v, c) = addc(a[i], b[i], carry);
        out[i] = v;
        carry = c;
    }
    (out, carry)
}

#[inline(always)]
fn sub_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut out = [0u64; 4];
    let mut borrow = 0u64;
    for i in 0..4 {
        let (v, next) = sbb(a[i], b[i], borrow);
        out[i] = v;
        borrow = next;
    }
    (out, borrow)
}

/// m - k for a small k, propagating the borrow.
const fn sub_small(m: [u64; 4], k: u64) -> [u64; 4] {
    let mut out = m;
    let mut borrow = k;
    let mut i = 0;
    while i < 4 && borrow != 0 {
        let (v, o) = out[i].overflowing_sub(borrow);
        out[i] = v;
        borrow = o as u64;
        i += 1;
    }
    out
}

const fn shr_one(m: [u64; 4]) -> [u64; 4] {
    [
        (m[0] >> 1) | (m[1] << 63),
        (m[1] >> 1) | (m[2] << 63),
        (m[2] >> 1) | (m[3] << 63),
        m[3] >> 1,
    ]
}

// ---------------------------------------------------------------------------
// Field<P> struct
// ---------------------------------------------------------------------------

/// A prime field element in Montgomery form, generic over parameters `P`.
///
/// Internally stores 4 x u64 limbs (little-endian). Every public operation
/// returns a fully reduced value in [0, p), so limb equality is field
/// equality and zero has exactly one representation.
#[repr(C, align(32))]
pub struct Field<P: FieldParams> {
    pub data: [u64; 4],
    _phantom: PhantomData<P>,
}

// Manual Clone/Copy because PhantomData<P> doesn't require P: Copy
impl<P: FieldParams> Clone for Field<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Field<P> {}

impl<P: FieldParams> std::fmt::Debug for Field<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field(0x{:016x}{:016x}{:016x}{:016x})",
            self.data[3], self.data[2], self.data[1], self.data[0]
        )
    }
}

// Derived constants computed from FieldParams
impl<P: FieldParams> Field<P> {
    const MODULUS: [u64; 4] = P::MODULUS;

    /// p - 2, the Fermat inversion exponent.
    const MODULUS_MINUS_TWO: [u64; 4] = sub_small(P::MODULUS, 2);

    /// (p - 1) / 2, the Euler criterion exponent.
    const HALF_ORDER: [u64; 4] = shr_one(sub_small(P::MODULUS, 1));

    /// Raw (non-Montgomery) limbs of the integer 1.
    const RAW_ONE: [u64; 4] = [1, 0, 0, 0];
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Zero element (additive identity). Not in Montgomery form since 0*R = 0.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_raw([0, 0, 0, 0])
    }

    /// One element (multiplicative identity), i.e. R mod p.
    #[inline]
    pub fn one() -> Self {
        Self::from_raw(Self::RAW_ONE).to_montgomery_form()
    }

    /// Construct from raw limbs already in Montgomery form.
    ///
    /// The limbs must encode a value below the modulus; nothing is reduced.
    #[inline]
    pub const fn from_raw(data: [u64; 4]) -> Self {
        Self {
            data,
            _phantom: PhantomData,
        }
    }

    /// Construct from a plain 256-bit integer, reducing it mod p and
    /// converting to Montgomery form.
    #[inline]
    pub fn from_limbs(data: [u64; 4]) -> Self {
        Self::from_raw(Self::montgomery_mul_limbs(&data, &P::R_SQUARED))
    }

    /// Reduce a 512-bit integer (lo || hi) modulo p, returning its Montgomery form.
    ///
    /// With `x = lo + hi * 2^256`, the Montgomery form is
    /// `lo * R + hi * R^2 (mod p)`, which takes three Montgomery products by R^2.
    pub fn reduce_wide(wide: &U512) -> Self {
        let lo = wide.lo().limbs();
        let hi = wide.hi().limbs();
        let lo_mont = Self::montgomery_mul_limbs(&lo, &P::R_SQUARED);
        let hi_mont = Self::montgomery_mul_limbs(&hi, &P::R_SQUARED);
        let hi_shifted = Self::montgomery_mul_limbs(&hi_mont, &P::R_SQUARED);
        Self::from_raw(lo_mont) + Self::from_raw(hi_shifted)
    }

    /// Generate a uniformly random field element.
    ///
    /// Reduces 512 random bits mod p, so the bias is negligible.
    pub fn random_element() -> Self {
        Self::reduce_wide(&random::get_random_u512())
    }
}

impl<P: FieldParams> From<u64> for Field<P> {
    #[inline]
    fn from(val: u64) -> Self {
        Self::from_limbs([val, 0, 0, 0])
    }
}

// ---------------------------------------------------------------------------
// Core arithmetic
// ---------------------------------------------------------------------------

impl<P: FieldParams> Field<P> {
    /// Subtract p once when `carry` is set or `limbs >= p`.
    ///
    /// Inputs are below 2p, with `carry` holding bit 256.
    #[inline(always)]
    fn final_subtract(limbs: [u64; 4], carry: u64) -> [u64; 4] {
        let (reduced, borrow) = sub_limbs(&limbs, &Self::MODULUS);
        let take_reduced = 0u64.wrapping_sub(carry) | !borrow;
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = (reduced[i] & take_reduced) | (limbs[i] & !take_reduced);
        }
        out
    }

    /// CIOS Montgomery product a * b * R^-1 mod p, fully reduced.
    ///
    /// `b` must be below p; `a` may be any 256-bit value, which is what lets
    /// `from_limbs` and `reduce_wide` feed unreduced integers through it.
    #[inline]
    fn montgomery_mul_limbs(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        let modulus = Self::MODULUS;
        let mut t = [0u64; 4];
        let mut t4 = 0u64;

        for &element in a {
            let mut carry = 0u64;
            for j in 0..4 {
                let (v, c) = mac(t[j], element, b[j], carry);
                t[j] = v;
                carry = c;
            }
            let (v, t5) = addc(t4, carry, 0);
            t4 = v;

            let k = t[0].wrapping_mul(P::R_INV);
            let (_, mut carry) = mac(t[0], k, modulus[0], 0);
            for j in 1..4 {
                let (v, c) = mac(t[j], k, modulus[j], carry);
                t[j - 1] = v;
                carry = c;
            }
            let (v, c) = addc(t4, carry, 0);
            t[3] = v;
            t4 = t5 + c;
        }

        Self::final_subtract(t, t4)
    }

    /// Double-width square: off-diagonal products computed once and doubled,
    /// then the diagonal added in.
    #[inline]
    fn square_wide(a: &[u64; 4]) -> [u64; 8] {
        let mut r = [0u64; 8];
        for i in 0..3 {
            let mut carry = 0u64;
            for j in (i + 1)..4 {
                let (v, c) = mac(r[i + j], a[i], a[j], carry);
                r[i + j] = v;
                carry = c;
            }
            r[i + 4] = carry;
        }

        r[7] = r[6] >> 63;
        for k in (1..7).rev() {
            r[k] = (r[k] << 1) | (r[k - 1] >> 63);
        }
        r[0] <<= 1;

        let mut carry = 0u64;
        for i in 0..4 {
            let (lo, c) = mac(r[2 * i], a[i], a[i], carry);
            r[2 * i] = lo;
            let (hi, c) = addc(r[2 * i + 1], c, 0);
            r[2 * i + 1] = hi;
            carry = c;
        }
        r
    }

    /// Montgomery reduction of a double-width value below p * R.
    #[inline]
    fn montgomery_reduce(mut r: [u64; 8]) -> [u64; 4] {
        let modulus = Self::MODULUS;
        let mut carry2 = 0u64;
        for i in 0..4 {
            let k = r[i].wrapping_mul(P::R_INV);
            let (_, mut carry) = mac(r[i], k, modulus[0], 0);
            for j in 1..4 {
                let (v, c) = mac(r[i + j], k, modulus[j], carry);
                r[i + j] = v;
                carry = c;
            }
            let (v, c) = addc(r[i + 4], carry, carry2);
            r[i + 4] = v;
            carry2 = c;
        }
        Self::final_subtract([r[4], r[5], r[6], r[7]], carry2)
    }

    /// Modular addition.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        let (sum, carry) = add_limbs(&self.data, &other.data);
        Self::from_raw(Self::final_subtract(sum, carry))
    }

    /// Modular subtraction: on underflow adds p back once.
    #[inline]
    pub fn subtract(&self, other: &Self) -> Self {
        let (diff, borrow) = sub_limbs(&self.data, &other.data);
        let mut out = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (v, c) = addc(diff[i], Self::MODULUS[i] & borrow, carry);
            out[i] = v;
            carry = c;
        }
        Self::from_raw(out)
    }

    #[inline]
    pub fn montgomery_mul(&self, other: &Self) -> Self {
        Self::from_raw(Self::montgomery_mul_limbs(&self.data, &other.data))
    }

    /// Montgomery squaring; identical to `self * self` with fewer limb products.
    #[inline]
    pub fn sqr(&self) -> Self {
        Self::from_raw(Self::montgomery_reduce(Self::square_wide(&self.data)))
    }

    /// Convert from standard form to Montgomery form: self * R^2 * R^-1.
    #[inline]
    pub fn to_montgomery_form(&self) -> Self {
        Self::from_raw(Self::montgomery_mul_limbs(&self.data, &P::R_SQUARED))
    }

    /// Convert from Montgomery form to standard form: self * 1 * R^-1.
    #[inline]
    pub fn from_montgomery_form(&self) -> Self {
        Self::from_raw(Self::montgomery_mul_limbs(&self.data, &Self::RAW_ONE))
    }

    /// Negate: returns -self mod p.
    #[inline]
    pub fn negate(&self) -> Self {
        Self::zero().subtract(self)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        (self.data[0] | self.data[1] | self.data[2] | self.data[3]) == 0
    }

    /// Modular inverse via Fermat's little theorem: self^(p-2) mod p.
    pub fn invert(&self) -> FieldResult<Self> {
        if self.is_zero() {
            tracing::trace!("refusing to invert zero in the prime field");
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.pow(&Self::MODULUS_MINUS_TWO))
    }

    /// Euler's criterion. Zero counts as a square.
    pub fn is_square(&self) -> bool {
        self.is_zero() || self.pow(&Self::HALF_ORDER) == Self::one()
    }

    /// Cubic residuosity: self^((p-1)/3) == 1. Zero counts as a cube.
    ///
    /// Only meaningful when 3 divides p - 1; otherwise every element is a cube
    /// and the question has no use in building an extension, so it is an error.
    pub fn is_cube(&self) -> FieldResult<bool> {
        let three = Option::<NonZero<U256>>::from(NonZero::new(U256::from_u64(3))).ok_or_else(|| {
            FieldError::InternalInvariantViolation("three must be a nonzero divisor".into())
        })?;
        let order = U256::from_limbs(P::MODULUS).wrapping_sub(&U256::ONE);
        let (exponent, remainder) = order.div_rem(&three);
        if remainder != U256::ZERO {
            return Err(FieldError::InternalInvariantViolation(
                "cubic residuosity requires p = 1 (mod 3)".into(),
            ));
        }
        Ok(self.is_zero() || self.pow(&exponent.limbs()) == Self::one())
    }

    /// Check the Montgomery constants against the modulus.
    pub fn validate_params() -> FieldResult<()> {
        let violation = |msg: &str| {
            tracing::error!(modulus = ?P::MODULUS, "{msg}");
            Err(FieldError::InternalInvariantViolation(msg.into()))
        };
        if P::MODULUS[0] & 1 == 0 {
            return violation("modulus must be odd");
        }
        if P::MODULUS[0].wrapping_mul(P::R_INV) != u64::MAX {
            return violation("R_INV is not -(p^-1) mod 2^64");
        }

        let modulus_wide = U512::from_lo_hi(U256::from_limbs(P::MODULUS), U256::ZERO);
        let Some(modulus_nz) = Option::<NonZero<U512>>::from(NonZero::new(modulus_wide)) else {
            return violation("modulus must be nonzero");
        };
        let r = U512::from_lo_hi(U256::ZERO, U256::ONE);
        let (_, r_mod_p) = r.div_rem(&modulus_nz);
        let r_mod_p = r_mod_p.lo();
        let r_mod_p_squared: U512 = r_mod_p.widening_mul(&r_mod_p);
        let (_, r_squared) = r_mod_p_squared.div_rem(&modulus_nz);
        if r_squared.lo().limbs() != P::R_SQUARED {
            return violation("R_SQUARED is not 2^512 mod p");
        }
        if Self::one().data != r_mod_p.limbs() {
            return violation("Montgomery one does not equal 2^256 mod p");
        }
        Ok(())
    }

    fn write_be_bytes(&self, out: &mut Vec<u8>) {
        let plain = self.from_montgomery_form();
        U256::from_limbs(plain.data).write_be_trimmed(P::ENCODED_LEN, out);
    }

    fn read_be_bytes(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self> {
        let value = U256::from_be_padded(bytes).ok_or(FieldError::InvalidLength {
            expected: P::ENCODED_LEN,
            actual: bytes.len(),
        })?;
        if value >= U256::from_limbs(P::MODULUS) && policy == DecodePolicy::Strict {
            return Err(FieldError::MalformedEncoding(
                "prime field component is not below the modulus".into(),
            ));
        }
        Ok(Self::from_limbs(value.limbs()))
    }
}

impl<P: FieldParams> TowerField for Field<P> {
    type BaseParams = P;
    const DEGREE: usize = 1;

    #[inline]
    fn zero() -> Self {
        Field::zero()
    }

    #[inline]
    fn one() -> Self {
        Field::one()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Field::is_zero(self)
    }

    #[inline]
    fn sqr(&self) -> Self {
        Field::sqr(self)
    }

    fn invert(&self) -> FieldResult<Self> {
        Field::invert(self)
    }

    fn random_element() -> Self {
        Field::random_element()
    }

    #[inline]
    fn to_montgomery_form(&self) -> Self {
        Field::to_montgomery_form(self)
    }

    #[inline]
    fn from_montgomery_form(&self) -> Self {
        Field::from_montgomery_form(self)
    }

    #[inline]
    fn norm(&self) -> Field<P> {
        *self
    }

    fn validate_params() -> FieldResult<()> {
        Field::<P>::validate_params()
    }

    fn write_be_bytes(&self, out: &mut Vec<u8>) {
        Field::write_be_bytes(self, out)
    }

    fn read_be_bytes(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self> {
        Field::read_be_bytes(bytes, policy)
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: FieldParams> Add for Field<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Field::add(&self, &rhs)
    }
}

impl<P: FieldParams> AddAssign for Field<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Field::add(self, &rhs);
    }
}

impl<P: FieldParams> Sub for Field<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Field::subtract(&self, &rhs)
    }
}

impl<P: FieldParams> SubAssign for Field<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Field::subtract(self, &rhs);
    }
}

impl<P: FieldParams> Mul for Field<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Field::montgomery_mul(&self, &rhs)
    }
}

impl<P: FieldParams> MulAssign for Field<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = Field::montgomery_mul(self, &rhs);
    }
}

impl<P: FieldParams> Neg for Field<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Field::negate(&self)
    }
}

impl<P: FieldParams> PartialEq for Field<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<P: FieldParams> Eq for Field<P> {}
