// Quadratic extension F[u] / (u^2 - nr) over any tower field F.
//
// Elements are pairs (c0, c1) representing c0 + c1*u. For BN254 Fq2 the
// base is Fq and nr = -1; the same type with an Fq6 base and nr = v gives
// Fq12.

use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field_params::FieldParams;
use super::tower::{check_length, DecodePolicy, TowerField};
use crate::error::{FieldError, FieldResult};

pub trait QuadraticParams: 'static + Send + Sync + Sized {
    type Base: TowerField;

    /// u^2. Must have no square root in `Base`.
    fn non_residue() -> Self::Base;

    /// Multiply a base element by the non-residue.
    ///
    /// Override when the non-residue admits something cheaper than a full
    /// multiplication (negation for -1, a coefficient shift for v).
    #[inline]
    fn mul_by_non_residue(a: &Self::Base) -> Self::Base {
        Self::non_residue() * *a
    }
}

pub struct QuadraticExtension<P: QuadraticParams> {
    pub c0: P::Base,
    pub c1: P::Base,
    _phantom: PhantomData<P>,
}

impl<P: QuadraticParams> Clone for QuadraticExtension<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: QuadraticParams> Copy for QuadraticExtension<P> {}

impl<P: QuadraticParams> std::fmt::Debug for QuadraticExtension<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QuadraticExtension({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: QuadraticParams> QuadraticExtension<P> {
    #[inline]
    pub fn new(c0: P::Base, c1: P::Base) -> Self {
        Self {
            c0,
            c1,
            _phantom: PhantomData,
        }
    }

    /// Multiply each component by a base field element.
    #[inline]
    pub fn mul_by_base(&self, a: P::Base) -> Self {
        Self::new(a * self.c0, a * self.c1)
    }

    /// The non-trivial automorphism over the base: c0 - c1*u.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// a0^2 - nr*a1^2, the norm one level down.
    #[inline]
    fn relative_norm(&self) -> P::Base {
        self.c0.sqr() - P::mul_by_non_residue(&self.c1.sqr())
    }
}

impl<P, F> QuadraticExtension<P>
where
    P: QuadraticParams<Base = Field<F>>,
    F: FieldParams,
{
    /// p-power Frobenius. Over a prime base, u^p = -u, so this is conjugation.
    #[inline]
    pub fn frobenius_map(&self) -> Self {
        self.conjugate()
    }
}

impl<P: QuadraticParams> TowerField for QuadraticExtension<P> {
    type BaseParams = <P::Base as TowerField>::BaseParams;
    const DEGREE: usize = 2 * <P::Base as TowerField>::DEGREE;

    #[inline]
    fn zero() -> Self {
        Self::new(P::Base::zero(), P::Base::zero())
    }

    #[inline]
    fn one() -> Self {
        Self::new(P::Base::one(), P::Base::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// Complex squaring, two base multiplications:
    /// c0 = (a0 + a1)(a0 + nr*a1) - a0a1 - nr*a0a1, c1 = 2*a0a1.
    #[inline]
    fn sqr(&self) -> Self {
        let v = self.c0 * self.c1;
        let t = (self.c0 + self.c1) * (self.c0 + P::mul_by_non_residue(&self.c1));
        Self::new(t - v - P::mul_by_non_residue(&v), v + v)
    }

    /// 1/(a0 + a1*u) = (a0 - a1*u) / (a0^2 - nr*a1^2).
    ///
    /// The norm is zero only for the zero element since nr is a non-square.
    fn invert(&self) -> FieldResult<Self> {
        let inv_norm = self.relative_norm().invert()?;
        Ok(Self::new(self.c0 * inv_norm, -(self.c1 * inv_norm)))
    }

    fn random_element() -> Self {
        Self::new(P::Base::random_element(), P::Base::random_element())
    }

    #[inline]
    fn to_montgomery_form(&self) -> Self {
        Self::new(self.c0.to_montgomery_form(), self.c1.to_montgomery_form())
    }

    #[inline]
    fn from_montgomery_form(&self) -> Self {
        Self::new(self.c0.from_montgomery_form(), self.c1.from_montgomery_form())
    }

    fn norm(&self) -> Field<Self::BaseParams> {
        self.relative_norm().norm()
    }

    fn validate_params() -> FieldResult<()> {
        P::Base::validate_params()?;
        let nr = P::non_residue();
        if nr.is_zero() || nr.norm().is_square() {
            tracing::error!(non_residue = ?nr, "quadratic non-residue has a square root");
            return Err(FieldError::InternalInvariantViolation(
                "quadratic non-residue is a square in the base field".into(),
            ));
        }
        if P::mul_by_non_residue(&P::Base::one()) != nr {
            tracing::error!(non_residue = ?nr, "mul_by_non_residue disagrees with non_residue");
            return Err(FieldError::InternalInvariantViolation(
                "mul_by_non_residue does not multiply by the non-residue".into(),
            ));
        }
        Ok(())
    }

    fn write_be_bytes(&self, out: &mut Vec<u8>) {
        self.c0.write_be_bytes(out);
        self.c1.write_be_bytes(out);
    }

    fn read_be_bytes(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self> {
        check_length(bytes, Self::ENCODED_LEN)?;
        let (lo, hi) = bytes.split_at(P::Base::ENCODED_LEN);
        Ok(Self::new(
            P::Base::read_be_bytes(lo, policy)?,
            P::Base::read_be_bytes(hi, policy)?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: QuadraticParams> Add for QuadraticExtension<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: QuadraticParams> AddAssign for QuadraticExtension<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: QuadraticParams> Sub for QuadraticExtension<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: QuadraticParams> SubAssign for QuadraticExtension<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: QuadraticParams> Mul for QuadraticExtension<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba: (a0 + a1*u)(b0 + b1*u)
        // = (a0*b0 + nr*a1*b1) + ((a0+a1)*(b0+b1) - a0*b0 - a1*b1)*u
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let s = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        Self::new(t0 + P::mul_by_non_residue(&t1), s - t0 - t1)
    }
}

impl<P: QuadraticParams> MulAssign for QuadraticExtension<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: QuadraticParams> Neg for QuadraticExtension<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: QuadraticParams> PartialEq for QuadraticExtension<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: QuadraticParams> Eq for QuadraticExtension<P> {}
