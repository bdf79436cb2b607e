// Cubic extension over a quadratic extension: Q[v] / (v^3 - xi)
//
// Elements are triples (c0, c1, c2) representing c0 + c1*v + c2*v^2.
// Every multiplication by v^3 goes through `CubicParams::mul_by_non_residue`.

use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field2::{QuadraticExtension, QuadraticParams};
use super::field_params::FieldParams;
use super::tower::{check_length, DecodePolicy, TowerField};
use crate::error::{FieldError, FieldResult};

type Quad<P> = QuadraticExtension<<P as CubicParams>::Quadratic>;

pub trait CubicParams: 'static + Send + Sync + Sized {
    type Quadratic: QuadraticParams;

    /// v^3. Must have no cube root in the quadratic layer.
    fn non_residue() -> QuadraticExtension<Self::Quadratic>;

    #[inline]
    fn mul_by_non_residue(
        a: &QuadraticExtension<Self::Quadratic>,
    ) -> QuadraticExtension<Self::Quadratic> {
        Self::non_residue() * *a
    }
}

/// Constants for the p^k-power Frobenius maps, k = 1, 2, 3.
///
/// `c1_k = xi^((p^k - 1) / 3)` and `c2_k = xi^(2 (p^k - 1) / 3)`.
pub trait CubicFrobeniusParams: CubicParams {
    fn frobenius_coeffs_c1_1() -> QuadraticExtension<Self::Quadratic>;
    fn frobenius_coeffs_c1_2() -> QuadraticExtension<Self::Quadratic>;
    fn frobenius_coeffs_c1_3() -> QuadraticExtension<Self::Quadratic>;
    fn frobenius_coeffs_c2_1() -> QuadraticExtension<Self::Quadratic>;
    fn frobenius_coeffs_c2_2() -> QuadraticExtension<Self::Quadratic>;
    fn frobenius_coeffs_c2_3() -> QuadraticExtension<Self::Quadratic>;
}

pub struct CubicExtension<P: CubicParams> {
    pub c0: Quad<P>,
    pub c1: Quad<P>,
    pub c2: Quad<P>,
    _phantom: PhantomData<P>,
}

impl<P: CubicParams> Clone for CubicExtension<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: CubicParams> Copy for CubicExtension<P> {}

impl<P: CubicParams> std::fmt::Debug for CubicExtension<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CubicExtension({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<P: CubicParams> CubicExtension<P> {
    #[inline]
    pub fn new(c0: Quad<P>, c1: Quad<P>, c2: Quad<P>) -> Self {
        Self {
            c0,
            c1,
            c2,
            _phantom: PhantomData,
        }
    }

    /// Multiply each component by a quadratic-layer scalar.
    #[inline]
    pub fn mul_by_quadratic(&self, other: &Quad<P>) -> Self {
        Self::new(*other * self.c0, *other * self.c1, *other * self.c2)
    }

    /// Adjugate of the multiplication-by-self matrix, and its determinant.
    ///
    /// `(c0 + c1 v + c2 v^2) * (A + B v + C v^2) = det`.
    fn adjugate(&self) -> (Quad<P>, Quad<P>, Quad<P>, Quad<P>) {
        let cap_a = self.c0.sqr() - P::mul_by_non_residue(&(self.c1 * self.c2));
        let cap_b = P::mul_by_non_residue(&self.c2.sqr()) - self.c0 * self.c1;
        let cap_c = self.c1.sqr() - self.c0 * self.c2;
        let det = self.c0 * cap_a + P::mul_by_non_residue(&(self.c2 * cap_b + self.c1 * cap_c));
        (cap_a, cap_b, cap_c, det)
    }
}

impl<P, F> CubicExtension<P>
where
    P: CubicFrobeniusParams,
    P::Quadratic: QuadraticParams<Base = Field<F>>,
    F: FieldParams,
{
    pub fn frobenius_map_one(&self) -> Self {
        Self::new(
            self.c0.frobenius_map(),
            P::frobenius_coeffs_c1_1() * self.c1.frobenius_map(),
            P::frobenius_coeffs_c2_1() * self.c2.frobenius_map(),
        )
    }

    pub fn frobenius_map_two(&self) -> Self {
        Self::new(
            self.c0,
            P::frobenius_coeffs_c1_2() * self.c1,
            P::frobenius_coeffs_c2_2() * self.c2,
        )
    }

    pub fn frobenius_map_three(&self) -> Self {
        Self::new(
            self.c0.frobenius_map(),
            P::frobenius_coeffs_c1_3() * self.c1.frobenius_map(),
            P::frobenius_coeffs_c2_3() * self.c2.frobenius_map(),
        )
    }
}

impl<P: CubicParams> TowerField for CubicExtension<P> {
    type BaseParams = <Quad<P> as TowerField>::BaseParams;
    const DEGREE: usize = 3 * <Quad<P> as TowerField>::DEGREE;

    #[inline]
    fn zero() -> Self {
        Self::new(Quad::<P>::zero(), Quad::<P>::zero(), Quad::<P>::zero())
    }

    #[inline]
    fn one() -> Self {
        Self::new(Quad::<P>::one(), Quad::<P>::zero(), Quad::<P>::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    /// Squaring via CH-SQR2 (Devegili et al.).
    fn sqr(&self) -> Self {
        let s0 = self.c0.sqr();
        let s1 = {
            let t = self.c0 * self.c1;
            t + t
        };
        let s2 = (self.c0 + self.c2 - self.c1).sqr();
        let s3 = {
            let t = self.c1 * self.c2;
            t + t
        };
        let s4 = self.c2.sqr();
        Self::new(
            P::mul_by_non_residue(&s3) + s0,
            P::mul_by_non_residue(&s4) + s1,
            s1 + s2 + s3 - s0 - s4,
        )
    }

    /// Inversion via Algorithm 17 from "High-Speed Software Implementation of
    /// the Optimal Ate Pairing over Barreto-Naehrig Curves".
    fn invert(&self) -> FieldResult<Self> {
        let (cap_a, cap_b, cap_c, det) = self.adjugate();
        let det_inv = det.invert()?;
        Ok(Self::new(cap_a * det_inv, cap_b * det_inv, cap_c * det_inv))
    }

    fn random_element() -> Self {
        Self::new(
            Quad::<P>::random_element(),
            Quad::<P>::random_element(),
            Quad::<P>::random_element(),
        )
    }

    #[inline]
    fn to_montgomery_form(&self) -> Self {
        Self::new(
            self.c0.to_montgomery_form(),
            self.c1.to_montgomery_form(),
            self.c2.to_montgomery_form(),
        )
    }

    #[inline]
    fn from_montgomery_form(&self) -> Self {
        Self::new(
            self.c0.from_montgomery_form(),
            self.c1.from_montgomery_form(),
            self.c2.from_montgomery_form(),
        )
    }

    /// The determinant is the norm down to the quadratic layer.
    fn norm(&self) -> Field<Self::BaseParams> {
        self.adjugate().3.norm()
    }

    fn validate_params() -> FieldResult<()> {
        Quad::<P>::validate_params()?;
        let nr = P::non_residue();
        // Over finite fields with 3 | p - 1, x is a cube iff its norm is.
        if nr.is_zero() || nr.norm().is_cube()? {
            tracing::error!(non_residue = ?nr, "cubic non-residue has a cube root");
            return Err(FieldError::InternalInvariantViolation(
                "cubic non-residue is a cube in the quadratic layer".into(),
            ));
        }
        if P::mul_by_non_residue(&Quad::<P>::one()) != nr {
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
        self.c2.write_be_bytes(out);
    }

    fn read_be_bytes(bytes: &[u8], policy: DecodePolicy) -> FieldResult<Self> {
        check_length(bytes, Self::ENCODED_LEN)?;
        let width = Quad::<P>::ENCODED_LEN;
        Ok(Self::new(
            Quad::<P>::read_be_bytes(&bytes[..width], policy)?,
            Quad::<P>::read_be_bytes(&bytes[width..2 * width], policy)?,
            Quad::<P>::read_be_bytes(&bytes[2 * width..], policy)?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: CubicParams> Add for CubicExtension<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl<P: CubicParams> AddAssign for CubicExtension<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: CubicParams> Sub for CubicExtension<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl<P: CubicParams> SubAssign for CubicExtension<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: CubicParams> Mul for CubicExtension<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba (Devegili et al., Section 4)
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c2 * rhs.c2;

        let s01 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        let s12 = (self.c1 + self.c2) * (rhs.c1 + rhs.c2);
        let s02 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2);

        Self::new(
            t0 + P::mul_by_non_residue(&(s12 - t1 - t2)),
            s01 - t0 - t1 + P::mul_by_non_residue(&t2),
            s02 - t0 + t1 - t2,
        )
    }
}

impl<P: CubicParams> MulAssign for CubicExtension<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: CubicParams> Neg for CubicExtension<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<P: CubicParams> PartialEq for CubicExtension<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<P: CubicParams> Eq for CubicExtension<P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::bn254::{Bn254Fq2Params, Bn254FqParams, Fq, Fq2, Fq6};

    fn fq6(limbs: [[u64; 4]; 6]) -> Fq6 {
        let fq2 = |a: [u64; 4], b: [u64; 4]| Fq2::new(Fq::from_raw(a), Fq::from_raw(b));
        Fq6::new(
            fq2(limbs[0], limbs[1]),
            fq2(limbs[2], limbs[3]),
            fq2(limbs[4], limbs[5]),
        )
    }

    fn raw(n: u64) -> Fq6 {
        let mut out = Fq6::zero();
        out.c0.c0.data[0] = n;
        out
    }

    /// p^k as little-endian limbs.
    fn modulus_power(k: u32) -> Vec<u64> {
        let mut acc = vec![1u64];
        for _ in 0..k {
            let mut next = vec![0u64; acc.len() + 4];
            for (i, &a) in acc.iter().enumerate() {
                let mut carry = 0u128;
                for (j, &m) in Bn254FqParams::MODULUS.iter().enumerate() {
                    let t = next[i + j] as u128 + (a as u128) * (m as u128) + carry;
                    next[i + j] = t as u64;
                    carry = t >> 64;
                }
                next[i + 4] = carry as u64;
            }
            acc = next;
        }
        acc
    }

    #[test]
    fn fq6_eq() {
        let base = [[1, 2, 3, 4], [6, 7, 8, 9], [1, 2, 3, 4], [6, 7, 8, 9], [1, 2, 3, 4], [6, 7, 8, 9]];
        let a = fq6(base);
        assert_eq!(a, fq6(base));
        for component in 0..6 {
            for limb in 0..4 {
                let mut perturbed = base;
                perturbed[component][limb] += 1;
                assert_ne!(a, fq6(perturbed), "component {component} limb {limb}");
            }
        }
    }

    #[test]
    fn fq6_is_zero() {
        assert!(Fq6::zero().is_zero());
        let mut b = Fq6::zero();
        b.c0.c0.data[0] = 1;
        let mut c = Fq6::zero();
        c.c1.c0.data[0] = 1;
        let mut d = Fq6::zero();
        d.c2.c0.data[0] = 1;
        let mut e = Fq6::zero();
        e.c2.c1.data[3] = 1;
        for x in [b, c, d, e] {
            assert!(!x.is_zero());
        }
    }

    #[test]
    fn fq6_random_element() {
        let a = Fq6::random_element();
        let b = Fq6::random_element();
        assert_ne!(a, b, "two random Fq6 elements should differ");
        assert!(!a.is_zero());
        assert!(!b.is_zero());
    }

    #[test]
    fn fq6_add_check_against_constants() {
        let a = fq6([
            [0x68138b3c3e5e820b, 0x9bf71d36786da85f, 0x815831c12e257996, 0x2280b875a27e6d1d],
            [0xff4b05a0ed0df393, 0x94fbe538fe78c1e7, 0xea26586b05301ac2, 0xc90d9fbd6f0360a],
            [0x52c807d7b79f5d98, 0xb81d0afcd80e2015, 0xfaf3309048d58378, 0x2b214cef3a9c4595],
            [0xffb4f038e11aba58, 0x3090e3e2be73918, 0xb5e3ff91aea9ea10, 0x259c4ada803d9709],
            [0x558fd8ed6c427bbb, 0xa96c066b688d01be, 0xf9f575fe06c46881, 0x1e7fa15a71e843c9],
            [0xa24a278e3b53d755, 0xd6038431b043e405, 0xe0591d1304349843, 0x2d54f10885a3553],
        ]);
        let b = fq6([
            [0x77c31be6f025aa97, 0x1b5e9b0f80b0bd4, 0xdcd589b606f17780, 0x1b96f57a8bae9f62],
            [0x9d1544f116a22cea, 0x2fbff58e7d1148d7, 0xd3bdeba899719e45, 0x2c0f12a9af45c0df],
            [0xc29dbca781a36282, 0xfa3111cc49f4189e, 0x239461afa706e127, 0x26b933107ae211b6],
            [0x2eaeb7bf42b03771, 0x5e33621ea59ed72d, 0xf29b1b9d29c2b509, 0x21a3f6e4192b48f5],
            [0x37d865d5cf9054e4, 0x120abe21b24abd40, 0x22ae39101351e0e, 0x3d256f12acefd0e],
            [0x2ae9dbb8fe966761, 0x3a10cc50c534e2f9, 0xdf0883c7482be190, 0x2fd2b4f6573d9828],
        ]);
        let expected = fq6([
            [0xa3b61b0c56072f5b, 0x62b9c560806e9a6, 0xa5dd75c0b39598b9, 0xdb35f7d4cfb6c56],
            [0x603fbe7b2b332336, 0x2d3a703613184032, 0x593fe5d1d2060aa, 0x83b9e32a50456c1],
            [0xd945386860c5c2d3, 0x1accb237b9906e26, 0x66374c896e5b0c43, 0x2176318cd44cb722],
            [0xf2431be14b4df482, 0xc9bb05cb691445b8, 0xf02ed57856eb46bb, 0x16dbf34bb8373fd5],
            [0x8d683ec33bd2d09f, 0xbb76c48d1ad7befe, 0xfc20598f07f9868f, 0x2251f84b9cb740d7],
            [0x91137730616d416f, 0x7892e5f10d06fc71, 0x7115b23cadf2176, 0x243b593fe662d53],
        ]);
        assert_eq!(a + b, expected);
    }

    #[test]
    fn fq6_sub_check_against_constants() {
        let a = fq6([
            [0xa1167f5753441035, 0xc7712ba686dd96d, 0x1da0e185b8aa61a3, 0xc875cfdb65ae0b0],
            [0x69f9322c2f24bd33, 0x322a253d10e59171, 0xa661cfb9aaa595e8, 0x250efd5132c6f2be],
            [0xe6fdc4742cbd9e3e, 0x5b0b304af8cdc721, 0x10a0156bb0bc7290, 0x256c970c31d4972d],
            [0xb429fe8e4c500bd2, 0x191028f54b1d65f1, 0xe930ce25b92fbc40, 0x1203a8e8132f7703],
            [0x383cf556e7a8a1a1, 0x97aaa453a478cbf2, 0x5d51590dd12ab32c, 0x1cab1676bbef3e10],
            [0xee35e8a619840798, 0x39ec8a0397d6273f, 0x5b28d68b9ce7c868, 0x296cc5743d512a0d],
        ]);
        let b = fq6([
            [0xda9d8930b9dbf521, 0xd0a38aaebc0e6255, 0xf849d807bb1c9d6d, 0x258ee7adb2034340],
            [0x67aabbf80885bd34, 0x4325cf38941244f0, 0xbd676021456927a9, 0xd5fd49a012953d8],
            [0xcf926e1ad2750891, 0x679470254ff702d4, 0x83fca49364e86848, 0xab3582e8e3e3c76],
            [0x5ffdc7f985ec6125, 0xd4e33612dc9b87cc, 0x779b43b3c26ed9e3, 0x472e0d2bc245c48],
            [0xb6a89730a6d59b36, 0xc1bf9260d155a94d, 0xc0db3b4a4d46dc11, 0x10d396b15aca55ae],
            [0xfa34e14bae100b8a, 0x3f51a8e757d8a520, 0x693add3f9871ef91, 0x23dfee5479c36f12],
        ]);
        let expected = fq6([
            [0x299823d71e5185b, 0xd354f29d14d141a5, 0xdda74f347f0f1c92, 0x175cc3c2e5893d98],
            [0x24e7634269effff, 0xef0456047cd34c81, 0xe8fa6f98653c6e3e, 0x17af28b7319d9ee5],
            [0x176b56595a4895ad, 0xf376c025a8d6c44d, 0x8ca370d84bd40a47, 0x1ab93edda3965ab6],
            [0x542c3694c663aaad, 0x442cf2e26e81de25, 0x71958a71f6c0e25c, 0xd90c815570b1abb],
            [0x81945e2640d3066b, 0xd5eb11f2d32322a4, 0x9c761dc383e3d71a, 0xbd77fc56124e861],
            [0xf401075a6b73fc0e, 0xfa9ae11c3ffd821e, 0xf1edf94c0475d8d6, 0x58cd71fc38dbafa],
        ]);
        assert_eq!(a - b, expected);
    }

    #[test]
    fn fq6_mul_check_against_constants() {
        let a = fq6([
            [0xa7e3494fc528b8c8, 0xc8c8906c9682e43f, 0xc6e76fc21152721c, 0x12a4c3ee3ff10dbd],
            [0x887ce62a3ae2a578, 0x70caee28e1942bac, 0xc1a58242c34ff94f, 0x0b154d910b492542],
            [0x8c885006cc08667a, 0xee0b6c4a0dbb9592, 0xa755229d6272b51e, 0x2629b93f67eb8dd6],
            [0xe4ececfd79a858ea, 0xd68b54a557d3a745, 0x11583e88259747aa, 0x1843766463ee1ad4],
            [0x986c9795d5703de6, 0x57987869bb56865f, 0x42bb014b1256a07b, 0x1388b70999724ec8],
            [0x1ac82ca3e5494c3d, 0xc88fad298864779d, 0xc6d8b5505d04bdaa, 0x26426a0b70727a4d],
        ]);
        let b = fq6([
            [0xdd7298233cd1b137, 0x026d2c68a832cb24, 0xbbab93115cbb50bb, 0x2aa110dfddd74cdf],
            [0x4f4f74ad1223b0d8, 0x338a7892782a6432, 0xa5691849f99e6ac3, 0x24b57a6e0862e7fc],
            [0x462cb81e0326de60, 0x4f43a8b4bd7ec7f3, 0xebdf4944e5d45872, 0x1bda04585d1e5734],
            [0xc88dc3fccb7def5a, 0x4363011c6f7e5ddf, 0x22ae64ed8c54e29d, 0x1ca466f35116b625],
            [0xc594e787e224746a, 0xc3d7d28811903ae5, 0xc56df7874c74120e, 0x252d38bf0b1e7e90],
            [0xbc5e4e1584480db3, 0x5adcfa1d2fca7c5e, 0xe47f725d6a7381e6, 0x04eb7a445804ec46],
        ]);
        let expected = fq6([
            [0x774f378764a25ae1, 0xa233ed1ce173ca63, 0xd17c631b84f48368, 0x0e09a8d87850c96e],
            [0x73ac39b5e9b9dbed, 0xf7f67afbfcbd26e2, 0x615245fa820a57f7, 0x0c752643305ac50f],
            [0xd106f17bee42abe1, 0xe29882030d238c60, 0x58001634ca9d66d1, 0x0ecae4532209b838],
            [0x4b2fbc422420f06a, 0x3a8e5b388fdedd1f, 0x06006b4471134540, 0x0d4fee4f7966d63d],
            [0x4ffcbaa876979a1c, 0x32b7c1ef7d251306, 0x1b4e0712f969804e, 0x200592dfe71b710f],
            [0xe3eb378754bfb1ac, 0x6b517c1cae53d784, 0xd1b29c0eb1e4d46f, 0x08b42f13fdd14172],
        ]);
        assert_eq!(a * b, expected);
    }

    #[test]
    fn fq6_sqr_check_against_constants() {
        let a = fq6([
            [0xe337aaa063afce6, 0xff4b5477485eb20, 0xef6dcf13b3855ef8, 0x14554c38da988ece],
            [0x6a70e65e71431416, 0xd21f95045c45f422, 0x2a17b6c6ff517884, 0x1b01ad6487a3ff16],
            [0xea39618e9f05e1f, 0x63e9b0f7803072a6, 0xebe5538a2c75c89, 0x5312aad2ac95dcf],
            [0xc0750291a780ebcc, 0x782b1251b609f532, 0x316fe1bcf2fdde86, 0xb69f7f7ceddf296],
            [0xdd5e9baaefbf9d33, 0x43535c72f7a3525a, 0x494ed8ac61be0d8c, 0x16c1b965f69ff74e],
            [0x9fc5c37ebff3efb4, 0xeeb16b0eb64816d6, 0xd619c0dfe2c33664, 0x21d9e29e8b1e6f81],
        ]);
        let expected = fq6([
            [0x3a40e1b9d96d12da, 0xd7aeb073f376a6d6, 0xf5c2c8663cae46fa, 0x2e0c927c52712062],
            [0xcdb05809afd065ba, 0xbbfda09a79b7375d, 0xd3a86218cd3576be, 0x13b97e35c676e471],
            [0x364e36385d045b9e, 0x4e5696665faa8544, 0xfe40998043ecbab, 0x443f608c40428e],
            [0xd48ac80d8e6e52b5, 0x1791b8c4145bc2d3, 0x35c456444cdcf9be, 0x1eddd29d77366c08],
            [0x56f1f8acbaed1118, 0xdd74b8bb2e47de74, 0x97525aa49c65f0fd, 0x15bbf236e098fa0f],
            [0xad97a94142524aeb, 0x42a508523527268b, 0x4c9c5f213de06ca8, 0x73fa6bc31efa2f2],
        ]);
        assert_eq!(a.sqr(), expected);
        assert_eq!(a * a, expected);
    }

    #[test]
    fn fq6_to_montgomery_form() {
        assert_eq!(raw(1).to_montgomery_form(), Fq6::one());
    }

    #[test]
    fn fq6_from_montgomery_form() {
        assert_eq!(Fq6::one().from_montgomery_form(), raw(1));
        let a = Fq6::random_element();
        assert_eq!(a.from_montgomery_form().to_montgomery_form(), a);
        assert_eq!(a.to_montgomery_form().from_montgomery_form(), a);
    }

    #[test]
    fn fq6_mul_sqr_consistency() {
        let a = Fq6::random_element();
        let b = Fq6::random_element();
        assert_eq!((a - b) * (a + b), a.sqr() - b.sqr());
        for _ in 0..50 {
            let a = Fq6::random_element();
            assert_eq!(a * a, a.sqr());
        }
    }

    #[test]
    fn fq6_add_mul_consistency() {
        let multiplicand = raw(9).to_montgomery_form();
        let a = Fq6::random_element();
        let mut result = a + a;
        result += result;
        result += result;
        result += a;
        assert_eq!(result, a * multiplicand);
    }

    #[test]
    fn fq6_sub_mul_consistency() {
        let multiplicand = raw(5).to_montgomery_form();
        let a = Fq6::random_element();
        let mut result = a + a;
        result += result;
        result += result;
        result -= a;
        result -= a;
        result -= a;
        assert_eq!(result, a * multiplicand);
    }

    #[test]
    fn fq6_v_cubed_is_xi() {
        let v = Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero());
        let xi = Fq2::new(Fq::from(9u64), Fq::one());
        assert_eq!(v * v * v, Fq6::new(xi, Fq2::zero(), Fq2::zero()));
        assert_eq!(v.sqr() * v, v * v.sqr());
    }

    #[test]
    fn fq6_invert() {
        for _ in 0..20 {
            let a = Fq6::random_element();
            let a_inv = a.invert().unwrap();
            assert_eq!(a * a_inv, Fq6::one());
            assert_eq!(a_inv.invert().unwrap(), a);
        }
    }

    #[test]
    fn fq6_invert_sparse() {
        // A single non-zero coefficient exercises each term of the adjugate.
        let x = Fq2::random_element();
        for a in [
            Fq6::new(x, Fq2::zero(), Fq2::zero()),
            Fq6::new(Fq2::zero(), x, Fq2::zero()),
            Fq6::new(Fq2::zero(), Fq2::zero(), x),
        ] {
            assert_eq!(a * a.invert().unwrap(), Fq6::one());
        }
    }

    #[test]
    fn fq6_invert_zero_fails() {
        assert_eq!(Fq6::zero().invert(), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn fq6_norm_is_multiplicative() {
        let a = Fq6::random_element();
        let b = Fq6::random_element();
        assert_eq!((a * b).norm(), a.norm() * b.norm());
        let s = Fq::random_element();
        let lifted = Fq6::new(Fq2::new(s, Fq::zero()), Fq2::zero(), Fq2::zero());
        assert_eq!(lifted.norm(), s.pow(&[6]));
    }

    #[test]
    fn fq6_mul_by_quadratic() {
        let a = Fq6::random_element();
        let s = Fq2::random_element();
        assert_eq!(a.mul_by_quadratic(&s), a * Fq6::new(s, Fq2::zero(), Fq2::zero()));
    }

    #[test]
    fn fq6_frobenius_maps_are_prime_powers() {
        let a = Fq6::random_element();
        assert_eq!(a.frobenius_map_one(), a.pow(&modulus_power(1)));
        assert_eq!(a.frobenius_map_two(), a.pow(&modulus_power(2)));
        assert_eq!(a.frobenius_map_three(), a.pow(&modulus_power(3)));
        assert_eq!(a.frobenius_map_one().frobenius_map_two(), a.frobenius_map_three());
    }

    #[test]
    fn fq6_encoding_layout() {
        let a = Fq6::new(
            Fq2::new(Fq::from(1u64), Fq::from(2u64)),
            Fq2::new(Fq::from(3u64), Fq::from(4u64)),
            Fq2::new(Fq::from(5u64), Fq::from(6u64)),
        );
        let bytes = a.to_buffer();
        assert_eq!(bytes.len(), Fq6::ENCODED_LEN);
        assert_eq!(bytes.len(), 192);
        for i in 0..6 {
            assert_eq!(bytes[32 * i + 31], (i + 1) as u8);
        }
        assert_eq!(Fq6::from_buffer(&bytes, DecodePolicy::Strict).unwrap(), a);
        assert_eq!(
            Fq6::from_buffer(&bytes[1..], DecodePolicy::Reduce),
            Err(FieldError::InvalidLength { expected: 192, actual: 191 })
        );
    }

    #[test]
    fn fq6_strict_decode_rejects_noncanonical_c2() {
        let mut bytes = Fq6::random_element().to_buffer();
        for (i, limb) in Bn254FqParams::MODULUS.iter().rev().enumerate() {
            bytes[160 + 8 * i..168 + 8 * i].copy_from_slice(&limb.to_be_bytes());
        }
        assert!(matches!(
            Fq6::from_buffer(&bytes, DecodePolicy::Strict),
            Err(FieldError::MalformedEncoding(_))
        ));
        let reduced = Fq6::from_buffer(&bytes, DecodePolicy::Reduce).unwrap();
        assert!(reduced.c2.c1.is_zero());
    }

    #[test]
    fn fq6_validate_params() {
        assert!(Fq6::validate_params().is_ok());
    }

    struct CubeResidueParams;

    impl CubicParams for CubeResidueParams {
        type Quadratic = Bn254Fq2Params;

        // 8 = 2^3 is a cube in Fq2.
        fn non_residue() -> Fq2 {
            Fq2::new(Fq::from(8u64), Fq::zero())
        }
    }

    #[test]
    fn cube_non_residue_fails_validation() {
        assert!(matches!(
            CubicExtension::<CubeResidueParams>::validate_params(),
            Err(FieldError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn fq6_copy() {
        let a = Fq6::random_element();
        let b = a;
        assert_eq!(a, b);
    }
}
