use once_cell::sync::Lazy;

use crate::error::FieldResult;
use crate::fields::field::Field;
use crate::fields::field2::{QuadraticExtension, QuadraticParams};
use crate::fields::field6::{CubicExtension, CubicFrobeniusParams, CubicParams};
use crate::fields::field_params::FieldParams;
use crate::fields::tower::TowerField;

// ---------------------------------------------------------------------------
// BN254 Base Field (Fq)
// ---------------------------------------------------------------------------

pub struct Bn254FqParams;

impl FieldParams for Bn254FqParams {
    const MODULUS: [u64; 4] = [
        0x3C208C16D87CFD47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R_SQUARED: [u64; 4] = [
        0xF32CFC5B538AFA89,
        0xB5E71911D44501FB,
        0x47AB1EFF0A417FF6,
        0x06D89F71CAB8351F,
    ];
    const R_INV: u64 = 0x87d20782e4866389;
}

pub type Fq = Field<Bn254FqParams>;

// ---------------------------------------------------------------------------
// BN254 Scalar Field (Fr)
// ---------------------------------------------------------------------------

pub struct Bn254FrParams;

impl FieldParams for Bn254FrParams {
    const MODULUS: [u64; 4] = [
        0x43E1F593F0000001,
        0x2833E84879B97091,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
    const R_SQUARED: [u64; 4] = [
        0x1BB8E645AE216DA7,
        0x53FE3AB1E35C59E3,
        0x8C49833D53BB8085,
        0x0216D0B17F4E44A5,
    ];
    const R_INV: u64 = 0xc2e1f593efffffff;
}

pub type Fr = Field<Bn254FrParams>;

// ---------------------------------------------------------------------------
// Fq2 = Fq[u] / (u^2 + 1)
// ---------------------------------------------------------------------------

pub struct Bn254Fq2Params;

impl QuadraticParams for Bn254Fq2Params {
    type Base = Fq;

    fn non_residue() -> Fq {
        -Fq::one()
    }

    #[inline]
    fn mul_by_non_residue(a: &Fq) -> Fq {
        -*a
    }
}

pub type Fq2 = QuadraticExtension<Bn254Fq2Params>;

// ---------------------------------------------------------------------------
// Fq6 = Fq2[v] / (v^3 - (9 + u))
// Frobenius constants are stored in Montgomery form.
// ---------------------------------------------------------------------------

pub struct Bn254Fq6Params;

impl CubicParams for Bn254Fq6Params {
    type Quadratic = Bn254Fq2Params;

    fn non_residue() -> Fq2 {
        Fq2::new(Fq::from(9u64), Fq::one())
    }

    /// Multiply Fq2 element by non-residue xi = 9 + u.
    /// (a0 + a1*u)(9 + u) = (9*a0 - a1) + (9*a1 + a0)*u
    #[inline]
    fn mul_by_non_residue(a: &Fq2) -> Fq2 {
        let mut t0 = a.c0 + a.c0; // 2*a0
        t0 = t0 + t0; // 4*a0
        t0 = t0 + t0; // 8*a0
        t0 = t0 + a.c0; // 9*a0
        let mut t1 = a.c1 + a.c1; // 2*a1
        t1 = t1 + t1; // 4*a1
        t1 = t1 + t1; // 8*a1
        t1 = t1 + a.c1; // 9*a1
        Fq2::new(t0 - a.c1, t1 + a.c0)
    }
}

impl CubicFrobeniusParams for Bn254Fq6Params {
    fn frobenius_coeffs_c1_1() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xb5773b104563ab30, 0x347f91c8a9aa6454, 0x7a007127242e0991, 0x1956bcd8118214ec]),
            Fq::from_raw([0x6e849f1ea0aa4757, 0xaa1c7b6d89f89141, 0xb6e713cdfae0ca3a, 0x26694fbb4e82ebc3]),
        )
    }

    fn frobenius_coeffs_c1_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x3350c88e13e80b9c, 0x7dce557cdb5e56b9, 0x6001b4b8b615564a, 0x2682e617020217e0]),
            Fq::zero(),
        )
    }

    fn frobenius_coeffs_c1_3() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xc9af22f716ad6bad, 0xb311782a4aa662b2, 0x19eeaf64e248c7f4, 0x20273e77e3439f82]),
            Fq::from_raw([0xacc02860f7ce93ac, 0x3933d5817ba76b4c, 0x69e6188b446c8467, 0x0a46036d4417cc55]),
        )
    }

    fn frobenius_coeffs_c2_1() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x7361d77f843abe92, 0xa5bb2bd3273411fb, 0x9c941f314b3e2399, 0x15df9cddbb9fd3ec]),
            Fq::from_raw([0x5dddfd154bd8c949, 0x62cb29a5a4445b60, 0x37bc870a0c7dd2b9, 0x24830a9d3171f0fd]),
        )
    }

    fn frobenius_coeffs_c2_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x71930c11d782e155, 0xa6bb947cffbe3323, 0xaa303344d4741444, 0x2c3b3f0d26594943]),
            Fq::zero(),
        )
    }

    fn frobenius_coeffs_c2_3() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x448a93a57b6762df, 0xbfd62df528fdeadf, 0xd858f5d00e9bd47a, 0x06b03d4d3476ec58]),
            Fq::from_raw([0x2b19daf4bcc936d1, 0xa1a54e7a56f4299f, 0xb533eee05adeaef1, 0x170c812b84dda0b2]),
        )
    }
}

pub type Fq6 = CubicExtension<Bn254Fq6Params>;

// ---------------------------------------------------------------------------
// Fq12 = Fq6[w] / (w^2 - v)
// ---------------------------------------------------------------------------

pub struct Bn254Fq12Params;

impl QuadraticParams for Bn254Fq12Params {
    type Base = Fq6;

    fn non_residue() -> Fq6 {
        Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero())
    }

    /// (c0 + c1 v + c2 v^2) * v = xi*c2 + c0 v + c1 v^2
    #[inline]
    fn mul_by_non_residue(a: &Fq6) -> Fq6 {
        Fq6::new(Bn254Fq6Params::mul_by_non_residue(&a.c2), a.c0, a.c1)
    }
}

pub type Fq12 = QuadraticExtension<Bn254Fq12Params>;

// ---------------------------------------------------------------------------
// Tower validation
// ---------------------------------------------------------------------------

static TOWER_VALIDATION: Lazy<FieldResult<()>> = Lazy::new(|| {
    Fr::validate_params()?;
    Fq12::validate_params()?;
    tracing::debug!("bn254 field tower constants validated");
    Ok(())
});

/// Check every BN254 constant (Fr and Fq through Fq12) once per process.
///
/// Later calls return the cached outcome.
pub fn validate_tower() -> FieldResult<()> {
    Lazy::force(&TOWER_VALIDATION).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moduli_are_254_bits() {
        assert_eq!(Bn254FqParams::MODULUS_BITS, 254);
        assert_eq!(Bn254FrParams::MODULUS_BITS, 254);
        assert_eq!(Bn254FqParams::ENCODED_LEN, 32);
    }

    #[test]
    fn tower_degrees_and_widths() {
        assert_eq!(Fq2::DEGREE, 2);
        assert_eq!(Fq6::DEGREE, 6);
        assert_eq!(Fq12::DEGREE, 12);
        assert_eq!(Fq12::ENCODED_LEN, 384);
    }

    #[test]
    fn xi_mul_matches_generic() {
        let a = Fq2::random_element();
        assert_eq!(
            Bn254Fq6Params::mul_by_non_residue(&a),
            Bn254Fq6Params::non_residue() * a
        );
    }

    #[test]
    fn xi_norm_is_82() {
        assert_eq!(Bn254Fq6Params::non_residue().norm(), Fq::from(82u64));
        assert!(!Fq::from(82u64).is_square());
        assert_eq!(Fq::from(82u64).is_cube(), Ok(false));
    }

    #[test]
    fn w_squared_is_v() {
        let w = Fq12::new(Fq6::zero(), Fq6::one());
        assert_eq!(w.sqr(), Fq12::new(Bn254Fq12Params::non_residue(), Fq6::zero()));
    }

    #[test]
    fn fq12_shift_matches_generic() {
        let a = Fq6::random_element();
        assert_eq!(
            Bn254Fq12Params::mul_by_non_residue(&a),
            Bn254Fq12Params::non_residue() * a
        );
    }

    #[test]
    fn tower_validates() {
        assert_eq!(validate_tower(), Ok(()));
        assert_eq!(validate_tower(), Ok(()));
    }
}
