// Numeric support for the field tower.
//
// - uint256: 256-bit integers backed by crypto-bigint U256
// - uintx: the 512-bit double width consumed by wide reduction
// - random: OS-entropy and seeded RNG wrappers

pub mod random;
pub mod uint256;
pub mod uintx;

pub use uint256::{U256, U256Ext};
pub use uintx::{U512, U512Ext};
