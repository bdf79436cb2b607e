pub mod field;
pub mod field2;
pub mod field6;
pub mod field_params;
pub mod tower;

pub use field::Field;
pub use field2::{QuadraticExtension, QuadraticParams};
pub use field6::{CubicExtension, CubicFrobeniusParams, CubicParams};
pub use field_params::FieldParams;
pub use tower::{DecodePolicy, TowerField};
