pub mod curves;
pub mod error;
pub mod fields;

pub use error::{FieldError, FieldResult};
