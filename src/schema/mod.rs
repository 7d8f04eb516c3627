//! Schema module
//!
//! Each stream carries a static JSON schema (singer style, embedded at
//! compile time). Records are validated and coerced against that schema
//! before emission; coercion is the only mutation a record ever sees.

mod transform;

pub use transform::transform_record;
