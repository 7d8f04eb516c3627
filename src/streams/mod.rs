//! Stream module
//!
//! One parameterized stream type drives all three resources. The per
//! resource differences (id, key fields, accepted query params) live in
//! static [`StreamDefinition`] descriptors, not in divergent types.

mod definition;
mod sync;

pub use definition::{find, StreamDefinition, AVAILABLE_STREAMS, JOBS, JOB_REQUESTS, USERS};
pub use sync::TapStream;
