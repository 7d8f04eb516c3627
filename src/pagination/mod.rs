//! Pagination module
//!
//! The Wonolo API paginates every resource with `page`/`per` query
//! parameters. [`RecordPages`] walks those pages lazily and stops on the
//! first short page.

mod pages;

pub use pages::{RecordPages, PAGE_SIZE};

#[cfg(test)]
mod tests;
