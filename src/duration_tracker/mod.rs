pub mod core;
#[cfg(test)]
mod core_test;
pub mod summary;
