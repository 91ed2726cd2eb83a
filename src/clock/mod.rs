#[cfg(test)]
pub mod impl_fake;
pub mod impl_system;
pub mod interface;
