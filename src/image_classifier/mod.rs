pub mod impl_mock;
#[cfg(test)]
pub mod impl_scripted;
pub mod interface;
