pub mod descriptor;
pub mod impl_chain;
pub mod impl_mock;
pub mod impl_tfjs;
pub mod interface;
