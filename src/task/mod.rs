pub mod core;
pub mod render;
pub mod run_effect;
pub mod runner;
#[cfg(test)]
mod tests;
