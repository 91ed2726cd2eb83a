pub mod bar_chart;
pub mod impl_console;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_gui;
pub mod interface;
