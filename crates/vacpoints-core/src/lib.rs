pub mod calendar;
pub mod classify;
pub mod error;
pub mod ids;
pub mod legend;
pub mod pricing;
pub mod quote;
pub mod resort;
pub mod settings;

#[cfg(test)]
mod testing;
