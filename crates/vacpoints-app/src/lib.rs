pub mod calculator_service;
pub mod editor_service;
pub mod error;
pub mod navigation;
pub mod settings_service;

#[cfg(test)]
mod mocks;
