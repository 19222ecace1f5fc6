pub mod calculator;
pub mod editor;
pub mod navigation;
pub mod settings;
