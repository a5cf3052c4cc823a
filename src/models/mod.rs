//! Data models

pub mod translator;

pub use translator::Translator;
