// src/core/mod.rs

pub mod composer;
pub mod engine;
pub mod evaluator;
pub mod syllable;
pub mod tables;
pub mod types;
