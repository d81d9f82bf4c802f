// Assistant domain: the single-turn FAQ bridge

pub mod bridge;

pub use bridge::*;
