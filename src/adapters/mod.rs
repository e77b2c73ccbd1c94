// Adapters layer: concrete implementations of the domain ports.

pub mod obfuscator;
pub mod storage;
