// Adapters layer: concrete implementations for the laureates API and the filesystem.

pub mod http;
pub mod storage;
