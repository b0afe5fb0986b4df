#[cfg(feature = "http")]
pub mod transcript_api;
