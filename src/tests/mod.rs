#[cfg(feature = "serde")]
mod serde_output;
