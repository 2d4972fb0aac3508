pub mod ids;
pub mod logging;
pub mod serde_ext;
