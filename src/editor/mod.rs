pub mod criteria;
pub mod drag;
pub mod fields;
pub mod levels;
pub mod ops;
pub mod opts;
pub mod palette;
pub mod session;
pub mod state;
pub mod transcode;
