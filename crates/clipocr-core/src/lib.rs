pub mod cleanup;
pub mod preview;
pub mod region;
pub mod session;
pub mod texts;
