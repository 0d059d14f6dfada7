pub mod preview;
pub mod user;
