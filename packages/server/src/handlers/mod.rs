pub mod chat;
pub mod diag;
pub mod files;
pub mod public;
pub mod session;
