mod common;

mod auth;
mod chat;
mod diag;
mod public;
