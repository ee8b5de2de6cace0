pub mod jwt;
pub mod path;
