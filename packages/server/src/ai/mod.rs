pub mod dispatcher;
pub mod tools;
