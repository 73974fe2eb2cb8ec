//! A toy network printer: clients send a text file, the server charges ink
//! for it from a shared tank and answers with a one-line verdict.

pub mod client;
pub mod codec;
pub mod error;
pub mod ink;
pub mod model;
pub mod print;
pub mod server;
