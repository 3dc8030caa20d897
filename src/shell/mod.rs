//! Interactive shell
//!
//! Line-oriented front end over the control session.

pub mod command;
pub mod runner;

pub use runner::run;
