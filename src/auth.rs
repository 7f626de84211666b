//! Access-token acquisition for the records API.

mod provider;
mod token;

pub use provider::*;
pub use token::*;
