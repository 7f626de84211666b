//! Signed scenario triggering: token minting and the per-match webhook call.

mod dispatcher;
mod jwt;

pub use dispatcher::*;
pub use jwt::*;
