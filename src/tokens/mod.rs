//! Player tokens and their lifecycle.

mod token;

pub use token::{Token, TokenStatus};
