//! Token stream production and validation
//!
//! The tagging core only consumes normalized tokens. Analysis chains live
//! outside the core; this module defines the contract they must honour and
//! ships a simple default.

mod stream;
mod tokenizer;

pub use stream::TokenStream;
pub use tokenizer::{StandardTokenizer, Tokenizer};
