//! Command discovery, argument binding and dispatch

pub mod binder;
pub mod dispatcher;
pub mod registry;
pub mod tokenizer;

pub use binder::bind;
pub use dispatcher::{Dispatcher, Outcome};
pub use registry::{Candidate, CommandRegistry};
pub use tokenizer::{TokenMap, tokenize};
