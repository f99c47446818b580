//! Help output: human-readable tables and JSONL records

pub mod human;
pub mod jsonl;
pub mod table;
pub mod text;

pub use human::HelpRenderer;
pub use jsonl::JsonlRenderer;
pub use table::Table;
pub use text::deindent;
