//! Command declaration contract and prerequisite capabilities

pub mod declaration;
pub mod prerequisite;

pub use declaration::{
    BindTarget, Command, CommandFactory, Declaration, Declared, Instance, Invocable, OptionSpec,
};
pub use prerequisite::{FnPrerequisite, Prerequisite, PrerequisiteError, RequireEnv, from_fn};
