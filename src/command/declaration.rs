#![forbid(unsafe_code)]

//! Declarative command metadata
//!
//! A command type describes itself once through a [`Declaration`] builder.
//! Each option is tied to a field through an accessor closure, and the field's
//! type decides how the option's value is parsed:
//!
//! ```
//! use declarg::command::{Command, Declaration, OptionSpec};
//!
//! #[derive(Default)]
//! struct Credentials {
//!     list: bool,
//!     create: Option<String>,
//! }
//!
//! #[declarg::async_trait]
//! impl Command for Credentials {
//!     fn declare() -> Declaration<Self> {
//!         Declaration::new()
//!             .name("credentials")
//!             .description("manage stored credentials")
//!             .option(OptionSpec::new("list", |c: &mut Self| &mut c.list).short("l"))
//!             .option(OptionSpec::new("create", |c: &mut Self| &mut c.create).short("c"))
//!     }
//!
//!     async fn execute(&mut self) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

use super::prerequisite::Prerequisite;
use crate::model::{
    CommandDescriptor, DescriptorError, OptionDescriptor, OptionValue, ValueError, ValueKind,
};
use async_trait::async_trait;

type Setter<C> = Box<dyn Fn(&mut C, Option<&str>) -> Result<(), ValueError> + Send + Sync>;

/// A command that can be discovered and dispatched
///
/// `Default` provides the fresh instance each dispatch binds into.
#[async_trait]
pub trait Command: Default + Send + 'static {
    fn declare() -> Declaration<Self>;

    async fn execute(&mut self) -> anyhow::Result<()>;
}

/// One option of a command, bound to a field of `C`
pub struct OptionSpec<C> {
    long_name: String,
    short_name: Option<String>,
    required: bool,
    description: Option<String>,
    value_kind: ValueKind,
    setter: Setter<C>,
}

impl<C: 'static> OptionSpec<C> {
    /// Declares `--long_name`, writing into the field returned by `field`
    pub fn new<T, F>(long_name: impl Into<String>, field: F) -> Self
    where
        T: OptionValue + 'static,
        F: for<'a> Fn(&'a mut C) -> &'a mut T + Send + Sync + 'static,
    {
        OptionSpec {
            long_name: long_name.into(),
            short_name: None,
            required: false,
            description: None,
            value_kind: T::kind(),
            setter: Box::new(move |command: &mut C, raw: Option<&str>| {
                *field(command) = T::from_token(raw)?;
                Ok(())
            }),
        }
    }

    /// Single-letter alias; must be one character in `[a-z]`
    pub fn short(mut self, letter: impl Into<String>) -> Self {
        self.short_name = Some(letter.into());
        self
    }

    /// Rejects invocations that omit this option
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Help text; may span several indented lines
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Builder for a command's metadata
pub struct Declaration<C> {
    name: Option<String>,
    short_description: Option<String>,
    long_description: Option<String>,
    options: Vec<OptionSpec<C>>,
    prerequisites: Vec<Box<dyn Prerequisite>>,
}

impl<C: 'static> Declaration<C> {
    /// Starts an empty declaration
    pub fn new() -> Self {
        Declaration {
            name: None,
            short_description: None,
            long_description: None,
            options: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    /// Overrides the command name, which otherwise is the type's own name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// One-line summary shown in the command list
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Text shown at the top of the command's usage
    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = Some(text.into());
        self
    }

    /// Appends an option; help lists options in this order
    pub fn option(mut self, option: OptionSpec<C>) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a check that runs, in declaration order, before binding
    pub fn prerequisite(mut self, prerequisite: impl Prerequisite + 'static) -> Self {
        self.prerequisites.push(Box::new(prerequisite));
        self
    }

    /// Validates the metadata and freezes it into a [`Declared`] command
    pub fn build(self) -> Result<Declared<C>, DescriptorError> {
        let name = self.name.unwrap_or_else(short_type_name::<C>);

        let mut options = Vec::with_capacity(self.options.len());
        let mut setters = Vec::with_capacity(self.options.len());
        for spec in self.options {
            if spec.required && !spec.value_kind.takes_value() {
                tracing::warn!(
                    command = %name,
                    option = %spec.long_name,
                    "flag option is marked required; it can only ever be supplied as true"
                );
            }

            options.push(OptionDescriptor::new(
                spec.long_name,
                spec.short_name.as_deref(),
                spec.required,
                spec.description,
                spec.value_kind,
            )?);
            setters.push(spec.setter);
        }

        let prerequisite_names = self
            .prerequisites
            .iter()
            .map(|p| p.name().to_string())
            .collect();

        let descriptor = CommandDescriptor::new(
            name,
            self.short_description,
            self.long_description,
            options,
            prerequisite_names,
        )?;

        Ok(Declared {
            descriptor,
            setters,
            prerequisites: self.prerequisites,
        })
    }
}

impl<C: 'static> Default for Declaration<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated metadata plus the field setters of a command type
pub struct Declared<C> {
    descriptor: CommandDescriptor,
    setters: Vec<Setter<C>>,
    prerequisites: Vec<Box<dyn Prerequisite>>,
}

impl<C: Command> Declared<C> {
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// A fresh, default-initialized instance ready for binding
    pub fn instance(&self) -> Instance<'_, C> {
        Instance {
            declared: self,
            command: C::default(),
        }
    }
}

/// Receives option values by position in the descriptor's option list
pub trait BindTarget {
    fn assign(&mut self, index: usize, raw: Option<&str>) -> Result<(), ValueError>;
}

/// A command instance being prepared for one dispatch
pub struct Instance<'a, C> {
    declared: &'a Declared<C>,
    command: C,
}

impl<C> Instance<'_, C> {
    /// The command as bound so far
    pub fn command(&self) -> &C {
        &self.command
    }

    /// Releases the bound command
    pub fn into_inner(self) -> C {
        self.command
    }
}

impl<C> BindTarget for Instance<'_, C> {
    fn assign(&mut self, index: usize, raw: Option<&str>) -> Result<(), ValueError> {
        match self.declared.setters.get(index) {
            Some(set) => set(&mut self.command, raw),
            None => Err(ValueError::Invalid(format!("no option at position {}", index))),
        }
    }
}

/// Type-erased instance the dispatcher binds and runs
#[async_trait]
pub trait Invocable: BindTarget + Send {
    async fn execute(&mut self) -> anyhow::Result<()>;
}

#[async_trait]
impl<'a, C: Command> Invocable for Instance<'a, C> {
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.command.execute().await
    }
}

/// Type-erased view of a [`Declared`] command, owned by the registry
pub trait CommandFactory: Send + Sync {
    fn descriptor(&self) -> &CommandDescriptor;

    fn prerequisites(&self) -> &[Box<dyn Prerequisite>];

    fn instantiate(&self) -> Box<dyn Invocable + '_>;
}

impl<C: Command> CommandFactory for Declared<C> {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn prerequisites(&self) -> &[Box<dyn Prerequisite>] {
        &self.prerequisites
    }

    fn instantiate(&self) -> Box<dyn Invocable + '_> {
        Box::new(self.instance())
    }
}

/// Last path segment of a type's name, without generic arguments
fn short_type_name<C>() -> String {
    let full = std::any::type_name::<C>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::prerequisite::{PrerequisiteError, from_fn};

    #[derive(Default)]
    struct Test4Command {
        arg1: bool,
        arg2: i32,
        arg3: f64,
        arg5: Option<String>,
    }

    #[async_trait]
    impl Command for Test4Command {
        fn declare() -> Declaration<Self> {
            Declaration::new()
                .description("another description")
                .option(
                    OptionSpec::new("arg1", |c: &mut Self| &mut c.arg1)
                        .short("a")
                        .description("short description"),
                )
                .option(OptionSpec::new("arg2", |c: &mut Self| &mut c.arg2).short("b"))
                .option(OptionSpec::new("arg3", |c: &mut Self| &mut c.arg3).required())
                .option(OptionSpec::new("arg5", |c: &mut Self| &mut c.arg5).short("s"))
                .prerequisite(from_fn("always", || Ok(())))
        }

        async fn execute(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_name_defaults_to_type_name() {
        let declared = Test4Command::declare().build().unwrap();
        assert_eq!(declared.descriptor().name(), "Test4Command");
    }

    #[test]
    fn test_name_override() {
        let declared = Test4Command::declare().name("test4").build().unwrap();
        assert_eq!(declared.descriptor().name(), "test4");
    }

    #[test]
    fn test_value_kinds_follow_field_types() {
        let declared = Test4Command::declare().build().unwrap();
        let kinds: Vec<ValueKind> = declared
            .descriptor()
            .options()
            .iter()
            .map(|o| o.value_kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Flag,
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::String
            ]
        );
        assert_eq!(declared.descriptor().prerequisites(), &["always".to_string()]);
    }

    #[test]
    fn test_invalid_short_name_fails_build() {
        let result = Declaration::<Test4Command>::new()
            .option(OptionSpec::new("arg1", |c: &mut Test4Command| &mut c.arg1).short("A"))
            .build();
        assert!(matches!(result, Err(DescriptorError::InvalidShortName { .. })));
    }

    #[test]
    fn test_instance_assign_writes_fields() {
        let declared = Test4Command::declare().build().unwrap();
        let mut instance = declared.instance();

        instance.assign(0, None).unwrap();
        instance.assign(1, Some("12")).unwrap();
        instance.assign(2, Some("0.5")).unwrap();
        instance.assign(3, Some("text")).unwrap();

        let command = instance.into_inner();
        assert!(command.arg1);
        assert_eq!(command.arg2, 12);
        assert_eq!(command.arg3, 0.5);
        assert_eq!(command.arg5.as_deref(), Some("text"));
    }

    #[test]
    fn test_instance_assign_reports_parse_errors() {
        let declared = Test4Command::declare().build().unwrap();
        let mut instance = declared.instance();

        assert!(matches!(instance.assign(1, Some("x")), Err(ValueError::Invalid(_))));
        assert_eq!(instance.assign(3, None), Err(ValueError::Missing));
        assert!(instance.assign(9, Some("1")).is_err());
    }

    #[test]
    fn test_factory_exposes_prerequisites_in_order() {
        let declared = Declaration::<Test4Command>::new()
            .prerequisite(from_fn("first", || Ok(())))
            .prerequisite(from_fn("second", || Err(PrerequisiteError::new("no"))))
            .build()
            .unwrap();

        let factory: &dyn CommandFactory = &declared;
        let names: Vec<&str> = factory.prerequisites().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(factory.prerequisites()[1].run().is_err());
    }
}
