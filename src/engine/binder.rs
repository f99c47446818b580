#![forbid(unsafe_code)]

//! Binding tokens into a command instance
//!
//! Every token must name a declared option. Values are converted by the
//! option's field type; required options are checked only after every token
//! has been processed, so their position in the argument list is irrelevant.

use super::tokenizer::TokenMap;
use crate::command::BindTarget;
use crate::error::ArgumentError;
use crate::model::{CommandDescriptor, ValueError};

/// Writes `tokens` into `target` according to `descriptor`
///
/// # Errors
///
/// - [`ArgumentError::UnknownArgument`] for a key no option declares
/// - [`ArgumentError::MissingValue`] for a valued option given as a bare flag
/// - [`ArgumentError::InvalidValue`] when the value does not parse
/// - [`ArgumentError::MissingRequiredOptions`] naming every required option
///   that was not supplied
pub fn bind<T: BindTarget + ?Sized>(
    tokens: &TokenMap,
    descriptor: &CommandDescriptor,
    target: &mut T,
) -> Result<(), ArgumentError> {
    let options = descriptor.options();
    let mut bound = vec![false; options.len()];

    for (key, value) in tokens.iter() {
        let index = descriptor
            .option_index(key)
            .ok_or_else(|| ArgumentError::UnknownArgument(key.to_string()))?;
        let option = &options[index];

        if option.value_kind().takes_value() && value.is_none() {
            return Err(ArgumentError::MissingValue(option.long_name().to_string()));
        }

        target.assign(index, value).map_err(|e| match e {
            ValueError::Missing => ArgumentError::MissingValue(option.long_name().to_string()),
            ValueError::Invalid(reason) => ArgumentError::InvalidValue {
                option: option.long_name().to_string(),
                reason,
            },
        })?;

        tracing::trace!(option = option.long_name(), ?value, "bound option");
        bound[index] = true;
    }

    let missing: Vec<String> = options
        .iter()
        .zip(&bound)
        .filter(|(option, was_bound)| option.is_required() && !**was_bound)
        .map(|(option, _)| option.long_name().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ArgumentError::MissingRequiredOptions(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Declaration, Declared, OptionSpec};
    use crate::engine::tokenizer::tokenize;
    use async_trait::async_trait;
    use uuid::Uuid;

    #[derive(Default, Debug)]
    struct Credentials {
        list: bool,
        create: Option<String>,
        delete: Option<String>,
        destroy: bool,
    }

    #[async_trait]
    impl Command for Credentials {
        fn declare() -> Declaration<Self> {
            Declaration::new()
                .name("credentials")
                .option(OptionSpec::new("list", |c: &mut Self| &mut c.list).short("l"))
                .option(OptionSpec::new("create", |c: &mut Self| &mut c.create).short("c"))
                .option(OptionSpec::new("delete", |c: &mut Self| &mut c.delete).short("d"))
                .option(OptionSpec::new("destroy", |c: &mut Self| &mut c.destroy))
        }

        async fn execute(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default, Debug)]
    struct Measure {
        verbose: bool,
        count: i32,
        total: i64,
        ratio: f64,
        id: Option<Uuid>,
        label: String,
    }

    #[async_trait]
    impl Command for Measure {
        fn declare() -> Declaration<Self> {
            Declaration::new()
                .option(OptionSpec::new("verbose", |c: &mut Self| &mut c.verbose).short("v"))
                .option(OptionSpec::new("count", |c: &mut Self| &mut c.count).short("n"))
                .option(OptionSpec::new("total", |c: &mut Self| &mut c.total))
                .option(OptionSpec::new("ratio", |c: &mut Self| &mut c.ratio).required())
                .option(OptionSpec::new("id", |c: &mut Self| &mut c.id))
                .option(OptionSpec::new("label", |c: &mut Self| &mut c.label).required())
        }

        async fn execute(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn run<C: Command>(declared: &Declared<C>, args: &[&str]) -> Result<C, ArgumentError> {
        let tokens = tokenize(args, declared.descriptor())?;
        let mut instance = declared.instance();
        bind(&tokens, declared.descriptor(), &mut instance)?;
        Ok(instance.into_inner())
    }

    #[test]
    fn test_list_flag_binds_alone() {
        let declared = Credentials::declare().build().unwrap();
        let command = run(&declared, &["--list"]).unwrap();

        assert!(command.list);
        assert_eq!(command.create, None);
        assert_eq!(command.delete, None);
        assert!(!command.destroy);
    }

    #[test]
    fn test_bundled_flags_bind_like_separate_flags() {
        let declared = Credentials::declare().build().unwrap();
        let declared_with_short = Declaration::<Credentials>::new()
            .option(OptionSpec::new("list", |c: &mut Credentials| &mut c.list).short("l"))
            .option(OptionSpec::new("destroy", |c: &mut Credentials| &mut c.destroy).short("x"))
            .build()
            .unwrap();

        let bundled = run(&declared_with_short, &["-lx"]).unwrap();
        let separate = run(&declared_with_short, &["-l", "-x"]).unwrap();
        let long = run(&declared_with_short, &["--list", "--destroy"]).unwrap();
        for command in [bundled, separate, long] {
            assert!(command.list);
            assert!(command.destroy);
        }

        let err = run(&declared, &["-lx"]).unwrap_err();
        assert_eq!(err, ArgumentError::UnknownArgument("x".to_string()));
    }

    #[test]
    fn test_flag_ignores_supplied_value() {
        let declared = Credentials::declare().build().unwrap();
        let command = run(&declared, &["--list=false"]).unwrap();
        assert!(command.list);
    }

    #[test]
    fn test_valued_option_without_value() {
        let declared = Credentials::declare().build().unwrap();
        let err = run(&declared, &["--create"]).unwrap_err();
        assert_eq!(err, ArgumentError::MissingValue("create".to_string()));

        // Bundling a valued option leaves it without a value
        let err = run(&declared, &["-lc"]).unwrap_err();
        assert_eq!(err, ArgumentError::MissingValue("create".to_string()));
    }

    #[test]
    fn test_unknown_long_option() {
        let declared = Credentials::declare().build().unwrap();
        let err = run(&declared, &["--lists"]).unwrap_err();
        assert_eq!(err, ArgumentError::UnknownArgument("lists".to_string()));
    }

    #[test]
    fn test_long_option_ignores_case() {
        let declared = Credentials::declare().build().unwrap();
        let command = run(&declared, &["--LIST", "--Create=x"]).unwrap();
        assert!(command.list);
        assert_eq!(command.create.as_deref(), Some("x"));
    }

    #[test]
    fn test_later_value_wins_across_casings() {
        let declared = Credentials::declare().build().unwrap();
        let command = run(&declared, &["--create", "--CREATE=x"]).unwrap();
        assert_eq!(command.create.as_deref(), Some("x"));

        let command = run(&declared, &["--Create=first", "-c=second"]).unwrap();
        assert_eq!(command.create.as_deref(), Some("second"));
    }

    #[test]
    fn test_typed_coercion() {
        let declared = Measure::declare().build().unwrap();
        let command = run(
            &declared,
            &[
                "-v",
                "-n=-3",
                "--total=9000000000",
                "--ratio=0.25",
                "--id=67e55044-10b1-426f-9247-bb680e5fe0c8",
                "--label=x",
            ],
        )
        .unwrap();

        assert!(command.verbose);
        assert_eq!(command.count, -3);
        assert_eq!(command.total, 9_000_000_000);
        assert_eq!(command.ratio, 0.25);
        assert_eq!(
            command.id,
            Some(Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap())
        );
        assert_eq!(command.label, "x");
    }

    #[test]
    fn test_invalid_value_names_option() {
        let declared = Measure::declare().build().unwrap();
        let err = run(&declared, &["--count=ten", "--ratio=1", "--label=x"]).unwrap_err();
        match err {
            ArgumentError::InvalidValue { option, reason } => {
                assert_eq!(option, "count");
                assert!(reason.contains("ten"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_required_names_exactly_the_omitted() {
        let declared = Measure::declare().build().unwrap();

        let err = run(&declared, &["--label=x"]).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::MissingRequiredOptions(vec!["ratio".to_string()])
        );

        let err = run(&declared, &["-v"]).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::MissingRequiredOptions(vec!["ratio".to_string(), "label".to_string()])
        );
    }

    #[test]
    fn test_required_satisfied_anywhere_in_argv() {
        let declared = Measure::declare().build().unwrap();
        let orders: [&[&str]; 3] = [
            &["--ratio=1", "--label=x", "-v"],
            &["-v", "--label=x", "--ratio=1"],
            &["--label=x", "-v", "--ratio=1"],
        ];
        for args in orders {
            let command = run(&declared, args).unwrap();
            assert_eq!(command.ratio, 1.0);
            assert_eq!(command.label, "x");
        }
    }
}
