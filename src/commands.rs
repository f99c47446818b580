//! Sample commands shipped with the `declarg` binary

use declarg::command::RequireEnv;
use declarg::{Candidate, Command, Declaration, OptionSpec, async_trait};
use uuid::Uuid;

pub fn candidates() -> Vec<Candidate> {
    vec![
        Candidate::of::<Greet>(),
        Candidate::of::<Ticket>(),
        Candidate::of::<Deploy>(),
    ]
}

#[derive(Default)]
pub struct Greet {
    name: String,
    times: Option<i32>,
    shout: bool,
}

#[async_trait]
impl Command for Greet {
    fn declare() -> Declaration<Self> {
        Declaration::new()
            .name("greet")
            .description("print a greeting")
            .long_description(
                "
                Prints a greeting for NAME.

                Repeats it when --times is given.
                ",
            )
            .option(
                OptionSpec::new("name", |c: &mut Self| &mut c.name)
                    .short("n")
                    .required()
                    .description("who to greet"),
            )
            .option(
                OptionSpec::new("times", |c: &mut Self| &mut c.times)
                    .short("t")
                    .description("how many times to greet"),
            )
            .option(
                OptionSpec::new("shout", |c: &mut Self| &mut c.shout)
                    .short("s")
                    .description(
                        "
                        greet in capitals
                            (useful across a noisy room)
                        ",
                    ),
            )
    }

    async fn execute(&mut self) -> anyhow::Result<()> {
        let times = self.times.unwrap_or(1);
        anyhow::ensure!(times >= 0, "--times must not be negative, got {}", times);

        let mut greeting = format!("Hello, {}!", self.name);
        if self.shout {
            greeting = greeting.to_uppercase();
        }
        for _ in 0..times {
            println!("{}", greeting);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Ticket {
    id: Uuid,
    size: i64,
    weight: f64,
    note: Option<String>,
}

#[async_trait]
impl Command for Ticket {
    fn declare() -> Declaration<Self> {
        Declaration::new()
            .description("summarize a work ticket")
            .option(OptionSpec::new("id", |c: &mut Self| &mut c.id).required())
            .option(
                OptionSpec::new("size", |c: &mut Self| &mut c.size)
                    .description("estimated size in bytes"),
            )
            .option(OptionSpec::new("weight", |c: &mut Self| &mut c.weight).short("w"))
            .option(OptionSpec::new("note", |c: &mut Self| &mut c.note))
    }

    async fn execute(&mut self) -> anyhow::Result<()> {
        println!("ticket {} size={} weight={}", self.id, self.size, self.weight);
        if let Some(note) = &self.note {
            println!("note: {}", note);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Deploy {
    target: String,
    dry_run: bool,
}

#[async_trait]
impl Command for Deploy {
    fn declare() -> Declaration<Self> {
        Declaration::new()
            .name("deploy")
            .description("deploy to an environment")
            .prerequisite(RequireEnv::new("DEPLOY_TOKEN"))
            .option(
                OptionSpec::new("target", |c: &mut Self| &mut c.target)
                    .short("t")
                    .required(),
            )
            .option(OptionSpec::new("dry-run", |c: &mut Self| &mut c.dry_run).short("d"))
    }

    async fn execute(&mut self) -> anyhow::Result<()> {
        if self.dry_run {
            println!("would deploy to {}", self.target);
        } else {
            tokio::task::yield_now().await;
            println!("deployed to {}", self.target);
        }
        Ok(())
    }
}
