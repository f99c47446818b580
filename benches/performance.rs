use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use declarg::engine::{bind, tokenize};
use declarg::output::HelpRenderer;
use declarg::{Command, Declaration, OptionSpec, async_trait};
use std::hint::black_box;
use uuid::Uuid;

#[derive(Default)]
struct Wide {
    verbose: bool,
    quiet: bool,
    force: bool,
    name: String,
    count: i32,
    limit: i64,
    ratio: f64,
    id: Option<Uuid>,
}

#[async_trait]
impl Command for Wide {
    fn declare() -> Declaration<Self> {
        Declaration::new()
            .name("wide")
            .description("a command with many options")
            .option(OptionSpec::new("verbose", |c: &mut Self| &mut c.verbose).short("v"))
            .option(OptionSpec::new("quiet", |c: &mut Self| &mut c.quiet).short("q"))
            .option(OptionSpec::new("force", |c: &mut Self| &mut c.force).short("f"))
            .option(
                OptionSpec::new("name", |c: &mut Self| &mut c.name)
                    .short("n")
                    .required()
                    .description("the name to use"),
            )
            .option(OptionSpec::new("count", |c: &mut Self| &mut c.count).short("c"))
            .option(OptionSpec::new("limit", |c: &mut Self| &mut c.limit))
            .option(
                OptionSpec::new("ratio", |c: &mut Self| &mut c.ratio).description(
                    "
                    fraction of work to keep
                        between 0 and 1
                    ",
                ),
            )
            .option(OptionSpec::new("id", |c: &mut Self| &mut c.id))
    }

    async fn execute(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn bench_binding(c: &mut Criterion) {
    let declared = Wide::declare().build().unwrap();
    let mut group = c.benchmark_group("binding");

    let cases: [(&str, Vec<&str>); 3] = [
        ("required_only", vec!["--name=bench"]),
        ("bundled_flags", vec!["-vqf", "-n=bench"]),
        (
            "all_options",
            vec![
                "-vqf",
                "--name=bench",
                "-c=12",
                "--limit=4294967296",
                "--ratio=0.25",
                "--id=67e55044-10b1-426f-9247-bb680e5fe0c8",
            ],
        ),
    ];

    for (label, args) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("tokenize_and_bind", label), args, |b, args| {
            b.iter(|| {
                let tokens = tokenize(black_box(args), declared.descriptor()).unwrap();
                let mut instance = declared.instance();
                bind(&tokens, declared.descriptor(), &mut instance).unwrap();
                black_box(instance.into_inner())
            });
        });
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let declared = Wide::declare().build().unwrap();
    let renderer = HelpRenderer::new("bench");
    let mut group = c.benchmark_group("rendering");

    group.bench_function("usage", |b| {
        b.iter(|| black_box(renderer.usage(declared.descriptor())));
    });

    group.bench_function("command_list", |b| {
        let descriptors = vec![declared.descriptor(); 32];
        b.iter(|| black_box(renderer.command_list(descriptors.iter().copied())));
    });

    group.finish();
}

criterion_group!(benches, bench_binding, bench_rendering);
criterion_main!(benches);
