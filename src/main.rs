//! sweepergen CLI entrypoint
//! Parses command-line arguments, resolves configuration once, and runs the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;
use sweepergen::generation::PACKAGE_ENV_VAR;
use sweepergen::{FormatterKind, GenerationOrchestrator, GeneratorConfig};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sweepergen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate gen_<service>_sweepers_test.go from a definitions file
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Definitions file describing the service's resource types (YAML, JSON or TOML)
    #[arg(long)]
    definitions: PathBuf,
    /// Service name, overriding the one in the definitions file
    #[arg(long)]
    service: Option<String>,
    /// Destination Go package
    #[arg(long, env = PACKAGE_ENV_VAR)]
    package: Option<String>,
    /// Directory the generated file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Formatter applied to the rendered source
    #[arg(long, value_enum, default_value_t = FormatterArg::Builtin)]
    formatter: FormatterArg,
    /// gofmt binary used with --formatter gofmt
    #[arg(long, default_value = "gofmt")]
    gofmt_bin: PathBuf,
    /// Template file used instead of the embedded one
    #[arg(long)]
    template: Option<PathBuf>,
    /// Go function deciding whether a listing error should be skipped
    #[arg(long)]
    skip_error_predicate: Option<String>,
    /// Go module path that owns the per-service lister packages
    #[arg(long)]
    module_path: Option<String>,
    /// Fail if the file on disk differs from what would be generated
    #[arg(long, conflicts_with = "stdout")]
    check: bool,
    /// Print the generated source instead of writing it
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatterArg {
    Builtin,
    Gofmt,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --stdout output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(args).await,
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut request = sweepergen::infrastructure::definitions::load_definitions(&args.definitions)
        .await
        .with_context(|| format!("Failed to load definitions from {}", args.definitions.display()))?;

    if let Some(service) = &args.service {
        request.service_name = service.clone();
    }

    let config = build_config(&args)?;
    let orchestrator = GenerationOrchestrator::from_config(&config);

    if args.stdout {
        let rendered = orchestrator.render(&request, &config).await.map_err(stage_error)?;
        print!("{}", rendered.formatted);
        return Ok(());
    }

    if args.check {
        orchestrator.check(&request, &config).await.map_err(stage_error)?;
        return Ok(());
    }

    let rendered = orchestrator
        .generate(&request, &config)
        .await
        .map_err(stage_error)?;
    info!(path = %rendered.path.display(), "Done");
    Ok(())
}

fn build_config(args: &GenerateArgs) -> anyhow::Result<GeneratorConfig> {
    // --package falls back to GOPACKAGE through clap, so the lookup only sees the resolved value
    let mut config = GeneratorConfig::from_lookup(|_| args.package.clone())
        .map_err(stage_error)?
        .with_output_dir(&args.output_dir);

    if args.formatter == FormatterArg::Gofmt {
        config = config.with_formatter(FormatterKind::Gofmt {
            binary: args.gofmt_bin.clone(),
        });
    }
    if let Some(template) = &args.template {
        config = config.with_template_path(template);
    }
    if let Some(predicate) = &args.skip_error_predicate {
        config = config.with_skip_error_predicate(predicate);
    }
    if let Some(module_path) = &args.module_path {
        config = config.with_module_path(module_path);
    }

    Ok(config)
}

fn stage_error(err: sweepergen::GenerationError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("sweeper generation failed at {stage} stage"))
}
