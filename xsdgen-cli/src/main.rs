//! Command-line front end for xsdgen.
//!
//! Parses the argument set, drives the four pipeline stages over the
//! given schemas, and maps the outcome to the exit-code contract: 0 on
//! success (or a dry run with nothing to change), 1 on usage errors,
//! fatal generation errors, or a dry run with pending changes.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use xsdgen_codegen::{generate, CodegenError, CodegenOptions};
use xsdgen_schema::{load_schema, parse_schema, resolve, GenerationContext};

/// Generates C++ classes for marshalling and unmarshalling XML to C++
/// objects according to the given schemas.
#[derive(Parser, Debug)]
#[command(name = "xsdgen", version, about)]
struct Args {
    /// Verbose mode
    #[arg(short = 'v')]
    verbose: bool,

    /// Simulate generation but don't write anything to disk
    #[arg(short = 's')]
    dry_run: bool,

    /// C++ namespace for the generated classes
    #[arg(short = 'n', value_name = "namespace")]
    namespace: String,

    /// Output directory
    #[arg(short = 'o', value_name = "output-dir")]
    output_dir: PathBuf,

    /// XML schema definition files
    #[arg(short = 'i', value_name = "schema", num_args = 1.., required = true)]
    schemas: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap prints usage for missing/invalid arguments
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if args.verbose {
        tracing::debug!("verbose mode");
        if args.dry_run {
            tracing::debug!("simulate generation");
        }
        tracing::debug!("namespace: {}", args.namespace);
        tracing::debug!("output directory: {}", args.output_dir.display());
        for schema in &args.schemas {
            tracing::debug!("XML schema definition: {}", schema.display());
        }
    }

    match run(&args) {
        Ok(changed) => {
            if args.dry_run && changed {
                tracing::debug!("changes detected");
                ExitCode::FAILURE
            } else {
                if args.dry_run {
                    tracing::debug!("no changes detected");
                }
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole pipeline; returns whether any output file changed.
fn run(args: &Args) -> Result<bool, CodegenError> {
    let mut ctx = GenerationContext::new();

    for path in &args.schemas {
        let doc = load_schema(path, &mut ctx)?;
        parse_schema(&doc, &mut ctx)?;
    }

    resolve(&mut ctx)?;

    let options = CodegenOptions {
        namespace: args.namespace.clone(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    let report = generate(&ctx, &options)?;

    Ok(report.changed())
}
