// cpp2pas: C-like subset to Pascal translator

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};

use cpp2pas::semantic::analyze;
use cpp2pas::{parse_only, run_pipeline, tokenize, TranslateOptions};

/// Translate a C-like source file into Pascal
#[derive(Parser, Debug)]
#[command(name = "cpp2pas")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to translate
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree and stop
    #[arg(long)]
    ast: bool,

    /// Print the scopes and symbol tables and stop
    #[arg(long)]
    scopes: bool,

    /// Drop variable declarations that are never used
    #[arg(short = 'O', long)]
    optimize: bool,

    /// Name of the generated program
    #[arg(long, default_value = "translated")]
    program_name: String,

    /// Write the translation to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log every stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(file = %args.input.display(), bytes = source.len(), "read source");

    if args.tokens {
        for token in tokenize(&source) {
            let token = token?;
            println!("{}:{}\t{}", token.location.line, token.location.column, token);
        }
        return Ok(());
    }

    if args.ast {
        print!("{}", parse_only(&source)?);
        return Ok(());
    }

    if args.scopes {
        let analysis = analyze(&parse_only(&source)?);
        print!("{}", analysis.forest);
        for message in analysis.diagnostics {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    let options = TranslateOptions {
        optimize: args.optimize,
        program_name: args.program_name,
    };
    let output = run_pipeline(&source, &options)?;

    for note in &output.removal_log {
        eprintln!("{}", note);
    }
    for warning in &output.warnings {
        eprintln!("Warning: {}", warning);
    }
    for message in output.diagnostic_messages() {
        eprintln!("{}", message);
    }

    match &args.output {
        Some(path) => fs::write(path, &output.target_text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output.target_text),
    }

    if output.error_count() > 0 {
        bail!("{} semantic error(s)", output.error_count());
    }
    Ok(())
}
