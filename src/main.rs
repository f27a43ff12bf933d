use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use matchers_lang::cli::{self, CheckOptions, CliError, DocumentFormat, EmitOptions};
use matchers_lang::output;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "matchers")]
#[command(about = "Matchers - select and rewrite fields of YAML/JSON documents")]
#[command(version)]
struct Cli {
    /// Log resolution steps to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expression and print its AST
    Check {
        /// The expression to parse
        expression: String,

        /// Pretty-print the AST
        #[arg(short, long)]
        pretty: bool,
    },

    /// Resolve a matchers file against a document
    Emit {
        /// File mapping matcher names to expressions
        #[arg(short, long)]
        matchers: PathBuf,

        /// Document file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Document format, guessed from the file extension by default
        #[arg(short, long)]
        format: Option<DocumentFormat>,

        /// Only resolve the named matchers
        #[arg(short, long = "name")]
        names: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Keep resolving other matchers when one fails
        #[arg(short, long)]
        keep_going: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { expression, pretty } => run_check(expression, pretty),
        Commands::Emit {
            matchers,
            input,
            format,
            names,
            output,
            pretty,
            keep_going,
        } => run_emit(EmitArgs {
            matchers,
            input,
            format,
            names,
            output,
            pretty,
            keep_going,
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_check(expression: String, pretty: bool) -> Result<(), CliError> {
    let node = cli::execute_check(&CheckOptions { expression })?;
    let json = if pretty {
        output::to_json_pretty(&node)
    } else {
        output::to_json(&node)
    }?;
    println!("{}", json);
    Ok(())
}

struct EmitArgs {
    matchers: PathBuf,
    input: Option<PathBuf>,
    format: Option<DocumentFormat>,
    names: Vec<String>,
    output: OutputFormat,
    pretty: bool,
    keep_going: bool,
}

fn format_of(path: &Path) -> DocumentFormat {
    DocumentFormat::from_path(path).unwrap_or_default()
}

fn run_emit(args: EmitArgs) -> Result<(), CliError> {
    let matchers = fs::read_to_string(&args.matchers)?;

    let (input, input_format) = match &args.input {
        Some(path) => (
            Some(fs::read_to_string(path)?),
            args.format.unwrap_or_else(|| format_of(path)),
        ),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (Some(buffer), args.format.unwrap_or_default())
        }
        None => (None, args.format.unwrap_or_default()),
    };

    let options = EmitOptions {
        matchers,
        matchers_format: format_of(&args.matchers),
        input,
        input_format,
        names: args.names,
        keep_going: args.keep_going,
    };

    let emitted = cli::execute_emit(&options)?;
    let rendered = match args.output {
        OutputFormat::Json if args.pretty => output::to_json_pretty(&emitted.resolved)?,
        OutputFormat::Json => output::to_json(&emitted.resolved)?,
        OutputFormat::Yaml => output::to_yaml(&emitted.resolved)?,
    };
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }

    for (name, error) in &emitted.failures {
        eprintln!("{}: {}", name, error);
    }
    if emitted.failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Failed(emitted.failures.len()))
    }
}
