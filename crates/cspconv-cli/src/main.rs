//! Command-line interface for the constraint instance converter.

use clap::{Args, Parser, Subcommand};
use cspconv_core::{convert_instance, ConvertConfig, DuplicatePolicy, Program, DEFAULT_AUX_PREFIX};
use cspconv_model::{Event, Instance};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CSPCONV_GIT_HASH"),
    " ",
    env!("CSPCONV_GIT_DATE"),
    " ",
    env!("CSPCONV_BUILD_TARGET"),
    ")"
);

/// Extension given to programs written by `batch`.
const OUTPUT_EXTENSION: &str = "csp";

/// CLI error with source context for pretty printing.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read {path}: {message}")]
    IoError { path: String, message: String },

    #[error("failed to write {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("invalid instance: {message}")]
    #[diagnostic(code(cspconv::parse_error))]
    ParseError {
        message: String,
        #[source_code]
        src: NamedSource<Arc<String>>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("conversion error in {file}: {message}")]
    #[diagnostic(code(cspconv::convert_error))]
    ConvertError {
        file: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} instances failed to convert")]
    #[diagnostic(code(cspconv::batch_failed))]
    BatchFailed { failed: usize, total: usize },
}

impl CliError {
    fn from_json_error(e: serde_json::Error, source: Arc<String>, filename: &str) -> Self {
        let offset = line_col_offset(&source, e.line(), e.column());
        CliError::ParseError {
            message: e.to_string(),
            src: NamedSource::new(filename, source),
            span: (offset, 0).into(),
        }
    }

    fn from_convert_error(e: cspconv_core::ConvertError, filename: &str) -> Self {
        let help = e
            .declaration()
            .map(|id| format!("the failing declaration is '{id}'; no output was written"));
        CliError::ConvertError {
            file: filename.to_string(),
            message: e.to_string(),
            help,
        }
    }
}

type CliResult<T> = Result<T, CliError>;

/// Byte offset of a 1-based (line, column) position, clamped to `source`.
fn line_col_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return source.len();
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[derive(Parser)]
#[command(name = "cspconv", version = VERSION)]
#[command(
    about = "Convert JSON constraint instances to the prefix constraint language",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Clone, Debug)]
struct ConvertOptions {
    /// Prefix for generated auxiliary variable names
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_AUX_PREFIX)]
    aux_prefix: String,

    /// Let a later variable declaration replace an earlier one with the same id
    #[arg(long)]
    allow_redeclare: bool,

    /// Reject single-value instantiations over several variables
    #[arg(long)]
    no_broadcast: bool,
}

impl ConvertOptions {
    fn config(&self) -> ConvertConfig {
        ConvertConfig {
            aux_prefix: self.aux_prefix.clone(),
            duplicates: if self.allow_redeclare {
                DuplicatePolicy::Overwrite
            } else {
                DuplicatePolicy::Reject
            },
            broadcast_instantiation: !self.no_broadcast,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one instance
    Convert {
        /// Input JSON instance
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Convert several instances, continuing past failures
    Batch {
        /// Input JSON instances
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Directory for converted programs (default: next to each input)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Summarize an instance without converting it
    Inspect {
        /// Input JSON instance
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert {
            file,
            output,
            options,
        } => cmd_convert(&file, output.as_deref(), &options.config()),
        Commands::Batch {
            files,
            out_dir,
            options,
        } => cmd_batch(&files, out_dir.as_deref(), &options.config()),
        Commands::Inspect { file } => cmd_inspect(&file),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn load_instance(file: &Path) -> CliResult<Instance> {
    let filename = file.display().to_string();
    let source = Arc::new(fs::read_to_string(file).map_err(|e| CliError::IoError {
        path: filename.clone(),
        message: e.to_string(),
    })?);
    serde_json::from_str(&source)
        .map_err(|e| CliError::from_json_error(e, source.clone(), &filename))
}

fn convert_file(file: &Path, config: &ConvertConfig) -> CliResult<Program> {
    let instance = load_instance(file)?;
    convert_instance(&instance, config)
        .map_err(|e| CliError::from_convert_error(e, &file.display().to_string()))
}

fn write_program(path: &Path, program: &Program) -> CliResult<()> {
    fs::write(path, program.text()).map_err(|e| CliError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn cmd_convert(file: &Path, output: Option<&Path>, config: &ConvertConfig) -> CliResult<()> {
    let program = convert_file(file, config)?;

    if let Some(output_path) = output {
        write_program(output_path, &program)?;
        println!("converted: {} -> {}", file.display(), output_path.display());
    } else {
        if !program.statements.is_empty() {
            println!("{program}");
        }
    }

    Ok(())
}

/// Output path for `input` in batch mode.
fn batch_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input.with_extension(OUTPUT_EXTENSION);
    match (out_dir, file_name.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => file_name,
    }
}

fn cmd_batch(files: &[PathBuf], out_dir: Option<&Path>, config: &ConvertConfig) -> CliResult<()> {
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir).map_err(|e| CliError::WriteError {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
    }

    let start = Instant::now();
    let mut failed = 0;
    for file in files {
        let outcome = convert_file(file, config).and_then(|program| {
            let target = batch_output_path(file, out_dir);
            write_program(&target, &program)?;
            Ok((target, program.statements.len()))
        });
        match outcome {
            Ok((target, statements)) => {
                println!("converted: {} -> {}", file.display(), target.display());
                info!(file = %file.display(), statements, "instance converted");
            }
            Err(e) => {
                failed += 1;
                warn!(file = %file.display(), "conversion failed");
                eprintln!("{:?}", miette::Report::new(e));
            }
        }
    }

    info!(
        total = files.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch finished"
    );

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}

/// Declaration counts of an instance.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    variables: usize,
    constraints: BTreeMap<&'static str, usize>,
}

impl Summary {
    fn of(instance: &Instance) -> Self {
        let mut summary = Summary::default();
        for event in &instance.events {
            match event {
                Event::Variable(_) => summary.variables += 1,
                Event::Constraint(decl) => {
                    *summary
                        .constraints
                        .entry(decl.constraint.kind_name())
                        .or_default() += 1;
                }
            }
        }
        summary
    }

    fn total_constraints(&self) -> usize {
        self.constraints.values().sum()
    }
}

fn cmd_inspect(file: &Path) -> CliResult<()> {
    let instance = load_instance(file)?;
    let summary = Summary::of(&instance);

    let name = instance
        .name
        .clone()
        .unwrap_or_else(|| file.display().to_string());
    println!("instance {name}");
    println!("  {} variables", summary.variables);
    println!("  {} constraints", summary.total_constraints());
    for (kind, count) in &summary.constraints {
        println!("    {kind}: {count}");
    }
    Ok(())
}
