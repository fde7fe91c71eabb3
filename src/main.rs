use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use m21gen::{GeneratorOptions, WriteTarget};
use tracing::info;

/// Generate a music21 program from a score node document.
#[derive(Parser, Debug)]
#[command(name = "m21gen")]
#[command(about = "Generate a music21 Python program that rebuilds a score tree")]
struct Args {
    /// Node document (YAML or JSON)
    input: PathBuf,

    /// Where to write the program; stdout if omitted
    output: Option<PathBuf>,

    /// Options file (YAML, kebab-case keys)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Variable name bound to the root node
    #[arg(long, value_name = "NAME")]
    root_name: Option<String>,

    /// Make the program check the score and write it to PATH
    #[arg(short, long, value_name = "PATH")]
    write: Option<String>,

    /// Format passed to `write`, default musicxml
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Read input file
    let source = match fs::read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let program = match m21gen::transpile_with_options(&source, &options) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, program.to_string()) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            info!(path = %path.display(), lines = program.lines().len(), "Wrote program");
        }
        None => {
            print!("{}", program);
        }
    }
}

/// Options file first, then command-line overrides.
fn load_options(args: &Args) -> Result<GeneratorOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("reading '{}': {}", path.display(), e))?;
            GeneratorOptions::from_yaml(&text).map_err(|e| e.to_string())?
        }
        None => GeneratorOptions::default(),
    };

    if let Some(name) = &args.root_name {
        options = options.with_root_name(name);
    }
    if let Some(path) = &args.write {
        let mut target = WriteTarget::new(path);
        if let Some(format) = &args.format {
            target = target.with_format(format);
        }
        options = options.with_write(target);
    } else if let Some(format) = &args.format {
        match options.write.as_mut() {
            Some(target) => target.format = format.clone(),
            None => tracing::warn!(%format, "Ignoring --format without a write target"),
        }
    }

    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}
