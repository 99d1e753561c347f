//! `noc`, the command line front end for `OcellusScript`.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use path_absolutize::Absolutize as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use ocellus::{
    base::{source_file::SourceFile, FsProvider, Handler as _, PrintHandler},
    export::{render_module, render_token_dump},
    lexical::token_stream::TokenStream,
    syntax::parser::Parser as SyntaxParser,
};

const SOURCE_EXTENSION: &str = "ocls";
const TOKEN_EXTENSION: &str = "noct";
const TREE_EXTENSION: &str = "xml";

/// Tokenizes and parses `OcellusScript` source files.
#[derive(Debug, Parser)]
#[command(name = "noc", version, about)]
struct Args {
    /// The source file, or a directory whose `.ocls` files are processed.
    source: PathBuf,
    /// Where the outputs are written, a directory when processing several files.
    destination: PathBuf,
    /// Print more information, repeat for tracing output.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Write the token dump of every source.
    #[arg(long)]
    output_tokens: bool,
    /// Write the syntax tree of every source as XML.
    #[arg(long)]
    output_abstract_tree: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        EnvFilter::default().add_directive(level.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Processes every source, returns whether all of them succeeded.
fn run(args: &Args) -> ocellus::base::Result<bool> {
    let source = absolutize(&args.source)?;
    let sources = collect_sources(&source)?;
    let to_directory = source.is_dir() || args.destination.is_dir();

    if source.is_dir() {
        tracing::info!(
            "{} is a directory, processing its {} source files",
            source.display(),
            sources.len()
        );
    }

    if to_directory && (args.output_tokens || args.output_abstract_tree) {
        std::fs::create_dir_all(&args.destination)
            .map_err(|err| ocellus::base::Error::IoError(err.to_string()))?;
    }

    let provider = FsProvider::default();
    let mut failures = 0_usize;

    for path in &sources {
        let outputs = Outputs::new(args, path, to_directory);
        let handler = PrintHandler::new();

        if let Err(err) = process(&handler, &provider, path, &outputs) {
            if !handler.has_printed() {
                handler.receive(err);
            }
            tracing::error!("Failed to process {}", path.display());
            failures += 1;
        }
    }

    if failures > 0 {
        tracing::error!("{failures} of {} files failed", sources.len());
    }

    Ok(failures == 0)
}

fn absolutize(path: &Path) -> ocellus::base::Result<PathBuf> {
    path.absolutize()
        .map(|path| path.into_owned())
        .map_err(|err| ocellus::base::Error::IoError(err.to_string()))
}

fn collect_sources(source: &Path) -> ocellus::base::Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut sources = std::fs::read_dir(source)
        .map_err(|err| ocellus::base::Error::IoError(err.to_string()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
        })
        .collect::<Vec<_>>();
    sources.sort();

    Ok(sources)
}

/// Destinations of the outputs requested for one source file.
#[derive(Debug)]
struct Outputs {
    tokens: Option<PathBuf>,
    tree: Option<PathBuf>,
}

impl Outputs {
    fn new(args: &Args, source: &Path, to_directory: bool) -> Self {
        let destination = |extension: &str| {
            if to_directory {
                let stem = source
                    .file_stem()
                    .map(|stem| stem.to_string_lossy())
                    .unwrap_or_default();
                args.destination.join(format!("{stem}.{extension}"))
            } else {
                args.destination.with_extension(extension)
            }
        };

        Self {
            tokens: args.output_tokens.then(|| destination(TOKEN_EXTENSION)),
            tree: args.output_abstract_tree.then(|| destination(TREE_EXTENSION)),
        }
    }
}

fn process(
    handler: &PrintHandler,
    provider: &FsProvider,
    path: &Path,
    outputs: &Outputs,
) -> ocellus::base::Result<()> {
    let source_file = SourceFile::load(path, provider)?;
    let display_path = source_file
        .path_relative()
        .unwrap_or_else(|| source_file.path().clone());
    tracing::debug!("Processing {}", display_path.display());

    let tokens = TokenStream::tokenize(&source_file, handler)?;

    if let Some(destination) = &outputs.tokens {
        let header = destination.file_name().map_or_else(
            || source_file.identifier().clone(),
            |name| name.to_string_lossy().into_owned(),
        );
        write_output(destination, &render_token_dump(&header, &tokens))?;
    }

    let module = SyntaxParser::new(&tokens).parse_module(handler)?;
    tracing::info!(
        "Parsed module {} from {}",
        module.name(),
        display_path.display()
    );

    if let Some(destination) = &outputs.tree {
        write_output(destination, &render_module(&module))?;
    }

    Ok(())
}

fn write_output(destination: &Path, content: &str) -> ocellus::base::Result<()> {
    tracing::info!("Writing {}", destination.display());

    std::fs::write(destination, content)
        .map_err(|err| ocellus::base::Error::IoError(err.to_string()))
}
