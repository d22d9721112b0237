use lamina::document::{GraphDocument, LayoutDocument};
use lamina::{LayoutError, Stage};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(LayoutError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "layout error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LayoutError> for CliError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    output: Option<String>,
    pretty: bool,
}

fn usage() -> &'static str {
    "lamina\n\
\n\
USAGE:\n\
  lamina [--pretty] [--output <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph document is read from stdin.\n\
  - The layout document is printed to stdout unless --output is given.\n\
  - Set LAMINA_LOG (e.g. LAMINA_LOG=debug) to trace the layout stages on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--output" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.output = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LAMINA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let text = read_input(args.input.as_deref())?;
    let mut g = GraphDocument::from_json(&text)?.into_graph()?;
    let summary = lamina::layout_with_progress(&mut g, |stage: Stage| {
        tracing::trace!(%stage, "stage");
    })?;
    let out = to_json(&LayoutDocument::from_graph(&g, summary), args.pretty)?;
    match args.output.as_deref() {
        None => print!("{out}"),
        Some(path) => std::fs::write(path, out)?,
    }
    Ok(())
}

fn main() {
    init_tracing();
    let argv: Vec<String> = std::env::args().collect();
    match run(&argv) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprint!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
