use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use json_arena::constants::{identifier_problem, DEFAULT_CRATE_PATH, DEFAULT_DOCUMENT_NAME};
use json_arena::{ArenaStats, BuildOptions, EmitOptions, SizeMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "json2rs",
    version,
    about = "Compile a JSON document into an embeddable Rust module"
)]
struct Args {
    /// Input JSON file. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Name of the generated module (default: input file stem).
    #[arg(short, long, value_name = "ident")]
    name: Option<String>,

    /// Hoist arenas into sized statics and lift the standard arena limit.
    #[arg(long)]
    large: bool,

    /// Path through which the generated module reaches the runtime crate.
    #[arg(long = "crate-path", value_name = "path", default_value = DEFAULT_CRATE_PATH)]
    crate_path: String,

    /// Maximum entries per arena.
    #[arg(long = "arena-limit", value_name = "number")]
    arena_limit: Option<usize>,

    /// Store every string occurrence separately.
    #[arg(long = "no-dedupe")]
    no_dedupe: bool,

    /// Show arena statistics.
    #[arg(long)]
    stats: bool,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn stem(&self) -> Option<&str> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(path) => Path::new(path).file_stem().and_then(|stem| stem.to_str()),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded in another process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let (input_text, input_source) = read_input(args.input.as_deref())?;

    let build_options = BuildOptions::new().with_dedupe_strings(!args.no_dedupe);
    let emit_options = EmitOptions::new(module_name(args, &input_source))
        .with_crate_path(args.crate_path.as_str())
        .with_mode(if args.large {
            SizeMode::Large
        } else {
            SizeMode::Standard
        })
        .with_arena_limit(args.arena_limit);

    let built = json_arena::build_from_str_with_options(&input_text, &build_options)?;
    let document = built.document();
    let source = json_arena::emit(&document, &emit_options)?;
    tracing::info!(
        name = %emit_options.name,
        bytes = source.len(),
        "artifact ready"
    );

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    write_output(output_target.path(), source.as_bytes())?;

    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    if args.stats {
        print_stats(&built.stats(), &output_target)?;
    }
    Ok(())
}

/// Explicit names are passed through unchanged so that invalid ones are reported.
fn module_name(args: &Args, input_source: &InputSource) -> String {
    if let Some(name) = &args.name {
        return name.clone();
    }
    input_source
        .stem()
        .map(sanitize_name)
        .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string())
}

fn sanitize_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if identifier_problem(&name).is_some() {
        name.push('_');
    }
    if identifier_problem(&name).is_some() {
        return DEFAULT_DOCUMENT_NAME.to_string();
    }
    name
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {path}: {err}"))?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => fs::write(path, data)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    let output_label = display_path(output_path);
    println!("✔ Compiled {input_label} → {output_label}");
}

/// Goes to stderr when stdout carries the generated source.
fn print_stats(stats: &ArenaStats, output_target: &OutputTarget) -> Result<(), Box<dyn Error>> {
    let mut report = String::new();
    for (kind, count) in stats.entries() {
        report.push_str(&format!("ℹ {:<8} {count}\n", kind.as_str()));
    }
    report.push_str(&format!("✔ {} values in total\n", stats.values()));

    match output_target {
        OutputTarget::File(_) => {
            let mut out = io::stdout().lock();
            writeln!(out)?;
            out.write_all(report.as_bytes())?;
        }
        OutputTarget::Stdout => io::stderr().lock().write_all(report.as_bytes())?,
    }
    Ok(())
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let rel = diff_paths(&abs, &cwd).unwrap_or(abs);
    rel.to_string_lossy().into_owned()
}

fn diff_paths(path: &Path, base: &Path) -> Option<PathBuf> {
    let path_components: Vec<_> = path.components().collect();
    let base_components: Vec<_> = base.components().collect();

    if path_components.first()? != base_components.first()? {
        return None;
    }

    let mut common = 0;
    while common < path_components.len()
        && common < base_components.len()
        && path_components[common] == base_components[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..base_components.len() {
        result.push("..");
    }
    for component in &path_components[common..] {
        result.push(component.as_os_str());
    }

    Some(result)
}
