use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chained_json::{ParseOptions, Value};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "cjson", version, about = "JSON parser, checker and reformatter")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Only validate the input; print nothing but a status line.
    #[arg(short, long)]
    check: bool,

    /// Reject documents nested deeper than this many arrays/objects.
    #[arg(long = "max-depth", value_name = "number")]
    max_depth: Option<usize>,

    /// Initial bucket count for every parsed object.
    #[arg(long = "object-capacity", value_name = "number")]
    object_capacity: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn from_arg(input: Option<&str>) -> Self {
        match input {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_string()),
        }
    }

    fn label(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => display_path(path),
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
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let options = parse_options(args);
    let input_source = InputSource::from_arg(args.input.as_deref());
    let value = read_value(&input_source, &options)?;

    if args.check {
        println!("✔ valid");
        return Ok(());
    }

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    with_output_writer(&output_target, |writer| {
        chained_json::to_writer(&mut *writer, &value)?;
        Ok(())
    })?;
    if let OutputTarget::File(path) = &output_target {
        println!("✔ Formatted {} → {}", input_source.label(), display_path(path));
    }
    Ok(())
}

fn parse_options(args: &Args) -> ParseOptions {
    let mut options = ParseOptions::new().with_max_depth(args.max_depth);
    if let Some(capacity) = args.object_capacity {
        options = options.with_object_capacity(capacity);
    }
    options
}

fn read_value(input: &InputSource, options: &ParseOptions) -> Result<Value, Box<dyn Error>> {
    let value = match input {
        InputSource::Stdin => chained_json::parse_reader_with_options(io::stdin().lock(), options)?,
        InputSource::File(path) => chained_json::parse_file_with_options(path, options)?,
    };
    log::debug!("read {} from {}", value.type_name(), input.label());
    Ok(value)
}

fn with_output_writer<F>(target: &OutputTarget, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match target {
        OutputTarget::File(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
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

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_components.len() {
        result.push("..");
    }
    for component in &path_components[common..] {
        result.push(component.as_os_str());
    }

    Some(result)
}
