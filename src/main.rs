//! tomdoc-convert: rewrite TomDoc comments in Objective-C headers for Doxygen
//! or Appledoc.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `tomdoc-convert -d < RACSignal.h`
//! - **file mode**: `tomdoc-convert -a -o docs/headers ReactiveCocoa/ RACStream.h`

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tomdoc_convert::render::{self, CommentRenderer, Dialect};
use tomdoc_convert::scanner::{self, ScanConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "tomdoc-convert",
    version,
    about = "Convert Objective-C headers documented with TomDoc to Doxygen or Appledoc"
)]
struct Cli {
    /// Header files, directories or glob patterns. If omitted, reads from stdin.
    paths: Vec<String>,

    /// Directory to put output files in, or `-` for stdout
    /// (default: ./formatted_headers)
    #[arg(short = 'o', long = "outputdir")]
    outputdir: Option<String>,

    /// Generate Appledoc output
    #[arg(short = 'a', long, conflicts_with = "doxygen")]
    appledoc: bool,

    /// Generate Doxygen output
    #[arg(short = 'd', long)]
    doxygen: bool,

    /// Class name prefix (e.g. RAC) used to turn references into Appledoc links
    #[arg(long)]
    class_prefix: Option<String>,

    /// Turn on verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn dialect(&self) -> Result<Dialect> {
        match (self.appledoc, self.doxygen) {
            (true, _) => Ok(Dialect::Appledoc),
            (false, true) => Ok(Dialect::Doxygen),
            (false, false) => bail!("must specify --appledoc or --doxygen"),
        }
    }
}

/// Output directory used when `-o` is not given.
const DEFAULT_OUTPUT_DIR: &str = "formatted_headers";

/// Only headers are converted when scanning directories and globs.
const HEADER_EXTENSION: &str = "h";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dialect = cli.dialect()?;
    let renderer = render::create_renderer(dialect, cli.class_prefix.as_deref());

    if cli.paths.is_empty() {
        return stdin_mode(renderer.as_ref());
    }

    file_mode(&cli, renderer.as_ref())
}

/// Log to stderr; `RUST_LOG` overrides the level picked from `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .with(filter)
        .init();
}

/// stdin mode: convert stdin to stdout.
fn stdin_mode(renderer: &dyn CommentRenderer) -> Result<()> {
    let config = ScanConfig {
        source_name: Some("stdin".to_string()),
    };
    scanner::process(io::stdin().lock(), io::stdout().lock(), renderer, &config)
        .context("failed to convert stdin")
}

/// file mode: convert every header, mirroring the input layout under the
/// output directory.
fn file_mode(cli: &Cli, renderer: &dyn CommentRenderer) -> Result<()> {
    let to_stdout = cli.outputdir.as_deref() == Some("-");

    let roots = cli
        .paths
        .iter()
        .map(std::path::absolute)
        .collect::<io::Result<Vec<_>>>()
        .context("failed to resolve input paths")?;
    let base = common_base(&roots);
    let headers = expand_inputs(&roots)?;

    let output_dir = std::path::absolute(cli.outputdir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
        .context("failed to resolve output directory")?;
    if !to_stdout {
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory: {}", output_dir.display())
        })?;
        for header in &headers {
            let out_path = output_path(&output_dir, &base, header);
            if same_file(header, &out_path)? {
                bail!(
                    "output {} would overwrite its input; choose another --outputdir",
                    out_path.display()
                );
            }
        }
    }

    for header in &headers {
        let source = fs::read(header)
            .with_context(|| format!("failed to read {}", header.display()))?;
        if let Some(name) = header.file_name() {
            info!("Parsing {}", name.to_string_lossy());
        }
        let converted = scanner::convert_bytes(&source, renderer);

        if to_stdout {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&converted)
                .and_then(|()| stdout.flush())
                .context("failed to write stdout")?;
            continue;
        }

        let out_path = output_path(&output_dir, &base, header);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        info!("Converting {} --> {}", header.display(), out_path.display());
        fs::write(&out_path, &converted)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Whether `output` names the same file as `input`. An output that does not
/// exist yet cannot be the input.
fn same_file(input: &Path, output: &Path) -> Result<bool> {
    if !output.exists() {
        return Ok(false);
    }
    let input = fs::canonicalize(input)
        .with_context(|| format!("failed to resolve {}", input.display()))?;
    let output = fs::canonicalize(output)
        .with_context(|| format!("failed to resolve {}", output.display()))?;
    Ok(input == output)
}

/// Directory that output paths are made relative to.
///
/// The parent of a single input (so a directory keeps its own name in the
/// output), otherwise the deepest directory shared by all inputs.
fn common_base(roots: &[PathBuf]) -> PathBuf {
    match roots {
        [] => PathBuf::new(),
        [single] => single.parent().map(Path::to_path_buf).unwrap_or_default(),
        [first, rest @ ..] => {
            let mut base = first.clone();
            for root in rest {
                while !root.starts_with(&base) {
                    if !base.pop() {
                        break;
                    }
                }
            }
            base
        }
    }
}

/// Expand files, directories (non-recursive) and glob patterns into the list
/// of header files to convert.
fn expand_inputs(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if root.is_dir() {
            let entries = fs::read_dir(root)
                .with_context(|| format!("failed to read directory: {}", root.display()))?;
            files.extend(entries.flatten().map(|e| e.path()).filter(|p| p.is_file()));
            continue;
        }
        let pattern = root.to_string_lossy();
        let matches: Vec<_> = glob::glob(&pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.retain(|p| is_header(p));
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_header(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(HEADER_EXTENSION)
}

/// Where the converted copy of `header` is written.
fn output_path(output_dir: &Path, base: &Path, header: &Path) -> PathBuf {
    match header.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => output_dir.join(relative),
        _ => output_dir.join(header.file_name().unwrap_or(header.as_os_str())),
    }
}
