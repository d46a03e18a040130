use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pdf_binding::config;
use pdf_binding::discovery;
use pdf_binding::ordering::sort_image_files;
use pdf_binding::pipeline::assembler::{AssembleConfig, assemble};
use pdf_binding::pipeline::progress::TerminalProgress;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: pdf_binding <input_path> [-o <output.pdf>]");
        eprintln!("  Convert an image file or a directory of images into a single PDF.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("pdf_binding {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // Parse the positional input path and the optional -o/--output.
    let mut input_arg: Option<String> = None;
    let mut output_arg: Option<String> = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => match iter.next() {
                Some(value) => output_arg = Some(value.clone()),
                None => {
                    eprintln!("ERROR: {arg} requires a file path");
                    return ExitCode::FAILURE;
                }
            },
            other if other.starts_with('-') => {
                eprintln!("ERROR: Unknown option {other}");
                return ExitCode::FAILURE;
            }
            other => {
                if input_arg.is_some() {
                    eprintln!("ERROR: Multiple input paths given");
                    return ExitCode::FAILURE;
                }
                input_arg = Some(other.to_string());
            }
        }
    }

    let Some(input_arg) = input_arg else {
        eprintln!("ERROR: No input path given");
        return ExitCode::FAILURE;
    };
    let input_path = Path::new(&input_arg);

    if !input_path.exists() {
        eprintln!("ERROR: Input path {input_arg} does not exist");
        return ExitCode::FAILURE;
    }

    // Validate or derive the output path before any image work starts.
    let output_path = match output_arg {
        Some(output) => {
            if !has_pdf_extension(Path::new(&output)) {
                eprintln!("ERROR: The output file must be a PDF file");
                return ExitCode::FAILURE;
            }
            PathBuf::from(output)
        }
        None => derive_output_path(input_path),
    };

    let settings = match config::load_settings_for_input(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Failed to load settings for {input_arg}: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Directory inputs are filtered by extension; a single file goes to the
    // decoder as-is and fails there if it is not an image.
    let mut image_files: Vec<PathBuf> = if input_path.is_dir() {
        discovery::find_image_files(input_path)
    } else {
        vec![input_path.to_path_buf()]
    };

    if image_files.is_empty() {
        eprintln!("ERROR: No image files found in {input_arg}");
        return ExitCode::FAILURE;
    }

    sort_image_files(&mut image_files);

    let page_count = image_files.len();
    tracing::info!(
        pages = page_count,
        "converting {} -> {}",
        input_path.display(),
        output_path.display()
    );

    let assemble_config = AssembleConfig {
        parallel_workers: settings.parallel_workers,
        compression_level: settings.compression_level,
    };
    let progress = TerminalProgress::new(page_count);

    let pdf_bytes = match assemble(&image_files, &assemble_config, &progress) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output_path, pdf_bytes) {
        eprintln!("ERROR: Failed to write {}: {e}", output_path.display());
        return ExitCode::FAILURE;
    }

    eprintln!(
        "OK: {} -> {} ({} pages)",
        input_path.display(),
        output_path.display(),
        page_count
    );
    ExitCode::SUCCESS
}

/// Check whether a path ends in a .pdf extension (case-insensitive).
fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Derive the output PDF path when -o is not given.
///
/// Directory input: `<dir>/<dirname>.pdf` inside the directory itself.
/// File input: the PDF lands next to the file, named after the containing
/// directory.
fn derive_output_path(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.join(format!("{}.pdf", path_stem(input)))
    } else {
        let parent = match input.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        parent.join(format!("{}.pdf", path_stem(parent)))
    }
}

/// Final path component for output naming. Lexical paths like `.` or `/`
/// have none, so fall back to the canonical path, then to a fixed name.
fn path_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            std::fs::canonicalize(path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "output".to_string())
}
