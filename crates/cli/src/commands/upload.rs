use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use photofolio_core::domain::AspectClass;
use photofolio_core::ingest::UploadFile;
use photofolio_core::{Gallery, UploadProgress};
use walkdir::WalkDir;

/// Extensions accepted when expanding a directory argument.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn run(gallery: &mut Gallery, paths: Vec<PathBuf>, folder: &str, format: &str) -> Result<()> {
    if paths.is_empty() {
        bail!("nothing to upload — pass at least one file or directory");
    }

    let format_override = parse_format(format)?;
    let files = collect_files(&paths)?;
    if files.is_empty() {
        bail!("no image files found under the given paths");
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(progress_style());
    pb.set_prefix("Ingesting");

    let report = gallery.upload(
        &files,
        folder,
        format_override,
        Some(&mut |progress| match progress {
            UploadProgress::Start { .. } => {}
            UploadProgress::FileDone { completed, .. } => {
                pb.set_position(completed as u64);
            }
            UploadProgress::Complete { .. } => {
                pb.finish_and_clear();
            }
        }),
    )?;

    println!(
        "Uploaded {} photo(s) into \"{}\".",
        report.inserted, folder
    );
    if report.evicted > 0 {
        println!(
            "Warning: the collection hit its capacity; {} oldest photo(s) were evicted.",
            report.evicted
        );
    }
    Ok(())
}

/// `auto` means classify from filename/fallback; anything else must be a
/// known aspect class name.
fn parse_format(format: &str) -> Result<Option<AspectClass>> {
    if format.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match AspectClass::parse(format) {
        Some(class) => Ok(Some(class)),
        None => bail!(
            "unknown format \"{format}\" — expected auto or one of: {}",
            AspectClass::ALL.map(|c| c.as_str()).join(", ")
        ),
    }
}

/// Expand arguments into upload files: plain files are read as-is,
/// directories are walked for image extensions.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_image_file(entry.path()) {
                    files.push(read_upload_file(entry.path())?);
                }
            }
        } else {
            files.push(read_upload_file(path)?);
        }
    }
    Ok(files)
}

fn read_upload_file(path: &Path) -> Result<UploadFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(UploadFile::new(name, bytes))
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>4}/{len:<4} {prefix:.dim}")
        .unwrap()
        .progress_chars("━╸─")
}
