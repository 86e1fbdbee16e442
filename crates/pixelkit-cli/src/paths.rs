//! Path argument handling shared by the subcommands.

use std::path::{Path, PathBuf};

/// Strip a leading `@` that chat tools and some shells prepend to file
/// references.
pub fn clean_path(path: &Path) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_prefix('@')) {
        Some(stripped) => PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}

/// `dir/name.ext` -> `dir/name_<suffix>.ext`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut name = format!("{stem}_{suffix}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Explicit output if given, otherwise `fallback` derived from the input.
pub fn output_or(output: Option<&Path>, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    output.map(clean_path).unwrap_or_else(fallback)
}
