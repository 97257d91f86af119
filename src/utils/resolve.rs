//! Path and input argument resolution.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

/// Resolve an optional repository path argument, expanding `~` and
/// defaulting to the current directory.
pub fn resolve_repo_path(arg: Option<&str>) -> Result<PathBuf> {
    match arg {
        Some(raw) => Ok(PathBuf::from(shellexpand::tilde(raw).as_ref())),
        None => std::env::current_dir()
            .map_err(|e| Error::internal_io(e.to_string(), Some("current dir".to_string()))),
    }
}

/// Read a JSON input argument: `-` means stdin, anything else is a file path.
pub fn read_input(arg: &str, operation: &str) -> Result<String> {
    if arg == "-" {
        return io::read_stdin(operation);
    }

    let expanded = shellexpand::tilde(arg);
    io::read_file(Path::new(expanded.as_ref()), operation)
}
