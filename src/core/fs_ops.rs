//! Recursive copy and move helpers used while staging problem files.

use crate::utils::error::Result;
use std::ffi::OsStr;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

/// Copies every entry of `source` into the existing `destination` directory.
///
/// Files are always overwritten. A subdirectory is copied in full only when
/// `destination` has no directory of that name yet; an existing one is left
/// exactly as it is. Entries whose file name appears in `ignore` are skipped.
pub fn full_copy(source: &Path, destination: &Path, ignore: &[&str]) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let file_name = entry.file_name();

        if ignore.iter().any(|ignored| file_name.as_os_str() == OsStr::new(ignored)) {
            continue;
        }

        let source_item = entry.path();
        let destination_item = destination.join(&file_name);

        if source_item.is_dir() {
            if destination_item.is_dir() {
                tracing::debug!(
                    "Keeping existing directory {}",
                    destination_item.display()
                );
            } else {
                copy_tree(&source_item, &destination_item, false)?;
            }
        } else {
            copy_file(&source_item, &destination_item)?;
        }
    }

    Ok(())
}

/// Moves `source` into the `destination` directory.
///
/// With `clobber`, an existing file of the same name inside `destination` is
/// removed first. An existing target is otherwise an `AlreadyExists` error.
/// When `destination` is not a directory, `source` is renamed onto it.
pub fn move_path(source: &Path, destination: &Path, clobber: bool) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no final path segment", source.display()),
        )
    })?;

    let new_path = destination.join(file_name);
    if clobber && new_path.is_file() {
        tracing::debug!("Removing {} before move", new_path.display());
        fs::remove_file(&new_path)?;
    }

    let target = if destination.is_dir() {
        if new_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Destination path {} already exists", new_path.display()),
            )
            .into());
        }
        new_path
    } else {
        destination.to_path_buf()
    };

    rename_or_copy(source, &target)?;
    Ok(target)
}

/// Rename, falling back to copy + delete (e.g. across filesystem boundaries).
fn rename_or_copy(from: &Path, to: &Path) -> Result<()> {
    let rename_err = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if fs::symlink_metadata(from).is_err() {
        return Err(rename_err.into());
    }

    tracing::debug!(
        "Rename of {} failed ({}), copying instead",
        from.display(),
        rename_err
    );
    copy_then_remove(from, to)
}

/// Symlinks are recreated rather than followed.
fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    let file_type = fs::symlink_metadata(from)?.file_type();

    if file_type.is_symlink() {
        copy_symlink(from, to)?;
        fs::remove_file(from)?;
    } else if file_type.is_dir() {
        copy_tree(from, to, true)?;
        fs::remove_dir_all(from)?;
    } else {
        copy_file(from, to)?;
        fs::remove_file(from)?;
    }

    Ok(())
}

/// Copies a whole directory tree into a fresh `destination`.
///
/// With `symlinks`, links inside the tree are recreated as links; otherwise
/// their targets are copied.
fn copy_tree(source: &Path, destination: &Path, symlinks: bool) -> Result<()> {
    fs::create_dir(destination)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let destination_path = destination.join(entry.file_name());

        if symlinks && entry.file_type()?.is_symlink() {
            copy_symlink(&source_path, &destination_path)?;
        } else if source_path.is_dir() {
            copy_tree(&source_path, &destination_path, symlinks)?;
        } else {
            copy_file(&source_path, &destination_path)?;
        }
    }

    copy_metadata(source, destination)
}

#[cfg(unix)]
fn copy_symlink(source: &Path, destination: &Path) -> Result<()> {
    std::os::unix::fs::symlink(fs::read_link(source)?, destination)?;
    Ok(())
}

#[cfg(windows)]
fn copy_symlink(source: &Path, destination: &Path) -> Result<()> {
    let target = fs::read_link(source)?;
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(target, destination)?;
    } else {
        std::os::windows::fs::symlink_file(target, destination)?;
    }
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(source: &Path, _destination: &Path) -> Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot recreate symlink {}", source.display()),
    )
    .into())
}

/// Copies file contents and permission bits, then the timestamps.
fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination)?;
    copy_metadata(source, destination)
}

fn copy_metadata(source: &Path, destination: &Path) -> Result<()> {
    let metadata = fs::metadata(source)?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    match open_for_times(destination) {
        Ok(file) => file.set_times(times)?,
        // Not every platform can open a directory handle.
        Err(e) if metadata.is_dir() => {
            tracing::debug!("Skipping timestamps for {}: {}", destination.display(), e)
        }
        Err(e) => return Err(e.into()),
    }
    fs::set_permissions(destination, metadata.permissions())?;

    Ok(())
}

#[cfg(unix)]
fn open_for_times(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> io::Result<File> {
    File::options().write(true).open(path)
}
