//! Operating system lookups used by a few pipeline elements

use std::path::Path;
use tracing::trace;

/// OS services needed by the link, environment and drive label elements.
/// Every lookup is optional; `None` makes the element a no-op.
pub trait SystemServices: Send + Sync {
    /// Target of `path` if it is a symbolic link or junction
    fn resolve_link(&self, path: &str) -> Option<String>;

    /// Snapshot of the environment variables as (name, value) pairs
    fn environment(&self) -> Vec<(String, String)>;

    /// Volume label of the drive rooted at `drive_root` (e.g. `C:\`)
    fn volume_label(&self, drive_root: &str) -> Option<String>;
}

/// [`SystemServices`] backed by the standard library
#[derive(Debug, Clone, Copy, Default)]
pub struct OsServices;

impl SystemServices for OsServices {
    fn resolve_link(&self, path: &str) -> Option<String> {
        let link = Path::new(path);
        let metadata = std::fs::symlink_metadata(link).ok()?;
        if !metadata.file_type().is_symlink() {
            return None;
        }
        let target = std::fs::read_link(link).ok()?;
        let resolved = if target.is_relative() {
            link.parent().map(|parent| parent.join(&target)).unwrap_or(target)
        } else {
            target
        };
        trace!("Resolved link {} -> {}", path, resolved.display());
        Some(resolved.to_string_lossy().into_owned())
    }

    fn environment(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn volume_label(&self, drive_root: &str) -> Option<String> {
        // Volume labels are not exposed through std
        trace!("No volume label lookup available for {}", drive_root);
        None
    }
}
