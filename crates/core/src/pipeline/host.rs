//! Elements that consult the operating system through [`SystemServices`]

use tracing::{debug, trace};

use crate::interfaces::SystemServices;

/// Marker replaced by the volume label of the path's drive
pub const DRIVE_LABEL_MARKER: &str = "{DriveLabel}";

/// Directory variables considered when compressing a path back into
/// `%VAR%` form
const UNEXPANDABLE_VARIABLES: &[&str] = &[
    "ALLUSERSPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "PROGRAMDATA",
    "ProgramFiles",
    "ProgramFiles(x86)",
    "CommonProgramFiles",
    "SystemRoot",
    "windir",
    "USERPROFILE",
    "PUBLIC",
    "HOME",
    "TEMP",
    "TMP",
];

pub fn follow_symlink(path: &mut String, system: &dyn SystemServices) {
    if let Some(target) = system.resolve_link(path) {
        debug!("Following link {} to {}", path, target);
        *path = target;
    }
}

/// Replace the longest environment value that prefixes `path` with its
/// `%NAME%` token. The match is ASCII case-insensitive and must end on a
/// path boundary.
pub fn unexpand_environment_strings(path: &mut String, system: &dyn SystemServices) {
    let environment = system.environment();
    let best = environment
        .iter()
        .filter(|(name, _)| {
            UNEXPANDABLE_VARIABLES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
        })
        .map(|(name, value)| (name, value.trim_end_matches(['\\', '/'])))
        .filter(|(_, value)| !value.is_empty() && is_path_prefix(path, value))
        .max_by_key(|(_, value)| value.len());

    if let Some((name, value)) = best {
        trace!("Unexpanding %{}% in {}", name, path);
        path.replace_range(..value.len(), &format!("%{name}%"));
    }
}

fn is_path_prefix(path: &str, prefix: &str) -> bool {
    let Some(head) = path.get(..prefix.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(prefix)
        && matches!(path[prefix.len()..].chars().next(), None | Some('\\' | '/'))
}

/// Substitute [`DRIVE_LABEL_MARKER`] with the label of the `X:` drive the
/// path starts with. Left untouched when there is no drive or no label.
pub fn inject_drive_label(path: &mut String, system: &dyn SystemServices) {
    if !path.contains(DRIVE_LABEL_MARKER) {
        return;
    }
    let mut chars = path.chars();
    let drive = match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => letter,
        _ => {
            trace!("No drive letter in {}", path);
            return;
        }
    };
    let root = format!("{drive}:\\");
    match system.volume_label(&root) {
        Some(label) => *path = path.replace(DRIVE_LABEL_MARKER, &label),
        None => debug!("No volume label for {}", root),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fixed OS answers for tests
    #[derive(Debug, Default)]
    pub struct FakeSystem {
        pub links: HashMap<String, String>,
        pub environment: Vec<(String, String)>,
        pub labels: HashMap<String, String>,
    }

    impl SystemServices for FakeSystem {
        fn resolve_link(&self, path: &str) -> Option<String> {
            self.links.get(path).cloned()
        }

        fn environment(&self) -> Vec<(String, String)> {
            self.environment.clone()
        }

        fn volume_label(&self, drive_root: &str) -> Option<String> {
            self.labels.get(drive_root).cloned()
        }
    }

    fn windows_env() -> FakeSystem {
        FakeSystem {
            environment: vec![
                ("SystemDrive".into(), r"C:".into()),
                ("USERPROFILE".into(), r"C:\Users\Bob".into()),
                ("APPDATA".into(), r"C:\Users\Bob\AppData\Roaming".into()),
                ("ProgramFiles".into(), r"C:\Program Files".into()),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_unexpand_prefers_longest_match() {
        let mut path = r"c:\users\bob\AppData\Roaming\app\x.ini".to_string();
        unexpand_environment_strings(&mut path, &windows_env());
        assert_eq!(path, r"%APPDATA%\app\x.ini");
    }

    #[test]
    fn test_unexpand_requires_path_boundary() {
        let mut path = r"C:\Users\Bobby\file".to_string();
        unexpand_environment_strings(&mut path, &windows_env());
        assert_eq!(path, r"C:\Users\Bobby\file");

        let mut exact = r"C:\Program Files".to_string();
        unexpand_environment_strings(&mut exact, &windows_env());
        assert_eq!(exact, "%ProgramFiles%");
    }

    #[test]
    fn test_unexpand_ignores_unlisted_variables() {
        let mut path = r"C:\Windows".to_string();
        unexpand_environment_strings(&mut path, &windows_env());
        assert_eq!(path, r"C:\Windows");
    }

    #[test]
    fn test_inject_drive_label() {
        let system = FakeSystem {
            labels: HashMap::from([(r"D:\".to_string(), "Backup".to_string())]),
            ..Default::default()
        };
        let mut path = r"D:{DriveLabel}\photos".to_string();
        inject_drive_label(&mut path, &system);
        assert_eq!(path, r"D:Backup\photos");

        let mut unknown = r"E:\{DriveLabel}".to_string();
        inject_drive_label(&mut unknown, &system);
        assert_eq!(unknown, r"E:\{DriveLabel}");

        let mut unc = r"\\srv\{DriveLabel}".to_string();
        inject_drive_label(&mut unc, &system);
        assert_eq!(unc, r"\\srv\{DriveLabel}");
    }

    #[test]
    fn test_follow_symlink() {
        let system = FakeSystem {
            links: HashMap::from([("/l".to_string(), "/target".to_string())]),
            ..Default::default()
        };
        let mut path = "/l".to_string();
        follow_symlink(&mut path, &system);
        assert_eq!(path, "/target");

        let mut other = "/plain".to_string();
        follow_symlink(&mut other, &system);
        assert_eq!(other, "/plain");
    }
}
