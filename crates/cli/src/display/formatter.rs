use pathcopy_core::Plugin;

/// One line of `list` output: id, kind marker and description
pub fn format_plugin_line(plugin: &dyn Plugin) -> String {
    let marker = if plugin.pipeline().is_some() { "🔧" } else { "📋" };
    format!("{} {} {}", plugin.id(), marker, plugin.description())
}

pub fn join_paths(paths: &[String], separator: &str) -> String {
    paths.join(separator)
}

/// Split a path into its parent folder and file name, on either slash
pub fn parent_and_file(path: &str) -> (&str, &str) {
    match path.rfind(['\\', '/']) {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathcopy_core::{BuiltinKind, BuiltinPlugin};

    #[test]
    fn test_parent_and_file() {
        assert_eq!(parent_and_file(r"C:\dir\f.txt"), (r"C:\dir", "f.txt"));
        assert_eq!(parent_and_file("/etc/hosts"), ("/etc", "hosts"));
        assert_eq!(parent_and_file("bare"), ("", "bare"));
    }

    #[test]
    fn test_format_plugin_line() {
        let plugin = BuiltinPlugin::new(BuiltinKind::FullPath);
        insta::assert_snapshot!(
            format_plugin_line(&plugin),
            @"{6a3b1c57-0e2f-4d1b-9a41-53c6f0d20001} 📋 Full path"
        );
    }

    #[test]
    fn test_join_paths() {
        let paths = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_paths(&paths, ", "), "a, b");
        assert_eq!(join_paths(&[], ";"), "");
    }
}
