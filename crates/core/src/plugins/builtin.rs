//! Commands that ship with pathcopy

use crate::{
    interfaces::{Context, Plugin},
    pipeline::text,
    types::PluginId,
};

/// The built-in path representations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    FullPath,
    FileName,
    ParentPath,
    UnixPath,
    FileUri,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 5] = [
        BuiltinKind::FullPath,
        BuiltinKind::FileName,
        BuiltinKind::ParentPath,
        BuiltinKind::UnixPath,
        BuiltinKind::FileUri,
    ];

    pub fn id(self) -> PluginId {
        match self {
            BuiltinKind::FullPath => PluginId::from_u128(0x6a3b_1c57_0e2f_4d1b_9a41_53c6_f0d2_0001),
            BuiltinKind::FileName => PluginId::from_u128(0x6a3b_1c57_0e2f_4d1b_9a41_53c6_f0d2_0002),
            BuiltinKind::ParentPath => PluginId::from_u128(0x6a3b_1c57_0e2f_4d1b_9a41_53c6_f0d2_0003),
            BuiltinKind::UnixPath => PluginId::from_u128(0x6a3b_1c57_0e2f_4d1b_9a41_53c6_f0d2_0004),
            BuiltinKind::FileUri => PluginId::from_u128(0x6a3b_1c57_0e2f_4d1b_9a41_53c6_f0d2_0005),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BuiltinKind::FullPath => "Full path",
            BuiltinKind::FileName => "Name",
            BuiltinKind::ParentPath => "Parent folder path",
            BuiltinKind::UnixPath => "Unix path",
            BuiltinKind::FileUri => "File URI",
        }
    }
}

/// A built-in command
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPlugin {
    kind: BuiltinKind,
}

impl BuiltinPlugin {
    pub fn new(kind: BuiltinKind) -> Self {
        Self { kind }
    }

    pub fn all() -> impl Iterator<Item = BuiltinPlugin> {
        BuiltinKind::ALL.into_iter().map(Self::new)
    }
}

fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['\\', '/']);
    if trimmed.is_empty() { path } else { trimmed }
}

fn file_name(path: &str) -> String {
    trim_trailing_separators(path)
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or_default()
        .to_string()
}

fn parent_path(path: &str) -> String {
    let trimmed = trim_trailing_separators(path);
    match trimmed.rfind(['\\', '/']) {
        // Keep the separator when the parent is the root itself
        Some(0) => trimmed[..1].to_string(),
        Some(index) => trimmed[..index].to_string(),
        None => trimmed.to_string(),
    }
}

fn file_uri(path: &str) -> String {
    let mut uri = path.replace('\\', "/");
    text::percent_encode(&mut uri, text::is_uri_reserved);
    if let Some(unc) = uri.strip_prefix("//") {
        format!("file://{unc}")
    } else {
        format!("file:///{}", uri.trim_start_matches('/'))
    }
}

impl Plugin for BuiltinPlugin {
    fn id(&self) -> PluginId {
        self.kind.id()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn get_path(&self, path: &str, _ctx: &Context<'_>) -> String {
        match self.kind {
            BuiltinKind::FullPath => path.to_string(),
            BuiltinKind::FileName => file_name(path),
            BuiltinKind::ParentPath => parent_path(path),
            BuiltinKind::UnixPath => path.replace('\\', "/"),
            BuiltinKind::FileUri => file_uri(path),
        }
    }
}
