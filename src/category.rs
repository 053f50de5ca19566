use crate::entry::EntryKind;

/// Presentation-only classification of an entry. Never affects ordering or
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Hidden,
    Symlink,
    Directory,
    Executable,
    Source,
    Config,
    Document,
    Archive,
    Image,
    Plain,
}

impl FileCategory {
    /// Pick the category for an entry.
    ///
    /// Precedence: hidden name, symlink, directory, any execute bit, then
    /// the (case-insensitive) extension table, then plain. `mode` is `None`
    /// when permission bits were not probed or the probe failed.
    pub fn classify(name: &str, kind: EntryKind, mode: Option<u32>) -> Self {
        if name.starts_with('.') {
            return Self::Hidden;
        }
        match kind {
            EntryKind::Symlink => return Self::Symlink,
            EntryKind::Dir     => return Self::Directory,
            _ => {}
        }
        if mode.is_some_and(|m| m & 0o111 != 0) {
            return Self::Executable;
        }
        extension_of(name)
            .and_then(|ext| Self::from_extension(&ext))
            .unwrap_or(Self::Plain)
    }

    /// Extension lookup. `ext` must already be lowercase.
    fn from_extension(ext: &str) -> Option<Self> {
        let category = match ext {
            "py" | "rs" | "c" | "h" | "cc" | "cpp" | "hpp" | "go" | "java" | "js" | "ts"
            | "rb" | "sh" | "lua" => Self::Source,
            "json" | "yaml" | "yml" | "ini" | "cfg" | "conf" | "toml" => Self::Config,
            "md" | "rst" | "txt" => Self::Document,
            "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" => Self::Archive,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "ico" => Self::Image,
            _ => return None,
        };
        Some(category)
    }

    /// The glyph printed before an entry name in icon mode.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Hidden     => "🙈",
            Self::Symlink    => "🔗",
            Self::Directory  => "📁",
            Self::Executable => "⚙️",
            Self::Source     => "📜",
            Self::Config     => "🔧",
            Self::Document   => "📝",
            Self::Archive    => "📦",
            Self::Image      => "🖼️",
            Self::Plain      => "📄",
        }
    }
}

/// Lowercased text after the last `.`, ignoring a leading dot.
fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
