use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Unique identifier for a registered input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

impl SourceId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Which side of a header/implementation pair a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Header,
    Implementation,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "h" | "hpp" | "hxx" => Some(FileKind::Header),
            "cpp" | "cc" | "cxx" | "c++" => Some(FileKind::Implementation),
            _ => None,
        }
    }
}

/// An input file with its contents, normalized to `\n` line endings.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: SourceId,
    pub path: PathBuf,
    pub content: String,
    pub kind: FileKind,
}

impl SourceFile {
    pub fn new(id: SourceId, path: PathBuf, content: String, kind: FileKind) -> Self {
        let content = crate::normalize_line_endings(&content);
        Self {
            id,
            path,
            content,
            kind,
        }
    }

    /// File name without directory or extension; used as the base name
    /// of generated output files.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Registry of all input files for a conversion run.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: RwLock<Vec<SourceFile>>,
    path_to_id: RwLock<FxHashMap<PathBuf, SourceId>>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: String) -> miette::Result<SourceId> {
        let path = path.as_ref().to_path_buf();

        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileKind::from_extension)
            .ok_or_else(|| miette::miette!("Unsupported file extension: {:?}", path))?;

        let mut files = self.files.write().unwrap();
        let mut path_to_id = self.path_to_id.write().unwrap();

        let id = SourceId(files.len() as u32);
        let file = SourceFile::new(id, path.clone(), content, kind);
        files.push(file);
        path_to_id.insert(path, id);

        Ok(id)
    }

    pub fn get(&self, id: SourceId) -> Option<SourceFile> {
        let files = self.files.read().unwrap();
        files.get(id.0 as usize).cloned()
    }

    pub fn get_by_path(&self, path: impl AsRef<Path>) -> Option<SourceFile> {
        let path_to_id = self.path_to_id.read().unwrap();
        let id = path_to_id.get(path.as_ref())?;
        self.get(*id)
    }

    pub fn files_of_kind(&self, kind: FileKind) -> Vec<SourceFile> {
        let files = self.files.read().unwrap();
        files.iter().filter(|f| f.kind == kind).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
