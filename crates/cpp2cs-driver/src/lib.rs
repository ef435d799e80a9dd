//! Conversion driver: file discovery, parsing, reconciliation and
//! output writing for one conversion run.

mod reconcile;

pub use reconcile::{reconcile, ConvertedType};

use cpp2cs_codegen::{ClassGenerator, InterfaceGenerator};
use cpp2cs_common::{ConvertError, FileKind, SourceMap};
use cpp2cs_model::{HeaderFileModel, SourceFileModel};
use cpp2cs_parser::{HeaderParser, SourceParser};
use miette::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Output directory created under the source directory when none is
/// given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "Generated_CS";

#[derive(Debug)]
pub struct ConversionSummary {
    pub headers: usize,
    pub implementations: usize,
    pub types: usize,
    pub written: Vec<PathBuf>,
}

/// Orchestrates a single conversion run. Registered inputs accumulate
/// in the source map, so use one driver per run.
pub struct Driver {
    source_map: SourceMap,
    header_parser: HeaderParser,
    source_parser: SourceParser,
    classes: ClassGenerator,
    interfaces: InterfaceGenerator,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            source_map: SourceMap::new(),
            header_parser: HeaderParser::new(),
            source_parser: SourceParser::new(),
            classes: ClassGenerator::new(),
            interfaces: InterfaceGenerator::new(),
        }
    }

    /// Convert every header/implementation pair found under
    /// `source_dir` (recursively) into C# files in `output_dir`.
    pub fn convert_directory(&self, source_dir: &Path, output_dir: &Path) -> Result<ConversionSummary> {
        self.convert(source_dir, output_dir, None)
    }

    /// Convert only the named files (base names with extension, e.g.
    /// `Sample.h`). Names that match nothing are reported and skipped.
    pub fn convert_files(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        names: &[String],
    ) -> Result<ConversionSummary> {
        self.convert(source_dir, output_dir, Some(names))
    }

    fn convert(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        only: Option<&[String]>,
    ) -> Result<ConversionSummary> {
        if !source_dir.is_dir() {
            return Err(ConvertError::MissingSourceDir {
                path: source_dir.display().to_string(),
            }
            .into());
        }

        let mut paths = Vec::new();
        discover(source_dir, &mut paths)?;
        paths.sort();
        if let Some(names) = only {
            for name in names {
                let supported = Path::new(name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .and_then(FileKind::from_extension)
                    .is_some();
                if !supported {
                    warn!(file = %name, "requested file is not a .h/.cpp file; skipping");
                    continue;
                }
                let known = paths
                    .iter()
                    .any(|p| p.file_name().and_then(|f| f.to_str()) == Some(name.as_str()));
                if !known {
                    warn!(file = %name, "requested file not found under the source directory");
                }
            }
            paths.retain(|p| {
                p.file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|f| names.iter().any(|n| n == f))
            });
        }

        for path in &paths {
            // An unreadable file skips, it does not abort the run.
            match fs::read_to_string(path) {
                Ok(content) => {
                    self.source_map.add_file(path, content)?;
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to read input file; skipping");
                }
            }
        }

        let headers: Vec<HeaderFileModel> = self
            .source_map
            .files_of_kind(FileKind::Header)
            .iter()
            .map(|f| self.header_parser.parse(&f.stem(), &f.content))
            .collect();
        let sources: Vec<SourceFileModel> = self
            .source_map
            .files_of_kind(FileKind::Implementation)
            .iter()
            .map(|f| self.source_parser.parse(&f.stem(), &f.content))
            .collect();
        let header_count = headers.len();
        let source_count = sources.len();
        info!(
            headers = header_count,
            implementations = source_count,
            "parsed input files"
        );

        let types = reconcile(headers, sources);

        fs::create_dir_all(output_dir).map_err(|e| ConvertError::CreateOutputDir {
            path: output_dir.display().to_string(),
            source: e,
        })?;

        // One primary file per header base name; a fragment per extra
        // target file. Keying on the header stem keeps a fragment whose
        // source file happens to share the type's name from colliding
        // with the primary file.
        let mut written = Vec::new();
        for ct in &types {
            if ct.model.is_interface() {
                let path = output_dir.join(format!("{}.cs", ct.header_stem));
                write_output(&path, &self.interfaces.generate(&ct.model))?;
                written.push(path);
                continue;
            }
            let path = output_dir.join(format!("{}.cs", ct.header_stem));
            write_output(&path, &self.classes.generate(&ct.model, &ct.header_stem))?;
            written.push(path);
            if ct.model.needs_partial() {
                for target in ct.model.target_files() {
                    if target == ct.header_stem {
                        continue;
                    }
                    let path = output_dir.join(format!("{target}.cs"));
                    write_output(&path, &self.classes.generate_fragment(&ct.model, &target))?;
                    written.push(path);
                }
            }
        }

        info!(
            types = types.len(),
            files = written.len(),
            output = %output_dir.display(),
            "conversion complete"
        );
        Ok(ConversionSummary {
            headers: header_count,
            implementations: source_count,
            types: types.len(),
            written,
        })
    }
}

fn discover(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ConvertError> {
    let entries = fs::read_dir(dir).map_err(|e| ConvertError::ReadFile {
        path: dir.display().to_string(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::ReadFile {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            discover(&path, out)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileKind::from_extension)
            .is_some()
        {
            out.push(path);
        }
    }
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<(), ConvertError> {
    fs::write(path, content).map_err(|e| ConvertError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })
}
