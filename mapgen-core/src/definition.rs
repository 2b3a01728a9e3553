//! Input definition files and the paths derived from them.

use std::path::{Path, PathBuf};

/// Naming rules for the files that sit next to a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Extension of generated source files, without the dot.
    pub extension: String,
    /// Marker inserted between stem and extension to locate an import template.
    pub template_marker: String,
    /// Base name of the consolidated magic number registry.
    pub registry_name: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            extension: "ts".to_string(),
            template_marker: "imports".to_string(),
            registry_name: "magic-numbers".to_string(),
        }
    }
}

impl Layout {
    /// `defs/common.xml` → `defs/common.ts`
    pub fn artifact_path(&self, file: &DefinitionFile) -> PathBuf {
        file.path.with_extension(&self.extension)
    }

    /// `defs/common.xml` → `defs/common.imports.ts`
    pub fn template_path(&self, file: &DefinitionFile) -> PathBuf {
        file.path.with_file_name(format!(
            "{}.{}.{}",
            file.module_name, self.template_marker, self.extension
        ))
    }

    /// Registry artifact placed in the directory of `first`.
    pub fn registry_path(&self, first: &DefinitionFile) -> PathBuf {
        first
            .dir()
            .join(format!("{}.{}", self.registry_name, self.extension))
    }
}

/// A definition file supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    path: PathBuf,
    module_name: String,
}

impl DefinitionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let module_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, module_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Directory holding the file (empty for a bare file name).
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// File name for progress output.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_is_stem() {
        let file = DefinitionFile::new("defs/ardupilotmega.xml");
        assert_eq!(file.module_name(), "ardupilotmega");
        assert_eq!(file.display_name(), "ardupilotmega.xml");
    }

    #[test]
    fn test_artifact_path_substitutes_extension() {
        let layout = Layout::default();
        let file = DefinitionFile::new("defs/common.xml");
        assert_eq!(layout.artifact_path(&file), PathBuf::from("defs/common.ts"));
    }

    #[test]
    fn test_template_path_inserts_marker() {
        let layout = Layout::default();
        let file = DefinitionFile::new("defs/common.xml");
        assert_eq!(
            layout.template_path(&file),
            PathBuf::from("defs/common.imports.ts")
        );
    }

    #[test]
    fn test_registry_path_uses_first_dir() {
        let layout = Layout::default();
        let file = DefinitionFile::new("defs/minimal.xml");
        assert_eq!(
            layout.registry_path(&file),
            PathBuf::from("defs/magic-numbers.ts")
        );
    }

    #[test]
    fn test_bare_file_name_has_empty_dir() {
        let layout = Layout::default();
        let file = DefinitionFile::new("minimal.xml");
        assert_eq!(file.dir(), Path::new(""));
        assert_eq!(
            layout.registry_path(&file),
            PathBuf::from("magic-numbers.ts")
        );
        assert_eq!(
            layout.template_path(&file),
            PathBuf::from("minimal.imports.ts")
        );
    }

    #[test]
    fn test_custom_layout() {
        let layout = Layout {
            extension: "py".to_string(),
            template_marker: "prelude".to_string(),
            registry_name: "crc_extra".to_string(),
        };
        let file = DefinitionFile::new("d/common.xml");
        assert_eq!(layout.artifact_path(&file), PathBuf::from("d/common.py"));
        assert_eq!(layout.template_path(&file), PathBuf::from("d/common.prelude.py"));
        assert_eq!(layout.registry_path(&file), PathBuf::from("d/crc_extra.py"));
    }
}
