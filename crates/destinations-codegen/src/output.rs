use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use thiserror::Error as ThisError;

///
/// OutputError
///

#[derive(Debug, ThisError)]
pub enum OutputError {
    #[error("file '{path}' was already created in this pass")]
    AlreadyCreated { path: String },

    #[error("cannot write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

///
/// CodeOutput
///
/// File-creation capability supplied by the host build. `source_ids`
/// identify the inputs a file was derived from, for incremental builds.
///

pub trait CodeOutput {
    fn create_file(
        &mut self,
        name: &str,
        package_name: &str,
        extension: &str,
        source_ids: &[String],
    ) -> Result<Box<dyn Write + '_>, OutputError>;
}

///
/// GeneratedFile
///
/// A fully rendered file held in memory until the whole pass succeeded.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    pub name: String,
    pub package_name: String,
    pub extension: String,
    pub source_ids: Vec<String>,
    pub content: String,
}

impl GeneratedFile {
    /// Slash separated path relative to the output root.
    #[must_use]
    pub fn relative_path(&self) -> String {
        relative_path(&self.package_name, &self.name, &self.extension)
    }
}

/// Flush buffered files to the output, in order. Path clashes are detected
/// before the first file is created.
pub fn write_files(files: &[GeneratedFile], output: &mut dyn CodeOutput) -> Result<(), OutputError> {
    let mut seen = BTreeSet::new();
    for file in files {
        let path = file.relative_path();
        if !seen.insert(path.clone()) {
            return Err(OutputError::AlreadyCreated { path });
        }
    }

    for file in files {
        let mut sink = output.create_file(
            &file.name,
            &file.package_name,
            &file.extension,
            &file.source_ids,
        )?;
        sink.write_all(file.content.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|source| OutputError::Io {
                path: file.relative_path(),
                source,
            })?;
    }

    Ok(())
}

fn relative_path(package_name: &str, name: &str, extension: &str) -> String {
    let mut path = package_name.replace('.', "/");
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(name);
    path.push('.');
    path.push_str(extension);

    path
}

///
/// MemoryOutput
///

#[derive(Debug, Default)]
pub struct MemoryOutput {
    files: BTreeMap<String, Vec<u8>>,
    sources: BTreeMap<String, Vec<String>>,
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a file by its relative path, if it was written as UTF-8.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    #[must_use]
    pub fn source_ids(&self, path: &str) -> Option<&[String]> {
        self.sources.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl CodeOutput for MemoryOutput {
    fn create_file(
        &mut self,
        name: &str,
        package_name: &str,
        extension: &str,
        source_ids: &[String],
    ) -> Result<Box<dyn Write + '_>, OutputError> {
        let path = relative_path(package_name, name, extension);
        if self.files.contains_key(&path) {
            return Err(OutputError::AlreadyCreated { path });
        }
        self.sources.insert(path.clone(), source_ids.to_vec());

        Ok(Box::new(self.files.entry(path).or_default()))
    }
}

///
/// DirOutput
///
/// Writes files under a root directory using the package path layout.
/// Existing files are overwritten, so a failed pass can simply be rerun.
///

#[derive(Debug)]
pub struct DirOutput {
    root: PathBuf,
    packages_written: Vec<String>,
}

impl DirOutput {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packages_written: Vec::new(),
        }
    }

    #[must_use]
    pub fn packages_written(&self) -> &[String] {
        &self.packages_written
    }
}

impl CodeOutput for DirOutput {
    fn create_file(
        &mut self,
        name: &str,
        package_name: &str,
        extension: &str,
        _source_ids: &[String],
    ) -> Result<Box<dyn Write + '_>, OutputError> {
        let relative = relative_path(package_name, name, extension);
        let path = self.root.join(&relative);
        let io_err = |source: io::Error| OutputError::Io {
            path: relative.clone(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let file = File::create(&path).map_err(io_err)?;
        self.packages_written.push(package_name.to_string());

        Ok(Box::new(io::BufWriter::new(file)))
    }
}
