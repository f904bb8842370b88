//! Kotlin source generation for an assembled, validated [`NavModel`].
//!
//! Generation is pure: files are rendered into memory and only handed to a
//! [`CodeOutput`] by [`write_files`] once every file rendered successfully.

mod destination;
mod module_registry;
mod nav_args;
mod nav_graphs;
mod nav_type;
mod output;
mod writer;

pub use output::{CodeOutput, DirOutput, GeneratedFile, MemoryOutput, OutputError, write_files};

use destinations_schema::{
    CORE_PACKAGE_NAME,
    node::{DestinationInfo, NavModel, SubModuleInfo},
    types::Importable,
};

pub(crate) const GENERATED_HEADER: &str =
    "// Generated by destinations-codegen. Do not edit: changes are overwritten on the next build.";

pub(crate) const KOTLIN_EXTENSION: &str = "kt";

/// A declaration of the navigation core library, by path below its root package.
pub(crate) fn core_type(path: &str) -> Importable {
    Importable::from_qualified(&format!("{CORE_PACKAGE_NAME}.{path}"))
}

///
/// CodeGenSettings
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeGenSettings {
    /// Base package of every generated file.
    pub package_name: String,

    /// Set when this module publishes its graphs to other modules.
    pub module_name: Option<String>,
}

///
/// CodeGenerator
///

#[derive(Clone, Debug)]
pub struct CodeGenerator {
    settings: CodeGenSettings,
}

impl CodeGenerator {
    #[must_use]
    pub const fn new(settings: CodeGenSettings) -> Self {
        Self { settings }
    }

    /// Render every file for the model. Output order and content depend only
    /// on the model and settings.
    #[must_use]
    pub fn generate(&self, model: &NavModel) -> Vec<GeneratedFile> {
        let builder = FileBuilder::new(&self.settings, model);
        let mut files = Vec::new();

        for dest in &model.destinations {
            files.push(destination::generate(&builder, dest));
        }
        files.extend(nav_type::generate(&builder));
        files.extend(nav_args::generate(&builder));
        files.push(nav_graphs::generate(&builder));
        files.extend(module_registry::generate(&builder));

        tracing::debug!(
            package = %self.settings.package_name,
            files = files.len(),
            "rendered navigation sources"
        );

        files
    }

    /// The navigation surface this module publishes to other modules.
    #[must_use]
    pub fn module_info(&self, model: &NavModel) -> SubModuleInfo {
        FileBuilder::new(&self.settings, model).module_info()
    }
}

///
/// FileBuilder
///
/// Shared lookups for the individual file generators.
///

pub(crate) struct FileBuilder<'a> {
    pub(crate) settings: &'a CodeGenSettings,
    pub(crate) model: &'a NavModel,
}

impl<'a> FileBuilder<'a> {
    pub(crate) const fn new(settings: &'a CodeGenSettings, model: &'a NavModel) -> Self {
        Self { settings, model }
    }

    pub(crate) fn package(&self) -> &str {
        &self.settings.package_name
    }

    pub(crate) fn sub_package(&self, name: &str) -> String {
        format!("{}.{name}", self.settings.package_name)
    }

    /// Generated object for a destination.
    pub(crate) fn destination_importable(&self, dest: &DestinationInfo) -> Importable {
        Importable::new(
            dest.name.clone(),
            format!("{}.{}", self.sub_package("destinations"), dest.name),
        )
    }

    /// True when a navargs package is generated: local destinations declare
    /// arguments or a dependency module publishes its own.
    pub(crate) fn has_nav_args_package(&self) -> bool {
        self.model
            .destinations
            .iter()
            .any(|d| !d.arguments.is_empty())
            || self
                .model
                .sub_modules
                .iter()
                .any(|module| module.has_nav_args_package)
    }

    pub(crate) fn module_info(&self) -> SubModuleInfo {
        let public_result_senders = self
            .model
            .destinations
            .iter()
            .filter_map(|dest| {
                let sender = dest.result_sender.as_ref()?;
                Some(destinations_schema::node::DestinationResultSenderInfo {
                    destination: self.destination_importable(dest).qualified_name,
                    result_type: sender.result_type.importable.qualified_name.clone(),
                    is_result_nullable: sender.result_type.is_nullable,
                    result_nav_type: sender.nav_type.reference(self.package()).qualified_name,
                })
            })
            .collect();

        SubModuleInfo {
            name: self.settings.module_name.clone(),
            gen_package_name: self.settings.package_name.clone(),
            has_nav_args_package: self.has_nav_args_package(),
            top_level_graphs: self
                .model
                .top_level_graphs()
                .map(destinations_schema::node::NavGraphInfo::property_name)
                .collect(),
            public_result_senders,
        }
    }
}
