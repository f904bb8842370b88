use crate::{
    Error,
    config::CodeGenConfig,
    context::ProcessContext,
    destination::DestinationMapper,
    graph::GraphMapper,
    log::{Logger, TracingLogger},
    markers,
    path::{activity_paths, composable_paths},
    serializer::TypeSerializerRegistry,
    sub_module::read_sub_modules,
    symbol::Resolver,
};
use destinations_codegen::{CodeGenSettings, CodeGenerator, CodeOutput, write_files};
use destinations_schema::{node::NavModel, validate::validate_model};
use std::collections::BTreeMap;

///
/// ProcessOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProcessOutcome {
    /// No destination was found; nothing was written.
    NothingFound,

    Generated {
        package_name: String,
        /// Relative paths of the written files, in write order.
        files: Vec<String>,
    },
}

///
/// Processor
///
/// One processing pass: collect, map, validate, then generate and write.
/// Nothing is written unless every stage succeeds.
///

#[derive(Clone, Debug, Default)]
pub struct Processor {
    config: CodeGenConfig,
}

impl Processor {
    /// Build from the raw option map handed over by the host build.
    pub fn new(options: &BTreeMap<String, String>) -> Result<Self, Error> {
        Ok(Self::with_config(CodeGenConfig::parse(options)?))
    }

    #[must_use]
    pub const fn with_config(config: CodeGenConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CodeGenConfig {
        &self.config
    }

    /// Run a pass, logging through `tracing`.
    pub fn process(
        &self,
        resolver: &dyn Resolver,
        output: &mut dyn CodeOutput,
    ) -> Result<ProcessOutcome, Error> {
        let logger = TracingLogger::new(self.config.debug);

        self.process_with_logger(resolver, &logger, output)
    }

    pub fn process_with_logger(
        &self,
        resolver: &dyn Resolver,
        logger: &dyn Logger,
        output: &mut dyn CodeOutput,
    ) -> Result<ProcessOutcome, Error> {
        let ctx = ProcessContext::new(resolver, logger, &self.config);

        let Some(model) = build_model(&ctx)? else {
            logger.info("no destinations found, nothing to generate");
            return Ok(ProcessOutcome::NothingFound);
        };

        if let Err(errors) = validate_model(&model) {
            for err in errors.errors() {
                logger.error(&err.to_string());
            }
            return Err(errors.into());
        }

        let package_name = self.config.resolve_package_name(declared_packages(&model));
        let generator = CodeGenerator::new(CodeGenSettings {
            package_name: package_name.clone(),
            module_name: self.config.module_name.clone(),
        });

        let files = generator.generate(&model);
        write_files(&files, output)?;

        logger.info(&format!(
            "generated {} files for {} destinations and {} nav graphs into '{package_name}'",
            files.len(),
            model.destinations.len(),
            model.nav_graphs.len()
        ));

        Ok(ProcessOutcome::Generated {
            package_name,
            files: files.iter().map(|f| f.relative_path()).collect(),
        })
    }
}

// None when the unit declares neither a destination nor a graph
fn build_model(ctx: &ProcessContext<'_>) -> Result<Option<NavModel>, Error> {
    let mut paths = composable_paths(ctx)?;
    paths.extend(activity_paths(ctx)?);
    let graphs = GraphMapper::collect(ctx)?;
    if paths.is_empty() && graphs.is_empty() {
        return Ok(None);
    }

    let serializers = TypeSerializerRegistry::collect(ctx)?;
    let destinations = DestinationMapper::new(ctx, &serializers, &graphs).map_all(&paths)?;
    let nav_graphs = graphs.map(ctx, &destinations)?;
    let sub_modules = read_sub_modules(ctx)?;

    ctx.logger.debug(&format!(
        "assembled {} destinations, {} nav graphs, {} serializers and {} sub modules",
        destinations.len(),
        nav_graphs.len(),
        serializers.len(),
        sub_modules.len()
    ));

    Ok(Some(NavModel::new(
        destinations,
        nav_graphs,
        serializers.serializers(),
        sub_modules,
    )))
}

// packages of every local destination and declared graph; the built-in root
// graph lives in the library package
fn declared_packages(model: &NavModel) -> impl Iterator<Item = &str> {
    let graphs = model
        .nav_graphs
        .iter()
        .filter(|g| g.ty.qualified_name != markers::ROOT_NAV_GRAPH)
        .map(|g| g.ty.package_name());

    model
        .destinations
        .iter()
        .map(|d| d.target.package_name())
        .chain(graphs)
}
