use crate::{
    context::ProcessContext,
    symbol::{Annotation, AnnotationValue, Declaration},
};
use destinations_schema::{
    MODULE_INFO_PREFIX, MODULE_REGISTRY_PACKAGE, MODULE_REGISTRY_PREFIX,
    error::NavError,
    node::{DestinationResultSenderInfo, SubModuleInfo},
};

/// Read the registries published by dependency modules.
pub fn read_sub_modules(ctx: &ProcessContext<'_>) -> Result<Vec<SubModuleInfo>, NavError> {
    let registries: Vec<Declaration> = ctx
        .resolver
        .declarations_in_package(MODULE_REGISTRY_PACKAGE)
        .filter(|d| d.simple_name().starts_with(MODULE_REGISTRY_PREFIX))
        .collect();

    let mut modules = Vec::with_capacity(registries.len());
    for registry in &registries {
        let info = registry
            .annotations
            .iter()
            .find(|a| a.simple_name().starts_with(MODULE_INFO_PREFIX))
            .ok_or_else(|| {
                NavError::setup(
                    &registry.qualified_name,
                    "module registry carries no module info annotation",
                )
            })?;

        let module = read_info(&registry.qualified_name, info)?;
        ctx.logger.debug(&format!(
            "found sub module '{}' with {} top level graphs",
            module.gen_package_name,
            module.top_level_graphs.len()
        ));
        modules.push(module);
    }

    Ok(modules)
}

fn read_info(registry: &str, info: &Annotation) -> Result<SubModuleInfo, NavError> {
    let reader = Fields { registry, annotation: info };

    let public_result_senders = reader
        .array("typeResults")
        .iter()
        .map(|value| {
            let result = value.as_annotation().ok_or_else(|| {
                NavError::setup(registry, "module info 'typeResults' must hold annotations")
            })?;
            let fields = Fields {
                registry,
                annotation: result,
            };

            Ok(DestinationResultSenderInfo {
                destination: fields.string("destination")?,
                result_type: fields.string("resultType")?,
                is_result_nullable: fields.bool("isResultNullable")?,
                result_nav_type: fields.string("resultNavType")?,
            })
        })
        .collect::<Result<Vec<_>, NavError>>()?;

    let top_level_graphs = reader
        .array("topLevelGraphs")
        .iter()
        .map(|value| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                NavError::setup(registry, "module info 'topLevelGraphs' must hold strings")
            })
        })
        .collect::<Result<Vec<_>, NavError>>()?;

    let name = reader.string("moduleName")?;

    Ok(SubModuleInfo {
        name: (!name.is_empty()).then_some(name),
        gen_package_name: reader.string("packageName")?,
        has_nav_args_package: reader.bool("hasNavArgsPackage")?,
        top_level_graphs,
        public_result_senders,
    })
}

///
/// Fields
///

struct Fields<'a> {
    registry: &'a str,
    annotation: &'a Annotation,
}

impl Fields<'_> {
    fn missing(&self, name: &str) -> NavError {
        NavError::setup(
            self.registry,
            format!(
                "'{}' is missing required argument '{name}'",
                self.annotation.simple_name()
            ),
        )
    }

    fn string(&self, name: &str) -> Result<String, NavError> {
        self.annotation
            .argument(name)
            .and_then(AnnotationValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.missing(name))
    }

    fn bool(&self, name: &str) -> Result<bool, NavError> {
        self.annotation
            .argument(name)
            .and_then(AnnotationValue::as_bool)
            .ok_or_else(|| self.missing(name))
    }

    // absent arrays read as empty
    fn array(&self, name: &str) -> &[AnnotationValue] {
        self.annotation
            .argument(name)
            .map(AnnotationValue::as_slice)
            .unwrap_or_default()
    }
}
