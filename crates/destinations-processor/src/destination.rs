use crate::{
    context::ProcessContext,
    graph::GraphMapper,
    markers,
    nav_type::NavTypeMapper,
    path::DestinationPath,
    serializer::TypeSerializerRegistry,
    symbol::{Annotation, AnnotationValue, Declaration, DeclarationKind, Parameter, TypeRef},
};
use convert_case::{Case, Casing};
use destinations_schema::{
    error::NavError,
    node::{ActivityInfo, DeepLink, DestinationInfo, DestinationKind, NavArgument, ResultSender},
};

///
/// DestinationMapper
///
/// Builds one [`DestinationInfo`] per destination path.
///

pub struct DestinationMapper<'a> {
    ctx: &'a ProcessContext<'a>,
    nav_types: NavTypeMapper<'a>,
    graphs: &'a GraphMapper,
}

impl<'a> DestinationMapper<'a> {
    #[must_use]
    pub const fn new(
        ctx: &'a ProcessContext<'a>,
        serializers: &'a TypeSerializerRegistry,
        graphs: &'a GraphMapper,
    ) -> Self {
        Self {
            ctx,
            nav_types: NavTypeMapper::new(ctx, serializers),
            graphs,
        }
    }

    pub fn map_all(&self, paths: &[DestinationPath]) -> Result<Vec<DestinationInfo>, NavError> {
        paths.iter().map(|path| self.map(path)).collect()
    }

    pub fn map(&self, path: &DestinationPath) -> Result<DestinationInfo, NavError> {
        let target = &path.target;
        let owner = target.qualified_name.as_str();
        let is_activity = target.kind == DeclarationKind::Class;

        let nav_args_class = self.nav_args_class(path)?;
        let mut result_sender = None;
        let arguments = match &nav_args_class {
            Some(class) => self.arguments(owner, &class.parameters, &mut result_sender)?,
            // activities take arguments only through a nav args class
            None if is_activity => Vec::new(),
            None => self.arguments(owner, &target.parameters, &mut result_sender)?,
        };
        if is_activity {
            result_sender = self.activity_result(target)?;
        }

        let kind = if is_activity {
            DestinationKind::Activity(ActivityInfo {
                target_package: path.str_argument("targetPackage").map(str::to_string),
                action: path.str_argument("action").map(str::to_string),
                data_uri: path.str_argument("dataUri").map(str::to_string),
                data_type: path.str_argument("dataType").map(str::to_string),
            })
        } else {
            DestinationKind::Composable
        };

        let base_route = path
            .str_argument("route")
            .map_or_else(|| target.simple_name().to_case(Case::Snake), str::to_string);

        let info = DestinationInfo {
            name: format!("{}Destination", target.simple_name()),
            target: target.importable(),
            kind,
            base_route,
            nav_graph: self.graphs.owning_graph(path.graph_type()),
            is_start: path.bool_argument("start"),
            arguments,
            nav_args_class: nav_args_class.map(|class| class.importable()),
            deep_links: deep_links(owner, path)?,
            result_sender,
            source_ids: target.source_ids(),
        };
        self.ctx.logger.debug(&format!(
            "mapped destination '{}' with route '{}'",
            info.name,
            info.route_template()
        ));

        Ok(info)
    }

    fn nav_args_class(&self, path: &DestinationPath) -> Result<Option<Declaration>, NavError> {
        let Some(ty) = path.type_argument("navArgs") else {
            return Ok(None);
        };

        self.ctx
            .resolver
            .resolve_class(ty)
            .map(Some)
            .ok_or_else(|| {
                NavError::setup(
                    &path.target.qualified_name,
                    format!("nav args class '{}' cannot be resolved", ty.qualified_name),
                )
            })
    }

    fn arguments(
        &self,
        owner: &str,
        parameters: &[Parameter],
        result_sender: &mut Option<ResultSender>,
    ) -> Result<Vec<NavArgument>, NavError> {
        let mut arguments = Vec::new();

        for param in parameters {
            let name = param.ty.qualified_name.as_str();
            if name == markers::RESULT_BACK_NAVIGATOR {
                let result = param.ty.arguments.first().ok_or_else(|| {
                    NavError::setup(owner, format!("'{}' has no result type", param.name))
                })?;
                *result_sender = Some(self.result_sender(owner, result)?);
                continue;
            }
            if markers::FRAMEWORK_PARAMETERS.contains(&name) {
                continue;
            }
            if param.default_value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(NavError::setup(
                    owner,
                    format!("default value of argument '{}' could not be read", param.name),
                ));
            }

            arguments.push(NavArgument {
                name: param.name.clone(),
                ty: param.ty.type_info(),
                nav_type: self.nav_types.map(owner, &param.name, &param.ty)?,
                default_value: param.default_value.clone(),
            });
        }

        Ok(arguments)
    }

    fn result_sender(&self, owner: &str, result: &TypeRef) -> Result<ResultSender, NavError> {
        Ok(ResultSender {
            result_type: result.type_info(),
            nav_type: self.nav_types.map(owner, "result", result)?,
        })
    }

    fn activity_result(&self, class: &Declaration) -> Result<Option<ResultSender>, NavError> {
        let sender = self
            .ctx
            .resolver
            .resolve_supertypes(class)
            .into_iter()
            .find(|ty| ty.qualified_name == markers::ACTIVITY_RESULT_SENDER);
        let Some(sender) = sender else {
            return Ok(None);
        };

        let result = sender.arguments.first().ok_or_else(|| {
            NavError::setup(
                &class.qualified_name,
                "activity result sender has no result type",
            )
        })?;

        self.result_sender(&class.qualified_name, result).map(Some)
    }
}

fn deep_links(owner: &str, path: &DestinationPath) -> Result<Vec<DeepLink>, NavError> {
    let Some(value) = path.argument("deepLinks") else {
        return Ok(Vec::new());
    };

    value
        .as_slice()
        .iter()
        .map(|item| {
            item.as_annotation()
                .filter(|a| a.ty == markers::DEEP_LINK)
                .map(read_deep_link)
                .ok_or_else(|| NavError::setup(owner, "deepLinks must hold @DeepLink annotations"))
        })
        .collect()
}

fn read_deep_link(annotation: &Annotation) -> DeepLink {
    let text = |name: &str| {
        annotation
            .argument(name)
            .and_then(AnnotationValue::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    DeepLink {
        uri_pattern: text("uriPattern").unwrap_or_default(),
        action: text("action"),
        mime_type: text("mimeType"),
    }
}
