use crate::{
    context::ProcessContext,
    markers,
    symbol::{AnnotationValue, Declaration, DeclarationKind, Resolver, TypeRef},
};
use destinations_schema::{
    error::NavError,
    node::{DestinationInfo, NavGraphInfo, StartRoute, default_graph_route},
    types::Importable,
};
use std::collections::BTreeMap;

///
/// GraphDecl
///
/// A graph as declared, before its start entry is known.
///

#[derive(Clone, Debug)]
struct GraphDecl {
    ty: Importable,
    route: String,
    parent: Option<Importable>,
    is_parent_start: bool,
    is_nav_host_graph: bool,
    default: bool,
    source_ids: Vec<String>,
}

///
/// GraphMapper
///
/// Reads graph annotation classes and, once destinations are known, turns
/// them into complete [`NavGraphInfo`]s.
///

#[derive(Debug)]
pub struct GraphMapper {
    decls: Vec<GraphDecl>,
    default_host: Option<Importable>,
}

impl GraphMapper {
    /// Collect every declared graph and host graph.
    pub fn collect(ctx: &ProcessContext<'_>) -> Result<Self, NavError> {
        let hosts: Vec<Declaration> = ctx
            .resolver
            .declarations_annotated_with(markers::NAV_HOST_GRAPH)
            .filter(|d| d.kind == DeclarationKind::AnnotationClass)
            .collect();
        let nested: Vec<Declaration> = ctx
            .resolver
            .declarations_annotated_with(markers::NAV_GRAPH)
            .filter(|d| d.kind == DeclarationKind::AnnotationClass)
            .collect();

        let mut decls = Vec::new();
        let mut default_host: Option<Importable> = None;

        for decl in &hosts {
            if decl.annotation(markers::NAV_GRAPH).is_some() {
                return Err(NavError::setup(
                    &decl.qualified_name,
                    "a graph cannot be both a nav host graph and a nested nav graph",
                ));
            }
            let graph = host_graph(ctx.resolver, decl);
            if graph.default {
                if let Some(existing) = &default_host {
                    return Err(NavError::setup(
                        &decl.qualified_name,
                        format!("multiple default nav host graphs: '{existing}' and '{}'", graph.ty),
                    ));
                }
                default_host = Some(graph.ty.clone());
            }
            decls.push(graph);
        }

        let fallback_parent =
            default_host.clone().unwrap_or_else(|| Importable::from_qualified(markers::ROOT_NAV_GRAPH));
        for decl in &nested {
            decls.push(nested_graph(ctx.resolver, decl, &fallback_parent));
        }

        ctx.logger.debug(&format!(
            "found {} nav host graphs and {} nested nav graphs",
            hosts.len(),
            nested.len()
        ));

        Ok(Self {
            decls,
            default_host,
        })
    }

    /// True when the unit declares no graph of its own.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// The graph destinations without an explicit graph belong to.
    #[must_use]
    pub fn default_graph(&self) -> Importable {
        self.default_host
            .clone()
            .unwrap_or_else(|| Importable::from_qualified(markers::ROOT_NAV_GRAPH))
    }

    /// Graph a destination belongs to, given the graph it names, if any.
    #[must_use]
    pub fn owning_graph(&self, declared: Option<&TypeRef>) -> Importable {
        declared.map_or_else(|| self.default_graph(), TypeRef::importable)
    }

    /// Complete every graph: synthesise the built-in root graph when needed,
    /// attach default start arguments and resolve each start entry.
    pub fn map(
        mut self,
        ctx: &ProcessContext<'_>,
        destinations: &[DestinationInfo],
    ) -> Result<Vec<NavGraphInfo>, NavError> {
        self.add_root_if_needed(destinations);
        self.check_parents()?;
        let mut start_args = self.default_start_args(ctx)?;

        let mut graphs = Vec::with_capacity(self.decls.len());
        for decl in &self.decls {
            let start = self.start_of(decl, destinations)?;
            graphs.push(NavGraphInfo {
                ty: decl.ty.clone(),
                route: decl.route.clone(),
                start,
                parent: decl.parent.clone(),
                is_parent_start: decl.is_parent_start,
                is_nav_host_graph: decl.is_nav_host_graph,
                default: decl.default,
                default_start_args: start_args
                    .remove(&decl.ty.qualified_name)
                    .unwrap_or_default(),
                source_ids: decl.source_ids.clone(),
            });
        }

        Ok(graphs)
    }

    fn is_declared(&self, ty: &Importable) -> bool {
        self.decls.iter().any(|d| &d.ty == ty)
    }

    fn add_root_if_needed(&mut self, destinations: &[DestinationInfo]) {
        let root = Importable::from_qualified(markers::ROOT_NAV_GRAPH);
        if self.is_declared(&root) {
            return;
        }

        let referenced = destinations.iter().any(|d| d.nav_graph == root)
            || self.decls.iter().any(|d| d.parent.as_ref() == Some(&root));
        if !referenced {
            return;
        }

        self.decls.push(GraphDecl {
            route: default_graph_route(&root.simple_name),
            ty: root,
            parent: None,
            is_parent_start: false,
            is_nav_host_graph: true,
            default: self.default_host.is_none(),
            source_ids: Vec::new(),
        });
    }

    fn check_parents(&self) -> Result<(), NavError> {
        for decl in &self.decls {
            if let Some(parent) = &decl.parent
                && !self.is_declared(parent)
            {
                return Err(NavError::setup(
                    &decl.ty.qualified_name,
                    format!("parent nav graph '{parent}' cannot be resolved"),
                ));
            }
        }

        Ok(())
    }

    // properties holding start arguments, grouped by the host graph they target
    fn default_start_args(
        &self,
        ctx: &ProcessContext<'_>,
    ) -> Result<BTreeMap<String, Vec<Importable>>, NavError> {
        let mut by_graph: BTreeMap<String, Vec<Importable>> = BTreeMap::new();
        let properties = ctx
            .resolver
            .declarations_annotated_with(markers::NAV_HOST_DEFAULT_START_ARGS)
            .filter(|d| d.kind == DeclarationKind::Property);

        for property in properties {
            let graph = property
                .annotation(markers::NAV_HOST_DEFAULT_START_ARGS)
                .and_then(|a| a.type_arguments.first())
                .map(TypeRef::importable)
                .ok_or_else(|| {
                    NavError::setup(
                        &property.qualified_name,
                        "default start arguments must name their nav host graph",
                    )
                })?;

            let is_host = self
                .decls
                .iter()
                .any(|d| d.ty == graph && d.is_nav_host_graph);
            if !is_host {
                return Err(NavError::setup(
                    &property.qualified_name,
                    format!("default start arguments target '{graph}' which is not a nav host graph"),
                ));
            }

            by_graph
                .entry(graph.qualified_name)
                .or_default()
                .push(property.importable());
        }

        for args in by_graph.values_mut() {
            args.sort();
        }

        Ok(by_graph)
    }

    fn start_of(
        &self,
        decl: &GraphDecl,
        destinations: &[DestinationInfo],
    ) -> Result<StartRoute, NavError> {
        let mut starts: Vec<StartRoute> = destinations
            .iter()
            .filter(|d| d.nav_graph == decl.ty && d.is_start)
            .map(|d| StartRoute::Destination(d.name.clone()))
            .collect();
        starts.extend(
            self.decls
                .iter()
                .filter(|g| g.parent.as_ref() == Some(&decl.ty) && g.is_parent_start)
                .map(|g| StartRoute::NavGraph(g.ty.clone())),
        );

        match starts.len() {
            1 => Ok(starts.remove(0)),
            0 => Err(NavError::setup(
                &decl.ty.qualified_name,
                format!(
                    "nav graph '{}' has no start destination; mark one destination or nested graph with start = true",
                    decl.route
                ),
            )),
            _ => {
                let names: Vec<String> = starts
                    .iter()
                    .map(|s| match s {
                        StartRoute::Destination(name) => name.clone(),
                        StartRoute::NavGraph(ty) => ty.qualified_name.clone(),
                    })
                    .collect();
                Err(NavError::setup(
                    &decl.ty.qualified_name,
                    format!(
                        "nav graph '{}' has multiple start destinations: {}",
                        decl.route,
                        names.join(", ")
                    ),
                ))
            }
        }
    }
}

fn route_of(resolver: &dyn Resolver, decl: &Declaration, annotation: &str) -> String {
    decl.annotation(annotation)
        .and_then(|a| resolver.annotation_argument(a, "route"))
        .and_then(AnnotationValue::as_str)
        .filter(|route| !route.is_empty())
        .map_or_else(|| default_graph_route(decl.simple_name()), str::to_string)
}

fn host_graph(resolver: &dyn Resolver, decl: &Declaration) -> GraphDecl {
    let default = decl
        .annotation(markers::NAV_HOST_GRAPH)
        .and_then(|a| resolver.annotation_argument(a, "default"))
        .and_then(AnnotationValue::as_bool)
        .unwrap_or(false);

    GraphDecl {
        ty: decl.importable(),
        route: route_of(resolver, decl, markers::NAV_HOST_GRAPH),
        parent: None,
        is_parent_start: false,
        is_nav_host_graph: true,
        default,
        source_ids: decl.source_ids(),
    }
}

fn nested_graph(resolver: &dyn Resolver, decl: &Declaration, fallback_parent: &Importable) -> GraphDecl {
    let annotation = decl.annotation(markers::NAV_GRAPH);
    let parent = annotation
        .and_then(|a| a.type_arguments.first())
        .map_or_else(|| fallback_parent.clone(), TypeRef::importable);
    let is_parent_start = annotation
        .and_then(|a| resolver.annotation_argument(a, "start"))
        .and_then(AnnotationValue::as_bool)
        .unwrap_or(false);

    GraphDecl {
        ty: decl.importable(),
        route: route_of(resolver, decl, markers::NAV_GRAPH),
        parent: Some(parent),
        is_parent_start,
        is_nav_host_graph: false,
        default: false,
        source_ids: decl.source_ids(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::CodeGenConfig,
        log::RecordingLogger,
        symbol::{Annotation, MemoryResolver},
    };
    use destinations_schema::node::DestinationKind;

    fn host(name: &str, default: bool) -> Declaration {
        let mut decl = Declaration::new(name, DeclarationKind::AnnotationClass);
        decl.annotations.push(
            Annotation::new(markers::NAV_HOST_GRAPH)
                .with_argument("default", AnnotationValue::Bool(default)),
        );
        decl
    }

    fn nested(name: &str, parent: Option<&str>, start: bool) -> Declaration {
        let mut annotation =
            Annotation::new(markers::NAV_GRAPH).with_argument("start", AnnotationValue::Bool(start));
        if let Some(parent) = parent {
            annotation = annotation.with_type_argument(TypeRef::new(parent));
        }
        let mut decl = Declaration::new(name, DeclarationKind::AnnotationClass);
        decl.annotations.push(annotation);
        decl
    }

    fn dest(name: &str, graph: &str, is_start: bool) -> DestinationInfo {
        DestinationInfo {
            name: format!("{name}Destination"),
            target: Importable::from_qualified(&format!("app.{name}")),
            kind: DestinationKind::Composable,
            base_route: name.to_lowercase(),
            nav_graph: Importable::from_qualified(graph),
            is_start,
            arguments: Vec::new(),
            nav_args_class: None,
            deep_links: Vec::new(),
            result_sender: None,
            source_ids: Vec::new(),
        }
    }

    fn map(
        resolver: &dyn Resolver,
        destinations: &[DestinationInfo],
    ) -> Result<Vec<NavGraphInfo>, NavError> {
        let logger = RecordingLogger::new(false);
        let config = CodeGenConfig::default();
        let ctx = ProcessContext::new(resolver, &logger, &config);

        GraphMapper::collect(&ctx)?.map(&ctx, destinations)
    }

    #[test]
    fn single_host_graph_with_start_destination() {
        let resolver = MemoryResolver::new().with(host("app.MainGraph", true));
        let graphs = map(
            &resolver,
            &[
                dest("ProfileScreen", "app.MainGraph", true),
                dest("SettingsScreen", "app.MainGraph", false),
            ],
        )
        .expect("graphs");

        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].route, "main");
        assert_eq!(
            graphs[0].start,
            StartRoute::Destination("ProfileScreenDestination".to_string())
        );
    }

    #[test]
    fn root_graph_is_synthesised_as_default() {
        let resolver = MemoryResolver::new();
        let graphs = map(&resolver, &[dest("Home", markers::ROOT_NAV_GRAPH, true)]).expect("graphs");

        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].route, "root");
        assert!(graphs[0].default);
        assert!(graphs[0].is_nav_host_graph);
    }

    #[test]
    fn nested_graph_without_type_argument_joins_default_host() {
        let resolver = MemoryResolver::new()
            .with(host("app.MainGraph", true))
            .with(nested("app.SettingsGraph", None, false));
        let graphs = map(
            &resolver,
            &[
                dest("Home", "app.MainGraph", true),
                dest("Settings", "app.SettingsGraph", true),
            ],
        )
        .expect("graphs");

        let settings = graphs.iter().find(|g| g.route == "settings").expect("settings");
        assert_eq!(
            settings.parent.as_ref().map(|p| p.qualified_name.as_str()),
            Some("app.MainGraph")
        );
    }

    #[test]
    fn zero_or_two_starts_fail() {
        let resolver = MemoryResolver::new().with(host("app.MainGraph", true));

        let none = map(&resolver, &[dest("A", "app.MainGraph", false)]).expect_err("no start");
        assert!(none.message.contains("no start destination"));

        let two = map(
            &resolver,
            &[dest("A", "app.MainGraph", true), dest("B", "app.MainGraph", true)],
        )
        .expect_err("two starts");
        assert!(two.message.contains("multiple start destinations"));
        assert_eq!(two.declaration, "app.MainGraph");
    }

    #[test]
    fn two_default_hosts_fail() {
        let resolver = MemoryResolver::new()
            .with(host("app.AGraph", true))
            .with(host("app.BGraph", true));

        let err = map(&resolver, &[]).expect_err("two defaults");
        assert!(err.message.contains("multiple default nav host graphs"));
    }

    #[test]
    fn unresolvable_parent_fails() {
        let resolver = MemoryResolver::new()
            .with(host("app.MainGraph", true))
            .with(nested("app.ChildGraph", Some("app.MissingGraph"), true));

        let err = map(&resolver, &[dest("A", "app.MainGraph", true)]).expect_err("missing parent");
        assert!(err.message.contains("cannot be resolved"));
    }

    #[test]
    fn default_start_args_are_grouped_by_host() {
        let mut property = Declaration::new("app.nav.mainStartArgs", DeclarationKind::Property);
        property.annotations.push(
            Annotation::new(markers::NAV_HOST_DEFAULT_START_ARGS)
                .with_type_argument(TypeRef::new("app.MainGraph")),
        );
        let resolver = MemoryResolver::new()
            .with(host("app.MainGraph", true))
            .with(property);

        let graphs = map(&resolver, &[dest("A", "app.MainGraph", true)]).expect("graphs");
        assert_eq!(
            graphs[0].default_start_args,
            vec![Importable::from_qualified("app.nav.mainStartArgs")]
        );
    }
}
