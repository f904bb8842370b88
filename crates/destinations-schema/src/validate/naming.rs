use crate::prelude::*;
use std::collections::BTreeMap;

/// Destination names, routes, graph property names and generated nav type
/// names must be unique across the whole module.
pub fn validate_unique_names(model: &NavModel, errs: &mut ErrorTree) {
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    let mut routes: BTreeMap<&str, &str> = BTreeMap::new();
    let mut properties: BTreeMap<String, &str> = BTreeMap::new();

    for dest in &model.destinations {
        let decl = dest.target.qualified_name.as_str();

        if let Some(prev) = names.insert(dest.name.as_str(), decl) {
            err!(
                errs,
                decl,
                "duplicate destination name '{}' for '{prev}' and '{decl}'",
                dest.name
            );
        }
        check_route(&dest.base_route, decl, &mut routes, errs);
    }

    for graph in &model.nav_graphs {
        let decl = graph.ty.qualified_name.as_str();
        check_route(&graph.route, decl, &mut routes, errs);

        let property = graph.property_name();
        if let Some(prev) = properties.insert(property.clone(), graph.route.as_str()) {
            err!(
                errs,
                decl,
                "nav graph routes '{prev}' and '{}' both become the NavGraphs property '{property}'",
                graph.route
            );
        }
    }

    validate_nav_type_names(model, errs);
}

// generated nav type files are named after the value type's simple name
fn validate_nav_type_names(model: &NavModel, errs: &mut ErrorTree) {
    let mut by_simple: BTreeMap<&str, &str> = BTreeMap::new();

    for entry in model.generated_nav_types() {
        let Some(ty) = entry.nav_type.generated_for() else {
            continue;
        };
        if let Some(prev) = by_simple.insert(ty.simple_name.as_str(), ty.qualified_name.as_str()) {
            err!(
                errs,
                &ty.qualified_name,
                "argument types '{prev}' and '{}' would both generate '{}NavType'",
                ty.qualified_name,
                ty.simple_name
            );
        }
    }
}

fn check_route<'a>(
    route: &'a str,
    decl: &'a str,
    routes: &mut BTreeMap<&'a str, &'a str>,
    errs: &mut ErrorTree,
) {
    if let Err(msg) = validate_route(route) {
        err!(errs, decl, "{msg}");
    }
    if let Some(prev) = routes.insert(route, decl) {
        err!(errs, decl, "route '{route}' is used by both '{prev}' and '{decl}'");
    }
}

/// A base route is non-empty and carries no argument syntax of its own.
pub(crate) fn validate_route(route: &str) -> Result<(), String> {
    if route.trim().is_empty() {
        return Err("route is empty".to_string());
    }
    if let Some(c) = route.chars().find(|c| matches!(c, '{' | '}' | '?' | '&' | ' ')) {
        return Err(format!("route '{route}' contains reserved character '{c}'"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_argument_syntax() {
        assert!(validate_route("").is_err(), "empty routes should fail");
        assert!(validate_route("profile/{id}").is_err());
        assert!(validate_route("search?q").is_err());
    }

    fn graph(name: &str, route: &str) -> NavGraphInfo {
        NavGraphInfo {
            ty: Importable::from_qualified(&format!("app.{name}")),
            route: route.to_string(),
            start: StartRoute::Destination("HomeDestination".to_string()),
            parent: None,
            is_parent_start: false,
            is_nav_host_graph: true,
            default: false,
            default_start_args: Vec::new(),
            source_ids: Vec::new(),
        }
    }

    fn screen(target: &str, arg_type: &str) -> DestinationInfo {
        DestinationInfo {
            name: format!("{target}Destination"),
            target: Importable::from_qualified(&format!("app.{target}")),
            kind: DestinationKind::Composable,
            base_route: target.to_lowercase(),
            nav_graph: Importable::from_qualified("app.MainGraph"),
            is_start: false,
            arguments: vec![NavArgument {
                name: "value".to_string(),
                ty: TypeInfo::new(Importable::from_qualified(arg_type), false),
                nav_type: NavType::Parcelable(Importable::from_qualified(arg_type)),
                default_value: None,
            }],
            nav_args_class: None,
            deep_links: Vec::new(),
            result_sender: None,
            source_ids: Vec::new(),
        }
    }

    #[test]
    fn graph_property_names_must_differ() {
        let model = NavModel::new(
            Vec::new(),
            vec![graph("MainAppGraph", "main_app"), graph("OtherGraph", "main-app")],
            Vec::new(),
            Vec::new(),
        );
        let mut errs = ErrorTree::new();

        validate_unique_names(&model, &mut errs);
        assert_eq!(errs.len(), 1, "got: {errs}");
        assert!(errs.mentions("NavGraphs property 'mainApp'"), "got: {errs}");
    }

    #[test]
    fn nav_types_sharing_a_simple_name_fail() {
        let model = NavModel::new(
            vec![screen("Account", "a.User"), screen("Profile", "b.User")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let mut errs = ErrorTree::new();

        validate_unique_names(&model, &mut errs);
        assert_eq!(errs.len(), 1, "got: {errs}");
        assert!(errs.mentions("'a.User' and 'b.User'"), "got: {errs}");
    }

    #[test]
    fn accepts_plain_routes() {
        assert!(validate_route("profile_screen").is_ok());
        assert!(validate_route("settings/main").is_ok());
    }
}
