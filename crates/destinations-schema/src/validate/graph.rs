use crate::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Validate graph topology: parents, cycles, start entries and defaults.
pub fn validate_graphs(model: &NavModel, errs: &mut ErrorTree) {
    let mut by_type: BTreeMap<&str, &NavGraphInfo> = BTreeMap::new();
    for graph in &model.nav_graphs {
        if by_type
            .insert(graph.ty.qualified_name.as_str(), graph)
            .is_some()
        {
            err!(errs, &graph.ty.qualified_name, "nav graph declared twice");
        }
    }

    for graph in &model.nav_graphs {
        validate_parent(graph, &by_type, errs);
        validate_start(model, graph, errs);

        if !graph.default_start_args.is_empty() && !graph.is_nav_host_graph {
            err!(
                errs,
                &graph.ty.qualified_name,
                "default start arguments can only target nav host graphs"
            );
        }
    }

    validate_acyclic(model, &by_type, errs);
    validate_single_default(model, errs);
}

fn validate_parent(
    graph: &NavGraphInfo,
    by_type: &BTreeMap<&str, &NavGraphInfo>,
    errs: &mut ErrorTree,
) {
    let decl = graph.ty.qualified_name.as_str();

    match (&graph.parent, graph.is_nav_host_graph) {
        (Some(parent), true) => {
            err!(errs, decl, "nav host graph cannot have parent '{parent}'");
        }
        (None, false) => {
            err!(errs, decl, "nested nav graph has no parent");
        }
        (Some(parent), false) if !by_type.contains_key(parent.qualified_name.as_str()) => {
            err!(errs, decl, "parent nav graph '{parent}' cannot be resolved");
        }
        _ => {}
    }
}

// the declared start must match exactly one start-marked child
fn validate_start(model: &NavModel, graph: &NavGraphInfo, errs: &mut ErrorTree) {
    let decl = graph.ty.qualified_name.as_str();

    let mut marked: Vec<String> = model
        .destinations_of(&graph.ty)
        .filter(|d| d.is_start)
        .map(|d| d.name.clone())
        .collect();
    marked.extend(
        model
            .nested_graphs_of(&graph.ty)
            .filter(|g| g.is_parent_start)
            .map(|g| g.ty.qualified_name.clone()),
    );

    match marked.len() {
        0 => err!(errs, decl, "nav graph '{}' has no start destination", graph.route),
        1 => {}
        _ => err!(
            errs,
            decl,
            "nav graph '{}' has multiple start destinations: {}",
            graph.route,
            marked.join(", ")
        ),
    }

    match &graph.start {
        StartRoute::Destination(name) => match model.destination(name) {
            Some(dest) if dest.nav_graph == graph.ty => {}
            Some(_) => err!(errs, decl, "start destination '{name}' belongs to another graph"),
            None => err!(errs, decl, "start destination '{name}' does not exist"),
        },
        StartRoute::NavGraph(ty) => match model.graph(ty) {
            Some(child) if child.parent.as_ref() == Some(&graph.ty) => {}
            Some(_) => err!(errs, decl, "start nav graph '{ty}' is not nested in this graph"),
            None => err!(errs, decl, "start nav graph '{ty}' does not exist"),
        },
    }
}

// walk every parent chain; revisiting a graph means a cycle
fn validate_acyclic(
    model: &NavModel,
    by_type: &BTreeMap<&str, &NavGraphInfo>,
    errs: &mut ErrorTree,
) {
    let mut reported = BTreeSet::new();

    for graph in &model.nav_graphs {
        let mut chain = vec![graph.ty.qualified_name.as_str()];
        let mut current = graph;

        while let Some(parent) = &current.parent {
            let parent_name = parent.qualified_name.as_str();
            if chain.contains(&parent_name) {
                let mut members = chain.clone();
                members.sort_unstable();
                if reported.insert(members) {
                    chain.push(parent_name);
                    err!(
                        errs,
                        &graph.ty.qualified_name,
                        "nav graph parent cycle: {}",
                        chain.join(" -> ")
                    );
                }
                break;
            }
            let Some(&next) = by_type.get(parent_name) else {
                break;
            };
            chain.push(parent_name);
            current = next;
        }
    }
}

fn validate_single_default(model: &NavModel, errs: &mut ErrorTree) {
    let defaults: Vec<_> = model
        .nav_graphs
        .iter()
        .filter(|g| g.default)
        .map(|g| g.ty.qualified_name.as_str())
        .collect();

    if defaults.len() > 1 {
        err!(
            errs,
            defaults[1],
            "multiple default nav host graphs: {}",
            defaults.join(", ")
        );
    }
    for graph in model.nav_graphs.iter().filter(|g| g.default) {
        if !graph.is_nav_host_graph {
            err!(
                errs,
                &graph.ty.qualified_name,
                "only nav host graphs can be default"
            );
        }
    }
}
