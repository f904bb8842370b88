mod argument;
mod deep_link;
mod destination;
mod nav_graph;
mod serializer;
mod sub_module;

pub use argument::*;
pub use deep_link::*;
pub use destination::*;
pub use nav_graph::*;
pub use serializer::*;
pub use sub_module::*;

use crate::types::Importable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// NavModel
///
/// Everything the code generator consumes for one processing pass.
/// Collections are kept in a canonical order so generation is repeatable.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NavModel {
    pub destinations: Vec<DestinationInfo>,
    pub nav_graphs: Vec<NavGraphInfo>,
    pub serializers: Vec<NavTypeSerializer>,
    pub sub_modules: Vec<SubModuleInfo>,
}

impl NavModel {
    /// Build a model with canonical ordering applied.
    #[must_use]
    pub fn new(
        destinations: Vec<DestinationInfo>,
        nav_graphs: Vec<NavGraphInfo>,
        serializers: Vec<NavTypeSerializer>,
        sub_modules: Vec<SubModuleInfo>,
    ) -> Self {
        let mut model = Self {
            destinations,
            nav_graphs,
            serializers,
            sub_modules,
        };
        model.sort();

        model
    }

    fn sort(&mut self) {
        self.destinations.sort_by(|a, b| a.name.cmp(&b.name));
        self.nav_graphs.sort_by(|a, b| a.route.cmp(&b.route));
        self.serializers
            .sort_by(|a, b| a.generic_type.cmp(&b.generic_type));
        self.sub_modules
            .sort_by(|a, b| a.gen_package_name.cmp(&b.gen_package_name));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty() && self.nav_graphs.is_empty()
    }

    #[must_use]
    pub fn graph(&self, ty: &Importable) -> Option<&NavGraphInfo> {
        self.nav_graphs.iter().find(|g| &g.ty == ty)
    }

    #[must_use]
    pub fn destination(&self, name: &str) -> Option<&DestinationInfo> {
        self.destinations.iter().find(|d| d.name == name)
    }

    pub fn destinations_of<'a>(
        &'a self,
        graph: &'a Importable,
    ) -> impl Iterator<Item = &'a DestinationInfo> + 'a {
        self.destinations.iter().filter(move |d| &d.nav_graph == graph)
    }

    pub fn nested_graphs_of<'a>(
        &'a self,
        graph: &'a Importable,
    ) -> impl Iterator<Item = &'a NavGraphInfo> + 'a {
        self.nav_graphs
            .iter()
            .filter(move |g| g.parent.as_ref() == Some(graph))
    }

    pub fn top_level_graphs(&self) -> impl Iterator<Item = &NavGraphInfo> {
        self.nav_graphs.iter().filter(|g| g.parent.is_none())
    }

    /// Graphs ordered children-first, so each graph follows every graph it
    /// nests. Graphs caught in a parent cycle are left out.
    #[must_use]
    pub fn graphs_children_first(&self) -> Vec<&NavGraphInfo> {
        let mut ordered = Vec::new();
        let mut done = BTreeSet::new();

        for root in self.top_level_graphs() {
            self.push_children_first(root, &mut done, &mut ordered);
        }

        ordered
    }

    fn push_children_first<'a>(
        &'a self,
        graph: &'a NavGraphInfo,
        done: &mut BTreeSet<&'a str>,
        ordered: &mut Vec<&'a NavGraphInfo>,
    ) {
        if !done.insert(graph.ty.qualified_name.as_str()) {
            return;
        }
        for child in self.nested_graphs_of(&graph.ty) {
            self.push_children_first(child, done, ordered);
        }
        ordered.push(graph);
    }

    /// Every nav type that needs a generated nav type file, one entry per
    /// value type, ordered by that type. Each entry carries the source ids of
    /// the destinations using it and of its serializer, if any.
    #[must_use]
    pub fn generated_nav_types(&self) -> Vec<GeneratedNavType<'_>> {
        let mut by_type: BTreeMap<&Importable, GeneratedNavType<'_>> = BTreeMap::new();

        for dest in &self.destinations {
            let used = dest
                .arguments
                .iter()
                .map(|a| &a.nav_type)
                .chain(dest.result_sender.as_ref().map(|r| &r.nav_type));

            for nav_type in used {
                let (base, as_list) = match nav_type {
                    NavType::List(inner) => (inner.as_ref(), true),
                    other => (other, false),
                };
                let Some(ty) = base.generated_for() else {
                    continue;
                };
                let entry = by_type.entry(ty).or_insert_with(|| GeneratedNavType {
                    nav_type: base,
                    as_list: false,
                    source_ids: BTreeSet::new(),
                });
                entry.as_list |= as_list;
                entry.source_ids.extend(dest.source_ids.iter().map(String::as_str));
                if let NavType::Custom(serializer) = base {
                    entry
                        .source_ids
                        .extend(serializer.source_ids.iter().map(String::as_str));
                }
            }
        }

        by_type.into_values().collect()
    }

    /// Originating source ids of the whole model, sorted and deduped.
    #[must_use]
    pub fn all_source_ids(&self) -> Vec<String> {
        let ids: BTreeSet<_> = self
            .destinations
            .iter()
            .flat_map(|d| d.source_ids.iter())
            .chain(self.nav_graphs.iter().flat_map(|g| g.source_ids.iter()))
            .cloned()
            .collect();

        ids.into_iter().collect()
    }
}

///
/// GeneratedNavType
///

#[derive(Clone, Debug)]
pub struct GeneratedNavType<'a> {
    pub nav_type: &'a NavType,

    /// Also used as a list element.
    pub as_list: bool,

    pub source_ids: BTreeSet<&'a str>,
}
