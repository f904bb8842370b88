use crate::prelude::*;
use convert_case::{Case, Casing};

///
/// NavGraphInfo
///
/// A named collection of destinations and nested graphs with exactly one
/// start entry. Host graphs have no parent; every other graph has one.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NavGraphInfo {
    /// The annotation class that declares the graph.
    pub ty: Importable,
    pub route: String,
    pub start: StartRoute,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Importable>,

    #[serde(default)]
    pub is_parent_start: bool,

    #[serde(default)]
    pub is_nav_host_graph: bool,

    #[serde(default)]
    pub default: bool,

    #[serde(default)]
    pub default_start_args: Vec<Importable>,

    #[serde(default)]
    pub source_ids: Vec<String>,
}

impl NavGraphInfo {
    /// Property name of the graph inside the generated `NavGraphs` object.
    #[must_use]
    pub fn property_name(&self) -> String {
        self.route.to_case(Case::Camel)
    }
}

///
/// StartRoute
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StartRoute {
    /// Generated destination name.
    Destination(String),
    NavGraph(Importable),
}

/// Default route for a graph annotation class: `SettingsNavGraph` and
/// `SettingsGraph` both become `settings`.
#[must_use]
pub fn default_graph_route(annotation_simple_name: &str) -> String {
    let trimmed = annotation_simple_name
        .strip_suffix("NavGraph")
        .or_else(|| annotation_simple_name.strip_suffix("Graph"))
        .filter(|s| !s.is_empty())
        .unwrap_or(annotation_simple_name);

    trimmed.to_case(Case::Snake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_route_strips_graph_suffix() {
        assert_eq!(default_graph_route("RootGraph"), "root");
        assert_eq!(default_graph_route("ProfileSettingsNavGraph"), "profile_settings");
        assert_eq!(default_graph_route("Main"), "main");
        assert_eq!(default_graph_route("Graph"), "graph");
    }
}
