use crate::prelude::*;

///
/// DestinationInfo
///
/// One navigable target: a composable function or an activity class.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DestinationInfo {
    /// Generated object name, e.g. `ProfileScreenDestination`.
    pub name: String,
    pub target: Importable,
    pub kind: DestinationKind,
    pub base_route: String,
    pub nav_graph: Importable,

    #[serde(default)]
    pub is_start: bool,

    #[serde(default)]
    pub arguments: Vec<NavArgument>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_args_class: Option<Importable>,

    #[serde(default)]
    pub deep_links: Vec<DeepLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_sender: Option<ResultSender>,

    #[serde(default)]
    pub source_ids: Vec<String>,
}

impl DestinationInfo {
    /// Route template: mandatory arguments as path segments, the rest as
    /// query parameters.
    #[must_use]
    pub fn route_template(&self) -> String {
        let mut route = self.base_route.clone();

        for arg in self.arguments.iter().filter(|a| a.is_mandatory()) {
            route.push_str(&format!("/{{{}}}", arg.name));
        }

        let optional: Vec<_> = self
            .arguments
            .iter()
            .filter(|a| !a.is_mandatory())
            .map(|a| format!("{0}={{{0}}}", a.name))
            .collect();
        if !optional.is_empty() {
            route.push('?');
            route.push_str(&optional.join("&"));
        }

        route
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&NavArgument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub const fn is_activity(&self) -> bool {
        matches!(self.kind, DestinationKind::Activity(_))
    }
}

///
/// DestinationKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DestinationKind {
    Composable,
    Activity(ActivityInfo),
}

///
/// ActivityInfo
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActivityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

///
/// ResultSender
///
/// Result a destination can send back to its caller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultSender {
    pub result_type: TypeInfo,
    pub nav_type: NavType,
}
