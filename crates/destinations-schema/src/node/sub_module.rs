use crate::prelude::*;

///
/// DestinationResultSenderInfo
///
/// A destination that sends a typed result back, as published by a module.
///

#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct DestinationResultSenderInfo {
    pub destination: String,
    pub result_type: String,
    pub is_result_nullable: bool,
    pub result_nav_type: String,
}

///
/// SubModuleInfo
///
/// The navigation surface another compilation unit exports.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubModuleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub gen_package_name: String,
    pub has_nav_args_package: bool,

    #[serde(default)]
    pub top_level_graphs: Vec<String>,

    #[serde(default)]
    pub public_result_senders: Vec<DestinationResultSenderInfo>,
}

impl SubModuleInfo {
    /// Qualified reference to one of this module's top level graphs.
    #[must_use]
    pub fn graph_reference(&self, graph: &str) -> String {
        format!("{}.NavGraphs.{graph}", self.gen_package_name)
    }
}
