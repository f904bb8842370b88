//! Build-time navigation model: destinations, graphs, argument types and the
//! cross-module registry surface, plus the model-wide validation that runs
//! before any code is generated.

pub mod error;
pub mod node;
pub mod types;
pub mod validate;

/// Package of the navigation runtime the generated code links against.
pub const CORE_PACKAGE_NAME: &str = "com.ramcosta.composedestinations";

/// Synthetic package holding the per-module registry markers.
pub const MODULE_REGISTRY_PACKAGE: &str = "_generated._ramcosta._composedestinations._moduleregistry";

/// Prefix of the marker declaration emitted into [`MODULE_REGISTRY_PACKAGE`].
pub const MODULE_REGISTRY_PREFIX: &str = "_ModuleRegistry_";

/// Prefix of the annotation class carrying a module's registry info.
pub const MODULE_INFO_PREFIX: &str = "_Info_";

/// Prefix of the annotation class carrying one public result sender.
pub const RESULT_INFO_PREFIX: &str = "_Destination_Result_Info_";

/// Deep link placeholder replaced by the destination's full route template.
pub const FULL_ROUTE_PLACEHOLDER: &str = "@ramcosta.destinations.fullroute@";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::{ErrorKind, ErrorTree, NavError},
        node::*,
        types::{ClassKind, Importable, Primitive, TypeInfo},
    };
    pub use serde::{Deserialize, Serialize};
}
