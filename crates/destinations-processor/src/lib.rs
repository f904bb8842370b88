//! Turns the annotated declarations of one compilation unit into a validated
//! navigation model and hands it to the code generator.

pub mod config;
pub mod context;
pub mod destination;
pub mod graph;
pub mod log;
pub mod nav_type;
pub mod path;
pub mod processor;
pub mod serializer;
pub mod sub_module;
pub mod symbol;

pub use processor::{ProcessOutcome, Processor};

use crate::config::ConfigError;
use destinations_codegen::OutputError;
use destinations_schema::error::{ErrorTree, NavError};
use thiserror::Error as ThisError;

///
/// Markers
///
/// Qualified names of the annotations and framework types the processor
/// looks for.
///

pub mod markers {
    pub const DESTINATION: &str = "com.ramcosta.composedestinations.annotation.Destination";
    pub const ACTIVITY_DESTINATION: &str =
        "com.ramcosta.composedestinations.annotation.ActivityDestination";
    pub const JAVA_ACTIVITY_DESTINATION: &str =
        "com.ramcosta.composedestinations.annotation.JavaActivityDestination";
    pub const NAV_GRAPH: &str = "com.ramcosta.composedestinations.annotation.NavGraph";
    pub const NAV_HOST_GRAPH: &str = "com.ramcosta.composedestinations.annotation.NavHostGraph";
    pub const NAV_HOST_DEFAULT_START_ARGS: &str =
        "com.ramcosta.composedestinations.annotation.NavHostDefaultStartArgs";
    pub const NAV_TYPE_SERIALIZER: &str =
        "com.ramcosta.composedestinations.annotation.NavTypeSerializer";
    pub const DEEP_LINK: &str = "com.ramcosta.composedestinations.annotation.DeepLink";

    /// Built-in host graph available without declaring one.
    pub const ROOT_NAV_GRAPH: &str = "com.ramcosta.composedestinations.annotation.RootNavGraph";

    pub const NAV_TYPE_SERIALIZER_SUPERTYPE: &str =
        "com.ramcosta.composedestinations.navargs.DestinationsNavTypeSerializer";
    pub const ACTIVITY_RESULT_SENDER: &str =
        "com.ramcosta.composedestinations.result.ActivityResultSender";
    pub const RESULT_BACK_NAVIGATOR: &str =
        "com.ramcosta.composedestinations.result.ResultBackNavigator";

    /// Parameter types supplied by the navigation runtime rather than the route.
    pub const FRAMEWORK_PARAMETERS: &[&str] = &[
        "androidx.compose.animation.AnimatedVisibilityScope",
        "androidx.compose.foundation.layout.ColumnScope",
        "androidx.navigation.NavBackStackEntry",
        "androidx.navigation.NavController",
        "androidx.navigation.NavHostController",
        "com.ramcosta.composedestinations.navigation.DestinationsNavigator",
        "com.ramcosta.composedestinations.result.OpenResultRecipient",
        RESULT_BACK_NAVIGATOR,
        "com.ramcosta.composedestinations.result.ResultRecipient",
        "com.ramcosta.composedestinations.scope.DestinationScope",
    ];

    pub const PARCELABLE: &str = "android.os.Parcelable";
    pub const SERIALIZABLE: &str = "java.io.Serializable";

    /// Class literal standing for "not set" in annotation arguments.
    pub const NOTHING: &str = "kotlin.Nothing";
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error("navigation model is invalid:\n{0}")]
    Validation(#[from] ErrorTree),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl Error {
    /// Setup and validation failures name the declaration they concern.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Self::Nav(err) => err.to_string().contains(needle),
            Self::Validation(tree) => tree.mentions(needle),
            other => other.to_string().contains(needle),
        }
    }
}
