use std::collections::BTreeMap;
use thiserror::Error as ThisError;

pub const OPTION_PACKAGE_NAME: &str = "compose-destinations.codeGenPackageName";
pub const OPTION_MODULE_NAME: &str = "compose-destinations.moduleName";
pub const OPTION_DEBUG: &str = "compose-destinations.debug";

/// Used when no package is configured and declarations share no prefix.
pub const FALLBACK_PACKAGE_NAME: &str = "com.ramcosta.composedestinations.generated";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("'{value}' is not a valid package name for option 'compose-destinations.codeGenPackageName'")]
    InvalidPackageName { value: String },

    #[error("'{value}' is not a valid module name for option 'compose-destinations.moduleName'")]
    InvalidModuleName { value: String },

    #[error("option '{key}' expects 'true' or 'false', got '{value}'")]
    InvalidFlag { key: String, value: String },
}

///
/// CodeGenConfig
///
/// Processor options, as passed by the host build as string pairs.
/// Unknown keys are ignored.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CodeGenConfig {
    pub package_name: Option<String>,
    pub module_name: Option<String>,
    pub debug: bool,
}

impl CodeGenConfig {
    pub fn parse(options: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = non_blank(options, OPTION_PACKAGE_NAME) {
            if !is_package_name(value) {
                return Err(ConfigError::InvalidPackageName {
                    value: value.to_string(),
                });
            }
            config.package_name = Some(value.to_string());
        }

        if let Some(value) = non_blank(options, OPTION_MODULE_NAME) {
            if !is_module_name(value) {
                return Err(ConfigError::InvalidModuleName {
                    value: value.to_string(),
                });
            }
            config.module_name = Some(value.to_string());
        }

        if let Some(value) = non_blank(options, OPTION_DEBUG) {
            config.debug = match value {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        key: OPTION_DEBUG.to_string(),
                        value: value.to_string(),
                    });
                }
            };
        }

        Ok(config)
    }

    /// The configured package, else the longest package prefix shared by
    /// every given package.
    pub fn resolve_package_name<'a>(&self, packages: impl IntoIterator<Item = &'a str>) -> String {
        if let Some(name) = &self.package_name {
            return name.clone();
        }

        common_package(packages).unwrap_or_else(|| FALLBACK_PACKAGE_NAME.to_string())
    }
}

fn non_blank<'a>(options: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    options
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_package_name(value: &str) -> bool {
    value.split('.').all(is_identifier)
}

fn is_module_name(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn common_package<'a>(packages: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut common: Option<Vec<&str>> = None;

    for package in packages {
        let segments: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
        common = Some(match common {
            None => segments,
            Some(prev) => prev
                .iter()
                .zip(&segments)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        });
    }

    common
        .filter(|segments| !segments.is_empty())
        .map(|segments| segments.join("."))
}
