use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Importable
///
/// A declared type or member usable from generated code.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Importable {
    pub simple_name: String,
    pub qualified_name: String,
}

impl Importable {
    pub fn new(simple_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: qualified_name.into(),
        }
    }

    /// Build from a qualified name, taking the last segment as the simple name.
    #[must_use]
    pub fn from_qualified(qualified_name: &str) -> Self {
        let simple_name = qualified_name
            .rsplit_once('.')
            .map_or(qualified_name, |(_, simple)| simple);

        Self::new(simple_name, qualified_name)
    }

    /// Enclosing package (or enclosing class for nested declarations).
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.qualified_name
            .strip_suffix(self.simple_name.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'))
            .unwrap_or("")
    }
}

impl fmt::Display for Importable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name)
    }
}

///
/// TypeInfo
///
/// A resolved type as it appears on a parameter or result.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeInfo {
    pub importable: Importable,
    pub is_nullable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<Self>,
}

impl TypeInfo {
    #[must_use]
    pub const fn new(importable: Importable, is_nullable: bool) -> Self {
        Self {
            importable,
            is_nullable,
            type_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, type_arguments: Vec<Self>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    /// Render with simple names, e.g. `ArrayList<Int>?`.
    #[must_use]
    pub fn simple_code(&self) -> String {
        let mut code = self.importable.simple_name.clone();
        if !self.type_arguments.is_empty() {
            let args: Vec<_> = self.type_arguments.iter().map(Self::simple_code).collect();
            code.push('<');
            code.push_str(&args.join(", "));
            code.push('>');
        }
        if self.is_nullable {
            code.push('?');
        }

        code
    }

    /// Every importable referenced by this type, outermost first.
    #[must_use]
    pub fn importables(&self) -> Vec<&Importable> {
        let mut out = vec![&self.importable];
        for arg in &self.type_arguments {
            out.extend(arg.importables());
        }

        out
    }
}

///
/// ClassKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ClassKind {
    #[display("class")]
    Class,

    #[display("object")]
    Object,
}

///
/// Primitive
///
/// Argument types the navigation runtime understands natively.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum Primitive {
    Boolean,
    Float,
    Int,
    Long,
    String,
}

impl Primitive {
    pub const ALL: [Self; 5] = [
        Self::Boolean,
        Self::Float,
        Self::Int,
        Self::Long,
        Self::String,
    ];

    #[must_use]
    pub fn from_qualified(qualified_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.qualified_name() == qualified_name)
    }

    #[must_use]
    pub fn from_array_qualified(qualified_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.array_qualified_name() == qualified_name)
    }

    #[must_use]
    pub const fn qualified_name(self) -> &'static str {
        match self {
            Self::Boolean => "kotlin.Boolean",
            Self::Float => "kotlin.Float",
            Self::Int => "kotlin.Int",
            Self::Long => "kotlin.Long",
            Self::String => "kotlin.String",
        }
    }

    // kotlin has no StringArray, string arrays are Array<String>
    #[must_use]
    pub const fn array_qualified_name(self) -> &'static str {
        match self {
            Self::Boolean => "kotlin.BooleanArray",
            Self::Float => "kotlin.FloatArray",
            Self::Int => "kotlin.IntArray",
            Self::Long => "kotlin.LongArray",
            Self::String => "kotlin.Array",
        }
    }
}
