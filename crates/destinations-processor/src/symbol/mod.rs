//! Language-neutral view of the declarations a host compiler exposes to the
//! processor. Front-ends translate their symbols into these types, either
//! directly through [`Resolver`] or by dumping a JSON symbol table that
//! [`MemoryResolver`] loads.

mod resolver;

pub use resolver::*;

use destinations_schema::types::{Importable, TypeInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// DeclarationKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum DeclarationKind {
    AnnotationClass,
    Class,
    Enum,
    Function,
    Interface,
    Object,
    Property,
    TypeAlias,
}

///
/// TypeRef
///
/// A type use site: qualified name, nullability and type arguments.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeRef {
    pub qualified_name: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Self>,
}

impl TypeRef {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            nullable: false,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Self>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn importable(&self) -> Importable {
        Importable::from_qualified(&self.qualified_name)
    }

    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::new(self.importable(), self.nullable)
            .with_arguments(self.arguments.iter().map(Self::type_info).collect())
    }
}

///
/// AnnotationValue
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    String(String),

    /// A class literal, e.g. `Foo::class`.
    Type(TypeRef),

    /// Qualified enum entry.
    Enum(String),
    Annotation(Annotation),
    Array(Vec<Self>),
}

impl AnnotationValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Type(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Self::Annotation(v) => Some(v),
            _ => None,
        }
    }

    /// Array elements; a single value reads as a one-element array.
    #[must_use]
    pub fn as_slice(&self) -> &[Self] {
        match self {
            Self::Array(values) => values,
            other => std::slice::from_ref(other),
        }
    }
}

///
/// Annotation
///
/// One annotation instance. Only explicitly written arguments are present;
/// absent arguments take the annotation's declared defaults.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Annotation {
    /// Qualified name of the annotation class.
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            type_arguments: Vec::new(),
            arguments: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_type_argument(mut self, ty: TypeRef) -> Self {
        self.type_arguments.push(ty);
        self
    }

    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments.get(name)
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.ty.rsplit_once('.').map_or(self.ty.as_str(), |(_, simple)| simple)
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    /// Kotlin source of the default value, when one is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

///
/// Declaration
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Declaration {
    pub qualified_name: String,
    pub kind: DeclarationKind,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    /// Function parameters or primary constructor parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Direct supertypes.
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,

    /// Target of a type alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliased: Option<TypeRef>,

    /// Identifier of the source file the declaration lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Declaration {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            annotations: Vec::new(),
            parameters: Vec::new(),
            supertypes: Vec::new(),
            aliased: None,
            source_id: None,
        }
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, simple)| simple)
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    #[must_use]
    pub fn importable(&self) -> Importable {
        Importable::from_qualified(&self.qualified_name)
    }

    /// Annotations of the given class, in declaration order.
    pub fn annotations_of<'a>(&'a self, ty: &'a str) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations.iter().filter(move |a| a.ty == ty)
    }

    #[must_use]
    pub fn annotation(&self, ty: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.ty == ty)
    }

    #[must_use]
    pub fn source_ids(&self) -> Vec<String> {
        self.source_id.iter().cloned().collect()
    }
}
