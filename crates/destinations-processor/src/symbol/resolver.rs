use super::{Annotation, AnnotationValue, Declaration, DeclarationKind, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

// alias chains longer than this are treated as unresolvable
const MAX_ALIAS_DEPTH: usize = 16;

///
/// Resolver
///
/// Symbol lookups the processor needs from the host compiler. Iterators may
/// be pulled more than once per pass; the processor buffers what it keeps.
///

pub trait Resolver {
    /// Declarations carrying an annotation of the given class.
    fn declarations_annotated_with(
        &self,
        annotation: &str,
    ) -> Box<dyn Iterator<Item = Declaration> + '_>;

    /// Top level declarations of a package.
    fn declarations_in_package(&self, package: &str) -> Box<dyn Iterator<Item = Declaration> + '_>;

    fn resolve_declaration(&self, qualified_name: &str) -> Option<Declaration>;

    /// Every supertype of a declaration, nearest first.
    fn resolve_supertypes(&self, decl: &Declaration) -> Vec<TypeRef> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<TypeRef> = decl.supertypes.iter().cloned().collect();

        while let Some(ty) = queue.pop_front() {
            if !seen.insert(ty.qualified_name.clone()) {
                continue;
            }
            if let Some(parent) = self.resolve_declaration(&ty.qualified_name) {
                queue.extend(parent.supertypes);
            }
            out.push(ty);
        }

        out
    }

    /// An explicitly written argument of an annotation instance.
    fn annotation_argument<'a>(
        &self,
        annotation: &'a Annotation,
        name: &str,
    ) -> Option<&'a AnnotationValue> {
        annotation.argument(name)
    }

    /// Resolve a type to its class declaration, following type aliases.
    fn resolve_class(&self, ty: &TypeRef) -> Option<Declaration> {
        let mut current = self.resolve_declaration(&ty.qualified_name)?;

        for _ in 0..MAX_ALIAS_DEPTH {
            if current.kind != DeclarationKind::TypeAlias {
                return Some(current);
            }
            let target = current.aliased.as_ref()?;
            current = self.resolve_declaration(&target.qualified_name)?;
        }

        None
    }
}

///
/// SymbolTable
///
/// JSON form of a resolver dump: `{ "declarations": [ ... ] }`.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

///
/// MemoryResolver
///

#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    declarations: Vec<Declaration>,
}

impl MemoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a symbol table dumped by a front-end.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: SymbolTable = serde_json::from_str(json)?;

        Ok(Self::from(table))
    }

    #[must_use]
    pub fn with(mut self, decl: Declaration) -> Self {
        self.insert(decl);
        self
    }

    pub fn insert(&mut self, decl: Declaration) {
        self.declarations.push(decl);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl From<SymbolTable> for MemoryResolver {
    fn from(table: SymbolTable) -> Self {
        Self {
            declarations: table.declarations,
        }
    }
}

impl Resolver for MemoryResolver {
    fn declarations_annotated_with(
        &self,
        annotation: &str,
    ) -> Box<dyn Iterator<Item = Declaration> + '_> {
        let annotation = annotation.to_string();

        Box::new(
            self.declarations
                .iter()
                .filter(move |d| d.annotations.iter().any(|a| a.ty == annotation))
                .cloned(),
        )
    }

    fn declarations_in_package(&self, package: &str) -> Box<dyn Iterator<Item = Declaration> + '_> {
        let package = package.to_string();

        Box::new(
            self.declarations
                .iter()
                .filter(move |d| d.package_name() == package)
                .cloned(),
        )
    }

    fn resolve_declaration(&self, qualified_name: &str) -> Option<Declaration> {
        self.declarations
            .iter()
            .find(|d| d.qualified_name == qualified_name)
            .cloned()
    }
}
