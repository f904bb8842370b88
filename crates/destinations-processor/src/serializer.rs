use crate::{
    context::ProcessContext,
    markers,
    symbol::{Declaration, DeclarationKind, TypeRef},
};
use destinations_schema::{
    error::NavError,
    node::NavTypeSerializer,
    types::{ClassKind, Importable},
};
use std::collections::BTreeMap;

///
/// TypeSerializerRegistry
///
/// User serializers for custom argument types, keyed by the qualified name
/// of the type they serialize.
///

#[derive(Clone, Debug, Default)]
pub struct TypeSerializerRegistry {
    by_type: BTreeMap<String, NavTypeSerializer>,
}

impl TypeSerializerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every declaration carrying the serializer annotation.
    pub fn collect(ctx: &ProcessContext<'_>) -> Result<Self, NavError> {
        let mut registry = Self::new();
        let declarations: Vec<Declaration> = ctx
            .resolver
            .declarations_annotated_with(markers::NAV_TYPE_SERIALIZER)
            .collect();

        for decl in &declarations {
            let serializer = read_serializer(ctx, decl)?;
            ctx.logger.debug(&format!(
                "registered nav type serializer '{}' for '{}'",
                serializer.serializer_type, serializer.generic_type
            ));
            registry.register(serializer)?;
        }

        Ok(registry)
    }

    /// Add a serializer; a second serializer for the same type is rejected.
    pub fn register(&mut self, serializer: NavTypeSerializer) -> Result<(), NavError> {
        let key = serializer.generic_type.qualified_name.clone();
        if let Some(existing) = self.by_type.get(&key) {
            return Err(NavError::setup(
                &serializer.serializer_type.qualified_name,
                format!(
                    "'{key}' already has nav type serializer '{}'",
                    existing.serializer_type
                ),
            ));
        }
        self.by_type.insert(key, serializer);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&NavTypeSerializer> {
        self.by_type.get(qualified_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Serializers ordered by serialized type.
    #[must_use]
    pub fn serializers(&self) -> Vec<NavTypeSerializer> {
        self.by_type.values().cloned().collect()
    }
}

fn read_serializer(
    ctx: &ProcessContext<'_>,
    decl: &Declaration,
) -> Result<NavTypeSerializer, NavError> {
    let class_kind = match decl.kind {
        DeclarationKind::Class => ClassKind::Class,
        DeclarationKind::Object => ClassKind::Object,
        _ => {
            return Err(NavError::setup(
                &decl.qualified_name,
                "type serializers must be either class or object",
            ));
        }
    };

    let supertype = ctx
        .resolver
        .resolve_supertypes(decl)
        .into_iter()
        .find(|ty| ty.qualified_name == markers::NAV_TYPE_SERIALIZER_SUPERTYPE)
        .ok_or_else(|| {
            NavError::setup(
                &decl.qualified_name,
                "type serializers must implement DestinationsNavTypeSerializer",
            )
        })?;

    let generic_type = supertype
        .arguments
        .first()
        .and_then(|ty| serialized_type(ctx, ty))
        .ok_or_else(|| {
            NavError::setup(
                &decl.qualified_name,
                "type serializer has an issue with its type argument",
            )
        })?;

    Ok(NavTypeSerializer {
        class_kind,
        serializer_type: decl.importable(),
        generic_type,
        source_ids: decl.source_ids(),
    })
}

// aliases resolve to their class; types unknown to the resolver are taken as written
fn serialized_type(ctx: &ProcessContext<'_>, ty: &TypeRef) -> Option<Importable> {
    if ctx.resolver.resolve_declaration(&ty.qualified_name).is_none() {
        return Some(ty.importable());
    }

    ctx.resolver.resolve_class(ty).map(|class| class.importable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::CodeGenConfig,
        log::RecordingLogger,
        symbol::{Annotation, MemoryResolver, Resolver},
    };

    fn serializer_decl(name: &str, kind: DeclarationKind, serialized: &str) -> Declaration {
        let mut decl = Declaration::new(name, kind);
        decl.annotations
            .push(Annotation::new(markers::NAV_TYPE_SERIALIZER));
        decl.supertypes.push(
            TypeRef::new(markers::NAV_TYPE_SERIALIZER_SUPERTYPE)
                .with_arguments(vec![TypeRef::new(serialized)]),
        );
        decl
    }

    fn collect(resolver: &dyn Resolver) -> Result<TypeSerializerRegistry, NavError> {
        let logger = RecordingLogger::new(false);
        let config = CodeGenConfig::default();

        TypeSerializerRegistry::collect(&ProcessContext::new(resolver, &logger, &config))
    }

    #[test]
    fn indexes_by_serialized_type() {
        let resolver = MemoryResolver::new().with(serializer_decl(
            "app.nav.ColorSerializer",
            DeclarationKind::Object,
            "app.model.Color",
        ));

        let registry = collect(&resolver).expect("registry");
        let found = registry.get("app.model.Color").expect("registered");
        assert_eq!(found.class_kind, ClassKind::Object);
        assert_eq!(found.serializer_type.simple_name, "ColorSerializer");
        assert!(registry.get("app.model.Size").is_none());
    }

    #[test]
    fn alias_argument_resolves_to_class() {
        let resolver = MemoryResolver::new()
            .with(Declaration::new("app.model.Color", DeclarationKind::Class))
            .with({
                let mut alias = Declaration::new("app.model.Tint", DeclarationKind::TypeAlias);
                alias.aliased = Some(TypeRef::new("app.model.Color"));
                alias
            })
            .with(serializer_decl(
                "app.nav.TintSerializer",
                DeclarationKind::Class,
                "app.model.Tint",
            ));

        let registry = collect(&resolver).expect("registry");
        assert!(registry.get("app.model.Color").is_some());
    }

    #[test]
    fn duplicate_serializers_are_rejected() {
        let resolver = MemoryResolver::new()
            .with(serializer_decl("app.A", DeclarationKind::Object, "app.Color"))
            .with(serializer_decl("app.B", DeclarationKind::Object, "app.Color"));

        let err = collect(&resolver).expect_err("duplicate must fail");
        assert!(err.is_setup());
        assert_eq!(err.declaration, "app.B");
    }

    #[test]
    fn interfaces_and_missing_supertype_fail() {
        let interface = MemoryResolver::new().with(serializer_decl(
            "app.I",
            DeclarationKind::Interface,
            "app.Color",
        ));
        assert!(collect(&interface)
            .expect_err("interface")
            .message
            .contains("class or object"));

        let mut bare = Declaration::new("app.Bare", DeclarationKind::Object);
        bare.annotations
            .push(Annotation::new(markers::NAV_TYPE_SERIALIZER));
        let missing = MemoryResolver::new().with(bare);
        assert!(collect(&missing)
            .expect_err("no supertype")
            .message
            .contains("DestinationsNavTypeSerializer"));
    }
}
