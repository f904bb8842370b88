use crate::{
    context::ProcessContext,
    markers,
    serializer::TypeSerializerRegistry,
    symbol::{DeclarationKind, TypeRef},
};
use destinations_schema::{error::NavError, node::NavType, types::Primitive};

const LIST_TYPES: &[&str] = &[
    "java.util.ArrayList",
    "kotlin.collections.ArrayList",
    "kotlin.collections.List",
];

///
/// NavTypeMapper
///
/// Picks how an argument type crosses the route string: a built-in
/// primitive mapping, a registered serializer, or a generated nav type
/// for enums, parcelables and serializables.
///

pub struct NavTypeMapper<'a> {
    ctx: &'a ProcessContext<'a>,
    serializers: &'a TypeSerializerRegistry,
}

impl<'a> NavTypeMapper<'a> {
    #[must_use]
    pub const fn new(ctx: &'a ProcessContext<'a>, serializers: &'a TypeSerializerRegistry) -> Self {
        Self { ctx, serializers }
    }

    /// Map the type of `argument`, declared on `owner`.
    pub fn map(&self, owner: &str, argument: &str, ty: &TypeRef) -> Result<NavType, NavError> {
        let name = ty.qualified_name.as_str();

        if let Some(primitive) = Primitive::from_array_qualified(name) {
            return map_array(owner, argument, ty, primitive);
        }
        if LIST_TYPES.contains(&name) {
            let element = ty.arguments.first().ok_or_else(|| {
                NavError::setup(
                    owner,
                    format!("argument '{argument}' is a list without an element type"),
                )
            })?;
            let element = self.map_single(owner, argument, element)?;

            return Ok(NavType::List(Box::new(element)));
        }

        self.map_single(owner, argument, ty)
    }

    fn map_single(&self, owner: &str, argument: &str, ty: &TypeRef) -> Result<NavType, NavError> {
        let name = ty.qualified_name.as_str();

        if let Some(primitive) = Primitive::from_qualified(name) {
            return Ok(NavType::Primitive(primitive));
        }
        if let Some(serializer) = self.serializers.get(name) {
            return Ok(NavType::Custom(serializer.clone()));
        }

        let unsupported = || {
            NavError::setup(
                owner,
                format!(
                    "argument '{argument}' has type '{name}' which is not a supported navigation argument type; \
                     register a nav type serializer for it"
                ),
            )
        };
        let class = self.ctx.resolver.resolve_class(ty).ok_or_else(unsupported)?;

        // an alias may point at a type that has a serializer
        if let Some(serializer) = self.serializers.get(&class.qualified_name) {
            return Ok(NavType::Custom(serializer.clone()));
        }
        if class.kind == DeclarationKind::Enum {
            return Ok(NavType::Enum(class.importable()));
        }

        let supertypes = self.ctx.resolver.resolve_supertypes(&class);
        let implements = |marker: &str| supertypes.iter().any(|t| t.qualified_name == marker);
        if implements(markers::PARCELABLE) {
            Ok(NavType::Parcelable(class.importable()))
        } else if implements(markers::SERIALIZABLE) {
            Ok(NavType::Serializable(class.importable()))
        } else {
            Err(unsupported())
        }
    }
}

fn map_array(
    owner: &str,
    argument: &str,
    ty: &TypeRef,
    primitive: Primitive,
) -> Result<NavType, NavError> {
    // Array<T> is only supported for strings
    if primitive == Primitive::String {
        let element = ty.arguments.first().map(|t| t.qualified_name.as_str());
        if element != Some(Primitive::String.qualified_name()) {
            return Err(NavError::setup(
                owner,
                format!(
                    "argument '{argument}': arrays are only supported for primitives and strings, use a list instead"
                ),
            ));
        }
    }

    Ok(NavType::PrimitiveArray(primitive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::CodeGenConfig,
        log::RecordingLogger,
        symbol::{Declaration, MemoryResolver, Resolver},
    };
    use destinations_schema::{node::NavTypeSerializer, types::{ClassKind, Importable}};

    fn map(resolver: &dyn Resolver, registry: &TypeSerializerRegistry, ty: &TypeRef) -> Result<NavType, NavError> {
        let logger = RecordingLogger::new(false);
        let config = CodeGenConfig::default();
        let ctx = ProcessContext::new(resolver, &logger, &config);

        NavTypeMapper::new(&ctx, registry).map("app.Screen", "value", ty)
    }

    fn model_resolver() -> MemoryResolver {
        MemoryResolver::new()
            .with(Declaration::new("app.Mode", DeclarationKind::Enum))
            .with({
                let mut user = Declaration::new("app.User", DeclarationKind::Class);
                user.supertypes.push(TypeRef::new(markers::PARCELABLE));
                user
            })
            .with({
                let mut blob = Declaration::new("app.Blob", DeclarationKind::Class);
                blob.supertypes.push(TypeRef::new(markers::SERIALIZABLE));
                blob
            })
            .with(Declaration::new("app.Color", DeclarationKind::Class))
    }

    #[test]
    fn primitives_arrays_and_lists() {
        let resolver = MemoryResolver::new();
        let registry = TypeSerializerRegistry::new();

        assert_eq!(
            map(&resolver, &registry, &TypeRef::new("kotlin.Int")).expect("int"),
            NavType::Primitive(Primitive::Int)
        );
        assert_eq!(
            map(&resolver, &registry, &TypeRef::new("kotlin.LongArray")).expect("long array"),
            NavType::PrimitiveArray(Primitive::Long)
        );
        let strings = TypeRef::new("kotlin.Array").with_arguments(vec![TypeRef::new("kotlin.String")]);
        assert_eq!(
            map(&resolver, &registry, &strings).expect("string array"),
            NavType::PrimitiveArray(Primitive::String)
        );
        let list = TypeRef::new("kotlin.collections.ArrayList")
            .with_arguments(vec![TypeRef::new("kotlin.Boolean")]);
        assert_eq!(
            map(&resolver, &registry, &list).expect("list"),
            NavType::List(Box::new(NavType::Primitive(Primitive::Boolean)))
        );
    }

    #[test]
    fn enums_parcelables_and_serializables() {
        let resolver = model_resolver();
        let registry = TypeSerializerRegistry::new();

        assert!(matches!(
            map(&resolver, &registry, &TypeRef::new("app.Mode")),
            Ok(NavType::Enum(_))
        ));
        assert!(matches!(
            map(&resolver, &registry, &TypeRef::new("app.User")),
            Ok(NavType::Parcelable(_))
        ));
        assert!(matches!(
            map(&resolver, &registry, &TypeRef::new("app.Blob")),
            Ok(NavType::Serializable(_))
        ));
    }

    #[test]
    fn custom_type_needs_a_serializer() {
        let resolver = model_resolver();
        let mut registry = TypeSerializerRegistry::new();

        let err = map(&resolver, &registry, &TypeRef::new("app.Color")).expect_err("unregistered");
        assert!(err.is_setup());
        assert!(err.message.contains("'value'"), "got: {err}");

        registry
            .register(NavTypeSerializer {
                class_kind: ClassKind::Object,
                serializer_type: Importable::from_qualified("app.ColorSerializer"),
                generic_type: Importable::from_qualified("app.Color"),
                source_ids: Vec::new(),
            })
            .expect("first registration");
        assert!(matches!(
            map(&resolver, &registry, &TypeRef::new("app.Color")),
            Ok(NavType::Custom(_))
        ));
    }

    #[test]
    fn arrays_of_objects_are_rejected() {
        let resolver = model_resolver();
        let registry = TypeSerializerRegistry::new();
        let users = TypeRef::new("kotlin.Array").with_arguments(vec![TypeRef::new("app.User")]);

        assert!(map(&resolver, &registry, &users).is_err());
    }
}
