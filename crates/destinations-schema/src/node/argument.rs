use crate::{CORE_PACKAGE_NAME, prelude::*};
use convert_case::{Case, Casing};

///
/// NavArgument
///
/// One navigation argument, in declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NavArgument {
    pub name: String,
    pub ty: TypeInfo,
    pub nav_type: NavType,

    /// Kotlin source of the declared default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl NavArgument {
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.ty.is_nullable
    }

    /// Mandatory arguments become path segments, the rest query parameters.
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        !self.ty.is_nullable && self.default_value.is_none()
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

///
/// NavType
///
/// How an argument value crosses the route string boundary.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NavType {
    Primitive(Primitive),
    PrimitiveArray(Primitive),
    List(Box<Self>),
    Enum(Importable),
    Parcelable(Importable),
    Serializable(Importable),
    Custom(NavTypeSerializer),
}

impl NavType {
    /// The value type a generated nav type is emitted for, if any.
    #[must_use]
    pub const fn generated_for(&self) -> Option<&Importable> {
        match self {
            Self::Primitive(_) | Self::PrimitiveArray(_) => None,
            Self::List(inner) => inner.generated_for(),
            Self::Enum(ty) | Self::Parcelable(ty) | Self::Serializable(ty) => Some(ty),
            Self::Custom(serializer) => Some(&serializer.generic_type),
        }
    }

    /// Reference to the nav type instance used by generated code.
    #[must_use]
    pub fn reference(&self, gen_package: &str) -> Importable {
        match self {
            Self::Primitive(p) => Importable::new(
                format!("Destinations{p}NavType"),
                format!("{CORE_PACKAGE_NAME}.navargs.primitives.Destinations{p}NavType"),
            ),
            Self::PrimitiveArray(p) => Importable::new(
                format!("Destinations{p}ArrayNavType"),
                format!("{CORE_PACKAGE_NAME}.navargs.primitives.array.Destinations{p}ArrayNavType"),
            ),
            Self::List(inner) => match inner.as_ref() {
                Self::Primitive(p) => Importable::new(
                    format!("Destinations{p}ArrayListNavType"),
                    format!(
                        "{CORE_PACKAGE_NAME}.navargs.primitives.arraylist.Destinations{p}ArrayListNavType"
                    ),
                ),
                other => generated_reference(other, gen_package, "ArrayListNavType"),
            },
            other => generated_reference(other, gen_package, "NavType"),
        }
    }
}

fn generated_reference(nav_type: &NavType, gen_package: &str, suffix: &str) -> Importable {
    let simple = nav_type
        .generated_for()
        .map_or_else(String::new, |ty| ty.simple_name.to_case(Case::Camel));
    let name = format!("{simple}{suffix}");

    Importable::new(name.clone(), format!("{gen_package}.navtype.{name}"))
}
