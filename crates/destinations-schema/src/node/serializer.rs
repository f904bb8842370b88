use crate::prelude::*;

///
/// NavTypeSerializer
///
/// A user-provided converter between a custom argument type and its route
/// string form. Indexed by `generic_type`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NavTypeSerializer {
    pub class_kind: ClassKind,
    pub serializer_type: Importable,
    pub generic_type: Importable,

    #[serde(default)]
    pub source_ids: Vec<String>,
}

impl NavTypeSerializer {
    /// Kotlin expression producing the serializer instance.
    #[must_use]
    pub fn instance_code(&self) -> String {
        match self.class_kind {
            ClassKind::Class => format!("{}()", self.serializer_type.simple_name),
            ClassKind::Object => self.serializer_type.simple_name.clone(),
        }
    }
}
