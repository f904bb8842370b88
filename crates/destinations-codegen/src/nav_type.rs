use crate::{FileBuilder, GeneratedFile, KOTLIN_EXTENSION, core_type, writer::KotlinFile};
use convert_case::{Case, Casing};
use destinations_schema::{
    node::{GeneratedNavType, NavType},
    types::Importable,
};

// route-string marker for a null value, shared with the runtime
const NULL_MARKER: &str = "\\u0002null\\u0003";
const ENCODED_NULL_MARKER: &str = "%02null%03";

/// One file per non-primitive argument or result type.
pub(crate) fn generate(builder: &FileBuilder<'_>) -> Vec<GeneratedFile> {
    builder
        .model
        .generated_nav_types()
        .into_iter()
        .filter_map(|entry| nav_type_file(builder, entry))
        .collect()
}

fn nav_type_file(builder: &FileBuilder<'_>, entry: GeneratedNavType<'_>) -> Option<GeneratedFile> {
    let value = entry.nav_type.generated_for()?;
    let package = builder.sub_package("navtype");
    let class_name = format!("{}NavType", value.simple_name);
    let mut file = KotlinFile::new(&package);

    let value_name = file.import(value);
    let property = entry.nav_type.reference(builder.package()).simple_name;

    if let NavType::Enum(_) = entry.nav_type {
        let enum_type = file.import(&core_type("navargs.primitives.DestinationsEnumNavType"));
        file.line(format!(
            "public val {property}: {enum_type}<{value_name}> = {enum_type}({value_name}::class.java)"
        ));
        if entry.as_list {
            let list_type = file.import(&core_type(
                "navargs.primitives.arraylist.DestinationsEnumArrayListNavType",
            ));
            file.blank();
            file.line(format!(
                "public val {property_list}: {list_type}<{value_name}> = {list_type}({value_name}::class.java)",
                property_list = list_property(value)
            ));
        }
    } else {
        let serializer = serializer_code(&mut file, entry.nav_type, &value_name);
        file.line(format!(
            "public val {property}: {class_name} = {class_name}({serializer})"
        ));
        if entry.as_list {
            let list_type = file.import(&core_type("navargs.DestinationsArrayListNavType"));
            file.blank();
            file.line(format!(
                "public val {}: {list_type}<{value_name}> = {list_type}({property})",
                list_property(value)
            ));
        }
        file.blank();
        serializer_class(&mut file, &class_name, &value_name);
    }

    tracing::trace!(value = %value, "rendered nav type");

    Some(GeneratedFile {
        name: class_name,
        package_name: package,
        extension: KOTLIN_EXTENSION.to_string(),
        source_ids: entry.source_ids.iter().map(|id| (*id).to_string()).collect(),
        content: file.finish(),
    })
}

fn list_property(value: &Importable) -> String {
    format!("{}ArrayListNavType", value.simple_name.to_case(Case::Camel))
}

// kotlin expression creating the route serializer for a value type
fn serializer_code(file: &mut KotlinFile, nav_type: &NavType, value_name: &str) -> String {
    match nav_type {
        NavType::Parcelable(_) => {
            let default = file.import(&core_type(
                "navargs.parcelable.DefaultParcelableNavTypeSerializer",
            ));
            format!("{default}({value_name}::class.java)")
        }
        NavType::Custom(serializer) => {
            file.import(&serializer.serializer_type);
            serializer.instance_code()
        }
        _ => {
            let default = file.import(&core_type(
                "navargs.serializable.DefaultSerializableNavTypeSerializer",
            ));
            format!("{default}()")
        }
    }
}

fn serializer_class(file: &mut KotlinFile, class_name: &str, value: &str) {
    let nav_type = file.import(&core_type("navargs.DestinationsNavType"));
    let serializer = file.import(&core_type("navargs.DestinationsNavTypeSerializer"));
    let bundle = file.import_qualified("android.os.Bundle");
    let handle = file.import_qualified("androidx.lifecycle.SavedStateHandle");
    let encode = file.import(&core_type("navargs.utils.encodeForRoute"));

    file.line(format!("public class {class_name}("));
    file.indent();
    file.line(format!("private val serializer: {serializer}<{value}>"));
    file.dedent();
    file.open(format!(") : {nav_type}<{value}?>()"));
    file.blank();

    file.open(format!(
        "override fun put(bundle: {bundle}, key: String, value: {value}?)"
    ));
    file.line("bundle.putString(key, value?.let { serializer.toRouteString(it) })");
    file.close("");
    file.blank();

    file.open(format!("override fun get(bundle: {bundle}, key: String): {value}?"));
    file.line("return bundle.getString(key)?.let { serializer.fromRouteString(it) }");
    file.close("");
    file.blank();

    file.open(format!("override fun parseValue(value: String): {value}?"));
    file.line(format!(
        "return if (value == \"{NULL_MARKER}\") null else serializer.fromRouteString(value)"
    ));
    file.close("");
    file.blank();

    file.open(format!("override fun serializeValue(value: {value}?): String"));
    file.line(format!(
        "return if (value == null) \"{ENCODED_NULL_MARKER}\" else {encode}(serializer.toRouteString(value))"
    ));
    file.close("");
    file.blank();

    file.open(format!(
        "override fun get(savedStateHandle: {handle}, key: String): {value}?"
    ));
    file.line("return savedStateHandle.get<String>(key)?.let { serializer.fromRouteString(it) }");
    file.close("");
    file.blank();

    file.open(format!(
        "override fun put(savedStateHandle: {handle}, key: String, value: {value}?)"
    ));
    file.line("savedStateHandle[key] = value?.let { serializer.toRouteString(it) }");
    file.close("");

    file.close("");
}
