use crate::{
    FileBuilder, GeneratedFile, KOTLIN_EXTENSION, core_type,
    writer::{KotlinFile, string_literal},
};
use destinations_schema::node::{
    ActivityInfo, DeepLink, DestinationInfo, DestinationKind, NavArgument, ResultSender,
};

// generate
pub(crate) fn generate(builder: &FileBuilder<'_>, dest: &DestinationInfo) -> GeneratedFile {
    let package = builder.sub_package("destinations");
    let mut file = KotlinFile::new(&package);

    let spec = match &dest.kind {
        DestinationKind::Composable => file.import(&core_type("spec.DestinationSpec")),
        DestinationKind::Activity(_) => file.import(&core_type("spec.ActivityDestinationSpec")),
    };

    file.open(format!("public object {} : {spec}", dest.name));
    file.blank();
    file.line(format!(
        "override val baseRoute: String = {}",
        string_literal(&dest.base_route)
    ));
    file.blank();
    file.line(format!(
        "override val route: String = {}",
        string_literal(&dest.route_template())
    ));

    if !dest.arguments.is_empty() {
        file.blank();
        arguments(builder, &mut file, &dest.arguments);
    }
    if !dest.deep_links.is_empty() {
        file.blank();
        deep_links(&mut file, dest);
    }
    if let DestinationKind::Activity(info) = &dest.kind {
        file.blank();
        activity(&mut file, dest, info);
    }
    if let Some(sender) = &dest.result_sender {
        file.blank();
        result(builder, &mut file, sender);
    }

    file.blank();
    invoke(builder, &mut file, dest);

    if !dest.arguments.is_empty() {
        file.blank();
        nav_args(builder, &mut file, dest);
    }

    file.close("");

    GeneratedFile {
        name: dest.name.clone(),
        package_name: package,
        extension: KOTLIN_EXTENSION.to_string(),
        source_ids: dest.source_ids.clone(),
        content: file.finish(),
    }
}

fn nav_type_name(builder: &FileBuilder<'_>, file: &mut KotlinFile, arg: &NavArgument) -> String {
    file.import(&arg.nav_type.reference(builder.package()))
}

fn arguments(builder: &FileBuilder<'_>, file: &mut KotlinFile, args: &[NavArgument]) {
    let named = file.import_qualified("androidx.navigation.NamedNavArgument");
    let nav_argument = file.import_qualified("androidx.navigation.navArgument");

    file.line(format!("override val arguments: List<{named}> get() = listOf("));
    file.indent();
    for arg in args {
        let nav_type = nav_type_name(builder, file, arg);
        file.open(format!("{nav_argument}({})", string_literal(&arg.name)));
        file.line(format!("type = {nav_type}"));
        if arg.is_nullable() {
            file.line("nullable = true");
        }
        match &arg.default_value {
            Some(default) => file.line(format!("defaultValue = {default}")),
            None if arg.is_nullable() => file.line("defaultValue = null"),
            None => {}
        }
        file.close(",");
    }
    file.dedent();
    file.line(")");
}

fn deep_links(file: &mut KotlinFile, dest: &DestinationInfo) {
    let deep_link = file.import_qualified("androidx.navigation.NavDeepLink");
    let dsl = file.import_qualified("androidx.navigation.navDeepLink");
    let route = dest.route_template();

    file.line(format!("override val deepLinks: List<{deep_link}> get() = listOf("));
    file.indent();
    for link in &dest.deep_links {
        deep_link_entry(file, &dsl, link, &route);
    }
    file.dedent();
    file.line(")");
}

fn deep_link_entry(file: &mut KotlinFile, dsl: &str, link: &DeepLink, route: &str) {
    file.open(dsl);
    file.line(format!(
        "uriPattern = {}",
        string_literal(&link.resolved_pattern(route))
    ));
    if let Some(action) = &link.action {
        file.line(format!("action = {}", string_literal(action)));
    }
    if let Some(mime_type) = &link.mime_type {
        file.line(format!("mimeType = {}", string_literal(mime_type)));
    }
    file.close(",");
}

fn optional_literal(value: Option<&str>) -> String {
    value.map_or_else(|| "null".to_string(), string_literal)
}

fn activity(file: &mut KotlinFile, dest: &DestinationInfo, info: &ActivityInfo) {
    let activity = file.import_qualified("android.app.Activity");
    let target = file.import(&dest.target);

    file.line(format!(
        "override val activityClass: Class<out {activity}> = {target}::class.java"
    ));
    file.line(format!(
        "override val targetPackage: String? = {}",
        optional_literal(info.target_package.as_deref())
    ));
    file.line(format!(
        "override val action: String? = {}",
        optional_literal(info.action.as_deref())
    ));
    file.line(format!(
        "override val dataUri: String? = {}",
        optional_literal(info.data_uri.as_deref())
    ));
    file.line(format!(
        "override val dataType: String? = {}",
        optional_literal(info.data_type.as_deref())
    ));
}

fn result(builder: &FileBuilder<'_>, file: &mut KotlinFile, sender: &ResultSender) {
    for importable in sender.result_type.importables() {
        file.import(importable);
    }
    let nav_type = file.import(&sender.nav_type.reference(builder.package()));
    let result_type = sender.result_type.simple_code();

    file.line(format!(
        "public val resultType: Class<*> = {}::class.java",
        sender.result_type.importable.simple_name
    ));
    file.line(format!(
        "public val resultNavType: DestinationsNavType<{result_type}> = {nav_type}"
    ));
    file.import(&core_type("navargs.DestinationsNavType"));
    file.line(format!(
        "public const val isResultNullable: Boolean = {}",
        sender.result_type.is_nullable
    ));
}

// invoke builds a concrete Direction; every optional argument is always
// serialized so the receiving side sees explicit values
fn invoke(builder: &FileBuilder<'_>, file: &mut KotlinFile, dest: &DestinationInfo) {
    let direction = file.import(&core_type("spec.Direction"));

    if dest.arguments.is_empty() {
        file.line(format!(
            "public operator fun invoke(): {direction} = {direction}(baseRoute)"
        ));
        return;
    }

    file.line("public operator fun invoke(");
    file.indent();
    for arg in &dest.arguments {
        for importable in arg.ty.importables() {
            file.import(importable);
        }
        let ty = arg.ty.simple_code();
        match &arg.default_value {
            Some(default) => file.line(format!("{}: {ty} = {default},", arg.name)),
            None if arg.is_nullable() => file.line(format!("{}: {ty} = null,", arg.name)),
            None => file.line(format!("{}: {ty},", arg.name)),
        }
    }
    file.dedent();
    file.open(format!("): {direction}"));
    file.line(format!("return {direction}("));
    file.indent();
    file.line("baseRoute +");
    file.indent();

    let mandatory = dest.arguments.iter().filter(|a| a.is_mandatory());
    let optional = dest.arguments.iter().filter(|a| !a.is_mandatory());
    let mut parts = Vec::new();
    for arg in mandatory {
        let nav_type = nav_type_name(builder, file, arg);
        parts.push(format!("\"/${{{nav_type}.serializeValue({})}}\"", arg.name));
    }
    for (i, arg) in optional.enumerate() {
        let nav_type = nav_type_name(builder, file, arg);
        let sep = if i == 0 { '?' } else { '&' };
        parts.push(format!(
            "\"{sep}{0}=${{{nav_type}.serializeValue({0})}}\"",
            arg.name
        ));
    }
    let last = parts.len().saturating_sub(1);
    for (i, part) in parts.iter().enumerate() {
        if i == last {
            file.line(part);
        } else {
            file.line(format!("{part} +"));
        }
    }

    file.dedent();
    file.dedent();
    file.line(")");
    file.close("");
}

fn nav_args(builder: &FileBuilder<'_>, file: &mut KotlinFile, dest: &DestinationInfo) {
    let handle = file.import_qualified("androidx.lifecycle.SavedStateHandle");

    let args_class = if let Some(class) = &dest.nav_args_class {
        file.import(class)
    } else {
        file.line("public data class NavArgs(");
        file.indent();
        for arg in &dest.arguments {
            file.line(format!("val {}: {},", arg.name, arg.ty.simple_code()));
        }
        file.dedent();
        file.line(")");
        file.blank();
        "NavArgs".to_string()
    };

    file.open(format!(
        "public fun argsFrom(savedStateHandle: {handle}): {args_class}"
    ));
    file.line(format!("return {args_class}("));
    file.indent();
    for arg in &dest.arguments {
        let nav_type = nav_type_name(builder, file, arg);
        let read = format!(
            "{nav_type}.get(savedStateHandle, {})",
            string_literal(&arg.name)
        );
        let value = match &arg.default_value {
            _ if arg.is_nullable() => read,
            Some(default) => format!("{read} ?: {default}"),
            None => format!(
                "{read} ?: error({})",
                string_literal(&format!(
                    "'{}' argument is mandatory, but was not present!",
                    arg.name
                ))
            ),
        };
        file.line(format!("{} = {value},", arg.name));
    }
    file.dedent();
    file.line(")");
    file.close("");
}
