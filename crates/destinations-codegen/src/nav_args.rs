use crate::{FileBuilder, GeneratedFile, KOTLIN_EXTENSION, writer::KotlinFile};

/// Typed argument getters for every destination that declares arguments.
/// Classes not declared locally are looked up in the nav args packages of
/// dependency modules before failing.
pub(crate) fn generate(builder: &FileBuilder<'_>) -> Option<GeneratedFile> {
    if !builder.has_nav_args_package() {
        return None;
    }

    let package = builder.sub_package("navargs");
    let mut file = KotlinFile::new(&package);
    let handle = file.import_qualified("androidx.lifecycle.SavedStateHandle");

    file.line(format!(
        "public inline fun <reified T> {handle}.navArgs(): T = navArgs(T::class.java, this)"
    ));
    file.blank();
    file.line("@Suppress(\"UNCHECKED_CAST\")");
    file.open(format!(
        "public fun <T> navArgs(argsClass: Class<T>, argsContainer: {handle}): T"
    ));
    file.open("return when (argsClass)");

    let mut source_ids = Vec::new();
    for dest in builder
        .model
        .destinations
        .iter()
        .filter(|d| !d.arguments.is_empty())
    {
        let object = file.import(&builder.destination_importable(dest));
        let args_class = match &dest.nav_args_class {
            Some(class) => file.import(class),
            None => format!("{object}.NavArgs"),
        };
        file.line(format!(
            "{args_class}::class.java -> {object}.argsFrom(argsContainer) as T"
        ));
        source_ids.extend(dest.source_ids.iter().cloned());
    }

    let not_found = "error(\"Class ${argsClass} is not a navigation arguments class!\")";
    let fallbacks: Vec<&str> = builder
        .model
        .sub_modules
        .iter()
        .filter(|module| module.has_nav_args_package)
        .map(|module| module.gen_package_name.as_str())
        .collect();
    if fallbacks.is_empty() {
        file.line(format!("else -> {not_found}"));
    } else {
        file.line("else -> listOf<() -> T>(");
        file.indent();
        for package in fallbacks {
            file.line(format!(
                "{{ {package}.navargs.navArgs(argsClass, argsContainer) }},"
            ));
        }
        file.dedent();
        file.line(").firstNotNullOfOrNull { getter -> runCatching(getter).getOrNull() }");
        file.indent();
        file.line(format!("?: {not_found}"));
        file.dedent();
    }
    file.close("");
    file.close("");

    source_ids.sort();
    source_ids.dedup();

    Some(GeneratedFile {
        name: "NavArgsGetters".to_string(),
        package_name: package,
        extension: KOTLIN_EXTENSION.to_string(),
        source_ids,
        content: file.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use destinations_schema::prelude::*;

    #[test]
    fn no_arguments_means_no_file() {
        let model = NavModel::new(
            vec![destination("Home", Vec::new())],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let settings = settings(None);

        assert!(generate(&FileBuilder::new(&settings, &model)).is_none());
    }

    #[test]
    fn dispatches_on_args_class() {
        let mut search = destination("Search", vec![string_arg("query", false)]);
        search.nav_args_class = Some(Importable::from_qualified("app.ui.SearchArgs"));
        let model = NavModel::new(
            vec![destination("Profile", vec![int_arg("id", false)]), search],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let settings = settings(None);

        let file = generate(&FileBuilder::new(&settings, &model)).expect("file expected");
        assert_eq!(file.package_name, "app.gen.navargs");
        assert!(file.content.contains(
            "ProfileDestination.NavArgs::class.java -> ProfileDestination.argsFrom(argsContainer) as T"
        ));
        assert!(file.content.contains(
            "SearchArgs::class.java -> SearchDestination.argsFrom(argsContainer) as T"
        ));
        assert!(file.content.contains("import app.ui.SearchArgs"));
        assert!(file.content.contains("else -> error(\"Class ${argsClass}"));
    }

    #[test]
    fn sub_module_nav_args_are_consulted() {
        let model = NavModel::new(
            vec![destination("Home", Vec::new())],
            Vec::new(),
            Vec::new(),
            vec![
                SubModuleInfo {
                    name: Some("feature".to_string()),
                    gen_package_name: "com.feature.gen".to_string(),
                    has_nav_args_package: true,
                    top_level_graphs: Vec::new(),
                    public_result_senders: Vec::new(),
                },
                SubModuleInfo {
                    name: Some("plain".to_string()),
                    gen_package_name: "com.plain.gen".to_string(),
                    has_nav_args_package: false,
                    top_level_graphs: Vec::new(),
                    public_result_senders: Vec::new(),
                },
            ],
        );
        let settings = settings(None);

        let file = generate(&FileBuilder::new(&settings, &model)).expect("file expected");
        assert!(file.content.contains(
            "{ com.feature.gen.navargs.navArgs(argsClass, argsContainer) },"
        ));
        assert!(!file.content.contains("com.plain.gen"));
        assert!(file.content.contains("?: error(\"Class ${argsClass}"));
    }
}
