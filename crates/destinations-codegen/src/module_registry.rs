use crate::{
    FileBuilder, GeneratedFile, KOTLIN_EXTENSION,
    writer::{KotlinFile, string_literal},
};
use convert_case::{Case, Casing};
use destinations_schema::{
    MODULE_INFO_PREFIX, MODULE_REGISTRY_PACKAGE, MODULE_REGISTRY_PREFIX, RESULT_INFO_PREFIX,
    node::DestinationResultSenderInfo,
};

/// Registry marker another module's processor reads back to discover this
/// module's graphs and result senders. Only emitted for named modules.
pub(crate) fn generate(builder: &FileBuilder<'_>) -> Option<GeneratedFile> {
    let module_name = builder.settings.module_name.as_deref()?;
    let suffix = module_name.to_case(Case::Pascal);
    let info = builder.module_info();

    let info_class = format!("{MODULE_INFO_PREFIX}{suffix}");
    let result_class = format!("{RESULT_INFO_PREFIX}{suffix}");
    let registry = format!("{MODULE_REGISTRY_PREFIX}{suffix}");

    let mut file = KotlinFile::new(MODULE_REGISTRY_PACKAGE);

    file.line(format!("public annotation class {info_class}("));
    file.indent();
    file.line("val moduleName: String,");
    file.line("val packageName: String,");
    file.line("val hasNavArgsPackage: Boolean,");
    file.line(format!("val typeResults: Array<{result_class}>,"));
    file.line("val topLevelGraphs: Array<String>,");
    file.dedent();
    file.line(")");
    file.blank();

    file.line(format!("public annotation class {result_class}("));
    file.indent();
    file.line("val destination: String,");
    file.line("val resultType: String,");
    file.line("val resultNavType: String,");
    file.line("val isResultNullable: Boolean,");
    file.dedent();
    file.line(")");
    file.blank();

    file.line(format!("@{info_class}("));
    file.indent();
    file.line(format!("moduleName = {},", string_literal(module_name)));
    file.line(format!(
        "packageName = {},",
        string_literal(&info.gen_package_name)
    ));
    file.line(format!("hasNavArgsPackage = {},", info.has_nav_args_package));
    file.line("typeResults = [");
    file.indent();
    for sender in &info.public_result_senders {
        result_entry(&mut file, &result_class, sender);
    }
    file.dedent();
    file.line("],");
    file.line("topLevelGraphs = [");
    file.indent();
    for graph in &info.top_level_graphs {
        file.line(format!("{},", string_literal(graph)));
    }
    file.dedent();
    file.line("],");
    file.dedent();
    file.line(")");
    file.line(format!("public object {registry}"));

    Some(GeneratedFile {
        name: registry,
        package_name: MODULE_REGISTRY_PACKAGE.to_string(),
        extension: KOTLIN_EXTENSION.to_string(),
        source_ids: builder.model.all_source_ids(),
        content: file.finish(),
    })
}

fn result_entry(file: &mut KotlinFile, result_class: &str, sender: &DestinationResultSenderInfo) {
    file.line(format!("{result_class}("));
    file.indent();
    file.line(format!(
        "destination = {},",
        string_literal(&sender.destination)
    ));
    file.line(format!(
        "resultType = {},",
        string_literal(&sender.result_type)
    ));
    file.line(format!(
        "resultNavType = {},",
        string_literal(&sender.result_nav_type)
    ));
    file.line(format!("isResultNullable = {},", sender.is_result_nullable));
    file.dedent();
    file.line("),");
}
