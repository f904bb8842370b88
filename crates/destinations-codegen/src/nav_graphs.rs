use crate::{
    FileBuilder, GeneratedFile, KOTLIN_EXTENSION, core_type,
    writer::{KotlinFile, string_literal},
};
use convert_case::{Case, Casing};
use destinations_schema::node::{NavGraphInfo, StartRoute, default_graph_route};

// generate
pub(crate) fn generate(builder: &FileBuilder<'_>) -> GeneratedFile {
    let mut file = KotlinFile::new(builder.package());
    let graph_spec = file.import(&core_type("spec.NavGraphSpec"));

    file.open("public object NavGraphs");

    // nested graphs must be initialised before the graphs that reference them
    for graph in builder.model.graphs_children_first() {
        file.blank();
        graph_property(builder, &mut file, graph, &graph_spec);
    }

    let external: Vec<String> = builder
        .model
        .sub_modules
        .iter()
        .flat_map(|module| {
            module
                .top_level_graphs
                .iter()
                .map(|graph| module.graph_reference(graph))
        })
        .collect();
    if !external.is_empty() {
        file.blank();
        file.line(format!("public val external: List<{graph_spec}> = listOf("));
        file.indent();
        for reference in &external {
            file.line(format!("{reference},"));
        }
        file.dedent();
        file.line(")");
    }

    file.close("");

    GeneratedFile {
        name: "NavGraphs".to_string(),
        package_name: builder.package().to_string(),
        extension: KOTLIN_EXTENSION.to_string(),
        source_ids: builder.model.all_source_ids(),
        content: file.finish(),
    }
}

fn graph_property(
    builder: &FileBuilder<'_>,
    file: &mut KotlinFile,
    graph: &NavGraphInfo,
    graph_spec: &str,
) {
    let model = builder.model;
    let spec = if graph.is_nav_host_graph {
        file.import(&core_type("spec.NavHostGraphSpec"))
    } else {
        graph_spec.to_string()
    };
    let route_type = file.import(&core_type("spec.Route"));
    let destination_spec = file.import(&core_type("spec.DestinationSpec"));

    let start = match &graph.start {
        StartRoute::Destination(name) => match model.destination(name) {
            Some(dest) => file.import(&builder.destination_importable(dest)),
            None => name.clone(),
        },
        StartRoute::NavGraph(ty) => model.graph(ty).map_or_else(
            || default_graph_route(&ty.simple_name).to_case(Case::Camel),
            NavGraphInfo::property_name,
        ),
    };

    file.open(format!(
        "public val {}: {spec} = object : {spec}",
        graph.property_name()
    ));
    file.line(format!(
        "override val route: String = {}",
        string_literal(&graph.route)
    ));
    file.line(format!("override val startRoute: {route_type} = {start}"));

    let destinations: Vec<String> = model
        .destinations_of(&graph.ty)
        .map(|dest| file.import(&builder.destination_importable(dest)))
        .collect();
    list(file, &format!("destinations: List<{destination_spec}>"), &destinations);

    let nested: Vec<String> = model
        .nested_graphs_of(&graph.ty)
        .map(NavGraphInfo::property_name)
        .collect();
    list(file, &format!("nestedNavGraphs: List<{graph_spec}>"), &nested);

    if graph.is_nav_host_graph && !graph.default_start_args.is_empty() {
        let args: Vec<String> = graph
            .default_start_args
            .iter()
            .map(|arg| file.import(arg))
            .collect();
        list(file, "defaultStartArgs: List<Any?>", &args);
    }

    file.close("");
}

fn list(file: &mut KotlinFile, declaration: &str, items: &[String]) {
    if items.is_empty() {
        file.line(format!("override val {declaration} = emptyList()"));
        return;
    }

    file.line(format!("override val {declaration} = listOf("));
    file.indent();
    for item in items {
        file.line(format!("{item},"));
    }
    file.dedent();
    file.line(")");
}
