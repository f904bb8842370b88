use destinations_codegen::{DirOutput, MemoryOutput};
use destinations_processor::{
    Error, ProcessOutcome, Processor,
    config::{CodeGenConfig, OPTION_MODULE_NAME, OPTION_PACKAGE_NAME},
    log::{Level, RecordingLogger},
    markers,
    symbol::{
        Annotation, AnnotationValue, Declaration, DeclarationKind, MemoryResolver, Parameter,
        TypeRef,
    },
};
use destinations_schema::{MODULE_INFO_PREFIX, MODULE_REGISTRY_PACKAGE, MODULE_REGISTRY_PREFIX};
use std::collections::BTreeMap;

const MAIN_GRAPH: &str = "app.ui.MainGraph";

///
/// Fixtures
///

fn main_graph() -> Declaration {
    let mut decl = Declaration::new(MAIN_GRAPH, DeclarationKind::AnnotationClass);
    decl.annotations.push(
        Annotation::new(markers::NAV_HOST_GRAPH).with_argument("default", AnnotationValue::Bool(true)),
    );
    decl.source_id = Some("Graphs.kt".to_string());
    decl
}

fn param(name: &str, ty: TypeRef) -> Parameter {
    Parameter {
        name: name.to_string(),
        ty,
        default_value: None,
    }
}

fn screen(name: &str, start: bool, params: Vec<Parameter>) -> Declaration {
    let marker = Annotation::new(markers::DESTINATION)
        .with_type_argument(TypeRef::new(MAIN_GRAPH))
        .with_argument("start", AnnotationValue::Bool(start));

    screen_with(name, marker, params)
}

fn screen_with(name: &str, marker: Annotation, params: Vec<Parameter>) -> Declaration {
    let mut decl = Declaration::new(format!("app.ui.{name}"), DeclarationKind::Function);
    decl.annotations.push(marker);
    decl.parameters = params;
    decl.source_id = Some(format!("{name}.kt"));
    decl
}

fn deep_link(uri: &str) -> AnnotationValue {
    AnnotationValue::Array(vec![AnnotationValue::Annotation(
        Annotation::new(markers::DEEP_LINK)
            .with_argument("uriPattern", AnnotationValue::String(uri.to_string())),
    )])
}

fn profile_and_settings() -> MemoryResolver {
    MemoryResolver::new()
        .with(main_graph())
        .with(screen(
            "ProfileScreen",
            true,
            vec![param("userId", TypeRef::new("kotlin.Int"))],
        ))
        .with(screen("SettingsScreen", false, Vec::new()))
}

fn run(resolver: &MemoryResolver) -> Result<(ProcessOutcome, MemoryOutput), Error> {
    run_with(&Processor::default(), resolver)
}

fn run_with(
    processor: &Processor,
    resolver: &MemoryResolver,
) -> Result<(ProcessOutcome, MemoryOutput), Error> {
    let mut output = MemoryOutput::new();
    let logger = RecordingLogger::new(true);
    let outcome = processor.process_with_logger(resolver, &logger, &mut output)?;

    Ok((outcome, output))
}

fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

///
/// Tests
///

#[test]
fn empty_unit_writes_nothing() {
    let (outcome, output) = run(&MemoryResolver::new()).expect("pass");

    assert_eq!(outcome, ProcessOutcome::NothingFound);
    assert!(output.is_empty());
}

#[test]
fn graph_without_destinations_is_reported() {
    let resolver = MemoryResolver::new().with(main_graph());

    let err = run(&resolver).expect_err("graph has no start");
    assert!(matches!(err, Error::Nav(ref e) if e.is_setup()));
    assert!(err.mentions("no start destination"), "got: {err}");
}

#[test]
fn profile_and_settings_share_main_graph() {
    let (outcome, output) = run(&profile_and_settings()).expect("pass");

    let ProcessOutcome::Generated { package_name, files } = outcome else {
        panic!("expected generated files");
    };
    assert_eq!(package_name, "app.ui");
    for path in [
        "app/ui/destinations/ProfileScreenDestination.kt",
        "app/ui/destinations/SettingsScreenDestination.kt",
        "app/ui/navargs/NavArgsGetters.kt",
        "app/ui/NavGraphs.kt",
    ] {
        assert!(files.iter().any(|f| f == path), "missing {path} in {files:?}");
    }

    let graphs = output.get("app/ui/NavGraphs.kt").expect("NavGraphs");
    assert_eq!(graphs.matches(": NavHostGraphSpec = object").count(), 1);
    assert!(graphs.contains("override val route: String = \"main\""));
    assert!(graphs.contains("override val startRoute: Route = ProfileScreenDestination"));
    assert!(!graphs.contains("NavGraphSpec = object : NavGraphSpec"));

    let profile = output
        .get("app/ui/destinations/ProfileScreenDestination.kt")
        .expect("profile destination");
    assert!(profile.contains("override val route: String = \"profile_screen/{userId}\""));
}

#[test]
fn deep_link_placeholder_must_name_an_argument() {
    let ok = MemoryResolver::new()
        .with(main_graph())
        .with(screen_with(
            "ProfileScreen",
            Annotation::new(markers::DESTINATION)
                .with_type_argument(TypeRef::new(MAIN_GRAPH))
                .with_argument("start", AnnotationValue::Bool(true))
                .with_argument("deepLinks", deep_link("app://profile/{userId}")),
            vec![param("userId", TypeRef::new("kotlin.Int"))],
        ));
    let (_, output) = run(&ok).expect("valid deep link");
    let profile = output
        .get("app/ui/destinations/ProfileScreenDestination.kt")
        .expect("profile destination");
    assert!(profile.contains("uriPattern = \"app://profile/{userId}\""));

    let broken = profile_and_settings().with(screen_with(
        "AboutScreen",
        Annotation::new(markers::DESTINATION)
            .with_type_argument(TypeRef::new(MAIN_GRAPH))
            .with_argument("deepLinks", deep_link("app://about/{userId}")),
        Vec::new(),
    ));
    let err = run(&broken).expect_err("placeholder without argument");
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.mentions("userId"), "got: {err}");
}

#[test]
fn start_destination_count_is_enforced() {
    let none = MemoryResolver::new()
        .with(main_graph())
        .with(screen("A", false, Vec::new()));
    let err = run(&none).expect_err("no start");
    assert!(matches!(err, Error::Nav(ref e) if e.is_setup()));
    assert!(err.mentions("no start destination"));

    let two = MemoryResolver::new()
        .with(main_graph())
        .with(screen("A", true, Vec::new()))
        .with(screen("B", true, Vec::new()));
    let err = run(&two).expect_err("two starts");
    assert!(err.mentions("multiple start destinations"));
}

#[test]
fn failed_pass_writes_nothing() {
    let resolver = profile_and_settings().with(screen(
        "ColorScreen",
        false,
        vec![param("color", TypeRef::new("app.model.Color"))],
    ));
    let mut output = MemoryOutput::new();
    let logger = RecordingLogger::new(false);

    let err = Processor::default()
        .process_with_logger(&resolver, &logger, &mut output)
        .expect_err("unsupported type");
    assert!(err.mentions("color"));
    assert!(output.is_empty());
}

#[test]
fn registered_serializer_enables_custom_type() {
    let color_screen = screen(
        "ColorScreen",
        false,
        vec![param("color", TypeRef::new("app.model.Color"))],
    );
    let mut serializer = Declaration::new("app.nav.ColorSerializer", DeclarationKind::Object);
    serializer
        .annotations
        .push(Annotation::new(markers::NAV_TYPE_SERIALIZER));
    serializer.source_id = Some("ColorSerializer.kt".to_string());
    serializer.supertypes.push(
        TypeRef::new(markers::NAV_TYPE_SERIALIZER_SUPERTYPE)
            .with_arguments(vec![TypeRef::new("app.model.Color")]),
    );
    let resolver = profile_and_settings()
        .with(Declaration::new("app.model.Color", DeclarationKind::Class))
        .with(color_screen)
        .with(serializer);

    let (outcome, output) = run(&resolver).expect("pass");
    let ProcessOutcome::Generated { package_name, .. } = outcome else {
        panic!("expected generated files");
    };
    assert_eq!(package_name, "app.ui");
    let nav_type = output.get("app/ui/navtype/ColorNavType.kt").expect("generated nav type");
    assert!(nav_type.contains("ColorSerializer"));
    assert_eq!(
        output.source_ids("app/ui/navtype/ColorNavType.kt"),
        Some(&["ColorScreen.kt".to_string(), "ColorSerializer.kt".to_string()][..])
    );
}

#[test]
fn graph_packages_take_part_in_package_resolution() {
    let mut graph = main_graph();
    graph.qualified_name = "app.nav.MainGraph".to_string();
    let marker = Annotation::new(markers::DESTINATION)
        .with_type_argument(TypeRef::new("app.nav.MainGraph"))
        .with_argument("start", AnnotationValue::Bool(true));
    let resolver = MemoryResolver::new()
        .with(graph)
        .with(screen_with("HomeScreen", marker, Vec::new()));

    let (outcome, output) = run(&resolver).expect("pass");
    let ProcessOutcome::Generated { package_name, .. } = outcome else {
        panic!("expected generated files");
    };
    assert_eq!(package_name, "app");
    assert!(output.get("app/NavGraphs.kt").is_some());
}

#[test]
fn generation_is_repeatable() {
    let resolver = profile_and_settings();

    let (_, first) = run(&resolver).expect("first pass");
    let (_, second) = run(&resolver).expect("second pass");

    let paths: Vec<&str> = first.paths().collect();
    assert_eq!(paths, second.paths().collect::<Vec<_>>());
    for path in paths {
        assert_eq!(first.get(path), second.get(path), "{path} differs");
    }
}

#[test]
fn destinations_without_graph_use_root_graph() {
    let resolver = MemoryResolver::new().with(screen_with(
        "HomeScreen",
        Annotation::new(markers::DESTINATION).with_argument("start", AnnotationValue::Bool(true)),
        Vec::new(),
    ));

    let (_, output) = run(&resolver).expect("pass");
    let graphs = output.get("app/ui/NavGraphs.kt").expect("NavGraphs");
    assert!(graphs.contains("public val root: NavHostGraphSpec = object : NavHostGraphSpec"));
    assert!(graphs.contains("override val startRoute: Route = HomeScreenDestination"));
}

#[test]
fn default_start_args_reach_host_graph() {
    let mut start_args = Declaration::new("app.ui.mainStartArgs", DeclarationKind::Property);
    start_args.annotations.push(
        Annotation::new(markers::NAV_HOST_DEFAULT_START_ARGS)
            .with_type_argument(TypeRef::new(MAIN_GRAPH)),
    );
    let resolver = profile_and_settings().with(start_args);

    let (_, output) = run(&resolver).expect("pass");
    let graphs = output.get("app/ui/NavGraphs.kt").expect("NavGraphs");
    assert!(graphs.contains("override val defaultStartArgs: List<Any?> = listOf("));
    assert!(graphs.contains("mainStartArgs,"));
}

#[test]
fn named_module_publishes_registry_and_app_links_it() {
    let processor = Processor::new(&options(&[
        (OPTION_MODULE_NAME, "profile"),
        (OPTION_PACKAGE_NAME, "app.profile"),
    ]))
    .expect("options");

    let (_, feature) = run_with(&processor, &profile_and_settings()).expect("feature pass");
    let registry_path = format!(
        "{}/{MODULE_REGISTRY_PREFIX}Profile.kt",
        MODULE_REGISTRY_PACKAGE.replace('.', "/")
    );
    let registry = feature.get(&registry_path).expect("registry file");
    assert!(registry.contains("packageName = \"app.profile\","));
    assert!(registry.contains("\"main\","));

    // what the feature module published, as the app's resolver sees it
    let mut published = Declaration::new(
        format!("{MODULE_REGISTRY_PACKAGE}.{MODULE_REGISTRY_PREFIX}Profile"),
        DeclarationKind::Object,
    );
    published.annotations.push(
        Annotation::new(format!("{MODULE_REGISTRY_PACKAGE}.{MODULE_INFO_PREFIX}Profile"))
            .with_argument("moduleName", AnnotationValue::String("profile".to_string()))
            .with_argument("packageName", AnnotationValue::String("app.profile".to_string()))
            .with_argument("hasNavArgsPackage", AnnotationValue::Bool(true))
            .with_argument("typeResults", AnnotationValue::Array(Vec::new()))
            .with_argument(
                "topLevelGraphs",
                AnnotationValue::Array(vec![AnnotationValue::String("main".to_string())]),
            ),
    );
    let app = MemoryResolver::new()
        .with(screen_with(
            "HomeScreen",
            Annotation::new(markers::DESTINATION).with_argument("start", AnnotationValue::Bool(true)),
            Vec::new(),
        ))
        .with(published);

    let (_, output) = run(&app).expect("app pass");
    let graphs = output.get("app/ui/NavGraphs.kt").expect("NavGraphs");
    assert!(graphs.contains("app.profile.NavGraphs.main,"));
    let getters = output.get("app/ui/navargs/NavArgsGetters.kt").expect("nav args getters");
    assert!(getters.contains("{ app.profile.navargs.navArgs(argsClass, argsContainer) },"));
}

#[test]
fn json_symbol_table_drives_a_pass() {
    let json = r#"{
        "declarations": [
            {
                "qualified_name": "app.ui.MainGraph",
                "kind": "annotation_class",
                "annotations": [
                    {
                        "type": "com.ramcosta.composedestinations.annotation.NavHostGraph",
                        "arguments": { "default": { "kind": "bool", "value": true } }
                    }
                ]
            },
            {
                "qualified_name": "app.ui.ProfileScreen",
                "kind": "function",
                "annotations": [
                    {
                        "type": "com.ramcosta.composedestinations.annotation.Destination",
                        "type_arguments": [ { "qualified_name": "app.ui.MainGraph" } ],
                        "arguments": { "start": { "kind": "bool", "value": true } }
                    }
                ],
                "parameters": [
                    { "name": "userId", "type": { "qualified_name": "kotlin.Int" } },
                    { "name": "tab", "type": { "qualified_name": "kotlin.String", "nullable": true } }
                ],
                "source_id": "Profile.kt"
            }
        ]
    }"#;
    let resolver = MemoryResolver::from_json(json).expect("valid table");

    let (_, output) = run(&resolver).expect("pass");
    let profile = output
        .get("app/ui/destinations/ProfileScreenDestination.kt")
        .expect("profile destination");
    assert!(profile.contains("override val route: String = \"profile_screen/{userId}?tab={tab}\""));
    assert_eq!(
        output.source_ids("app/ui/destinations/ProfileScreenDestination.kt"),
        Some(&["Profile.kt".to_string()][..])
    );
}

#[test]
fn dir_output_receives_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut output = DirOutput::new(dir.path());

    let outcome = Processor::with_config(CodeGenConfig::default())
        .process(&profile_and_settings(), &mut output)
        .expect("pass");

    assert!(matches!(outcome, ProcessOutcome::Generated { .. }));
    assert!(dir.path().join("app/ui/NavGraphs.kt").is_file());
    assert!(
        dir.path()
            .join("app/ui/destinations/ProfileScreenDestination.kt")
            .is_file()
    );
}

#[test]
fn debug_logging_records_progress() {
    let mut output = MemoryOutput::new();
    let logger = RecordingLogger::new(true);

    Processor::default()
        .process_with_logger(&profile_and_settings(), &logger, &mut output)
        .expect("pass");

    let records = logger.records();
    assert!(records.iter().any(|(level, _)| *level == Level::Debug));
    assert!(
        records
            .iter()
            .any(|(level, msg)| *level == Level::Info && msg.contains("generated"))
    );
}

#[test]
fn invalid_options_are_rejected() {
    let err = Processor::new(&options(&[(OPTION_PACKAGE_NAME, "app..ui")]))
        .expect_err("invalid package");

    assert!(matches!(err, Error::Config(_)));
}
