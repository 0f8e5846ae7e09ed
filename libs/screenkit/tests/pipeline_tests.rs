#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end behavior of the synthesis pipeline.

mod common;

use std::sync::Arc;

use screenkit::model::{ContainerDecl, Expr, ExternalType, MemberDecl, MemberKind, QualifiedName};
use screenkit::symbols::{BodyState, Scope, SymbolKind, Visibility};
use screenkit::well_known::{ARG, BINDING, CREATE_SCREEN, KEY};
use screenkit::{
    CompilationSession, ScreenConfig, ScreenError, ScreenExecutor, annotations, codegen,
};
use screenkit_runtime::{BinderRegistry, Controller, LayoutBinder, Parcel, RuntimeError, View};
use serde_json::json;

use common::{NAMESPACE, compile, compile_with, parcelable, screen, screen_with, unit};

fn q(name: &str) -> QualifiedName {
    QualifiedName::from(name)
}

fn codes(session: &CompilationSession) -> Vec<&'static str> {
    session.diagnostics().iter().map(|d| d.code).collect()
}

fn executor(session: &CompilationSession) -> ScreenExecutor<'_> {
    static EMPTY: std::sync::OnceLock<BinderRegistry> = std::sync::OnceLock::new();
    ScreenExecutor::new(session, EMPTY.get_or_init(BinderRegistry::new)).unwrap()
}

#[test]
fn key_is_the_fully_qualified_name() {
    let session = compile(vec![screen("app.ui", "Home"), screen("", "RootFragment")]);
    assert!(session.diagnostics().is_empty());

    let exec = executor(&session);
    assert_eq!(exec.key(&q("app.ui.Home")).unwrap(), "app.ui.Home");
    assert_eq!(exec.key(&q("RootFragment")).unwrap(), "RootFragment");

    let decl = session.unit().lookup(&q("app.ui.Home")).unwrap();
    let container = session.symbols().find(decl, Scope::Owner, "Companion").unwrap();
    assert_eq!(container.kind, SymbolKind::Container);
    let key = session.symbols().find(decl, Scope::Container, KEY).unwrap();
    assert_eq!(key.visibility, Visibility::Public);
}

#[test]
fn unmarked_declarations_are_untouched() {
    let session = compile(vec![screen("app", "Home"), parcelable("app", "Plain")]);
    let plain = session.unit().lookup(&q("app.Plain")).unwrap();
    assert!(!session.candidates().is_matched(plain));
    assert_eq!(session.symbols().for_owner(plain).count(), 0);
    assert!(session.diagnostics().is_empty());
}

#[test]
fn existing_container_is_augmented() {
    let home = screen("app", "Home").with_container(ContainerDecl {
        name: "Companion".to_owned(),
        members: vec![MemberDecl::new("helper", MemberKind::Function)],
    });
    let session = compile(vec![home]);
    let decl = session.unit().lookup(&q("app.Home")).unwrap();

    assert!(session.symbols().find(decl, Scope::Owner, "Companion").is_none());
    assert!(session.symbols().find(decl, Scope::Container, KEY).is_some());
    assert!(session.symbols().find(decl, Scope::Container, CREATE_SCREEN).is_some());
}

#[test]
fn user_declarations_are_never_duplicated_or_replaced() {
    let home = screen_with("app", "Home", "app.Arg", false)
        .with_member(MemberDecl::new(ARG, MemberKind::Property))
        .with_container(ContainerDecl {
            name: "Companion".to_owned(),
            members: vec![
                MemberDecl::new(KEY, MemberKind::Constant).with_value(Expr::string("home")),
                MemberDecl::new(CREATE_SCREEN, MemberKind::Function),
            ],
        });
    let session = compile(vec![home, parcelable("app", "Arg")]);
    let decl = session.unit().lookup(&q("app.Home")).unwrap();

    assert_eq!(session.symbols().for_owner(decl).count(), 0);
    assert!(matches!(
        executor(&session).key(&q("app.Home")),
        Err(ScreenError::MemberNotSynthesized { .. })
    ));
}

#[test]
fn rerunning_signatures_adds_nothing() {
    let mut session = CompilationSession::new(
        unit(vec![screen_with("app", "Home", "app.Arg", true), parcelable("app", "Arg")], Vec::new()),
        ScreenConfig::default(),
    );
    session.scan().unwrap();
    session.validate().unwrap();
    let first = session.synthesize_signatures().unwrap();
    let second = session.synthesize_signatures().unwrap();
    assert_eq!(first, 4);
    assert_eq!(second, 0);
    assert_eq!(session.symbols().len(), 4);
    assert!(session.symbols().iter().all(|s| s.body == BodyState::Stub));

    session.synthesize_bodies().unwrap();
    assert!(session.symbols().iter().all(|s| s.is_filled()));
}

#[test]
fn argument_without_capability_is_rejected() {
    let session = compile(vec![
        screen_with("app", "Home", "app.Plain", false),
        screen("app", "Other"),
        screen_with("app", "Plain", "NoArgument", false),
    ]);
    assert_eq!(codes(&session), ["ARG_NOT_SERIALIZABLE"]);
    let diagnostic = &session.diagnostics().as_slice()[0];
    assert_eq!(diagnostic.owner, q("app.Home"));
    assert_eq!(diagnostic.subject, "app.Plain");

    let home = session.unit().lookup(&q("app.Home")).unwrap();
    assert_eq!(session.symbols().for_owner(home).count(), 0);

    // one invalid declaration does not block the others
    let other = session.unit().lookup(&q("app.Other")).unwrap();
    assert!(session.symbols().for_owner(other).count() > 0);
}

#[test]
fn owner_outside_controller_lineage_is_rejected() {
    let stray = screen_with("app", "Stray", "app.Plain", false);
    let stray = screenkit::ClassDecl {
        supertypes: Vec::new(),
        ..stray
    };
    let session = compile(vec![stray, screenkit::ClassDecl::new("app", "Plain")]);
    assert_eq!(codes(&session), ["NOT_ON_CONTROLLER", "ARG_NOT_SERIALIZABLE"]);
    assert!(session.has_fatal());
    assert!(session.symbols().is_empty());
}

#[test]
fn cyclic_hierarchy_terminates_as_not_derived() {
    let a = screenkit::ClassDecl::new("app", "A")
        .with_supertype("app.B")
        .with_annotation(common::marker(None, false));
    let b = screenkit::ClassDecl::new("app", "B").with_supertype("app.A");
    let session = compile(vec![a, b]);
    assert_eq!(codes(&session), ["NOT_ON_CONTROLLER"]);
}

#[test]
fn indirect_lineage_is_accepted() {
    let base = screenkit::ClassDecl::new("app", "BaseFragment")
        .with_supertype(screenkit::well_known::CONTROLLER_BASE);
    let home = screenkit::ClassDecl::new("app", "Home")
        .with_supertype("app.BaseFragment")
        .with_annotation(common::marker(Some("Arg"), false));
    let arg = screenkit::ClassDecl::new("app", "Arg").with_supertype("app.BaseArg");
    let base_arg = parcelable("app", "BaseArg");
    let session = compile(vec![base, home, arg, base_arg]);
    assert!(session.diagnostics().is_empty());

    let decl = session.unit().lookup(&q("app.Home")).unwrap();
    let arg = session.symbols().find(decl, Scope::Owner, ARG).unwrap();
    assert_eq!(arg.declared_type.as_ref().unwrap().name, q("app.Arg"));
}

#[test]
fn create_then_read_round_trips_the_argument() {
    let session = compile(vec![screen_with("app", "Detail", "app.Item", false), parcelable("app", "Item")]);
    let exec = executor(&session);
    let owner = q("app.Detail");
    let item = Parcel::new("app.Item", json!({ "id": 42 }));

    let descriptor = exec.create_screen(&owner, Some(item.clone())).unwrap();
    assert_eq!(descriptor.key(), "app.Detail");
    let controller = descriptor.create();
    assert_eq!(controller.class_name(), "app.Detail");
    assert_eq!(exec.read_arg(&owner, &controller).unwrap(), Some(item));

    assert!(matches!(
        exec.create_screen(&owner, None),
        Err(ScreenError::ArgumentRequired { .. })
    ));
    assert!(matches!(
        exec.create_screen(&owner, Some(Parcel::new("app.Other", json!(null)))),
        Err(ScreenError::ArgumentType { .. })
    ));
}

#[test]
fn nullable_argument_reads_null_when_absent() {
    let session = compile(vec![screen_with("app", "Detail", "app.Item", true), parcelable("app", "Item")]);
    let exec = executor(&session);
    let owner = q("app.Detail");

    let controller = exec.create_screen(&owner, None).unwrap().create();
    assert!(controller.arguments().is_empty());
    assert_eq!(exec.read_arg(&owner, &controller).unwrap(), None);

    // wrong-typed entries read as null too
    let mut wrong = Controller::new("app.Detail");
    wrong
        .arguments_mut()
        .put("app.Detail", Parcel::new("app.Other", json!(1)));
    assert_eq!(exec.read_arg(&owner, &wrong).unwrap(), None);
}

#[test]
fn missing_required_argument_is_a_runtime_fault() {
    let session = compile(vec![screen_with("app", "Detail", "app.Item", false), parcelable("app", "Item")]);
    let exec = executor(&session);

    let err = exec
        .read_arg(&q("app.Detail"), &Controller::new("app.Detail"))
        .unwrap_err();
    assert!(matches!(
        err,
        ScreenError::Runtime(RuntimeError::MissingArgument { ref key }) if key == "app.Detail"
    ));
}

#[test]
fn user_key_literal_is_the_lookup_key() {
    let detail = screen_with("app", "Detail", "app.Item", false).with_container(ContainerDecl {
        name: "Companion".to_owned(),
        members: vec![MemberDecl::new(KEY, MemberKind::Constant).with_value(Expr::string("detail"))],
    });
    let session = compile(vec![detail, parcelable("app", "Item")]);
    let exec = executor(&session);
    let owner = q("app.Detail");
    let item = Parcel::new("app.Item", json!("x"));

    let descriptor = exec.create_screen(&owner, Some(item.clone())).unwrap();
    assert_eq!(descriptor.key(), "detail");
    let controller = descriptor.create();
    assert!(controller.arguments().contains_key("detail"));
    assert_eq!(exec.read_arg(&owner, &controller).unwrap(), Some(item));
}

#[test]
fn no_argument_factory_rejects_arguments() {
    let session = compile(vec![screen("app", "Home")]);
    let exec = executor(&session);
    assert!(matches!(
        exec.create_screen(&q("app.Home"), Some(Parcel::new("x.Y", json!(null)))),
        Err(ScreenError::UnexpectedArgument { .. })
    ));
    assert!(matches!(
        exec.read_arg(&q("app.Home"), &Controller::new("app.Home")),
        Err(ScreenError::MemberNotSynthesized { .. })
    ));
    assert!(matches!(
        exec.key(&q("app.Nowhere")),
        Err(ScreenError::UnknownOwner { .. })
    ));
}

const BINDING_TYPE: &str = "com.example.databinding.FragmentMainBinding";

fn layout_screen() -> screenkit::ClassDecl {
    screen("app", "MainFragment").with_delegation(vec![Expr::path("R.layout.fragment_main")])
}

#[test]
fn binding_is_bound_once_per_instance() {
    let session = compile_with(
        vec![layout_screen()],
        vec![ExternalType::new(BINDING_TYPE, &[])],
        ScreenConfig::default().with_namespace(NAMESPACE),
    );
    let decl = session.unit().lookup(&q("app.MainFragment")).unwrap();
    let binding = session.symbols().find(decl, Scope::Owner, BINDING).unwrap();
    assert_eq!(binding.kind, SymbolKind::ConditionalAccessorProperty);
    assert_eq!(binding.visibility, Visibility::Private);

    let mut binders = BinderRegistry::new();
    binders.register(LayoutBinder::new(BINDING_TYPE, ["title"]));
    let exec = ScreenExecutor::new(&session, &binders).unwrap();

    let mut controller = exec.create_screen(&q("app.MainFragment"), None).unwrap().create();
    controller.attach_view(View::new("root").with_child(View::new("title")));

    let first = exec.binding(&q("app.MainFragment"), &controller).unwrap();
    let second = exec.binding(&q("app.MainFragment"), &controller).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.view("title").map(View::id), Some("title"));

    // a fresh instance binds on its own
    let mut other = exec.create_screen(&q("app.MainFragment"), None).unwrap().create();
    other.attach_view(View::new("root").with_child(View::new("title")));
    let third = exec.binding(&q("app.MainFragment"), &other).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
}

#[test]
fn binding_requires_namespace_and_existing_type() {
    for (namespace, classpath) in [
        (None, vec![ExternalType::new(BINDING_TYPE, &[])]),
        (Some("   "), vec![ExternalType::new(BINDING_TYPE, &[])]),
        (Some(NAMESPACE), Vec::new()),
    ] {
        let mut config = ScreenConfig::default();
        config.namespace = namespace.map(str::to_owned);
        let session = compile_with(vec![layout_screen()], classpath, config);
        let decl = session.unit().lookup(&q("app.MainFragment")).unwrap();
        assert!(session.symbols().find(decl, Scope::Owner, BINDING).is_none());
        assert!(session.diagnostics().is_empty());
    }
}

#[test]
fn injected_oracle_decides_binding_existence() {
    struct Everything;
    impl screenkit::SymbolOracle for Everything {
        fn exists(&self, _: &QualifiedName) -> bool {
            true
        }
    }

    let mut session = CompilationSession::new(
        unit(vec![layout_screen()], Vec::new()),
        ScreenConfig::default().with_namespace(NAMESPACE),
    )
    .with_oracle(Arc::new(Everything));
    session.run_all().unwrap();

    let decl = session.unit().lookup(&q("app.MainFragment")).unwrap();
    let binding = session.symbols().find(decl, Scope::Owner, BINDING).unwrap();
    assert_eq!(binding.declared_type.as_ref().unwrap().name, q(BINDING_TYPE));
}

#[test]
fn rendering_emits_rust_items() {
    let session = compile(vec![screen_with("app.ui", "Home", "app.ui.Arg", true), parcelable("app.ui", "Arg")]);
    let rendered = codegen::render_unit(&session).unwrap();
    let compact = rendered.replace(' ', "");

    assert!(rendered.starts_with("// app.ui.Home\n"));
    assert!(compact.contains("implHome{"));
    assert!(compact.contains("pubconstKEY:&str=\"app.ui.Home\";"));
    assert!(compact.contains("pubfncreate_screen(arg:::core::option::Option<::screenkit_runtime::Parcel>)"));
    assert!(compact.contains("fnarg(controller:&::screenkit_runtime::Controller,)"));
}

#[test]
fn rendering_rejects_non_identifier_owners() {
    let session = compile(vec![screen("app", "match")]);
    assert!(matches!(
        codegen::render_unit(&session),
        Err(ScreenError::InvalidIdentifier { ref name }) if name == "match"
    ));
}

#[test]
fn rendering_rejects_owners_sharing_a_simple_name() {
    let session = compile(vec![screen("app.a", "Home"), screen("app.b", "Home")]);
    assert!(session.diagnostics().is_empty());
    let err = codegen::render_unit(&session).unwrap_err();
    assert!(matches!(
        err,
        ScreenError::RenderCollision { ref name, ref first, ref second }
            if name == "Home" && first.as_str() == "app.a.Home" && second.as_str() == "app.b.Home"
    ));
}

#[test]
fn annotations_expose_key_and_tooltip() {
    let mut home = screen("app.ui", "Home");
    home.location.file = "Home.kt".to_owned();
    home.location.line = 7;
    let session = compile(vec![home]);

    let annotations = annotations(&session).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].key, "app.ui.Home");
    assert_eq!(annotations[0].location.line, 7);
    assert_eq!(
        annotations[0].tooltip,
        "Screen generated constants:\nKEY = \"app.ui.Home\""
    );
}

#[test]
fn execution_and_rendering_wait_for_bodies() {
    let mut session = CompilationSession::new(unit(vec![screen("app", "Home")], Vec::new()), ScreenConfig::default());
    session.scan().unwrap();
    assert!(annotations(&session).is_ok());
    assert!(matches!(
        codegen::render_unit(&session),
        Err(ScreenError::PhaseOrder { .. })
    ));
    let binders = BinderRegistry::new();
    assert!(ScreenExecutor::new(&session, &binders).is_err());
}
