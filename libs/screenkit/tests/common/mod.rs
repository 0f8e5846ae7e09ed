#![allow(dead_code)]

use screenkit::model::{AttributeArgument, AttributeLiteral, ClassDecl, CompilationUnit, Expr, ExternalType};
use screenkit::well_known::{CONTROLLER_BASE, MARKER, TRANSPORT_CAPABILITY};
use screenkit::{CompilationSession, ScreenConfig};

pub const NAMESPACE: &str = "com.example";

pub fn marker(argument: Option<&str>, nullable: bool) -> AttributeLiteral {
    let mut arguments = Vec::new();
    if let Some(argument) = argument {
        arguments.push(AttributeArgument {
            name: Some("argumentType".to_owned()),
            value: Expr::class_ref(argument),
        });
    }
    if nullable {
        arguments.push(AttributeArgument {
            name: Some("nullable".to_owned()),
            value: Expr::Bool { value: true },
        });
    }
    AttributeLiteral {
        name: MARKER.into(),
        arguments,
    }
}

/// A marked controller without argument.
pub fn screen(package: &str, name: &str) -> ClassDecl {
    ClassDecl::new(package, name)
        .with_supertype(CONTROLLER_BASE)
        .with_annotation(marker(None, false))
}

/// A marked controller taking `argument`.
pub fn screen_with(package: &str, name: &str, argument: &str, nullable: bool) -> ClassDecl {
    ClassDecl::new(package, name)
        .with_supertype(CONTROLLER_BASE)
        .with_annotation(marker(Some(argument), nullable))
}

pub fn parcelable(package: &str, name: &str) -> ClassDecl {
    ClassDecl::new(package, name).with_supertype(TRANSPORT_CAPABILITY)
}

pub fn platform() -> Vec<ExternalType> {
    vec![
        ExternalType::new(CONTROLLER_BASE, &[]),
        ExternalType::new(TRANSPORT_CAPABILITY, &[]),
    ]
}

pub fn unit(classes: Vec<ClassDecl>, extra: Vec<ExternalType>) -> CompilationUnit {
    let mut classpath = platform();
    classpath.extend(extra);
    CompilationUnit::new("test", classes, classpath).unwrap()
}

/// Runs every phase and returns the finished session.
pub fn compile(classes: Vec<ClassDecl>) -> CompilationSession {
    compile_with(classes, Vec::new(), ScreenConfig::default())
}

pub fn compile_with(
    classes: Vec<ClassDecl>,
    extra: Vec<ExternalType>,
    config: ScreenConfig,
) -> CompilationSession {
    let mut session = CompilationSession::new(unit(classes, extra), config);
    session.run_all().unwrap();
    session
}
