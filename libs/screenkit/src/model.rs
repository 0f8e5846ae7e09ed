//! Declarations the host front end hands to the pipeline.
//!
//! Everything here is already name-resolved by the host: supertypes and attribute names are
//! fully qualified, class references inside attribute arguments may still be bare names.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;

/// Dotted type name. An undotted name lives in the root package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Joins `package` and `name`; an empty package yields the bare name.
    #[must_use]
    pub fn in_package(package: &str, name: &str) -> Self {
        if package.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{package}.{name}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last dot, `""` for the root package.
    #[must_use]
    pub fn package(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(package, _)| package)
    }

    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, name)| name)
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Position of a declaration inside its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub(crate) usize);

impl DeclId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Object,
}

/// Argument expression as the host parsed it, without evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// `Foo::class` or `app.Foo::class`.
    ClassRef { name: String },
    Bool { value: bool },
    Str { value: String },
    Int { value: i64 },
    /// Member access chain such as `R.layout.fragment_main`.
    Path { path: String },
    Null,
}

impl Expr {
    #[must_use]
    pub fn class_ref(name: impl Into<String>) -> Self {
        Self::ClassRef { name: name.into() }
    }

    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path { path: path.into() }
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeArgument {
    /// `None` for positional arguments.
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeLiteral {
    pub name: QualifiedName,
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    #[default]
    Property,
    Function,
    Constant,
}

/// A user-authored member. Only the name matters for merge decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    /// Initializer, when it is a literal the host could extract.
    #[serde(default)]
    pub value: Option<Expr>,
}

impl MemberDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Expr) -> Self {
        self.value = Some(value);
        self
    }
}

/// A user-authored companion container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDecl {
    #[serde(default = "default_container_name")]
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

fn default_container_name() -> String {
    crate::well_known::DEFAULT_CONTAINER.to_owned()
}

/// Arguments of the call the primary constructor delegates to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelegationCall {
    #[serde(default)]
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub supertypes: Vec<QualifiedName>,
    #[serde(default)]
    pub annotations: Vec<AttributeLiteral>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub container: Option<ContainerDecl>,
    #[serde(default)]
    pub delegation: Option<DelegationCall>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl ClassDecl {
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind: ClassKind::Class,
            supertypes: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
            container: None,
            delegation: None,
            location: SourceLocation::default(),
        }
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(QualifiedName::new(supertype));
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AttributeLiteral) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_container(mut self, container: ContainerDecl) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn with_delegation(mut self, arguments: Vec<Expr>) -> Self {
        self.delegation = Some(DelegationCall { arguments });
        self
    }

    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::in_package(&self.package, &self.name)
    }

    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    #[must_use]
    pub fn container_member(&self, name: &str) -> Option<&MemberDecl> {
        self.container
            .as_ref()
            .and_then(|c| c.members.iter().find(|m| m.name == name))
    }
}

/// Classpath entry: a type the unit can see but does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalType {
    pub name: QualifiedName,
    #[serde(default)]
    pub supertypes: Vec<QualifiedName>,
}

impl ExternalType {
    #[must_use]
    pub fn new(name: impl Into<String>, supertypes: &[&str]) -> Self {
        Self {
            name: QualifiedName::new(name),
            supertypes: supertypes.iter().copied().map(QualifiedName::from).collect(),
        }
    }
}

/// Serialized form of a [`CompilationUnit`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub classpath: Vec<ExternalType>,
}

#[derive(Debug, Clone, Copy)]
enum TypeEntry {
    Source(DeclId),
    External(usize),
}

/// One compilation unit: its source declarations plus the classpath they resolve against.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "UnitSource")]
pub struct CompilationUnit {
    name: String,
    classes: Vec<ClassDecl>,
    classpath: Vec<ExternalType>,
    by_name: HashMap<QualifiedName, TypeEntry>,
}

impl CompilationUnit {
    /// # Errors
    /// `DuplicateDeclaration` when two entries share a qualified name.
    pub fn new(
        name: impl Into<String>,
        classes: Vec<ClassDecl>,
        classpath: Vec<ExternalType>,
    ) -> Result<Self, ScreenError> {
        let mut by_name = HashMap::with_capacity(classes.len() + classpath.len());
        for (index, class) in classes.iter().enumerate() {
            let qualified = class.qualified_name();
            if by_name
                .insert(qualified.clone(), TypeEntry::Source(DeclId(index)))
                .is_some()
            {
                return Err(ScreenError::DuplicateDeclaration { name: qualified });
            }
        }
        for (index, external) in classpath.iter().enumerate() {
            if by_name
                .insert(external.name.clone(), TypeEntry::External(index))
                .is_some()
            {
                return Err(ScreenError::DuplicateDeclaration {
                    name: external.name.clone(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            classes,
            classpath,
            by_name,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    #[must_use]
    pub fn classpath(&self) -> &[ExternalType] {
        &self.classpath
    }

    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &ClassDecl)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (DeclId(index), class))
    }

    #[must_use]
    pub fn declaration(&self, id: DeclId) -> Option<&ClassDecl> {
        self.classes.get(id.0)
    }

    /// Source declaration with this qualified name; classpath types are not returned.
    #[must_use]
    pub fn lookup(&self, name: &QualifiedName) -> Option<DeclId> {
        match self.by_name.get(name) {
            Some(TypeEntry::Source(id)) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_type(&self, name: &QualifiedName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Direct supertypes of a source or classpath type, `None` when the type is unknown.
    #[must_use]
    pub fn supertypes_of(&self, name: &QualifiedName) -> Option<&[QualifiedName]> {
        match self.by_name.get(name)? {
            TypeEntry::Source(id) => self.classes.get(id.0).map(|c| c.supertypes.as_slice()),
            TypeEntry::External(index) => {
                self.classpath.get(*index).map(|t| t.supertypes.as_slice())
            }
        }
    }
}

impl TryFrom<UnitSource> for CompilationUnit {
    type Error = ScreenError;

    fn try_from(source: UnitSource) -> Result<Self, Self::Error> {
        Self::new(source.name, source.classes, source.classpath)
    }
}
