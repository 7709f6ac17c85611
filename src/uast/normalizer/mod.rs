//! Enum normalization engine.
//!
//! [`EnumNormalizer`] walks one enum-like declaration through a small state
//! machine (see [`Phase`]): constants first, then the members of the enum
//! type, then override linking. Everything below a constant or a member is
//! lowered recursively by shape, so constant bodies may hold methods,
//! fields and further nested declarations.
//!
//! The normalizer is generic over [`Frontend`] and never names a concrete
//! CST type.

mod code;
mod declarations;
mod linking;

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::config::NormalizerConfig;
use super::error::{Result, UastError};
use super::factory::NodeFactory;
use super::kind::NodeKind;
use super::node::{NodePath, UastNode};
use super::role::Role;
use crate::frontend::{AnnotationInfo, FragmentShape, Frontend, TypeInfo};

// ============================================================================
// Output types
// ============================================================================

/// Processing state of one enum body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    ScanningConstants,
    ScanningMembers,
    Linking,
    Done,
}

/// Lookup key matching an override to its abstract declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemberKey {
    pub name: SmolStr,
    pub arity: u32,
}

impl MemberKey {
    pub fn new(name: impl Into<SmolStr>, arity: u32) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    /// Key of a built `FunctionDeclaration`
    pub fn of(node: &UastNode) -> Option<Self> {
        if *node.kind() != NodeKind::FunctionDeclaration {
            return None;
        }
        let arity = node.children_of(|k| *k == NodeKind::Parameter).count() as u32;
        Some(Self::new(node.name()?, arity))
    }
}

impl std::fmt::Display for MemberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Non-owning relation from an abstract member to one constant's
/// implementation. Both ends are paths from the normalization root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OverrideLink {
    pub key: MemberKey,
    pub constant: SmolStr,
    pub ordinal: u32,
    /// The enum declaration both ends belong to
    pub owner: NodePath,
    pub abstract_path: NodePath,
    pub implementation_path: NodePath,
}

/// Non-fatal finding attached to a normalization result
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Observation {
    /// A constant body method that matches no abstract member of the enum
    UnresolvedOverride {
        constant: SmolStr,
        ordinal: u32,
        key: MemberKey,
        range: TextRange,
    },
    /// A constant body that leaves an abstract member unimplemented
    MissingImplementation {
        constant: SmolStr,
        ordinal: u32,
        key: MemberKey,
        range: TextRange,
    },
}

impl Observation {
    pub fn key(&self) -> &MemberKey {
        match self {
            Self::UnresolvedOverride { key, .. } | Self::MissingImplementation { key, .. } => key,
        }
    }

    pub fn constant(&self) -> &str {
        match self {
            Self::UnresolvedOverride { constant, .. }
            | Self::MissingImplementation { constant, .. } => constant,
        }
    }

    pub fn is_unresolved_override(&self) -> bool {
        matches!(self, Self::UnresolvedOverride { .. })
    }
}

/// Result of normalizing one enum declaration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumNormalization {
    pub root: UastNode,
    /// Type the enum implicitly extends
    pub supertype: SmolStr,
    pub links: Vec<OverrideLink>,
    pub observations: Vec<Observation>,
    /// Paths of abstract members, nested enums included
    pub abstract_members: Vec<NodePath>,
}

impl EnumNormalization {
    pub fn name(&self) -> Option<&str> {
        self.root.name()
    }

    pub fn constants(&self) -> impl Iterator<Item = &UastNode> {
        self.root.children_of(NodeKind::is_enum_constant)
    }

    /// Members of the enum type itself, constants excluded
    pub fn members(&self) -> impl Iterator<Item = &UastNode> {
        self.root.children().iter().filter(|c| {
            !c.kind().is_enum_constant()
                && !matches!(
                    c.kind(),
                    NodeKind::Modifier
                        | NodeKind::Annotation
                        | NodeKind::Identifier
                        | NodeKind::TypeReference
                )
        })
    }

    pub fn abstract_members(&self) -> impl Iterator<Item = &UastNode> {
        self.abstract_members.iter().filter_map(|p| self.root.resolve(p))
    }

    /// Implementations linked to the abstract member `key`
    pub fn implementations_of<'a>(&'a self, key: &'a MemberKey) -> impl Iterator<Item = &'a UastNode> + 'a {
        self.links
            .iter()
            .filter(move |l| l.key == *key)
            .filter_map(|l| self.root.resolve(&l.implementation_path))
    }

    /// The `(abstract, implementation)` pair behind `link`
    pub fn resolve_link(&self, link: &OverrideLink) -> Option<(&UastNode, &UastNode)> {
        Some((
            self.root.resolve(&link.abstract_path)?,
            self.root.resolve(&link.implementation_path)?,
        ))
    }

    pub fn unresolved_overrides(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(|o| o.is_unresolved_override())
    }
}

/// Links and observations gathered across nested declarations
#[derive(Debug, Default)]
pub(super) struct Collected {
    links: Vec<OverrideLink>,
    observations: Vec<Observation>,
    abstract_members: Vec<NodePath>,
}

// ============================================================================
// Normalizer
// ============================================================================

/// Normalizes enum declarations of one source text.
pub struct EnumNormalizer<'a, 's, F: Frontend> {
    frontend: &'a F,
    factory: NodeFactory<'s>,
    config: NormalizerConfig,
}

impl<'a, 's, F: Frontend> EnumNormalizer<'a, 's, F> {
    /// `source` must be the exact text the front-end parsed
    pub fn new(frontend: &'a F, source: &'s str, config: NormalizerConfig) -> Self {
        Self {
            frontend,
            factory: NodeFactory::new(source),
            config,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize one enum declaration
    pub fn normalize(&self, declaration: &F::Fragment) -> Result<EnumNormalization> {
        let fe = self.frontend;
        let range = fe.range(declaration);
        if fe.shape(declaration) != FragmentShape::EnumDeclaration {
            return Err(UastError::malformed(
                NodeKind::EnumDeclaration,
                range,
                "not an enum declaration",
            ));
        }
        fe.check_well_formed(declaration)
            .map_err(|m| UastError::malformed(NodeKind::EnumDeclaration, m.range, m.reason))?;

        let mut collected = Collected::default();
        let root = self.enum_declaration(declaration, &NodePath::root(), 0, &mut collected)?;
        if self.config.verify_spans {
            self.factory.mapper().verify_tree(&root)?;
        }

        tracing::debug!(
            "[NORMALIZE] {} enum {}: {} constants, {} nodes, {} links, {} observations",
            fe.language(),
            root.name().unwrap_or("?"),
            root.children_of(NodeKind::is_enum_constant).count(),
            root.node_count(),
            collected.links.len(),
            collected.observations.len()
        );

        Ok(EnumNormalization {
            root,
            supertype: SmolStr::new(fe.implicit_supertype()),
            links: collected.links,
            observations: collected.observations,
            abstract_members: collected.abstract_members,
        })
    }

    /// Normalize every outermost enum declaration under `root` independently
    pub fn normalize_all(&self, root: &F::Fragment) -> Vec<Result<EnumNormalization>> {
        self.frontend
            .enum_declarations(root)
            .iter()
            .map(|decl| {
                let result = self.normalize(decl);
                if let Err(err) = &result {
                    if err.is_defect() {
                        tracing::error!("[NORMALIZE] internal defect: {}", err);
                    } else {
                        tracing::warn!("[NORMALIZE] skipping declaration: {}", err);
                    }
                }
                result
            })
            .collect()
    }

    /// Lower any fragment by its shape
    fn lower(
        &self,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let shape = self.frontend.shape(fragment);
        self.check_depth(&kind_for(shape), fragment, depth)?;
        let depth = depth + 1;

        match shape {
            FragmentShape::EnumDeclaration => self.enum_declaration(fragment, path, depth, out),
            FragmentShape::ClassDeclaration => {
                self.type_declaration(NodeKind::ClassDeclaration, fragment, path, depth, out)
            }
            FragmentShape::InterfaceDeclaration => {
                self.type_declaration(NodeKind::InterfaceDeclaration, fragment, path, depth, out)
            }
            FragmentShape::EnumConstant => Err(UastError::malformed(
                NodeKind::EnumConstant { ordinal: 0 },
                self.frontend.range(fragment),
                "enum constant outside an enum body",
            )),
            FragmentShape::Field => {
                self.variables(NodeKind::FieldDeclaration, fragment, path, depth, out)
            }
            FragmentShape::LocalVariable => {
                self.variables(NodeKind::VariableDeclaration, fragment, path, depth, out)
            }
            FragmentShape::Constructor => {
                self.callable(NodeKind::ConstructorDeclaration, fragment, path, depth, out)
            }
            FragmentShape::Method => {
                self.callable(NodeKind::FunctionDeclaration, fragment, path, depth, out)
            }
            FragmentShape::Initializer => self.initializer(fragment, path, depth, out),
            FragmentShape::Block => self.block_statement(fragment, path, depth, out),
            FragmentShape::Return => self.compound(NodeKind::Return, fragment, path, depth, out),
            FragmentShape::If => self.compound(NodeKind::If, fragment, path, depth, out),
            FragmentShape::ExpressionStatement => {
                self.compound(NodeKind::ExpressionStatement, fragment, path, depth, out)
            }
            FragmentShape::Assignment => {
                self.compound(NodeKind::Assignment, fragment, path, depth, out)
            }
            FragmentShape::Binary => self.binary_chain(fragment, path, depth, out),
            FragmentShape::Unary => {
                self.compound(NodeKind::UnaryExpression, fragment, path, depth, out)
            }
            FragmentShape::Call => self.compound(NodeKind::Call, fragment, path, depth, out),
            FragmentShape::FieldAccess => {
                self.compound(NodeKind::QualifiedReference, fragment, path, depth, out)
            }
            FragmentShape::ObjectCreation => {
                self.compound(NodeKind::ObjectCreation, fragment, path, depth, out)
            }
            FragmentShape::Literal => self.leaf(NodeKind::Literal, fragment),
            FragmentShape::Name => self.leaf(NodeKind::Identifier, fragment),
            FragmentShape::This => self.leaf(NodeKind::This, fragment),
            FragmentShape::Opaque(label) => {
                self.leaf(NodeKind::Other(SmolStr::new_static(label)), fragment)
            }
        }
    }

    fn check_depth(&self, kind: &NodeKind, fragment: &F::Fragment, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(UastError::malformed(
                kind.clone(),
                self.frontend.range(fragment),
                format!("nesting deeper than {} levels", self.config.max_depth),
            ));
        }
        Ok(())
    }

    fn leaf(&self, kind: NodeKind, fragment: &F::Fragment) -> Result<UastNode> {
        self.factory.leaf(kind, self.frontend.range(fragment))
    }

    /// Modifier leaves and annotation nodes, in source order
    fn modifiers(&self, fragment: &F::Fragment) -> Result<Vec<UastNode>> {
        self.frontend
            .modifiers(fragment)
            .into_iter()
            .map(|m| match m.annotation {
                Some(annotation) => self.annotation(m.range, annotation),
                None => self.factory.leaf(NodeKind::Modifier, m.range),
            })
            .collect()
    }

    /// `@Name` with its element values as arguments. Literal values become
    /// `Literal` leaves; pairs and nested groups stay opaque.
    fn annotation(&self, range: TextRange, annotation: AnnotationInfo) -> Result<UastNode> {
        let kind = NodeKind::Annotation;
        let Some(name) = annotation.name else {
            return Err(UastError::malformed(kind, range, "annotation without a name"));
        };
        let mut children = vec![self.factory.leaf(NodeKind::Identifier, name)?];
        if let Some(arguments) = annotation.arguments {
            let values = arguments
                .items
                .into_iter()
                .map(|value| {
                    let value_kind = if value.literal {
                        NodeKind::Literal
                    } else {
                        NodeKind::Other("element".into())
                    };
                    self.factory.leaf(value_kind, value.range)
                })
                .collect::<Result<Vec<_>>>()?;
            children.push(self.factory.node(NodeKind::Arguments, arguments.range, values)?);
        }
        self.factory.node(kind, range, children)
    }

    /// Type reference leaf; primitive types carry the `Primitive` role
    fn type_reference(&self, ty: TypeInfo) -> Result<UastNode> {
        if ty.primitive {
            self.factory
                .leaf_with_role(NodeKind::TypeReference, ty.range, Role::Primitive)
        } else {
            self.factory.leaf(NodeKind::TypeReference, ty.range)
        }
    }

    fn identifier(&self, owner: &NodeKind, fragment: &F::Fragment) -> Result<UastNode> {
        match self.frontend.name(fragment) {
            Some(range) => self.factory.leaf(NodeKind::Identifier, range),
            None => Err(UastError::malformed(
                owner.clone(),
                self.frontend.range(fragment),
                "missing name",
            )),
        }
    }
}

/// Node kind a shape lowers to, used for error reporting
fn kind_for(shape: FragmentShape) -> NodeKind {
    match shape {
        FragmentShape::EnumDeclaration => NodeKind::EnumDeclaration,
        FragmentShape::ClassDeclaration => NodeKind::ClassDeclaration,
        FragmentShape::InterfaceDeclaration => NodeKind::InterfaceDeclaration,
        FragmentShape::EnumConstant => NodeKind::EnumConstant { ordinal: 0 },
        FragmentShape::Field => NodeKind::FieldDeclaration,
        FragmentShape::Constructor => NodeKind::ConstructorDeclaration,
        FragmentShape::Method => NodeKind::FunctionDeclaration,
        FragmentShape::Initializer => NodeKind::Initializer,
        FragmentShape::Block => NodeKind::Block,
        FragmentShape::Return => NodeKind::Return,
        FragmentShape::If => NodeKind::If,
        FragmentShape::LocalVariable => NodeKind::VariableDeclaration,
        FragmentShape::ExpressionStatement => NodeKind::ExpressionStatement,
        FragmentShape::Assignment => NodeKind::Assignment,
        FragmentShape::Binary => NodeKind::BinaryExpression,
        FragmentShape::Unary => NodeKind::UnaryExpression,
        FragmentShape::Call => NodeKind::Call,
        FragmentShape::FieldAccess => NodeKind::QualifiedReference,
        FragmentShape::ObjectCreation => NodeKind::ObjectCreation,
        FragmentShape::Literal => NodeKind::Literal,
        FragmentShape::Name => NodeKind::Identifier,
        FragmentShape::This => NodeKind::This,
        FragmentShape::Opaque(label) => NodeKind::Other(SmolStr::new_static(label)),
    }
}

/// Abstract members of one enum by key, in declaration order. The first
/// declaration of a key is the link target.
type AbstractIndex = IndexMap<MemberKey, NodePath>;

#[cfg(test)]
mod tests;
