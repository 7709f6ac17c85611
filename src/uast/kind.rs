//! Node kinds of the universal AST.

use smol_str::SmolStr;

/// Kind tag of a UAST node.
///
/// The closed part covers the constructs every front-end shares. `Other`
/// carries language constructs that do not map onto the closed part and are
/// kept as opaque leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    EnumDeclaration,
    /// A constant with its zero-based declaration-order index
    EnumConstant {
        ordinal: u32,
    },
    AnonymousClass,
    ClassDeclaration,
    InterfaceDeclaration,
    FieldDeclaration,
    ConstructorDeclaration,
    FunctionDeclaration,
    Initializer,
    Parameter,
    TypeReference,
    Identifier,
    Modifier,
    /// An annotation: its type name and optional element values
    Annotation,
    Arguments,
    Block,
    Return,
    If,
    VariableDeclaration,
    ExpressionStatement,
    Assignment,
    BinaryExpression,
    UnaryExpression,
    Operator,
    Call,
    QualifiedReference,
    ObjectCreation,
    Literal,
    This,
    Other(SmolStr),
}

impl NodeKind {
    /// Stable display name
    pub fn name(&self) -> &str {
        match self {
            Self::EnumDeclaration => "EnumDeclaration",
            Self::EnumConstant { .. } => "EnumConstant",
            Self::AnonymousClass => "AnonymousClass",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::InterfaceDeclaration => "InterfaceDeclaration",
            Self::FieldDeclaration => "FieldDeclaration",
            Self::ConstructorDeclaration => "ConstructorDeclaration",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::Initializer => "Initializer",
            Self::Parameter => "Parameter",
            Self::TypeReference => "TypeReference",
            Self::Identifier => "Identifier",
            Self::Modifier => "Modifier",
            Self::Annotation => "Annotation",
            Self::Arguments => "Arguments",
            Self::Block => "Block",
            Self::Return => "Return",
            Self::If => "If",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::Assignment => "Assignment",
            Self::BinaryExpression => "BinaryExpression",
            Self::UnaryExpression => "UnaryExpression",
            Self::Operator => "Operator",
            Self::Call => "Call",
            Self::QualifiedReference => "QualifiedReference",
            Self::ObjectCreation => "ObjectCreation",
            Self::Literal => "Literal",
            Self::This => "This",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Kinds that carry their source text as token and have no children
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Modifier
                | Self::Literal
                | Self::This
                | Self::Operator
                | Self::TypeReference
                | Self::Other(_)
        )
    }

    /// Kinds that must name what they declare through an `Identifier` child
    pub fn is_named_declaration(&self) -> bool {
        matches!(
            self,
            Self::EnumDeclaration
                | Self::EnumConstant { .. }
                | Self::ClassDeclaration
                | Self::InterfaceDeclaration
                | Self::FunctionDeclaration
                | Self::ConstructorDeclaration
                | Self::Parameter
        )
    }

    /// Kinds whose token is the text of their `Identifier` child
    pub fn takes_name_token(&self) -> bool {
        self.is_named_declaration() || matches!(self, Self::Annotation)
    }

    /// Kinds that hold members of a type
    pub fn is_type_body(&self) -> bool {
        matches!(
            self,
            Self::EnumDeclaration
                | Self::AnonymousClass
                | Self::ClassDeclaration
                | Self::InterfaceDeclaration
        )
    }

    pub fn is_enum_constant(&self) -> bool {
        matches!(self, Self::EnumConstant { .. })
    }

    pub fn ordinal(&self) -> Option<u32> {
        match self {
            Self::EnumConstant { ordinal } => Some(*ordinal),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnumConstant { ordinal } => write!(f, "EnumConstant#{ordinal}"),
            _ => f.write_str(self.name()),
        }
    }
}
