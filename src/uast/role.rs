//! Role vocabulary shared by every language front-end.
//!
//! Roles describe what a node means independent of source syntax. The
//! per-kind rule table lives in a process-wide [`Vocabulary`] that is built
//! on first use and never mutated afterwards.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::kind::NodeKind;

macro_rules! roles {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A semantic role tag
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum Role {
            $($variant),*
        }

        impl Role {
            /// Every role, in vocabulary order
            pub const ALL: &'static [Role] = &[$(Role::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Role::$variant => $name),*
                }
            }
        }
    };
}

roles! {
    Declaration => "Declaration",
    Type => "Type",
    Enumeration => "Enumeration",
    Class => "Class",
    Interface => "Interface",
    Anonymous => "Anonymous",
    Member => "Member",
    Constant => "Constant",
    Field => "Field",
    Variable => "Variable",
    Function => "Function",
    Constructor => "Constructor",
    Parameter => "Parameter",
    Argument => "Argument",
    Initializer => "Initializer",
    Body => "Body",
    Block => "Block",
    Statement => "Statement",
    Return => "Return",
    If => "If",
    Condition => "Condition",
    Then => "Then",
    Else => "Else",
    Expression => "Expression",
    Assignment => "Assignment",
    Binary => "Binary",
    Unary => "Unary",
    Operator => "Operator",
    Call => "Call",
    Qualified => "Qualified",
    Reference => "Reference",
    Identifier => "Identifier",
    Literal => "Literal",
    This => "This",
    Instantiation => "Instantiation",
    Modifier => "Modifier",
    Annotation => "Annotation",
    Primitive => "Primitive",
    Incomplete => "Incomplete",
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RoleSet
// ============================================================================

/// A set of roles. Insertion is idempotent and iteration follows vocabulary
/// order, so two sets holding the same roles are equal however they were built.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u64);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | (1u64 << role as u8))
    }

    pub fn of(roles: &[Role]) -> Self {
        roles.iter().fold(Self::EMPTY, |set, &role| set.with(role))
    }

    pub fn insert(&mut self, role: Role) {
        *self = self.with(role);
    }

    pub const fn contains(self, role: Role) -> bool {
        (self.0 & (1u64 << role as u8)) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: RoleSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.iter().copied().filter(move |&r| self.contains(r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, RoleSet::with)
    }
}

impl std::fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.iter().map(Role::name).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Role::name))
    }
}

// ============================================================================
// Vocabulary
// ============================================================================

/// The frozen per-kind role table
#[derive(Debug)]
pub struct Vocabulary {
    by_kind: FxHashMap<&'static str, RoleSet>,
    by_name: FxHashMap<&'static str, Role>,
}

static VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

impl Vocabulary {
    /// The process-wide vocabulary
    pub fn global() -> &'static Vocabulary {
        &VOCABULARY
    }

    fn build() -> Self {
        use Role::*;

        let rules: &[(&'static str, &[Role])] = &[
            ("EnumDeclaration", &[Declaration, Type, Enumeration]),
            ("EnumConstant", &[Declaration, Constant, Enumeration, Member]),
            ("AnonymousClass", &[Declaration, Type, Class, Anonymous, Body]),
            ("ClassDeclaration", &[Declaration, Type, Class]),
            ("InterfaceDeclaration", &[Declaration, Type, Interface]),
            ("FieldDeclaration", &[Declaration, Member, Field, Variable]),
            ("ConstructorDeclaration", &[Declaration, Member, Function, Constructor]),
            ("FunctionDeclaration", &[Declaration, Member, Function]),
            ("Initializer", &[Member, Initializer, Body]),
            ("Parameter", &[Declaration, Parameter, Variable]),
            ("TypeReference", &[Type, Reference]),
            ("Identifier", &[Identifier]),
            ("Modifier", &[Modifier]),
            ("Annotation", &[Modifier, Annotation]),
            ("Arguments", &[Argument, Initializer]),
            ("Block", &[Block, Body, Statement]),
            ("Return", &[Statement, Return]),
            ("If", &[Statement, If, Condition]),
            ("VariableDeclaration", &[Declaration, Statement, Variable]),
            ("ExpressionStatement", &[Statement, Expression]),
            ("Assignment", &[Expression, Assignment, Binary]),
            ("BinaryExpression", &[Expression, Binary]),
            ("UnaryExpression", &[Expression, Unary]),
            ("Operator", &[Operator]),
            ("Call", &[Expression, Call]),
            ("QualifiedReference", &[Expression, Qualified, Reference]),
            ("ObjectCreation", &[Expression, Instantiation, Call]),
            ("Literal", &[Expression, Literal]),
            ("This", &[Expression, This, Reference]),
            ("statement", &[Statement, Incomplete]),
            ("empty", &[Statement]),
            ("error", &[Statement, Incomplete]),
        ];

        let by_kind = rules
            .iter()
            .map(|&(kind, roles)| (kind, RoleSet::of(roles)))
            .collect();
        let by_name = Role::ALL.iter().map(|&r| (r.name(), r)).collect();

        Self { by_kind, by_name }
    }

    /// Roles attached to every node of `kind`
    pub fn roles_for(&self, kind: &NodeKind) -> RoleSet {
        if let Some(&roles) = self.by_kind.get(kind.name()) {
            return roles;
        }
        match kind {
            // Unmapped language constructs are expressions kept as leaves
            NodeKind::Other(_) => RoleSet::of(&[Role::Expression, Role::Incomplete]),
            _ => RoleSet::EMPTY,
        }
    }

    pub fn role_by_name(&self, name: &str) -> Option<Role> {
        self.by_name.get(name).copied()
    }

    /// Parse a comma separated list of role names
    pub fn parse_roles(&self, names: &str) -> Option<RoleSet> {
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| self.role_by_name(n))
            .collect::<Option<Vec<_>>>()
            .map(|roles| RoleSet::of(&roles))
    }

    /// Whether `name` has an explicit rule
    pub fn has_rule(&self, name: &str) -> bool {
        self.by_kind.contains_key(name)
    }
}
