//! Front-end capability interface.
//!
//! The normalizer never sees a concrete syntax tree type. A language
//! front-end exposes its CST through [`Frontend`]: it classifies fragments,
//! reports their trimmed source ranges and decomposes them into the pieces
//! the normalizer asks for. Pieces that are plain text in every language
//! (names, modifiers, type references, operators) are handed over as
//! ranges; everything with structure is handed over as another fragment.

mod java;

pub use java::JavaFrontend;

use text_size::TextRange;

/// Structural classification of a CST fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentShape {
    EnumDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumConstant,
    Field,
    Constructor,
    Method,
    Initializer,
    Block,
    Return,
    If,
    LocalVariable,
    ExpressionStatement,
    Assignment,
    Binary,
    Unary,
    Call,
    FieldAccess,
    ObjectCreation,
    Literal,
    Name,
    This,
    /// A construct kept as a single leaf, labelled (`"statement"`, `"lambda"`, ...)
    Opaque(&'static str),
}

/// One modifier keyword or annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierInfo {
    pub range: TextRange,
    /// Set for annotations, `None` for keywords
    pub annotation: Option<AnnotationInfo>,
}

impl ModifierInfo {
    pub fn keyword(range: TextRange) -> Self {
        Self {
            range,
            annotation: None,
        }
    }

    pub fn is_annotation(&self) -> bool {
        self.annotation.is_some()
    }
}

/// Name and element values of an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationInfo {
    /// The (possibly qualified) annotation type name after `@`
    pub name: Option<TextRange>,
    /// `(...)` element list, absent for marker annotations
    pub arguments: Option<Delimited<AnnotationValue>>,
}

/// One element value of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationValue {
    pub range: TextRange,
    /// A single literal token, as opposed to `name = value` pairs or
    /// nested groups
    pub literal: bool,
}

/// A written type and whether it is a primitive keyword type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub range: TextRange,
    pub primitive: bool,
}

/// A delimited section (`(...)` or `{...}`) and the fragments inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimited<F> {
    pub range: TextRange,
    pub items: Vec<F>,
}

/// One declared variable of a field or local variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator<F> {
    pub name: TextRange,
    pub initializer: Option<F>,
}

/// Why a fragment cannot be normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformation {
    pub range: TextRange,
    pub reason: String,
}

/// Capabilities a language front-end offers to the normalizer
pub trait Frontend {
    type Fragment: Clone + std::fmt::Debug;

    /// Language name, used in logs
    fn language(&self) -> &'static str;

    /// Type every enum of this language implicitly extends
    fn implicit_supertype(&self) -> &str;

    /// Enum-like declarations under `root` that are not nested in another one
    fn enum_declarations(&self, root: &Self::Fragment) -> Vec<Self::Fragment>;

    fn shape(&self, fragment: &Self::Fragment) -> FragmentShape;

    /// Source range from the first to the last significant token
    fn range(&self, fragment: &Self::Fragment) -> TextRange;

    /// Reject degenerate trees: unbalanced delimiters, missing bodies and
    /// unparsable tokens in structural positions
    fn check_well_formed(&self, fragment: &Self::Fragment) -> Result<(), Malformation>;

    /// Declared name (or accessed member name for a field access)
    fn name(&self, fragment: &Self::Fragment) -> Option<TextRange>;

    fn modifiers(&self, fragment: &Self::Fragment) -> Vec<ModifierInfo>;

    /// Whether a member is an abstract contract without implementation
    fn is_abstract(&self, fragment: &Self::Fragment) -> bool;

    fn super_types(&self, fragment: &Self::Fragment) -> Vec<TextRange>;

    /// Enum constants, in declaration order
    fn constants(&self, fragment: &Self::Fragment) -> Vec<Self::Fragment>;

    /// Members of a type declaration (after the constants of an enum)
    fn members(&self, fragment: &Self::Fragment) -> Vec<Self::Fragment>;

    /// Argument list of a constant, call or object creation
    fn arguments(&self, fragment: &Self::Fragment) -> Option<Delimited<Self::Fragment>>;

    /// Anonymous class body of a constant or object creation
    fn class_body(&self, fragment: &Self::Fragment) -> Option<Delimited<Self::Fragment>>;

    fn parameters(&self, fragment: &Self::Fragment) -> Vec<Self::Fragment>;

    /// Declared, returned, created or tested type
    fn type_ref(&self, fragment: &Self::Fragment) -> Option<TypeInfo>;

    /// Statement body of a method, constructor, initializer or block
    fn body(&self, fragment: &Self::Fragment) -> Option<Delimited<Self::Fragment>>;

    fn declarators(&self, fragment: &Self::Fragment) -> Vec<Declarator<Self::Fragment>>;

    /// Sub-statements and sub-expressions, in source order
    fn operands(&self, fragment: &Self::Fragment) -> Vec<Self::Fragment>;

    fn operator(&self, fragment: &Self::Fragment) -> Option<TextRange>;
}
