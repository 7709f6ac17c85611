//! Logos-based lexer for Java
//!
//! Fast tokenization using the logos crate. The lexer is lossless: every
//! byte of the input ends up in exactly one token, unknown input included.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume a block comment up to and including its `*/`
///
/// An unterminated comment swallows the rest of the input and lexes as an error.
fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    IntNumber,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatNumber,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("<<=")]
    LtLtEq,

    #[token("<<")]
    LtLt,

    #[token("->")]
    Arrow,

    #[token("::")]
    ColonColon,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("@")]
    At,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("enum")]
    EnumKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("throws")]
    ThrowsKw,
    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("private")]
    PrivateKw,
    #[token("static")]
    StaticKw,
    #[token("final")]
    FinalKw,
    #[token("abstract")]
    AbstractKw,
    #[token("native")]
    NativeKw,
    #[token("synchronized")]
    SynchronizedKw,
    #[token("transient")]
    TransientKw,
    #[token("volatile")]
    VolatileKw,
    #[token("strictfp")]
    StrictfpKw,
    #[token("default")]
    DefaultKw,
    #[token("return")]
    ReturnKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("new")]
    NewKw,
    #[token("this")]
    ThisKw,
    #[token("super")]
    SuperKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("for")]
    ForKw,
    #[token("while")]
    WhileKw,
    #[token("do")]
    DoKw,
    #[token("switch")]
    SwitchKw,
    #[token("case")]
    CaseKw,
    #[token("try")]
    TryKw,
    #[token("catch")]
    CatchKw,
    #[token("finally")]
    FinallyKw,
    #[token("throw")]
    ThrowKw,
    #[token("break")]
    BreakKw,
    #[token("continue")]
    ContinueKw,
    #[token("assert")]
    AssertKw,
    #[token("void")]
    VoidKw,
    #[token("boolean")]
    BooleanKw,
    #[token("byte")]
    ByteKw,
    #[token("short")]
    ShortKw,
    #[token("int")]
    IntKw,
    #[token("long")]
    LongKw,
    #[token("char")]
    CharKw,
    #[token("float")]
    FloatKw,
    #[token("double")]
    DoubleKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            IntNumber => SyntaxKind::INT_NUMBER,
            FloatNumber => SyntaxKind::FLOAT_NUMBER,
            String => SyntaxKind::STRING,
            Char => SyntaxKind::CHAR,

            // Punctuation
            Ellipsis => SyntaxKind::ELLIPSIS,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            LtLt => SyntaxKind::LT_LT,
            Arrow => SyntaxKind::ARROW,
            ColonColon => SyntaxKind::COLON_COLON,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            At => SyntaxKind::AT,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Bang => SyntaxKind::BANG,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,
            Colon => SyntaxKind::COLON,

            // Keywords
            PackageKw => SyntaxKind::PACKAGE_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            ExtendsKw => SyntaxKind::EXTENDS_KW,
            ImplementsKw => SyntaxKind::IMPLEMENTS_KW,
            ThrowsKw => SyntaxKind::THROWS_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            FinalKw => SyntaxKind::FINAL_KW,
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            NativeKw => SyntaxKind::NATIVE_KW,
            SynchronizedKw => SyntaxKind::SYNCHRONIZED_KW,
            TransientKw => SyntaxKind::TRANSIENT_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            StrictfpKw => SyntaxKind::STRICTFP_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            IfKw => SyntaxKind::IF_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            NewKw => SyntaxKind::NEW_KW,
            ThisKw => SyntaxKind::THIS_KW,
            SuperKw => SyntaxKind::SUPER_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NullKw => SyntaxKind::NULL_KW,
            InstanceofKw => SyntaxKind::INSTANCEOF_KW,
            ForKw => SyntaxKind::FOR_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            DoKw => SyntaxKind::DO_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            CaseKw => SyntaxKind::CASE_KW,
            TryKw => SyntaxKind::TRY_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            AssertKw => SyntaxKind::ASSERT_KW,
            VoidKw => SyntaxKind::VOID_KW,
            BooleanKw => SyntaxKind::BOOLEAN_KW,
            ByteKw => SyntaxKind::BYTE_KW,
            ShortKw => SyntaxKind::SHORT_KW,
            IntKw => SyntaxKind::INT_KW,
            LongKw => SyntaxKind::LONG_KW,
            CharKw => SyntaxKind::CHAR_KW,
            FloatKw => SyntaxKind::FLOAT_KW,
            DoubleKw => SyntaxKind::DOUBLE_KW,
        }
    }
}
