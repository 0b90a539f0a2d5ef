//! Syntax kinds and the rowan language.

use std::fmt;

macro_rules! kinds {
  ($($name:ident),* $(,)?) => {
    /// A kind of token or node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[repr(u16)]
    pub enum SyntaxKind {
      $($name,)*
    }

    impl SyntaxKind {
      /// Every kind, indexed by discriminant.
      pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$name,)*];
    }
  };
}

kinds! {
  // trivia
  Whitespace,
  LineComment,
  BlockComment,
  Directive,
  Invalid,
  // atoms
  Id,
  Number,
  String,
  Char,
  // punctuation
  QuestionQuestionEq,
  LtLtEq,
  QuestionDot,
  QuestionLSquare,
  QuestionQuestion,
  FatArrow,
  EqEq,
  BangEq,
  LtEq,
  GtEq,
  AmpAmp,
  BarBar,
  PlusPlus,
  MinusMinus,
  PlusEq,
  MinusEq,
  StarEq,
  SlashEq,
  PercentEq,
  AmpEq,
  BarEq,
  CaretEq,
  LtLt,
  ColonColon,
  LCurly,
  RCurly,
  LRound,
  RRound,
  LSquare,
  RSquare,
  Dot,
  Comma,
  Semicolon,
  Colon,
  Question,
  Eq,
  Bang,
  Lt,
  Gt,
  Plus,
  Minus,
  Star,
  Slash,
  Percent,
  Amp,
  Bar,
  Caret,
  Tilde,
  // keywords
  AbstractKw,
  AsKw,
  BaseKw,
  BreakKw,
  CaseKw,
  CatchKw,
  ClassKw,
  ConstKw,
  ContinueKw,
  DefaultKw,
  DoKw,
  ElseKw,
  EnumKw,
  ExternKw,
  FalseKw,
  FinallyKw,
  ForKw,
  ForeachKw,
  IfKw,
  InKw,
  InterfaceKw,
  InternalKw,
  IsKw,
  LockKw,
  NamespaceKw,
  NewKw,
  NullKw,
  OutKw,
  OverrideKw,
  ParamsKw,
  PrivateKw,
  ProtectedKw,
  PublicKw,
  ReadonlyKw,
  RefKw,
  ReturnKw,
  SealedKw,
  StaticKw,
  StructKw,
  SwitchKw,
  ThisKw,
  ThrowKw,
  TrueKw,
  TryKw,
  TypeofKw,
  UnsafeKw,
  UsingKw,
  VirtualKw,
  VoidKw,
  VolatileKw,
  WhileKw,
  // nodes: items
  Root,
  StmtList,
  UsingDirective,
  NamespaceDecl,
  TypeDecl,
  EnumDecl,
  EnumMember,
  BaseList,
  TypeParamList,
  FieldDecl,
  MethodDecl,
  CtorDecl,
  CtorInitializer,
  PropertyDecl,
  IndexerDecl,
  AccessorList,
  Accessor,
  ExprBody,
  ParamList,
  BracketParamList,
  Param,
  DefaultValue,
  Attribute,
  // nodes: types
  TypeRef,
  TypeArgList,
  ArrayRank,
  // nodes: statements
  Block,
  LocalDeclStmt,
  VarDeclarator,
  ExprStmt,
  ReturnStmt,
  IfStmt,
  ElseClause,
  WhileStmt,
  DoStmt,
  ForStmt,
  ForInit,
  ForCond,
  ForIter,
  ForeachStmt,
  ThrowStmt,
  BreakStmt,
  ContinueStmt,
  UsingStmt,
  TryStmt,
  CatchClause,
  CatchDecl,
  FinallyClause,
  SwitchStmt,
  SwitchSection,
  CaseLabel,
  DefaultLabel,
  LockStmt,
  YieldStmt,
  LocalFuncStmt,
  EmptyStmt,
  // nodes: expressions
  ExprName,
  ExprLit,
  ExprThis,
  ExprBase,
  ExprParen,
  ExprMember,
  ExprCondMember,
  ExprIndex,
  ExprCondIndex,
  ExprCall,
  ExprNew,
  ExprDefault,
  ExprTypeof,
  ExprCast,
  ExprUnary,
  ExprPostfix,
  ExprBinary,
  ExprAssign,
  ExprConditional,
  ExprIs,
  ExprAs,
  ExprLambda,
  // nodes: expression parts
  ArgList,
  BracketArgList,
  Arg,
  DeclExpr,
  LambdaParams,
  ObjectInit,
  CollectionInit,
  InitMember,
  InitIndexer,
  InitElement,
  // recovery
  Error,
}

impl SyntaxKind {
  /// Punctuation, longest first, so the first prefix match is the right one.
  pub const PUNCTUATION: [(&'static [u8], SyntaxKind); 48] = [
    (b"??=", SyntaxKind::QuestionQuestionEq),
    (b"<<=", SyntaxKind::LtLtEq),
    (b"?.", SyntaxKind::QuestionDot),
    (b"?[", SyntaxKind::QuestionLSquare),
    (b"??", SyntaxKind::QuestionQuestion),
    (b"=>", SyntaxKind::FatArrow),
    (b"==", SyntaxKind::EqEq),
    (b"!=", SyntaxKind::BangEq),
    (b"<=", SyntaxKind::LtEq),
    (b">=", SyntaxKind::GtEq),
    (b"&&", SyntaxKind::AmpAmp),
    (b"||", SyntaxKind::BarBar),
    (b"++", SyntaxKind::PlusPlus),
    (b"--", SyntaxKind::MinusMinus),
    (b"+=", SyntaxKind::PlusEq),
    (b"-=", SyntaxKind::MinusEq),
    (b"*=", SyntaxKind::StarEq),
    (b"/=", SyntaxKind::SlashEq),
    (b"%=", SyntaxKind::PercentEq),
    (b"&=", SyntaxKind::AmpEq),
    (b"|=", SyntaxKind::BarEq),
    (b"^=", SyntaxKind::CaretEq),
    (b"<<", SyntaxKind::LtLt),
    (b"::", SyntaxKind::ColonColon),
    (b"{", SyntaxKind::LCurly),
    (b"}", SyntaxKind::RCurly),
    (b"(", SyntaxKind::LRound),
    (b")", SyntaxKind::RRound),
    (b"[", SyntaxKind::LSquare),
    (b"]", SyntaxKind::RSquare),
    (b".", SyntaxKind::Dot),
    (b",", SyntaxKind::Comma),
    (b";", SyntaxKind::Semicolon),
    (b":", SyntaxKind::Colon),
    (b"?", SyntaxKind::Question),
    (b"=", SyntaxKind::Eq),
    (b"!", SyntaxKind::Bang),
    (b"<", SyntaxKind::Lt),
    (b">", SyntaxKind::Gt),
    (b"+", SyntaxKind::Plus),
    (b"-", SyntaxKind::Minus),
    (b"*", SyntaxKind::Star),
    (b"/", SyntaxKind::Slash),
    (b"%", SyntaxKind::Percent),
    (b"&", SyntaxKind::Amp),
    (b"|", SyntaxKind::Bar),
    (b"^", SyntaxKind::Caret),
    (b"~", SyntaxKind::Tilde),
  ];

  /// Reserved words. Contextual words like `var`, `get` and `value` are identifiers.
  pub const KEYWORDS: [(&'static [u8], SyntaxKind); 51] = [
    (b"abstract", SyntaxKind::AbstractKw),
    (b"as", SyntaxKind::AsKw),
    (b"base", SyntaxKind::BaseKw),
    (b"break", SyntaxKind::BreakKw),
    (b"case", SyntaxKind::CaseKw),
    (b"catch", SyntaxKind::CatchKw),
    (b"class", SyntaxKind::ClassKw),
    (b"const", SyntaxKind::ConstKw),
    (b"continue", SyntaxKind::ContinueKw),
    (b"default", SyntaxKind::DefaultKw),
    (b"do", SyntaxKind::DoKw),
    (b"else", SyntaxKind::ElseKw),
    (b"enum", SyntaxKind::EnumKw),
    (b"extern", SyntaxKind::ExternKw),
    (b"false", SyntaxKind::FalseKw),
    (b"finally", SyntaxKind::FinallyKw),
    (b"for", SyntaxKind::ForKw),
    (b"foreach", SyntaxKind::ForeachKw),
    (b"if", SyntaxKind::IfKw),
    (b"in", SyntaxKind::InKw),
    (b"interface", SyntaxKind::InterfaceKw),
    (b"internal", SyntaxKind::InternalKw),
    (b"is", SyntaxKind::IsKw),
    (b"lock", SyntaxKind::LockKw),
    (b"namespace", SyntaxKind::NamespaceKw),
    (b"new", SyntaxKind::NewKw),
    (b"null", SyntaxKind::NullKw),
    (b"out", SyntaxKind::OutKw),
    (b"override", SyntaxKind::OverrideKw),
    (b"params", SyntaxKind::ParamsKw),
    (b"private", SyntaxKind::PrivateKw),
    (b"protected", SyntaxKind::ProtectedKw),
    (b"public", SyntaxKind::PublicKw),
    (b"readonly", SyntaxKind::ReadonlyKw),
    (b"ref", SyntaxKind::RefKw),
    (b"return", SyntaxKind::ReturnKw),
    (b"sealed", SyntaxKind::SealedKw),
    (b"static", SyntaxKind::StaticKw),
    (b"struct", SyntaxKind::StructKw),
    (b"switch", SyntaxKind::SwitchKw),
    (b"this", SyntaxKind::ThisKw),
    (b"throw", SyntaxKind::ThrowKw),
    (b"true", SyntaxKind::TrueKw),
    (b"try", SyntaxKind::TryKw),
    (b"typeof", SyntaxKind::TypeofKw),
    (b"unsafe", SyntaxKind::UnsafeKw),
    (b"using", SyntaxKind::UsingKw),
    (b"virtual", SyntaxKind::VirtualKw),
    (b"void", SyntaxKind::VoidKw),
    (b"volatile", SyntaxKind::VolatileKw),
    (b"while", SyntaxKind::WhileKw),
  ];

  #[must_use]
  pub fn keyword(bs: &[u8]) -> Option<SyntaxKind> {
    SyntaxKind::KEYWORDS.iter().find(|&&(k, _)| k == bs).map(|&(_, sk)| sk)
  }

  #[must_use]
  pub fn is_trivia(self) -> bool {
    matches!(
      self,
      SyntaxKind::Whitespace
        | SyntaxKind::LineComment
        | SyntaxKind::BlockComment
        | SyntaxKind::Directive
        | SyntaxKind::Invalid
    )
  }

  #[must_use]
  pub fn is_comment(self) -> bool {
    matches!(self, SyntaxKind::LineComment | SyntaxKind::BlockComment)
  }

  /// Declaration modifiers that may precede a member or type.
  #[must_use]
  pub fn is_modifier(self) -> bool {
    matches!(
      self,
      SyntaxKind::AbstractKw
        | SyntaxKind::ConstKw
        | SyntaxKind::ExternKw
        | SyntaxKind::InternalKw
        | SyntaxKind::OverrideKw
        | SyntaxKind::PrivateKw
        | SyntaxKind::ProtectedKw
        | SyntaxKind::PublicKw
        | SyntaxKind::ReadonlyKw
        | SyntaxKind::SealedKw
        | SyntaxKind::StaticKw
        | SyntaxKind::UnsafeKw
        | SyntaxKind::VirtualKw
        | SyntaxKind::VolatileKw
        | SyntaxKind::NewKw
    )
  }

  /// The fixed text of this token kind, if any.
  #[must_use]
  pub fn token_text(self) -> Option<&'static str> {
    SyntaxKind::PUNCTUATION
      .iter()
      .chain(SyntaxKind::KEYWORDS.iter())
      .find(|&&(_, sk)| sk == self)
      .and_then(|&(bs, _)| std::str::from_utf8(bs).ok())
  }
}

impl fmt::Display for SyntaxKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(text) = self.token_text() {
      return write!(f, "`{text}`");
    }
    match self {
      SyntaxKind::Id => f.write_str("an identifier"),
      SyntaxKind::Number => f.write_str("a number"),
      SyntaxKind::String => f.write_str("a string"),
      SyntaxKind::Char => f.write_str("a character"),
      _ => write!(f, "{self:?}"),
    }
  }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
  fn from(kind: SyntaxKind) -> Self {
    Self(kind as u16)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharp {}

impl rowan::Language for CSharp {
  type Kind = SyntaxKind;

  fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
    SyntaxKind::ALL[usize::from(raw.0)]
  }

  fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
    kind.into()
  }
}

pub type SyntaxNode = rowan::SyntaxNode<CSharp>;
pub type SyntaxToken = rowan::SyntaxToken<CSharp>;
pub type SyntaxElement = rowan::SyntaxElement<CSharp>;
