//! Typed views over the lossless tree.

pub use rowan::ast::{AstChildren, AstNode, support};

use crate::kind::{CSharp, SyntaxKind as SK, SyntaxNode, SyntaxToken};

macro_rules! nodes {
  ($($name:ident),* $(,)?) => {
    $(
      #[derive(Debug, Clone, PartialEq, Eq, Hash)]
      pub struct $name(SyntaxNode);

      impl AstNode for $name {
        type Language = CSharp;

        fn can_cast(kind: SK) -> bool {
          kind == SK::$name
        }

        fn cast(node: SyntaxNode) -> Option<Self> {
          Self::can_cast(node.kind()).then_some(Self(node))
        }

        fn syntax(&self) -> &SyntaxNode {
          &self.0
        }
      }
    )*
  };
}

macro_rules! enum_node {
  ($(#[$meta:meta])* $name:ident { $($variant:ident($kind:ident)),* $(,)? }) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum $name {
      $($variant($kind),)*
    }

    impl AstNode for $name {
      type Language = CSharp;

      fn can_cast(kind: SK) -> bool {
        matches!(kind, $(SK::$kind)|*)
      }

      fn cast(node: SyntaxNode) -> Option<Self> {
        let ret = match node.kind() {
          $(SK::$kind => $name::$variant($kind(node)),)*
          _ => return None,
        };
        Some(ret)
      }

      fn syntax(&self) -> &SyntaxNode {
        match self {
          $($name::$variant(x) => x.syntax(),)*
        }
      }
    }
  };
}

nodes! {
  Root,
  StmtList,
  UsingDirective,
  NamespaceDecl,
  TypeDecl,
  EnumDecl,
  FieldDecl,
  MethodDecl,
  CtorDecl,
  PropertyDecl,
  IndexerDecl,
  AccessorList,
  Accessor,
  ExprBody,
  ParamList,
  BracketParamList,
  Param,
  TypeRef,
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
  ForeachStmt,
  ThrowStmt,
  BreakStmt,
  ContinueStmt,
  UsingStmt,
  TryStmt,
  CatchClause,
  CatchDecl,
  SwitchStmt,
  SwitchSection,
  LockStmt,
  YieldStmt,
  LocalFuncStmt,
  EmptyStmt,
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
}

enum_node!(Item {
  Using(UsingDirective),
  Namespace(NamespaceDecl),
  Type(TypeDecl),
  Enum(EnumDecl),
});

enum_node!(Member {
  Field(FieldDecl),
  Method(MethodDecl),
  Ctor(CtorDecl),
  Property(PropertyDecl),
  Indexer(IndexerDecl),
  Type(TypeDecl),
  Enum(EnumDecl),
});

enum_node!(Stmt {
  Block(Block),
  LocalDecl(LocalDeclStmt),
  Expr(ExprStmt),
  Return(ReturnStmt),
  If(IfStmt),
  While(WhileStmt),
  Do(DoStmt),
  For(ForStmt),
  Foreach(ForeachStmt),
  Throw(ThrowStmt),
  Break(BreakStmt),
  Continue(ContinueStmt),
  Using(UsingStmt),
  Try(TryStmt),
  Switch(SwitchStmt),
  Lock(LockStmt),
  Yield(YieldStmt),
  LocalFunc(LocalFuncStmt),
  Empty(EmptyStmt),
});

enum_node!(Expr {
  Name(ExprName),
  Lit(ExprLit),
  This(ExprThis),
  Base(ExprBase),
  Paren(ExprParen),
  Member(ExprMember),
  CondMember(ExprCondMember),
  Index(ExprIndex),
  CondIndex(ExprCondIndex),
  Call(ExprCall),
  New(ExprNew),
  Default(ExprDefault),
  Typeof(ExprTypeof),
  Cast(ExprCast),
  Unary(ExprUnary),
  Postfix(ExprPostfix),
  Binary(ExprBinary),
  Assign(ExprAssign),
  Conditional(ExprConditional),
  Is(ExprIs),
  As(ExprAs),
  Lambda(ExprLambda),
});

/// The value side of an initializer entry or declarator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InitValue {
  Expr(Expr),
  Object(ObjectInit),
  Collection(CollectionInit),
}

impl AstNode for InitValue {
  type Language = CSharp;

  fn can_cast(kind: SK) -> bool {
    matches!(kind, SK::ObjectInit | SK::CollectionInit) || Expr::can_cast(kind)
  }

  fn cast(node: SyntaxNode) -> Option<Self> {
    match node.kind() {
      SK::ObjectInit => Some(InitValue::Object(ObjectInit(node))),
      SK::CollectionInit => Some(InitValue::Collection(CollectionInit(node))),
      _ => Expr::cast(node).map(InitValue::Expr),
    }
  }

  fn syntax(&self) -> &SyntaxNode {
    match self {
      InitValue::Expr(x) => x.syntax(),
      InitValue::Object(x) => x.syntax(),
      InitValue::Collection(x) => x.syntax(),
    }
  }
}

enum_node!(
  /// An entry of an object or collection initializer block.
  InitEntry {
  Member(InitMember),
  Indexer(InitIndexer),
  Element(InitElement),
});

enum_node!(
  /// A node that holds a flat list of statements.
  StmtContainer {
  Block(Block),
  Section(SwitchSection),
  List(StmtList),
});

enum_node!(
  /// A declaration whose body is one flat variable namespace.
  ScopeDecl {
  Method(MethodDecl),
  Ctor(CtorDecl),
  Accessor(Accessor),
  Property(PropertyDecl),
  Indexer(IndexerDecl),
});

/// Returns the first token child that is not trivia.
#[must_use]
pub fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
  node.children_with_tokens().filter_map(rowan::NodeOrToken::into_token).find(|t| !t.kind().is_trivia())
}

fn token(node: &SyntaxNode, kind: SK) -> Option<SyntaxToken> {
  support::token(node, kind)
}

fn nth<N: AstNode<Language = CSharp>>(node: &SyntaxNode, n: usize) -> Option<N> {
  support::children(node).nth(n)
}

fn init_value(node: &SyntaxNode) -> Option<InitValue> {
  support::child(node)
}

impl Root {
  pub fn items(&self) -> AstChildren<Item> {
    support::children(&self.0)
  }
}

impl StmtList {
  pub fn stmts(&self) -> AstChildren<Stmt> {
    support::children(&self.0)
  }
}

impl NamespaceDecl {
  pub fn items(&self) -> AstChildren<Item> {
    support::children(&self.0)
  }
}

impl TypeDecl {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn members(&self) -> AstChildren<Member> {
    support::children(&self.0)
  }
}

impl FieldDecl {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn declarators(&self) -> AstChildren<VarDeclarator> {
    support::children(&self.0)
  }
}

impl MethodDecl {
  pub fn ret_ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn param_list(&self) -> Option<ParamList> {
    support::child(&self.0)
  }

  pub fn body(&self) -> Option<Block> {
    support::child(&self.0)
  }

  pub fn expr_body(&self) -> Option<ExprBody> {
    support::child(&self.0)
  }
}

impl CtorDecl {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn param_list(&self) -> Option<ParamList> {
    support::child(&self.0)
  }

  pub fn body(&self) -> Option<Block> {
    support::child(&self.0)
  }

  pub fn expr_body(&self) -> Option<ExprBody> {
    support::child(&self.0)
  }
}

impl PropertyDecl {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn accessor_list(&self) -> Option<AccessorList> {
    support::child(&self.0)
  }

  pub fn expr_body(&self) -> Option<ExprBody> {
    support::child(&self.0)
  }
}

impl IndexerDecl {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn param_list(&self) -> Option<BracketParamList> {
    support::child(&self.0)
  }

  pub fn accessor_list(&self) -> Option<AccessorList> {
    support::child(&self.0)
  }

  pub fn expr_body(&self) -> Option<ExprBody> {
    support::child(&self.0)
  }
}

impl AccessorList {
  pub fn accessors(&self) -> AstChildren<Accessor> {
    support::children(&self.0)
  }
}

impl Accessor {
  /// The `get`, `set` or `init` word.
  pub fn keyword(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  /// Whether this accessor has the implicit `value` parameter.
  #[must_use]
  pub fn binds_value(&self) -> bool {
    self.keyword().is_some_and(|t| matches!(t.text(), "set" | "init"))
  }

  pub fn body(&self) -> Option<Block> {
    support::child(&self.0)
  }

  pub fn expr_body(&self) -> Option<ExprBody> {
    support::child(&self.0)
  }
}

impl ExprBody {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ParamList {
  pub fn params(&self) -> AstChildren<Param> {
    support::children(&self.0)
  }
}

impl BracketParamList {
  pub fn params(&self) -> AstChildren<Param> {
    support::children(&self.0)
  }
}

impl Param {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl Block {
  pub fn stmts(&self) -> AstChildren<Stmt> {
    support::children(&self.0)
  }

  pub fn l_curly(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::LCurly)
  }

  pub fn r_curly(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::RCurly)
  }
}

impl LocalDeclStmt {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn declarators(&self) -> AstChildren<VarDeclarator> {
    support::children(&self.0)
  }

  /// Whether this is a `using` declaration.
  #[must_use]
  pub fn is_using(&self) -> bool {
    token(&self.0, SK::UsingKw).is_some()
  }

  #[must_use]
  pub fn is_const(&self) -> bool {
    token(&self.0, SK::ConstKw).is_some()
  }
}

impl VarDeclarator {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn init(&self) -> Option<InitValue> {
    init_value(&self.0)
  }

  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ExprStmt {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ReturnStmt {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl IfStmt {
  pub fn cond(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn then_stmt(&self) -> Option<Stmt> {
    support::child(&self.0)
  }

  pub fn else_clause(&self) -> Option<ElseClause> {
    support::child(&self.0)
  }
}

impl ElseClause {
  pub fn stmt(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl WhileStmt {
  pub fn cond(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl DoStmt {
  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }

  pub fn cond(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ForStmt {
  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl ForeachStmt {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl ThrowStmt {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl UsingStmt {
  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl CatchDecl {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl SwitchSection {
  pub fn stmts(&self) -> AstChildren<Stmt> {
    support::children(&self.0)
  }
}

impl LockStmt {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn body(&self) -> Option<Stmt> {
    support::child(&self.0)
  }
}

impl YieldStmt {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl LocalFuncStmt {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn param_list(&self) -> Option<ParamList> {
    support::child(&self.0)
  }
}

impl ExprName {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl ExprLit {
  pub fn token(&self) -> Option<SyntaxToken> {
    first_token(&self.0)
  }
}

impl ExprParen {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ExprMember {
  pub fn receiver(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl ExprCondMember {
  pub fn receiver(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn question_dot(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::QuestionDot)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl ExprIndex {
  pub fn receiver(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn args(&self) -> Option<BracketArgList> {
    support::child(&self.0)
  }
}

impl ExprCondIndex {
  pub fn receiver(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn args(&self) -> Option<BracketArgList> {
    support::child(&self.0)
  }
}

impl ExprCall {
  pub fn callee(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn arg_list(&self) -> Option<ArgList> {
    support::child(&self.0)
  }
}

impl ExprNew {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn arg_list(&self) -> Option<ArgList> {
    support::child(&self.0)
  }

  pub fn object_init(&self) -> Option<ObjectInit> {
    support::child(&self.0)
  }

  pub fn collection_init(&self) -> Option<CollectionInit> {
    support::child(&self.0)
  }

  /// Whether this creates an array, like `new int[3]` or `new[] { 1 }`.
  #[must_use]
  pub fn is_array(&self) -> bool {
    self.0.children().any(|c| c.kind() == SK::ArrayRank)
  }
}

impl ExprCast {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ExprUnary {
  pub fn op(&self) -> Option<SyntaxToken> {
    first_token(&self.0)
  }

  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ExprPostfix {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }
}

impl ExprBinary {
  pub fn lhs(&self) -> Option<Expr> {
    nth(&self.0, 0)
  }

  pub fn op(&self) -> Option<SyntaxToken> {
    first_token(&self.0)
  }

  pub fn rhs(&self) -> Option<Expr> {
    nth(&self.0, 1)
  }
}

impl ExprAssign {
  pub fn lhs(&self) -> Option<Expr> {
    nth(&self.0, 0)
  }

  pub fn op(&self) -> Option<SyntaxToken> {
    first_token(&self.0)
  }

  pub fn rhs(&self) -> Option<Expr> {
    nth(&self.0, 1)
  }
}

impl ExprConditional {
  pub fn cond(&self) -> Option<Expr> {
    nth(&self.0, 0)
  }

  pub fn yes(&self) -> Option<Expr> {
    nth(&self.0, 1)
  }

  pub fn no(&self) -> Option<Expr> {
    nth(&self.0, 2)
  }
}

impl ExprIs {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  /// The variable introduced by a type pattern, as in `x is Foo foo`.
  pub fn designation(&self) -> Option<SyntaxToken> {
    self
      .0
      .children_with_tokens()
      .filter_map(rowan::NodeOrToken::into_token)
      .find(|t| t.kind() == SK::Id && t.text() != "not")
  }
}

impl ExprLambda {
  pub fn body_expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn body_block(&self) -> Option<Block> {
    support::child(&self.0)
  }
}

impl ArgList {
  pub fn args(&self) -> AstChildren<Arg> {
    support::children(&self.0)
  }
}

impl BracketArgList {
  pub fn args(&self) -> AstChildren<Arg> {
    support::children(&self.0)
  }
}

impl Arg {
  pub fn expr(&self) -> Option<Expr> {
    support::child(&self.0)
  }

  pub fn decl(&self) -> Option<DeclExpr> {
    support::child(&self.0)
  }

  /// The `ref`, `out` or `in` modifier, if any.
  pub fn modifier(&self) -> Option<SyntaxToken> {
    self
      .0
      .children_with_tokens()
      .filter_map(rowan::NodeOrToken::into_token)
      .find(|t| matches!(t.kind(), SK::RefKw | SK::OutKw | SK::InKw))
  }

  /// The name of a named argument, like `x` in `f(x: 1)`.
  pub fn arg_name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Colon)?;
    token(&self.0, SK::Id)
  }
}

impl DeclExpr {
  pub fn ty(&self) -> Option<TypeRef> {
    support::child(&self.0)
  }

  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }
}

impl LambdaParams {
  pub fn params(&self) -> AstChildren<Param> {
    support::children(&self.0)
  }
}

impl ObjectInit {
  pub fn entries(&self) -> AstChildren<InitEntry> {
    support::children(&self.0)
  }
}

impl CollectionInit {
  pub fn entries(&self) -> AstChildren<InitEntry> {
    support::children(&self.0)
  }
}

impl InitMember {
  pub fn name(&self) -> Option<SyntaxToken> {
    token(&self.0, SK::Id)
  }

  pub fn value(&self) -> Option<InitValue> {
    init_value(&self.0)
  }
}

impl InitIndexer {
  pub fn args(&self) -> Option<BracketArgList> {
    support::child(&self.0)
  }

  pub fn value(&self) -> Option<InitValue> {
    init_value(&self.0)
  }
}

impl InitElement {
  pub fn value(&self) -> Option<InitValue> {
    init_value(&self.0)
  }
}

impl StmtContainer {
  pub fn stmts(&self) -> AstChildren<Stmt> {
    support::children(self.syntax())
  }
}

impl ScopeDecl {
  /// Returns the innermost scope declaration containing `node`, if any.
  #[must_use]
  pub fn containing(node: &SyntaxNode) -> Option<Self> {
    node.ancestors().find_map(|n| match n.kind() {
      // a property with an accessor list is not itself a scope; its accessors are.
      SK::PropertyDecl | SK::IndexerDecl if n.children().any(|c| c.kind() == SK::AccessorList) => {
        None
      }
      _ => Self::cast(n),
    })
  }

  /// The parameters declared directly by this scope.
  #[must_use]
  pub fn params(&self) -> Vec<Param> {
    let list = match self {
      ScopeDecl::Method(m) => m.param_list().map(|x| x.syntax().clone()),
      ScopeDecl::Ctor(c) => c.param_list().map(|x| x.syntax().clone()),
      ScopeDecl::Indexer(i) => i.param_list().map(|x| x.syntax().clone()),
      ScopeDecl::Accessor(a) => {
        let indexer = a.syntax().ancestors().find_map(IndexerDecl::cast);
        indexer.and_then(|i| i.param_list()).map(|x| x.syntax().clone())
      }
      ScopeDecl::Property(_) => None,
    };
    list.map(|l| support::children(&l).collect()).unwrap_or_default()
  }

  /// Whether the implicit `value` parameter is in scope.
  #[must_use]
  pub fn binds_value(&self) -> bool {
    match self {
      ScopeDecl::Accessor(a) => a.binds_value(),
      _ => false,
    }
  }
}
