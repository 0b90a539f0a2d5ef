use crate::Options;
use csharp_ty::{Resolver, TypeName};

#[derive(Clone, Copy)]
pub(crate) struct Cx<'a> {
  pub(crate) resolver: &'a dyn Resolver,
  pub(crate) options: &'a Options,
}

impl Cx<'_> {
  /// Renders a type the resolver gave us, shortened if asked.
  pub(crate) fn display(&self, ty: &TypeName) -> String {
    if self.options.short_type_names { ty.short().to_string() } else { ty.to_string() }
  }

  pub(crate) fn default_of(&self, ty: &TypeName) -> String {
    if self.options.short_type_names {
      self.resolver.default_value_literal(&ty.short())
    } else {
      self.resolver.default_value_literal(ty)
    }
  }
}
