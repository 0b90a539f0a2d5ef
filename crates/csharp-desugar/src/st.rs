use crate::Warning;
use crate::scope::{self, Scope};
use csharp_syntax::kind::SyntaxNode;
use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

/// The state of one pass over one document.
#[derive(Debug, Default)]
pub(crate) struct St {
  /// Keyed by the path of child indices from the root to the scope's node.
  scopes: FxHashMap<Vec<usize>, Scope>,
  warnings: Vec<Warning>,
  rewrites: usize,
  /// Every splice so far, in order.
  edits: Vec<Edit>,
}

#[derive(Debug)]
struct Edit {
  start: TextSize,
  old_len: TextSize,
  new_len: TextSize,
}

impl St {
  /// Returns the scope `node` is in, creating it if this pass has not seen it yet.
  pub(crate) fn scope(&mut self, node: &SyntaxNode) -> &mut Scope {
    let owner = scope::owner(node);
    self.scopes.entry(scope::path(&owner)).or_insert_with(|| Scope::new(&owner))
  }

  /// Records that `removed` children from `idx` under the node at `parent` were replaced by
  /// `added` children, so cached scopes after them moved.
  pub(crate) fn spliced(&mut self, parent: &[usize], idx: usize, removed: usize, added: usize) {
    if removed == added {
      return;
    }
    let depth = parent.len();
    let moved: Vec<_> = self
      .scopes
      .keys()
      .filter(|k| k.len() > depth && k.starts_with(parent) && k[depth] >= idx + removed)
      .cloned()
      .collect();
    let mut entries: Vec<_> = moved.into_iter().filter_map(|k| self.scopes.remove_entry(&k)).collect();
    for (key, _) in &mut entries {
      key[depth] = key[depth] - removed + added;
    }
    self.scopes.extend(entries);
  }

  pub(crate) fn warn(&mut self, range: TextRange, message: String) {
    log::warn!("{message}");
    let range = self.original(range);
    self.warnings.push(Warning { range, message });
  }

  /// Records that `old` at `start` was replaced by text of length `new_len`.
  pub(crate) fn edited(&mut self, old: TextRange, new_len: TextSize) {
    self.edits.push(Edit { start: old.start(), old_len: old.len(), new_len });
  }

  /// Maps a range in the current tree to the tree the pass started with. Ranges in generated
  /// text map to the start of the text it replaced.
  pub(crate) fn original(&self, range: TextRange) -> TextRange {
    let map = |mut pos: TextSize| {
      for e in self.edits.iter().rev() {
        if pos >= e.start + e.new_len {
          pos = pos - e.new_len + e.old_len;
        } else if pos > e.start {
          pos = e.start;
        }
      }
      pos
    };
    TextRange::new(map(range.start()), map(range.end()))
  }

  pub(crate) fn rewrote(&mut self) {
    self.rewrites += 1;
  }

  pub(crate) fn finish(self) -> (usize, Vec<Warning>) {
    (self.rewrites, self.warnings)
  }
}
