//! Core, non-public data structures for the container.

use std::any::{self, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use crate::container::Container;
use crate::error::ResolutionError;

/// A type-erased service value.
///
/// The concrete payload behind the `dyn Any` is always an `Arc<T>` for the
/// service type `T`, so the value can be cloned freely while erased and
/// downcast back to `Arc<T>` at the typed API edge.
pub(crate) type Object = Arc<dyn Any + Send + Sync>;

pub(crate) type ErasedFactory =
  Arc<dyn Fn(&Container) -> Result<Object, ResolutionError> + Send + Sync>;

/// What a binding resolves to.
#[derive(Clone)]
pub(crate) enum Concrete {
  /// A factory closure taking the container.
  Factory(ErasedFactory),
  /// Another abstract identifier, enabling chained indirection.
  Alias(String),
  /// The abstract identifier names its own concrete type.
  SelfType,
}

pub(crate) struct Binding {
  pub(crate) concrete: Concrete,
  pub(crate) shared: bool,
}

/// Downcasts an erased value back to the `Arc<T>` payload it was stored as.
pub(crate) fn downcast<T: ?Sized + Any + Send + Sync>(
  key: &str,
  object: &Object,
) -> Result<Arc<T>, ResolutionError> {
  object
    .downcast_ref::<Arc<T>>()
    .cloned()
    .ok_or_else(|| ResolutionError::TypeMismatch {
      key: key.to_owned(),
      expected: any::type_name::<T>(),
    })
}

thread_local! {
  // The set of abstract identifiers currently being resolved on this
  // thread. Re-entering one means the alias chain or dependency graph has
  // looped back on itself.
  static RESOLVING_STACK: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// An RAII guard that bounds resolution recursion.
///
/// Entering adds the identifier to the thread-local resolving set and fails
/// with `CircularBinding` if it is already present; dropping removes it
/// again. Cyclic chains are reported at the first re-entry instead of
/// recursing without termination.
pub(crate) struct ResolutionGuard {
  key: String,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: &str) -> Result<Self, ResolutionError> {
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the key was already present.
      if !stack.borrow_mut().insert(key.to_owned()) {
        return Err(ResolutionError::CircularBinding(key.to_owned()));
      }
      Ok(Self {
        key: key.to_owned(),
      })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}
