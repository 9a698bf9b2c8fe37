//! Static access points backed by the global container.
//!
//! A facade names one container entry (its accessor) and exposes the
//! resolved object through associated functions on a unit struct. The first
//! use resolves the accessor from the global container and caches the result
//! process-wide; later uses reuse the cached object without touching the
//! container again, even if the accessor is re-bound in the meantime. Test
//! code swaps the cached slot for a double, and the swap stays visible to
//! every caller until the slot is dropped.

use std::any::Any;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;

use crate::core::{downcast, Object};
use crate::error::ResolutionError;
use crate::global::global;

// Resolved facade targets, keyed by accessor. Process-wide and lazy, like
// the global container itself.
static RESOLVED: Lazy<DashMap<&'static str, Object>> = Lazy::new(DashMap::new);

/// A static access point for one container-resolved object.
///
/// Implementors only supply the target capability and the accessor; the
/// [`facade!`](crate::facade!) macro generates both. Calls are forwarded by
/// invoking methods directly on the `Arc<Target>` returned from
/// [`resolve`](Facade::resolve).
///
/// ```
/// use std::sync::Arc;
/// use braid_ioc::{facade, global, Facade};
///
/// pub trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
///
/// struct FixedClock;
///
/// impl Clock for FixedClock {
///   fn now(&self) -> u64 {
///     1_724_000_000
///   }
/// }
///
/// facade! {
///   /// Static access to the application clock.
///   pub SystemClock => dyn Clock, "clock"
/// }
///
/// global().singleton_dyn::<dyn Clock, _>("clock", |_| Ok(Arc::new(FixedClock)));
///
/// assert_eq!(SystemClock::resolve().unwrap().now(), 1_724_000_000);
/// ```
pub trait Facade {
  /// The capability the facade forwards to: a concrete type or `dyn Trait`.
  type Target: ?Sized + Any + Send + Sync;

  /// The abstract identifier this facade resolves from the container.
  fn accessor() -> &'static str;

  /// Returns the facade's target, resolving it on first use.
  ///
  /// The first resolution runs under the cache slot's lock, so the accessor
  /// is resolved at most once no matter how many threads race the first
  /// call. Later re-bindings of the accessor are not observed until the
  /// slot is dropped with [`forget`](Facade::forget).
  fn resolve() -> Result<Arc<Self::Target>, ResolutionError>
  where
    Self: Sized,
  {
    let accessor = Self::accessor();
    match RESOLVED.entry(accessor) {
      Entry::Occupied(entry) => downcast::<Self::Target>(accessor, entry.get()),
      Entry::Vacant(vacant) => {
        let target = global().make::<Self::Target>(accessor)?;
        debug!("facade `{accessor}` resolved");
        vacant.insert(Arc::new(Arc::clone(&target)) as Object);
        Ok(target)
      }
    }
  }

  /// Replaces the cached target with a test double.
  ///
  /// Subsequent calls hit the double until [`forget`](Facade::forget) or
  /// [`clear_resolved`] drops the slot. The double only needs to satisfy
  /// the target capability set; no mocking framework is assumed.
  fn swap(double: Arc<Self::Target>)
  where
    Self: Sized,
  {
    debug!("facade `{}` swapped for a double", Self::accessor());
    RESOLVED.insert(Self::accessor(), Arc::new(double) as Object);
  }

  /// Wraps the currently cached target (resolving one if nothing is cached
  /// yet) and installs the wrapper as the facade's target.
  ///
  /// Returns the installed wrapper so the caller can keep a handle on the
  /// spy it just programmed.
  fn mock<F>(wrap: F) -> Result<Arc<Self::Target>, ResolutionError>
  where
    Self: Sized,
    F: FnOnce(Arc<Self::Target>) -> Arc<Self::Target>,
  {
    let double = wrap(Self::resolve()?);
    Self::swap(Arc::clone(&double));
    Ok(double)
  }

  /// Drops the cached target; the next call resolves afresh.
  fn forget()
  where
    Self: Sized,
  {
    RESOLVED.remove(Self::accessor());
  }
}

/// Empties the facade cache for every accessor.
///
/// Intended for test scopes that need a clean slate between cases.
pub fn clear_resolved() {
  RESOLVED.clear();
}
