//! The main `Container` struct and its associated methods.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, trace};

use crate::blueprint::{Blueprint, Injectable, Param};
use crate::core::{downcast, Binding, Concrete, Object, ResolutionGuard};
use crate::error::ResolutionError;

/// A thread-safe service container.
///
/// The container maps abstract identifiers (interface names, type names, or
/// arbitrary string keys) to concrete construction strategies and resolves
/// object graphs by recursively satisfying declared constructor
/// dependencies. Registration happens through shared references at any point
/// in the process lifetime; nothing needs to be wired up front.
#[derive(Default)]
pub struct Container {
  bindings: DashMap<String, Binding>,
  instances: DashMap<String, Object>,
  blueprints: DashMap<String, Blueprint>,
}

impl Container {
  /// Creates a new, empty `Container`, fully isolated from the global one.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn bind_concrete(&self, abstract_key: &str, concrete: Concrete, shared: bool) {
    trace!("binding `{abstract_key}` registered (shared: {shared})");
    // The last registration for a key wins. A previously cached instance
    // keeps shadowing the new binding until it is itself replaced.
    self
      .bindings
      .insert(abstract_key.to_owned(), Binding { concrete, shared });
  }

  fn factory_of<T, F>(factory: F) -> Concrete
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T, ResolutionError> + Send + Sync + 'static,
  {
    Concrete::Factory(Arc::new(move |container| {
      Ok(Arc::new(Arc::new(factory(container)?)) as Object)
    }))
  }

  fn factory_of_dyn<I, F>(factory: F) -> Concrete
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<I>, ResolutionError> + Send + Sync + 'static,
  {
    Concrete::Factory(Arc::new(move |container| {
      Ok(Arc::new(factory(container)?) as Object)
    }))
  }

  // --- PUBLIC API ---

  // --- Factory Bindings ---

  /// Registers a transient factory for `abstract_key`.
  ///
  /// The factory receives the container, so it can resolve its own
  /// dependencies, and runs on every resolution. Nothing about it is
  /// validated here; failures surface when `make` invokes it.
  pub fn bind<T, F>(&self, abstract_key: &str, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T, ResolutionError> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of(factory), false);
  }

  /// Registers a shared factory: the first resolution is cached and reused
  /// for every subsequent `make` of `abstract_key`.
  pub fn singleton<T, F>(&self, abstract_key: &str, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T, ResolutionError> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of(factory), true);
  }

  /// [`bind`](Container::bind) for trait-object services.
  ///
  /// The factory returns `Arc<I>`, so the unsizing coercion from the
  /// concrete implementation is written once, at the registration site.
  pub fn bind_dyn<I, F>(&self, abstract_key: &str, factory: F)
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<I>, ResolutionError> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of_dyn(factory), false);
  }

  /// [`singleton`](Container::singleton) for trait-object services.
  pub fn singleton_dyn<I, F>(&self, abstract_key: &str, factory: F)
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<I>, ResolutionError> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of_dyn(factory), true);
  }

  // --- Alias Bindings ---

  /// Points `abstract_key` at another abstract identifier.
  ///
  /// Chains of aliases resolve transitively through `make`, so cached and
  /// shared entries anywhere along the chain are honored.
  pub fn alias(&self, abstract_key: &str, target: &str) {
    self.bind_concrete(abstract_key, Concrete::Alias(target.to_owned()), false);
  }

  /// A shared alias: the chain's product is cached under `abstract_key`.
  pub fn singleton_alias(&self, abstract_key: &str, target: &str) {
    self.bind_concrete(abstract_key, Concrete::Alias(target.to_owned()), true);
  }

  // --- Self-Typed Bindings ---

  /// Binds `abstract_key` to its own blueprint, built fresh per resolution.
  pub fn bind_type(&self, abstract_key: &str) {
    self.bind_concrete(abstract_key, Concrete::SelfType, false);
  }

  /// Binds `abstract_key` to its own blueprint as a shared service.
  pub fn singleton_type(&self, abstract_key: &str) {
    self.bind_concrete(abstract_key, Concrete::SelfType, true);
  }

  // --- Instances ---

  /// Stores an already-constructed object in the instance cache.
  ///
  /// Every subsequent `make` of `abstract_key` returns this exact object,
  /// bypassing construction entirely and shadowing any binding registered
  /// for the key before or after.
  pub fn instance<T: Any + Send + Sync>(&self, abstract_key: &str, value: T) {
    trace!("instance `{abstract_key}` stored");
    self
      .instances
      .insert(abstract_key.to_owned(), Arc::new(Arc::new(value)) as Object);
  }

  /// [`instance`](Container::instance) for values already behind an `Arc`,
  /// including trait objects.
  pub fn instance_dyn<I: ?Sized + Any + Send + Sync>(&self, abstract_key: &str, value: Arc<I>) {
    trace!("instance `{abstract_key}` stored");
    self
      .instances
      .insert(abstract_key.to_owned(), Arc::new(value) as Object);
  }

  // --- Blueprints ---

  /// Declares `T`'s blueprint so the container can construct it by name.
  pub fn declare<T: Injectable>(&self) {
    trace!("blueprint `{}` declared", T::NAME);
    self.blueprints.insert(T::NAME.to_owned(), Blueprint::of::<T>());
  }

  /// Declares `name` as known but non-instantiable.
  ///
  /// Building such an identifier directly fails with
  /// [`ResolutionError::NotInstantiable`]; binding it to a factory or an
  /// alias makes it resolvable.
  pub fn declare_abstract(&self, name: &str) {
    trace!("abstract `{name}` declared");
    self.blueprints.insert(name.to_owned(), Blueprint::Abstract);
  }

  // --- Resolution ---

  /// Resolves `abstract_key` into an `Arc<T>`.
  ///
  /// Resolution order: a cached instance wins outright; otherwise the
  /// key's binding is followed (defaulting to the key's own blueprint when
  /// unbound), aliases recurse until a factory or terminal binding is
  /// reached, and a `shared` result is cached before being returned.
  pub fn make<T: ?Sized + Any + Send + Sync>(
    &self,
    abstract_key: &str,
  ) -> Result<Arc<T>, ResolutionError> {
    downcast::<T>(abstract_key, &self.resolve(abstract_key)?)
  }

  /// Constructs `concrete` from its blueprint, bypassing bindings and the
  /// instance cache for that key.
  ///
  /// Dependencies still resolve through `make`, so their own bindings and
  /// shared instances are honored. The result is returned as-is; caching
  /// is `make`'s responsibility.
  pub fn build<T: ?Sized + Any + Send + Sync>(
    &self,
    concrete: &str,
  ) -> Result<Arc<T>, ResolutionError> {
    downcast::<T>(concrete, &self.build_named(concrete)?)
  }

  pub(crate) fn resolve(&self, abstract_key: &str) -> Result<Object, ResolutionError> {
    // A cached instance always wins, even over a binding registered after
    // it was stored.
    if let Some(existing) = self.instances.get(abstract_key) {
      trace!("`{abstract_key}` served from the instance cache");
      return Ok(Object::clone(existing.value()));
    }

    let _guard = ResolutionGuard::enter(abstract_key)?;

    // Snapshot the binding so no map lock is held while factories or
    // recursive resolutions run.
    let (concrete, shared) = match self.bindings.get(abstract_key) {
      Some(binding) => (binding.concrete.clone(), binding.shared),
      None => (Concrete::SelfType, false),
    };

    let object = match concrete {
      Concrete::Factory(factory) => factory(self)?,
      Concrete::SelfType => self.build_named(abstract_key)?,
      // A terminal self-reference: nothing left to follow, so build it.
      Concrete::Alias(target) if target == abstract_key => self.build_named(abstract_key)?,
      // The concrete references something else: recurse, so intermediate
      // cached or shared entries take effect wherever in the chain sharing
      // was declared.
      Concrete::Alias(target) => self.resolve(&target)?,
    };

    if shared {
      debug!("`{abstract_key}` cached as a shared instance");
      // Atomic check-then-insert: under a concurrent first resolution the
      // losing object is discarded and every caller observes the winner.
      let entry = self
        .instances
        .entry(abstract_key.to_owned())
        .or_insert(object);
      return Ok(Object::clone(entry.value()));
    }

    Ok(object)
  }

  fn build_named(&self, concrete: &str) -> Result<Object, ResolutionError> {
    let blueprint = match self.blueprints.get(concrete) {
      Some(blueprint) => blueprint.value().clone(),
      None => return Err(ResolutionError::TypeNotFound(concrete.to_owned())),
    };

    match blueprint {
      Blueprint::Abstract => Err(ResolutionError::NotInstantiable(concrete.to_owned())),
      Blueprint::Constructor { params, assemble } => {
        let mut values = Vec::with_capacity(params.len());
        for param in params {
          match *param {
            Param::Typed { service, .. } => values.push(self.resolve(service)?),
            Param::Opaque { name } => {
              return Err(ResolutionError::UnresolvableDependency {
                target: concrete.to_owned(),
                parameter: name,
              })
            }
          }
        }
        assemble(values)
      }
    }
  }
}
