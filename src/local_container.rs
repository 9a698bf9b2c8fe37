// local_container.rs

//! A single-threaded, non-thread-safe variant of the container.

use std::any::{self, Any};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::blueprint::Param;
use crate::core::ResolutionGuard;
use crate::error::ResolutionError;

// Type-erased service value for the local container. The payload behind the
// `dyn Any` is always an `Rc<T>`.
type LocalObject = Rc<dyn Any>;

type LocalFactory = Rc<dyn Fn(&LocalContainer) -> Result<LocalObject, ResolutionError>>;

type LocalAssemble = Rc<dyn Fn(Vec<LocalObject>) -> Result<LocalObject, ResolutionError>>;

#[derive(Clone)]
enum LocalConcrete {
  Factory(LocalFactory),
  Alias(String),
  SelfType,
}

struct LocalBinding {
  concrete: LocalConcrete,
  shared: bool,
}

#[derive(Clone)]
enum LocalBlueprint {
  Constructor {
    params: &'static [Param],
    assemble: LocalAssemble,
  },
  Abstract,
}

/// A type the [`LocalContainer`] can construct by name.
///
/// The single-threaded counterpart of [`Injectable`](crate::Injectable):
/// neither the type nor its dependencies need to be `Send` or `Sync`.
pub trait LocalInjectable: Any + Sized {
  /// The abstract identifier this type is declared under.
  const NAME: &'static str;

  /// Constructor parameters, in declaration order.
  const PARAMS: &'static [Param] = &[];

  /// Builds the value from its resolved parameters.
  fn assemble(args: &mut LocalArgs) -> Result<Self, ResolutionError>;
}

/// Positional cursor over resolved constructor arguments (`Rc` payloads).
pub struct LocalArgs {
  target: &'static str,
  values: std::vec::IntoIter<LocalObject>,
}

impl LocalArgs {
  fn new(target: &'static str, values: Vec<LocalObject>) -> Self {
    Self {
      target,
      values: values.into_iter(),
    }
  }

  /// Takes the next argument, downcast to the requested service type.
  pub fn take<T: ?Sized + Any>(&mut self) -> Result<Rc<T>, ResolutionError> {
    let value = self.values.next().ok_or_else(|| ResolutionError::TypeMismatch {
      key: self.target.to_owned(),
      expected: any::type_name::<T>(),
    })?;
    downcast_local::<T>(self.target, &value)
  }
}

fn downcast_local<T: ?Sized + Any>(
  key: &str,
  object: &LocalObject,
) -> Result<Rc<T>, ResolutionError> {
  object
    .downcast_ref::<Rc<T>>()
    .cloned()
    .ok_or_else(|| ResolutionError::TypeMismatch {
      key: key.to_owned(),
      expected: any::type_name::<T>(),
    })
}

/// A single-threaded service container.
///
/// Same binding and resolution semantics as [`Container`](crate::Container)
/// over a plain `HashMap` and `Rc`, which also lets it hold services that
/// are not `Send` or `Sync`.
///
/// # Note on API
///
/// Unlike the thread-safe `Container`, registration methods require a
/// mutable reference because `HashMap` does not support interior
/// mutability. Resolution takes `&self`, so factories given the container
/// can resolve but not register.
#[derive(Default)]
pub struct LocalContainer {
  bindings: HashMap<String, LocalBinding>,
  instances: RefCell<HashMap<String, LocalObject>>,
  blueprints: HashMap<String, LocalBlueprint>,
}

impl LocalContainer {
  /// Creates a new, empty `LocalContainer`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn bind_concrete(&mut self, abstract_key: &str, concrete: LocalConcrete, shared: bool) {
    self
      .bindings
      .insert(abstract_key.to_owned(), LocalBinding { concrete, shared });
  }

  fn factory_of<T, F>(factory: F) -> LocalConcrete
  where
    T: Any,
    F: Fn(&LocalContainer) -> Result<T, ResolutionError> + 'static,
  {
    LocalConcrete::Factory(Rc::new(move |container| {
      Ok(Rc::new(Rc::new(factory(container)?)) as LocalObject)
    }))
  }

  fn factory_of_dyn<I, F>(factory: F) -> LocalConcrete
  where
    I: ?Sized + Any,
    F: Fn(&LocalContainer) -> Result<Rc<I>, ResolutionError> + 'static,
  {
    LocalConcrete::Factory(Rc::new(move |container| {
      Ok(Rc::new(factory(container)?) as LocalObject)
    }))
  }

  // --- PUBLIC API ---

  // --- Factory Bindings ---

  /// Registers a transient factory for `abstract_key`.
  pub fn bind<T, F>(&mut self, abstract_key: &str, factory: F)
  where
    T: Any,
    F: Fn(&LocalContainer) -> Result<T, ResolutionError> + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of(factory), false);
  }

  /// Registers a shared factory: the first resolution is cached and reused.
  pub fn singleton<T, F>(&mut self, abstract_key: &str, factory: F)
  where
    T: Any,
    F: Fn(&LocalContainer) -> Result<T, ResolutionError> + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of(factory), true);
  }

  /// [`bind`](LocalContainer::bind) for trait-object services.
  pub fn bind_dyn<I, F>(&mut self, abstract_key: &str, factory: F)
  where
    I: ?Sized + Any,
    F: Fn(&LocalContainer) -> Result<Rc<I>, ResolutionError> + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of_dyn(factory), false);
  }

  /// [`singleton`](LocalContainer::singleton) for trait-object services.
  pub fn singleton_dyn<I, F>(&mut self, abstract_key: &str, factory: F)
  where
    I: ?Sized + Any,
    F: Fn(&LocalContainer) -> Result<Rc<I>, ResolutionError> + 'static,
  {
    self.bind_concrete(abstract_key, Self::factory_of_dyn(factory), true);
  }

  // --- Alias and Self-Typed Bindings ---

  /// Points `abstract_key` at another abstract identifier.
  pub fn alias(&mut self, abstract_key: &str, target: &str) {
    self.bind_concrete(abstract_key, LocalConcrete::Alias(target.to_owned()), false);
  }

  /// A shared alias: the chain's product is cached under `abstract_key`.
  pub fn singleton_alias(&mut self, abstract_key: &str, target: &str) {
    self.bind_concrete(abstract_key, LocalConcrete::Alias(target.to_owned()), true);
  }

  /// Binds `abstract_key` to its own blueprint, built fresh per resolution.
  pub fn bind_type(&mut self, abstract_key: &str) {
    self.bind_concrete(abstract_key, LocalConcrete::SelfType, false);
  }

  /// Binds `abstract_key` to its own blueprint as a shared service.
  pub fn singleton_type(&mut self, abstract_key: &str) {
    self.bind_concrete(abstract_key, LocalConcrete::SelfType, true);
  }

  // --- Instances ---

  /// Stores an already-constructed object in the instance cache.
  pub fn instance<T: Any>(&mut self, abstract_key: &str, value: T) {
    self
      .instances
      .get_mut()
      .insert(abstract_key.to_owned(), Rc::new(Rc::new(value)) as LocalObject);
  }

  /// [`instance`](LocalContainer::instance) for values already behind an
  /// `Rc`, including trait objects.
  pub fn instance_dyn<I: ?Sized + Any>(&mut self, abstract_key: &str, value: Rc<I>) {
    self
      .instances
      .get_mut()
      .insert(abstract_key.to_owned(), Rc::new(value) as LocalObject);
  }

  // --- Blueprints ---

  /// Declares `T`'s blueprint so the container can construct it by name.
  pub fn declare<T: LocalInjectable>(&mut self) {
    let assemble: LocalAssemble = Rc::new(|values| {
      let mut args = LocalArgs::new(T::NAME, values);
      let built = T::assemble(&mut args)?;
      Ok(Rc::new(Rc::new(built)) as LocalObject)
    });
    self.blueprints.insert(
      T::NAME.to_owned(),
      LocalBlueprint::Constructor {
        params: T::PARAMS,
        assemble,
      },
    );
  }

  /// Declares `name` as known but non-instantiable.
  pub fn declare_abstract(&mut self, name: &str) {
    self
      .blueprints
      .insert(name.to_owned(), LocalBlueprint::Abstract);
  }

  // --- Resolution ---

  /// Resolves `abstract_key` into an `Rc<T>`.
  pub fn make<T: ?Sized + Any>(&self, abstract_key: &str) -> Result<Rc<T>, ResolutionError> {
    downcast_local::<T>(abstract_key, &self.resolve(abstract_key)?)
  }

  /// Constructs `concrete` from its blueprint, bypassing bindings and the
  /// instance cache for that key.
  pub fn build<T: ?Sized + Any>(&self, concrete: &str) -> Result<Rc<T>, ResolutionError> {
    downcast_local::<T>(concrete, &self.build_named(concrete)?)
  }

  fn resolve(&self, abstract_key: &str) -> Result<LocalObject, ResolutionError> {
    // A cached instance always wins, even over a binding registered after
    // it was stored.
    let cached = self.instances.borrow().get(abstract_key).cloned();
    if let Some(existing) = cached {
      return Ok(existing);
    }

    let _guard = ResolutionGuard::enter(abstract_key)?;

    let (concrete, shared) = match self.bindings.get(abstract_key) {
      Some(binding) => (binding.concrete.clone(), binding.shared),
      None => (LocalConcrete::SelfType, false),
    };

    let object = match concrete {
      LocalConcrete::Factory(factory) => factory(self)?,
      LocalConcrete::SelfType => self.build_named(abstract_key)?,
      // A terminal self-reference: nothing left to follow, so build it.
      LocalConcrete::Alias(target) if target == abstract_key => self.build_named(abstract_key)?,
      LocalConcrete::Alias(target) => self.resolve(&target)?,
    };

    if shared {
      let mut instances = self.instances.borrow_mut();
      let entry = instances
        .entry(abstract_key.to_owned())
        .or_insert(object);
      return Ok(Rc::clone(entry));
    }

    Ok(object)
  }

  fn build_named(&self, concrete: &str) -> Result<LocalObject, ResolutionError> {
    let blueprint = match self.blueprints.get(concrete) {
      Some(blueprint) => blueprint.clone(),
      None => return Err(ResolutionError::TypeNotFound(concrete.to_owned())),
    };

    match blueprint {
      LocalBlueprint::Abstract => Err(ResolutionError::NotInstantiable(concrete.to_owned())),
      LocalBlueprint::Constructor { params, assemble } => {
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
