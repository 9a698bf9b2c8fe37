//! Structural descriptors: how the container constructs a type by name.
//!
//! Rust has no runtime constructor introspection, so constructible types opt
//! in by implementing [`Injectable`]: an identifier, an ordered parameter
//! list, and a positional constructor. [`Container::declare`] registers the
//! resulting blueprint; `build` walks the declared parameters, resolves each
//! one recursively, and hands the results to [`Injectable::assemble`] in
//! declaration order.
//!
//! [`Container::declare`]: crate::Container::declare

use std::any::{self, Any};
use std::sync::Arc;

use crate::core::Object;
use crate::error::ResolutionError;

/// One declared constructor parameter.
pub enum Param {
  /// The parameter's declared type names another resolvable identifier.
  Typed {
    name: &'static str,
    service: &'static str,
  },
  /// The parameter is a primitive or carries no type the container can
  /// resolve. Building a type with such a parameter fails with
  /// [`ResolutionError::UnresolvableDependency`].
  Opaque { name: &'static str },
}

impl Param {
  /// A parameter satisfied by resolving `service` from the container.
  pub const fn typed(name: &'static str, service: &'static str) -> Self {
    Param::Typed { name, service }
  }

  /// A parameter the container cannot satisfy.
  pub const fn opaque(name: &'static str) -> Self {
    Param::Opaque { name }
  }
}

/// A type the container knows how to construct by name.
///
/// `PARAMS` lists the constructor parameters in declaration order;
/// [`assemble`](Injectable::assemble) consumes the resolved values
/// positionally from [`Args`]. Types without dependencies keep the default
/// empty `PARAMS`.
///
/// ```
/// use std::sync::Arc;
/// use braid_ioc::{Args, Injectable, Param, ResolutionError};
///
/// struct Api;
///
/// impl Injectable for Api {
///   const NAME: &'static str = "Api";
///
///   fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
///     Ok(Api)
///   }
/// }
///
/// struct Client {
///   api: Arc<Api>,
/// }
///
/// impl Injectable for Client {
///   const NAME: &'static str = "Client";
///   const PARAMS: &'static [Param] = &[Param::typed("api", "Api")];
///
///   fn assemble(args: &mut Args) -> Result<Self, ResolutionError> {
///     Ok(Client {
///       api: args.take::<Api>()?,
///     })
///   }
/// }
///
/// let container = braid_ioc::Container::new();
/// container.declare::<Api>();
/// container.declare::<Client>();
///
/// let client = container.make::<Client>("Client").unwrap();
/// assert_eq!(Arc::strong_count(&client.api), 1);
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// The abstract identifier this type is declared under.
  const NAME: &'static str;

  /// Constructor parameters, in declaration order.
  const PARAMS: &'static [Param] = &[];

  /// Builds the value from its resolved parameters.
  fn assemble(args: &mut Args) -> Result<Self, ResolutionError>;
}

/// Positional cursor over the resolved constructor arguments.
pub struct Args {
  target: &'static str,
  values: std::vec::IntoIter<Object>,
}

impl Args {
  pub(crate) fn new(target: &'static str, values: Vec<Object>) -> Self {
    Self {
      target,
      values: values.into_iter(),
    }
  }

  /// Takes the next argument, downcast to the requested service type.
  ///
  /// Fails with [`ResolutionError::TypeMismatch`] if the argument is not of
  /// the requested type or the declared parameters are exhausted.
  pub fn take<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>, ResolutionError> {
    let value = self.values.next().ok_or_else(|| ResolutionError::TypeMismatch {
      key: self.target.to_owned(),
      expected: any::type_name::<T>(),
    })?;
    crate::core::downcast::<T>(self.target, &value)
  }
}

pub(crate) type AssembleFn =
  Arc<dyn Fn(Vec<Object>) -> Result<Object, ResolutionError> + Send + Sync>;

/// An erased blueprint registry entry.
#[derive(Clone)]
pub(crate) enum Blueprint {
  /// A constructible type: its parameters and positional constructor.
  Constructor {
    params: &'static [Param],
    assemble: AssembleFn,
  },
  /// Declared but non-instantiable (an interface marker).
  Abstract,
}

impl Blueprint {
  pub(crate) fn of<T: Injectable>() -> Self {
    Blueprint::Constructor {
      params: T::PARAMS,
      assemble: Arc::new(|values| {
        let mut args = Args::new(T::NAME, values);
        let built = T::assemble(&mut args)?;
        Ok(Arc::new(Arc::new(built)) as Object)
      }),
    }
  }
}
