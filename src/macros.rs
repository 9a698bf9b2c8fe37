//! Public macros for ergonomic resolution and facade declaration.

/// Resolves a service from the global container, panicking on failure.
///
/// This is the short form for call sites that treat a missing or broken
/// binding as a programming error. For a non-panicking version, call
/// `global().make(...)` directly and handle the `Result`.
///
/// # Panics
///
/// Panics if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use braid_ioc::{global, make};
///
/// global().instance("motd", String::from("hello"));
///
/// let message = make!(String, "motd");
/// assert_eq!(*message, "hello");
/// ```
///
/// A declared type can be resolved by its own identifier:
///
/// ```
/// use braid_ioc::{global, make, Args, Injectable, ResolutionError};
///
/// struct Prng;
///
/// impl Injectable for Prng {
///   const NAME: &'static str = "Prng";
///
///   fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
///     Ok(Prng)
///   }
/// }
///
/// global().declare::<Prng>();
///
/// let _prng = make!(Prng);
/// ```
#[macro_export]
macro_rules! make {
  // Arm for a declared type resolved by its own identifier: make!(MyService)
  ($type:ty) => {
    $crate::make!($type, <$type as $crate::Injectable>::NAME)
  };

  // Arm for a keyed concrete type: make!(MyService, "key")
  ($type:ty, $key:expr) => {
    $crate::global()
      .make::<$type>($key)
      .unwrap_or_else(|error| panic!("failed to make `{}`: {}", $key, error))
  };

  // Arm for a keyed trait object: make!(trait MyTrait, "key")
  (trait $trait_ident:ident, $key:expr) => {
    $crate::global()
      .make::<dyn $trait_ident>($key)
      .unwrap_or_else(|error| panic!("failed to make `{}`: {}", $key, error))
  };
}

/// [`make!`](crate::make!) against an explicit container instead of the
/// global one.
///
/// ```
/// use braid_ioc::{make_from, Container};
///
/// let container = Container::new();
/// container.instance("greeting", String::from("hi"));
///
/// assert_eq!(*make_from!(&container, String, "greeting"), "hi");
/// ```
#[macro_export]
macro_rules! make_from {
  ($container:expr, $type:ty) => {
    $crate::make_from!($container, $type, <$type as $crate::Injectable>::NAME)
  };

  ($container:expr, $type:ty, $key:expr) => {
    ($container)
      .make::<$type>($key)
      .unwrap_or_else(|error| panic!("failed to make `{}`: {}", $key, error))
  };

  ($container:expr, trait $trait_ident:ident, $key:expr) => {
    ($container)
      .make::<dyn $trait_ident>($key)
      .unwrap_or_else(|error| panic!("failed to make `{}`: {}", $key, error))
  };
}

/// Declares one or more facades: unit structs implementing
/// [`Facade`](crate::Facade) for a target type and accessor.
///
/// The target may be a concrete type or a `dyn Trait`; the accessor is the
/// abstract identifier the facade resolves from the global container.
///
/// ```
/// use braid_ioc::{facade, global, Facade};
///
/// pub struct Paths {
///   root: String,
/// }
///
/// facade! {
///   /// Static access to the path configuration.
///   pub AppPaths => Paths, "paths"
/// }
///
/// global().instance("paths", Paths { root: "/srv/app".into() });
///
/// assert_eq!(AppPaths::resolve().unwrap().root, "/srv/app");
/// ```
#[macro_export]
macro_rules! facade {
  ($($(#[$attr:meta])* $vis:vis $name:ident => $target:ty, $accessor:expr);+ $(;)?) => {
    $(
      $(#[$attr])*
      $vis struct $name;

      impl $crate::Facade for $name {
        type Target = $target;

        fn accessor() -> &'static str {
          $accessor
        }
      }
    )+
  };
}
