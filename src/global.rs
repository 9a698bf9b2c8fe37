//! The process-wide container instance and its access function.

use once_cell::sync::Lazy;

use crate::container::Container;

// The one and only global container. Created lazily on first access; every
// call observes the same instance for the process lifetime.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Returns the process-wide [`Container`].
///
/// Bindings registered here are visible everywhere in the application, and
/// facades resolve their accessors from this container. Prefer passing a
/// `&Container` into code that needs one; reach for `global()` at
/// composition roots and in facade-backed surfaces.
///
/// # Examples
///
/// ```
/// use braid_ioc::global;
///
/// global().instance("app_name", String::from("braid"));
///
/// assert_eq!(*global().make::<String>("app_name").unwrap(), "braid");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
