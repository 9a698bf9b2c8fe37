//! Failures surfaced by `make` and `build`.

use thiserror::Error;

/// Errors produced while resolving or constructing a service.
///
/// All variants are non-recoverable for the resolution in progress: they
/// propagate to the caller immediately, without retries or masking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
  /// The concrete identifier has no declared blueprint.
  #[error("target `{0}` does not exist")]
  TypeNotFound(String),

  /// The identifier is declared but not constructible (an interface marker
  /// with no binding pointing at something concrete).
  #[error("target `{0}` is not instantiable")]
  NotInstantiable(String),

  /// A constructor parameter carries no identifier the container could
  /// resolve, such as a primitive or an unannotated value.
  #[error("unresolvable dependency `{parameter}` while constructing `{target}`")]
  UnresolvableDependency {
    target: String,
    parameter: &'static str,
  },

  /// An alias chain or dependency graph looped back on itself.
  #[error("circular binding detected while resolving `{0}`")]
  CircularBinding(String),

  /// The entry resolved, but not to the type the caller requested.
  #[error("`{key}` did not resolve to a `{expected}`")]
  TypeMismatch { key: String, expected: &'static str },
}
