//! Blueprint-driven construction: self-typed resolution, recursive
//! dependency injection, and the construction error kinds.

use braid_ioc::{Args, Container, Injectable, Param, ResolutionError};
use std::sync::Arc;

// --- Test Fixtures ---

struct Api;

impl Injectable for Api {
  const NAME: &'static str = "Api";

  fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(Api)
  }
}

#[derive(Debug)]
struct BasicExample;

impl Injectable for BasicExample {
  const NAME: &'static str = "BasicExample";

  fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(BasicExample)
  }
}

// A service with one injected collaborator.
struct DependencyExample {
  api: Arc<Api>,
}

impl Injectable for DependencyExample {
  const NAME: &'static str = "DependencyExample";
  const PARAMS: &'static [Param] = &[Param::typed("api", "Api")];

  fn assemble(args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(DependencyExample {
      api: args.take::<Api>()?,
    })
  }
}

// A service whose constructor wants a bare number the container cannot
// resolve.
#[derive(Debug)]
struct PrimitiveExample;

impl Injectable for PrimitiveExample {
  const NAME: &'static str = "PrimitiveExample";
  const PARAMS: &'static [Param] = &[Param::opaque("count")];

  fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
    unreachable!("`count` can never be resolved by the container")
  }
}

// A constructor that depends on its own identifier.
#[derive(Debug)]
struct SelfLoop {
  _next: Arc<SelfLoop>,
}

impl Injectable for SelfLoop {
  const NAME: &'static str = "SelfLoop";
  const PARAMS: &'static [Param] = &[Param::typed("next", "SelfLoop")];

  fn assemble(args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(SelfLoop {
      _next: args.take::<SelfLoop>()?,
    })
  }
}

fn container_with_blueprints() -> Container {
  let container = Container::new();
  container.declare::<Api>();
  container.declare::<BasicExample>();
  container.declare::<DependencyExample>();
  container
}

// --- Construction Tests ---

#[test]
fn test_declared_type_resolves_without_a_binding() {
  // Arrange
  let container = container_with_blueprints();

  // Act: no binding for "BasicExample"; the key defaults to its own
  // blueprint.
  let r1 = container.make::<BasicExample>("BasicExample").unwrap();
  let r2 = container.make::<BasicExample>("BasicExample").unwrap();

  // Assert: built fresh on each call.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_singleton_by_type_name() {
  // Arrange
  let container = container_with_blueprints();
  container.singleton_type("BasicExample");

  // Act
  let r1 = container.make::<BasicExample>("BasicExample").unwrap();
  let r2 = container.make::<BasicExample>("BasicExample").unwrap();

  // Assert
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_constructor_injection_resolves_dependencies_recursively() {
  // Arrange
  let container = container_with_blueprints();

  // Act
  let example = container
    .make::<DependencyExample>("DependencyExample")
    .unwrap();

  // Assert: the collaborator was constructed and injected.
  assert_eq!(Arc::strong_count(&example.api), 1);
}

#[test]
fn test_injected_dependency_honors_the_instance_cache() {
  // Arrange: the dependency is pre-registered as an instance.
  let container = container_with_blueprints();
  let api = Arc::new(Api);
  container.instance_dyn("Api", Arc::clone(&api));

  // Act
  let example = container
    .make::<DependencyExample>("DependencyExample")
    .unwrap();

  // Assert: construction injected the cached object, not a fresh one.
  assert!(Arc::ptr_eq(&example.api, &api));
}

#[test]
fn test_interface_alias_to_concrete_type() {
  // Arrange: bind an interface identifier to a concrete type identifier.
  let container = container_with_blueprints();
  container.declare_abstract("ExampleContract");
  container.alias("ExampleContract", "BasicExample");

  // Act
  let resolved = container.make::<BasicExample>("ExampleContract");

  // Assert: the alias wins over the abstract marker.
  assert!(resolved.is_ok());
}

#[test]
fn test_abstract_declaration_is_not_instantiable() {
  // Arrange: declared, but nothing bound to it.
  let container = Container::new();
  container.declare_abstract("ExampleContract");

  // Act
  let error = container.make::<BasicExample>("ExampleContract").unwrap_err();

  // Assert
  assert_eq!(
    error,
    ResolutionError::NotInstantiable("ExampleContract".to_string())
  );
}

#[test]
fn test_opaque_parameter_fails_naming_it() {
  // Arrange
  let container = Container::new();
  container.declare::<PrimitiveExample>();

  // Act
  let error = container
    .make::<PrimitiveExample>("PrimitiveExample")
    .unwrap_err();

  // Assert: the error identifies both the parameter and the declaring type.
  assert_eq!(
    error,
    ResolutionError::UnresolvableDependency {
      target: "PrimitiveExample".to_string(),
      parameter: "count",
    }
  );
}

#[test]
fn test_build_bypasses_bindings_and_instance_cache() {
  // Arrange
  let container = container_with_blueprints();
  let cached = Arc::new(BasicExample);
  container.instance_dyn("BasicExample", Arc::clone(&cached));

  // Act
  let made = container.make::<BasicExample>("BasicExample").unwrap();
  let built = container.build::<BasicExample>("BasicExample").unwrap();

  // Assert: `make` serves the cache, `build` constructs regardless.
  assert!(Arc::ptr_eq(&made, &cached));
  assert!(!Arc::ptr_eq(&built, &cached));
}

#[test]
fn test_build_of_unknown_type_fails() {
  let container = Container::new();

  let error = container.build::<BasicExample>("NoSuchType").unwrap_err();

  assert_eq!(error, ResolutionError::TypeNotFound("NoSuchType".to_string()));
}

#[test]
fn test_circular_alias_chain_is_reported() {
  // Arrange: "a_loop" and "b_loop" alias each other.
  let container = Container::new();
  container.alias("a_loop", "b_loop");
  container.alias("b_loop", "a_loop");

  // Act
  let error = container.make::<BasicExample>("a_loop").unwrap_err();

  // Assert: reported at the first re-entered key, not a stack overflow.
  assert_eq!(error, ResolutionError::CircularBinding("a_loop".to_string()));
}

#[test]
fn test_circular_blueprint_dependency_is_reported() {
  // Arrange
  let container = Container::new();
  container.declare::<SelfLoop>();

  // Act
  let error = container.make::<SelfLoop>("SelfLoop").unwrap_err();

  // Assert
  assert_eq!(error, ResolutionError::CircularBinding("SelfLoop".to_string()));
}

#[test]
fn test_terminal_self_alias_builds_the_blueprint() {
  // Arrange: an alias that points at its own key is terminal, not a cycle.
  let container = container_with_blueprints();
  container.alias("BasicExample", "BasicExample");

  // Act
  let resolved = container.make::<BasicExample>("BasicExample");

  // Assert
  assert!(resolved.is_ok());
}
