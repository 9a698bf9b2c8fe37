use braid_ioc::{LocalArgs, LocalContainer, LocalInjectable, Param, ResolutionError};
use std::cell::Cell;
use std::rc::Rc;

// --- Test Fixtures ---

trait Greeter {
  fn greet(&self) -> String;
}

struct English;
impl Greeter for English {
  fn greet(&self) -> String {
    "Hello".to_string()
  }
}

// A blueprint-built pair: a widget and the registry it depends on.
struct WidgetRegistry;

impl LocalInjectable for WidgetRegistry {
  const NAME: &'static str = "WidgetRegistry";

  fn assemble(_args: &mut LocalArgs) -> Result<Self, ResolutionError> {
    Ok(WidgetRegistry)
  }
}

struct Widget {
  registry: Rc<WidgetRegistry>,
}

impl LocalInjectable for Widget {
  const NAME: &'static str = "Widget";
  const PARAMS: &'static [Param] = &[Param::typed("registry", "WidgetRegistry")];

  fn assemble(args: &mut LocalArgs) -> Result<Self, ResolutionError> {
    Ok(Widget {
      registry: args.take::<WidgetRegistry>()?,
    })
  }
}

// --- Local Container Tests ---

#[test]
fn test_local_singleton() {
  let mut container = LocalContainer::new();
  container.singleton("greeting", |_| Ok("hello".to_string()));

  let r1 = container.make::<String>("greeting").unwrap();
  let r2 = container.make::<String>("greeting").unwrap();

  assert_eq!(*r1, "hello");
  // Identical object on both resolutions.
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_transient() {
  let mut container = LocalContainer::new();
  // A Cell makes it visible that each resolution is a new instance.
  container.bind("counter_cell", |_| Ok(Cell::new(10)));

  let r1 = container.make::<Cell<i32>>("counter_cell").unwrap();
  let r2 = container.make::<Cell<i32>>("counter_cell").unwrap();

  r1.set(20);

  assert_eq!(r1.get(), 20);
  assert_eq!(r2.get(), 10);
  assert!(!Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_trait_resolution() {
  let mut container = LocalContainer::new();
  container.singleton_dyn::<dyn Greeter, _>("greeter", |_| Ok(Rc::new(English)));

  let greeter = container.make::<dyn Greeter>("greeter").unwrap();
  assert_eq!(greeter.greet(), "Hello");
}

#[test]
fn test_local_instance_shadows_bindings() {
  let mut container = LocalContainer::new();
  container.bind("motd", |_| Ok(String::from("from factory")));
  container.instance("motd", String::from("pinned"));

  let resolved = container.make::<String>("motd").unwrap();
  assert_eq!(*resolved, "pinned");
}

#[test]
fn test_local_blueprint_injection() {
  let mut container = LocalContainer::new();
  container.declare::<WidgetRegistry>();
  container.declare::<Widget>();
  container.singleton_type("WidgetRegistry");

  let w1 = container.make::<Widget>("Widget").unwrap();
  let w2 = container.make::<Widget>("Widget").unwrap();

  // Fresh widgets share the singleton registry.
  assert!(!Rc::ptr_eq(&w1, &w2));
  assert!(Rc::ptr_eq(&w1.registry, &w2.registry));
}

#[test]
fn test_local_circular_dependency_is_reported() {
  // Factories receive the container, so a cycle is easy to spell and must
  // come back as an error rather than unbounded recursion.
  #[derive(Debug)]
  struct ServiceA;
  struct ServiceB;

  let mut container = LocalContainer::new();
  container.singleton("cycle_a", |c| {
    let _b = c.make::<ServiceB>("cycle_b")?;
    Ok(ServiceA)
  });
  container.singleton("cycle_b", |c| {
    let _a = c.make::<ServiceA>("cycle_a")?;
    Ok(ServiceB)
  });

  let error = container.make::<ServiceA>("cycle_a").unwrap_err();
  assert_eq!(error, ResolutionError::CircularBinding("cycle_a".to_string()));
}

#[test]
fn test_local_container_holds_not_send_sync_types() {
  // `Rc<i32>` is neither `Send` nor `Sync`; the thread-safe container
  // cannot hold this service at all.
  struct NotSendSyncService {
    data: Rc<i32>,
  }

  let mut container = LocalContainer::new();
  let shared_data = Rc::new(42);

  container.singleton("local_only", move |_| {
    Ok(NotSendSyncService {
      data: Rc::clone(&shared_data),
    })
  });

  let s1 = container.make::<NotSendSyncService>("local_only").unwrap();
  let s2 = container.make::<NotSendSyncService>("local_only").unwrap();

  assert_eq!(*s1.data, 42);
  assert!(Rc::ptr_eq(&s1.data, &s2.data));
}

#[test]
fn test_local_alias_chain() {
  let mut container = LocalContainer::new();
  container.alias("head", "tail");
  container.bind("tail", |_| Ok(String::from("product")));

  let resolved = container.make::<String>("head").unwrap();
  assert_eq!(*resolved, "product");
}
