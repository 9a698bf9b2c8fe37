use braid_ioc::{global, make};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // --- Shared Registration ---
  // This factory only ever runs once; the result is cached.
  global().singleton("shared_tracker", |_| {
    println!("Creating SHARED RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  });

  // --- Transient Registration ---
  // This factory runs on every resolution.
  global().bind("fresh_tracker", |_| {
    println!("Creating TRANSIENT RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  });

  println!("--- Resolving the shared tracker ---");
  let s1 = make!(RequestTracker, "shared_tracker");
  let s2 = make!(RequestTracker, "shared_tracker");
  println!("Shared 1 ID: {}, Shared 2 ID: {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2));

  println!("--- Resolving the transient tracker ---");
  let t1 = make!(RequestTracker, "fresh_tracker");
  let t2 = make!(RequestTracker, "fresh_tracker");
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert!(!Arc::ptr_eq(&t1, &t2));

  // --- Pre-Built Instances ---
  // An object constructed by hand is served back verbatim.
  global().instance("pinned_tracker", RequestTracker { id: 999 });
  let pinned = make!(RequestTracker, "pinned_tracker");
  println!("Pinned ID: {}", pinned.id);

  // --- Aliases ---
  // "tracker" now refers to the shared tracker, through one indirection.
  global().alias("tracker", "shared_tracker");
  let aliased = make!(RequestTracker, "tracker");
  assert!(Arc::ptr_eq(&aliased, &s1));
  println!("Alias resolved to the shared tracker (ID {})", aliased.id);
}
