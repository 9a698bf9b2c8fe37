use braid_ioc::{facade, global, Facade};
use std::sync::Arc;

// 1. Define the abstraction (the trait).
pub trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation.
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {message}");
  }
}

// A quiet double a test would install instead.
struct NullLogger;
impl Logger for NullLogger {
  fn log(&self, _message: &str) {}
}

// 3. Declare the static access point.
facade! {
  /// Static access to the application logger.
  pub Log => dyn Logger, "logger"
}

fn main() {
  // Registration happens once, at the composition root.
  global().singleton_dyn::<dyn Logger, _>("logger", |_| Ok(Arc::new(ConsoleLogger)));

  // Anywhere else, the facade forwards straight to the resolved target.
  Log::resolve().unwrap().log("facade resolved lazily");
  Log::resolve().unwrap().log("second call reuses the cached target");

  // Tests swap the slot for a double; callers never notice.
  Log::swap(Arc::new(NullLogger));
  Log::resolve().unwrap().log("this line is swallowed by the double");

  Log::forget();
  Log::resolve().unwrap().log("forgotten, so resolved afresh");
}
