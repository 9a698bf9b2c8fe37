//! # Braid IoC
//!
//! A thread-safe, string-keyed Inversion of Control (IoC) container for
//! Rust, with constructor injection and facade-style static access points.
//!
//! Braid maps abstract identifiers (interface names, type names, or
//! arbitrary aliases) to concrete construction strategies and resolves whole
//! object graphs on demand. Registration is dynamic: services can be bound
//! at any point in the application's lifecycle, not just at startup.
//!
//! ## Core Concepts
//!
//! - **Container**: the registry of bindings, cached instances, and
//!   blueprints. `Container::new()` gives an isolated instance; [`global()`]
//!   is the shared, process-wide one.
//! - **Bindings**: an identifier resolves to a factory, to another
//!   identifier (aliases chain transitively), or to the identifier's own
//!   declared blueprint. `singleton` variants cache the first resolution.
//! - **Blueprints**: types implement [`Injectable`] to declare their
//!   constructor parameters, letting the container build them by name and
//!   inject their dependencies recursively.
//! - **Facades**: fixed static access points that lazily resolve one entry
//!   from the global container and can be swapped for test doubles.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use braid_ioc::global;
//!
//! // Define an abstraction and a concrete implementation.
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         self.message.clone()
//!     }
//! }
//!
//! fn main() {
//!     // Register a plain value from anywhere in the app.
//!     global().instance("greeting_message", String::from("Hello, World!"));
//!
//!     // Register a service against an interface. The factory receives the
//!     // container and resolves its own dependencies.
//!     global().singleton_dyn::<dyn Greeter, _>("greeter", |container| {
//!         let message = container.make::<String>("greeting_message")?;
//!         Ok(Arc::new(EnglishGreeter {
//!             message: (*message).clone(),
//!         }))
//!     });
//!
//!     // In another part of the application, resolve it by identifier.
//!     let greeter = global().make::<dyn Greeter>("greeter").unwrap();
//!
//!     assert_eq!(greeter.greet(), "Hello, World!");
//! }
//! ```

mod blueprint;
mod container;
mod core;
mod error;
mod facade;
mod global;
#[cfg(feature = "local")]
mod local_container;
mod macros;

pub use blueprint::{Args, Injectable, Param};
pub use container::Container;
pub use error::ResolutionError;
pub use facade::{clear_resolved, Facade};
pub use global::global;
#[cfg(feature = "local")]
pub use local_container::{LocalArgs, LocalContainer, LocalInjectable};
