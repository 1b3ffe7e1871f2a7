//! Application layer use cases for the host.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (`padbind-core`, pure binding and geometry rules) and the infrastructure
//! (OS input backends, config files, the render window).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "wait for a
//!   button press and turn it into a binding expression").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no OS calls, no file system access**.
//!
//! # Sub-modules
//!
//! - **`detect_binding`** – Drives a blocking detection session against the
//!   device registry and writes the resulting expression into a control
//!   reference.  Invoked from a background thread while the mapping dialog
//!   shows its "waiting…" indicator.
//!
//! - **`jail_service`** – Wraps the octagonal mouse jail with the host-side
//!   gating (emulation running, window focused, pointer in the client area)
//!   and the reader/writer locking the per-sample polling loop needs.

pub mod detect_binding;
pub mod jail_service;
