//! Infrastructure layer for the host.
//!
//! Contains OS-facing adapters: input device backends and file-system
//! configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `padbind_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod devices;
pub mod storage;
