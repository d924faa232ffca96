//! `furrow-params` — parameter resolution for backfill jobs.
//!
//! A backfill run is configured over the wire as a flat map of named raw
//! byte values. This crate turns that map into a strongly typed, validated
//! configuration value:
//!
//! - [`FieldDeclaration`] describes one named field and its binding rule
//!   (required / literal default / nullable default).
//! - [`validate_declarations`] rejects self-inconsistent declarations at
//!   registration time, before any run can use them.
//! - [`resolve`] converts a [`RawParams`] map into [`ResolvedParams`], or
//!   fails with a field-named [`ResolutionError`].
//! - [`ParamSet`] is the seam for typed config structs: declarations on one
//!   side, a constructor from resolved values on the other.
//!
//! Resolution is a pure computation: no IO, no shared state, deterministic.

pub mod coerce;
pub mod declaration;
pub mod error;
pub mod param_set;
pub mod raw;
pub mod resolver;

pub use coerce::ParamValue;
pub use declaration::{BindingRule, FieldDeclaration, ParamType, validate_declarations};
pub use error::{DefinitionError, ResolutionError};
pub use param_set::{BindError, NoParams, ParamSet};
pub use raw::RawParams;
pub use resolver::{ResolvedParams, resolve};
