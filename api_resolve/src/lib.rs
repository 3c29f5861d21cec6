//! Resolution passes over the API surface IR.
//!
//! The translators build a raw [`api_types::Model`] whose relationships are
//! unresolved ID strings. [`crossref::cross_reference`] turns those into
//! live links and name indices; afterwards the three independent analyses
//! ([`closure`], [`recursion`], [`routing`]) derive the information the
//! emission layer needs for partial generation, heap indirection, and
//! dynamic-routing headers.

pub mod closure;
pub mod crossref;
pub mod error;
pub mod recursion;
pub mod routing;

pub use error::ResolveError;
