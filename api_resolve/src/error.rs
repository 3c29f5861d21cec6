/// Errors surfaced by the resolution passes. Every error is a deterministic
/// function of the IR content; nothing is retried or silently corrected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /* Cross-referencing found an ID that does not resolve in the registry */
    #[error("'{node}' references '{target}', which is not registered")]
    UnresolvedReference { node: String, target: String },

    /* Closure seeds absent from all four registries, reported as a batch */
    #[error("unknown seed ids: {}", .0.join(", "))]
    UnknownSeeds(Vec<String>),

    /* Include- and exclude-lists are mutually exclusive */
    #[error("filter configuration sets both an include-list and an exclude-list")]
    ConflictingFilters,

    /* A dotted field path (routing variant or path template) that does not
     * resolve against the given message */
    #[error("field path '{path}' does not resolve against message '{message}'")]
    UnresolvedFieldPath { message: String, path: String },
}
