//! Expands a method's dynamic-routing annotations into the ordered list of
//! concrete combinations the generated client tries at call time.
//!
//! Each routing key carries priority-ordered candidate variants; the
//! expansion is the lexicographic Cartesian product over the per-key variant
//! lists in declared key order, so the emitted runtime logic stays a simple
//! ordered try-list: use the first combination whose every field path
//! resolves to a non-empty value.

use crate::crossref::resolve_field_path;
use crate::error::ResolveError;
use api_types::{Method, Model, RoutingInfo, RoutingVariant};

/// One routing key paired with the variant chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTerm {
    pub key: String,
    pub variant: RoutingVariant,
}

/// One concrete combination: exactly one term per declared key, in declared
/// key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingCombination {
    pub terms: Vec<RoutingTerm>,
}

/// Expands a method's routing keys after validating that every variant's
/// field path resolves against the request message. A path that does not
/// resolve is fatal; variants are never silently skipped.
pub fn expand_routing(
    model: &Model,
    method: &Method,
) -> Result<Vec<RoutingCombination>, ResolveError> {
    for info in &method.routing {
        for variant in &info.variants {
            resolve_field_path(model, &method.input_type_id, &variant.field_path)?;
        }
    }
    Ok(routing_combinations(&method.routing))
}

/// The lexicographic Cartesian product over the per-key variant lists: the
/// first declared key is the slowest-varying axis, the last the fastest.
/// Yields exactly the product of the per-key variant counts when at least
/// one key is declared. A method with no routing keys yields an empty list,
/// not a single empty combination: the emission layer treats "no
/// combinations" as "send no routing header", whereas one empty combination
/// would make the generated client emit a header with no parameters.
pub fn routing_combinations(routing: &[RoutingInfo]) -> Vec<RoutingCombination> {
    if routing.is_empty() {
        return Vec::new();
    }

    let mut combinations: Vec<Vec<RoutingTerm>> = vec![Vec::new()];
    for info in routing {
        let mut extended = Vec::with_capacity(combinations.len() * info.variants.len());
        for prefix in &combinations {
            for variant in &info.variants {
                let mut terms = prefix.clone();
                terms.push(RoutingTerm {
                    key: info.name.clone(),
                    variant: variant.clone(),
                });
                extended.push(terms);
            }
        }
        combinations = extended;
    }

    combinations
        .into_iter()
        .map(|terms| RoutingCombination { terms })
        .collect()
}
