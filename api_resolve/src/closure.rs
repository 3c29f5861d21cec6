//! Dependency-closure resolution for partial generation.
//!
//! Given seed IDs, computes the minimal set of elements that must all be
//! generated together for every seed to stay semantically complete. The
//! field-type reference graph may be cyclic, so both passes use an explicit
//! worklist with add-once discipline; each ID is expanded at most once per
//! pass and the walk is O(nodes + edges).

use crate::error::ResolveError;
use api_types::{ElementKind, Model};
use std::collections::{BTreeSet, VecDeque};

#[cfg(feature = "closure_trace")]
fn trace_log(msg: impl AsRef<str>) {
    eprintln!("[closure] {}", msg.as_ref());
}

#[cfg(not(feature = "closure_trace"))]
fn trace_log(_msg: impl AsRef<str>) {}

/// Computes the dependency closure of `seeds` over a cross-referenced model.
///
/// Pass 1 walks forward reachability: a service needs its methods, a method
/// its request/response (and LRO metadata/response) types, a message every
/// type its fields reference. Pass 2 completes ownership by re-scanning
/// everything found: methods pull their owning service, nested types their
/// parent chain, and messages that entered only as someone's parent are
/// re-expanded over their own fields. A service entering through one of its
/// methods never pulls that method's siblings.
pub fn closure(model: &Model, seeds: &[String]) -> Result<BTreeSet<String>, ResolveError> {
    let unknown: Vec<String> = seeds
        .iter()
        .filter(|seed| !model.has_id(seed))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ResolveError::UnknownSeeds(unknown));
    }

    let mut found: BTreeSet<String> = seeds.iter().cloned().collect();

    /* Downward pass: forward reachability from the seeds */
    let mut worklist: VecDeque<String> = found.iter().cloned().collect();
    while let Some(id) = worklist.pop_front() {
        trace_log(format!("downward {id}"));
        for next in expand_down(model, &id) {
            if found.insert(next.clone()) {
                worklist.push_back(next);
            }
        }
    }

    /* Upward closure pass: ownership completion over everything found.
     * Additions enter the same worklist, so parents found here are in turn
     * expanded over their own fields and ancestors. */
    let mut worklist: VecDeque<String> = found.iter().cloned().collect();
    while let Some(id) = worklist.pop_front() {
        trace_log(format!("upward {id}"));
        for next in expand_up(model, &id) {
            if found.insert(next.clone()) {
                worklist.push_back(next);
            }
        }
    }

    Ok(found)
}

fn expand_down(model: &Model, id: &str) -> Vec<String> {
    match model.kind_of(id) {
        Some(ElementKind::Service) => model
            .service(id)
            .map(|service| service.methods.clone())
            .unwrap_or_default(),
        Some(ElementKind::Method) => model
            .method(id)
            .map(|method| {
                let mut next = vec![method.input_type_id.clone(), method.output_type_id.clone()];
                if let Some(info) = &method.operation_info {
                    next.push(info.metadata_type_id.clone());
                    next.push(info.response_type_id.clone());
                }
                next
            })
            .unwrap_or_default(),
        Some(ElementKind::Message) => model
            .message(id)
            .map(|message| {
                message
                    .fields
                    .iter()
                    .filter_map(|field| field.typez.type_id().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        /* Enums are leaves */
        Some(ElementKind::Enum) | None => Vec::new(),
    }
}

fn expand_up(model: &Model, id: &str) -> Vec<String> {
    match model.kind_of(id) {
        Some(ElementKind::Method) => model
            .method(id)
            .and_then(|method| method.service.clone())
            .into_iter()
            .collect(),
        Some(ElementKind::Message) => model
            .message(id)
            .map(|message| {
                /* Parent chain plus re-expansion over the message's own
                 * fields: the message may have entered the set only as
                 * someone's parent. */
                let mut next: Vec<String> = message.parent.iter().cloned().collect();
                next.extend(
                    message
                        .fields
                        .iter()
                        .filter_map(|field| field.typez.type_id().map(str::to_string)),
                );
                next
            })
            .unwrap_or_default(),
        Some(ElementKind::Enum) => model
            .enum_by_id(id)
            .and_then(|enumz| enumz.parent.clone())
            .into_iter()
            .collect(),
        /* A service never pulls its methods here */
        Some(ElementKind::Service) | None => Vec::new(),
    }
}

/// The message and enum IDs a single service needs, projected out of its
/// closure (service and method IDs are dropped).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDependencies {
    pub messages: Vec<String>,
    pub enums: Vec<String>,
}

pub fn service_dependencies(
    model: &Model,
    service_id: &str,
) -> Result<ServiceDependencies, ResolveError> {
    let ids = closure(model, &[service_id.to_string()])?;
    let mut deps = ServiceDependencies::default();
    for id in ids {
        match model.kind_of(&id) {
            Some(ElementKind::Message) => deps.messages.push(id),
            Some(ElementKind::Enum) => deps.enums.push(id),
            _ => {}
        }
    }
    Ok(deps)
}

/// A mutually exclusive include-list/exclude-list of element IDs, consumed
/// from the generator configuration by the external pruning step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Computes the IDs that survive filtering.
///
/// With an include-list, the survivors are the closure of the listed IDs.
/// With an exclude-list, they are the closure of every top-level root not
/// named by the list; an excluded element a survivor still references is
/// pulled back in, since the closure contract keeps survivors well-formed.
/// With neither, every registered ID survives. Setting both lists is
/// rejected before any graph walk begins.
pub fn survivors(model: &Model, filter: &FilterConfig) -> Result<BTreeSet<String>, ResolveError> {
    if !filter.include.is_empty() && !filter.exclude.is_empty() {
        return Err(ResolveError::ConflictingFilters);
    }

    if !filter.include.is_empty() {
        return closure(model, &filter.include);
    }

    if !filter.exclude.is_empty() {
        let unknown: Vec<String> = filter
            .exclude
            .iter()
            .filter(|id| !model.has_id(id))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ResolveError::UnknownSeeds(unknown));
        }
        let roots: Vec<String> = model
            .services
            .iter()
            .chain(model.messages.iter())
            .chain(model.enums.iter())
            .filter(|id| !filter.exclude.contains(id))
            .cloned()
            .collect();
        return closure(model, &roots);
    }

    Ok(model.all_ids().map(str::to_string).collect())
}

// Include comprehensive tests
#[cfg(test)]
#[path = "closure_tests.rs"]
mod closure_tests;
