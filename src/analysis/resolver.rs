//! Two-phase edge resolution
//!
//! Runs over the combined graph after every unit has been analyzed. Phase A
//! first copies every pending association into its node's meta records
//! (all nodes, before any lookup), then resolves each record through an
//! ordered rule chain: `class_name`, then `through`, then `polymorphic`,
//! then inflection of the reference itself. The first rule whose option is
//! present decides, even when it produces no targets. Phase B turns pending
//! plain references into edges only when they name a node already in the
//! graph. Association edges with no backing node are kept; plain references
//! with no backing node are dropped.

use crate::analysis::inflect::{canonical_class_name, singularize};
use crate::graph::{Association, ObjectGraph, PendingRef};
use rustc_hash::FxHashSet;

/// Resolve all pending references in `graph` into edges. Pending lists are
/// spent and cleared; meta records remain for reporting.
pub fn resolve(graph: &mut ObjectGraph) {
    // Phase A1: populate meta for every node before any cross-node lookup.
    for node in graph.nodes_mut() {
        for reference in &node.pending {
            if let PendingRef::Association(association) = reference {
                node.meta.push(association.clone());
            }
        }
    }

    // Phase A2: compute association targets against the full graph, then
    // apply them.
    let mut resolved: Vec<(String, Vec<String>)> = Vec::new();
    for node in graph.nodes() {
        let mut targets: Vec<String> = Vec::new();
        for record in &node.meta {
            let mut visited = FxHashSet::default();
            for target in resolve_association(graph, &node.name, record, &mut visited) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        if !targets.is_empty() {
            resolved.push((node.name.clone(), targets));
        }
    }
    for (name, targets) in resolved {
        if let Some(node) = graph.get_mut(&name) {
            for target in targets {
                node.add_edge(target);
            }
        }
    }

    // Phase B: plain references survive only when they name a known node.
    let known: FxHashSet<String> = graph.nodes().map(|n| n.name.clone()).collect();
    for node in graph.nodes_mut() {
        for reference in std::mem::take(&mut node.pending) {
            if let PendingRef::Constant(target) = reference {
                if known.contains(&target) {
                    node.add_edge(target);
                }
            }
        }
    }
}

/// Resolve one meta record to its target names. `visited` holds
/// (node, reference) pairs already being resolved; re-entering one ends
/// that branch, so cyclic `through` chains terminate.
fn resolve_association(
    graph: &ObjectGraph,
    owner: &str,
    record: &Association,
    visited: &mut FxHashSet<(String, String)>,
) -> Vec<String> {
    if !visited.insert((owner.to_string(), record.reference.clone())) {
        return Vec::new();
    }

    if let Some(class_name) = record.option("class_name") {
        return vec![canonical_class_name(class_name)];
    }
    if let Some(through) = record.option("through") {
        return resolve_through(graph, record, through, visited);
    }
    if let Some(polymorphic) = record.option("polymorphic") {
        if is_truthy(polymorphic) {
            return resolve_polymorphic(graph, &record.reference);
        }
    }

    vec![canonical_class_name(&record.reference)]
}

/// Follow a `through` option into the join model's own meta records. A
/// candidate matches on the `source` option when given, otherwise on this
/// record's reference as written or singularized. Each match resolves
/// recursively, so chained `through` associations compose.
fn resolve_through(
    graph: &ObjectGraph,
    record: &Association,
    through: &str,
    visited: &mut FxHashSet<(String, String)>,
) -> Vec<String> {
    let Some(through_node) = graph.get(&canonical_class_name(through)) else {
        return Vec::new();
    };

    let singular = singularize(&record.reference);
    let mut targets: Vec<String> = Vec::new();
    for candidate in &through_node.meta {
        let matches = match record.option("source") {
            Some(source) => candidate.reference == source,
            None => candidate.reference == record.reference || candidate.reference == singular,
        };
        if !matches {
            continue;
        }
        for target in resolve_association(graph, &through_node.name, candidate, visited) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    targets
}

/// Targets of a polymorphic association: every node declaring an
/// association whose `as` option names this record's reference.
fn resolve_polymorphic(graph: &ObjectGraph, reference: &str) -> Vec<String> {
    graph
        .nodes()
        .filter(|node| {
            node.meta
                .iter()
                .any(|record| record.option("as") == Some(reference))
        })
        .map(|node| node.name.clone())
        .collect()
}

fn is_truthy(value: &str) -> bool {
    value != "false" && value != "nil"
}
