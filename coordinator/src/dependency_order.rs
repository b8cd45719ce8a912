//! Dependency-order resolution for a generation task's requested artifacts.
//!
//! The algorithm is the same three-state DFS cycle detector and
//! reverse-adjacency topological sort used for the reference DAG in the
//! metadata store, applied here to `doc_type -> doc_type` dependency edges
//! instead of document lineage edges.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial dependency-order resolver with
//!   declaration-order tie-breaking.

/// Walks ancestors of every requested doc_type (via the registry) and
/// returns a topological order where every dependency precedes its
/// dependents. Ties are broken by first-discovery order, which follows the
/// order artifacts were requested and then each agent's declared dependency
/// order.
///
/// A directly requested doc_type with no registered agent is always an
/// error. An *ancestor* with no registered agent is only an error if
/// `is_available` reports it as not already approved, uploaded, or
/// generated — such an ancestor is otherwise treated as an external leaf:
/// it is excluded from the returned order (nothing generates it) but does
/// not block the task. When every ancestor without a registered agent is
/// available, the walk still fails fast as a whole with
/// `IneligibleAncestors` naming everything that was missing, rather than
/// letting some artifacts generate before the failure is discovered.
pub fn resolve_order(
    requested: &[String],
    registry: &crate::registry::AgentRegistry,
    is_available: &dyn Fn(&str) -> bool,
) -> std::result::Result<std::vec::Vec<String>, crate::error::CoordinatorError> {
    let mut adjacency: std::collections::HashMap<String, std::vec::Vec<String>> = std::collections::HashMap::new();
    let mut order: std::vec::Vec<String> = std::vec::Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut queue: std::collections::VecDeque<String> = requested.iter().cloned().collect();
    let mut ineligible: std::vec::Vec<String> = std::vec::Vec::new();

    while let std::option::Option::Some(doc_type) = queue.pop_front() {
        if seen.contains(&doc_type) {
            continue;
        }
        seen.insert(doc_type.clone());

        match registry.get(&doc_type) {
            std::option::Option::Some(agent) => {
                order.push(doc_type.clone());
                let deps: std::vec::Vec<String> = agent.dependencies().iter().map(|d| d.to_string()).collect();
                for dep in deps.iter() {
                    queue.push_back(dep.clone());
                }
                adjacency.insert(doc_type, deps);
            }
            std::option::Option::None => {
                if requested.contains(&doc_type) {
                    return std::result::Result::Err(crate::error::CoordinatorError::UnknownDocType(doc_type));
                }
                if !is_available(&doc_type) {
                    ineligible.push(doc_type.clone());
                }
                adjacency.insert(doc_type, std::vec::Vec::new());
            }
        }
    }

    if !ineligible.is_empty() {
        ineligible.sort();
        return std::result::Result::Err(crate::error::CoordinatorError::IneligibleAncestors(ineligible));
    }

    let cycles = detect_cycles(&order, &adjacency);
    if !cycles.is_empty() {
        return std::result::Result::Err(crate::error::CoordinatorError::DependencyCycle(cycles.into_iter().next().unwrap()));
    }

    std::result::Result::Ok(topological_sort(&order, &adjacency))
}

fn detect_cycles(order: &[String], adjacency: &std::collections::HashMap<String, std::vec::Vec<String>>) -> std::vec::Vec<std::vec::Vec<String>> {
    let mut visited = std::collections::HashSet::new();
    let mut rec_stack = std::collections::HashSet::new();
    let mut path = std::vec::Vec::new();
    let mut cycles = std::vec::Vec::new();

    for node in order {
        if !visited.contains(node) {
            dfs_detect_cycle(node, adjacency, &mut visited, &mut rec_stack, &mut path, &mut cycles);
        }
    }
    cycles
}

fn dfs_detect_cycle(
    node: &str,
    adjacency: &std::collections::HashMap<String, std::vec::Vec<String>>,
    visited: &mut std::collections::HashSet<String>,
    rec_stack: &mut std::collections::HashSet<String>,
    path: &mut std::vec::Vec<String>,
    cycles: &mut std::vec::Vec<std::vec::Vec<String>>,
) {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let std::option::Option::Some(neighbors) = adjacency.get(node) {
        for neighbor in neighbors {
            if !visited.contains(neighbor) {
                dfs_detect_cycle(neighbor, adjacency, visited, rec_stack, path, cycles);
            } else if rec_stack.contains(neighbor) {
                let start = path.iter().position(|n| n == neighbor).unwrap_or(0);
                cycles.push(path[start..].to_vec());
            }
        }
    }

    path.pop();
    rec_stack.remove(node);
}

fn topological_sort(order: &[String], adjacency: &std::collections::HashMap<String, std::vec::Vec<String>>) -> std::vec::Vec<String> {
    let mut reverse: std::collections::HashMap<String, std::vec::Vec<String>> = std::collections::HashMap::new();
    for (node, deps) in adjacency.iter() {
        for dep in deps {
            reverse.entry(dep.clone()).or_default().push(node.clone());
        }
        reverse.entry(node.clone()).or_default();
    }

    let mut visited = std::collections::HashSet::new();
    let mut result = std::vec::Vec::new();

    for node in order {
        if !visited.contains(node) {
            dfs_topological(node, &reverse, &mut visited, &mut result);
        }
    }

    result.reverse();
    result
}

fn dfs_topological(
    node: &str,
    reverse: &std::collections::HashMap<String, std::vec::Vec<String>>,
    visited: &mut std::collections::HashSet<String>,
    result: &mut std::vec::Vec<String>,
) {
    visited.insert(node.to_string());
    if let std::option::Option::Some(dependents) = reverse.get(node) {
        for dependent in dependents {
            if !visited.contains(dependent) {
                dfs_topological(dependent, reverse, visited, result);
            }
        }
    }
    result.push(node.to_string());
}
