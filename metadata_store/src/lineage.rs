//! Directed lineage edges between documents, and cycle detection over them.
//!
//! The cycle-detection and topological-sort algorithms are the same
//! three-state DFS used elsewhere in this workspace for task dependency
//! graphs, applied here to a per-program reference graph instead.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial lineage edge type and DFS-based cycle detector.

/// A directed reference from one document to another (e.g. "derived_from",
/// "supersedes", "cites").
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LineageEdge {
    pub from_id: String,
    pub ref_type: String,
    pub to_id: String,
}

/// Adjacency-list view over a set of lineage edges, restricted to a single
/// program, used to check whether adding a new edge would create a cycle.
pub struct LineageGraph {
    adjacency: std::collections::HashMap<String, std::vec::Vec<String>>,
}

impl LineageGraph {
    pub fn from_edges(edges: &[LineageEdge]) -> Self {
        let mut adjacency: std::collections::HashMap<String, std::vec::Vec<String>> = std::collections::HashMap::new();
        for edge in edges {
            adjacency.entry(edge.from_id.clone()).or_default().push(edge.to_id.clone());
        }
        LineageGraph { adjacency }
    }

    /// Returns true iff adding an edge `from_id -> to_id` would introduce a
    /// cycle, i.e. iff `to_id` can already reach `from_id`.
    pub fn would_create_cycle(&self, from_id: &str, to_id: &str) -> bool {
        if from_id == to_id {
            return true;
        }
        let mut visited = std::collections::HashSet::new();
        let mut stack = std::vec![to_id.to_string()];
        while let std::option::Option::Some(node) = stack.pop() {
            if node == from_id {
                return true;
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            if let std::option::Option::Some(neighbors) = self.adjacency.get(&node) {
                for neighbor in neighbors {
                    stack.push(neighbor.clone());
                }
            }
        }
        false
    }

    /// Detects all cycles currently present in the graph via three-state DFS.
    pub fn detect_cycles(&self) -> std::vec::Vec<std::vec::Vec<String>> {
        let mut visited = std::collections::HashSet::new();
        let mut rec_stack = std::collections::HashSet::new();
        let mut path = std::vec::Vec::new();
        let mut cycles = std::vec::Vec::new();

        for node in self.adjacency.keys() {
            if !visited.contains(node) {
                self.dfs_detect_cycle(node, &mut visited, &mut rec_stack, &mut path, &mut cycles);
            }
        }
        cycles
    }

    fn dfs_detect_cycle(
        &self,
        node: &String,
        visited: &mut std::collections::HashSet<String>,
        rec_stack: &mut std::collections::HashSet<String>,
        path: &mut std::vec::Vec<String>,
        cycles: &mut std::vec::Vec<std::vec::Vec<String>>,
    ) {
        visited.insert(node.clone());
        rec_stack.insert(node.clone());
        path.push(node.clone());

        if let std::option::Option::Some(neighbors) = self.adjacency.get(node) {
            for neighbor in neighbors {
                if !visited.contains(neighbor) {
                    self.dfs_detect_cycle(neighbor, visited, rec_stack, path, cycles);
                } else if rec_stack.contains(neighbor) {
                    let cycle_start = path.iter().position(|n| n == neighbor).unwrap_or(0);
                    cycles.push(path[cycle_start..].to_vec());
                }
            }
        }

        path.pop();
        rec_stack.remove(node);
    }
}
