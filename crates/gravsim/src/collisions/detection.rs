//! Contact recording and collision-group discovery
//!
//! Bodies are addressed by their index into the body list for the duration
//! of one tick. Nothing here survives past the resolution step.

use crate::body::Body;

/// Bodies found in mutual contact, transitively
///
/// The first member is the one whose contact was recorded first; it
/// survives the merge and absorbs the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGroup {
    pub members: Vec<usize>,
}

impl CollisionGroup {
    pub fn survivor(&self) -> usize {
        self.members[0]
    }

    pub fn absorbed(&self) -> &[usize] {
        &self.members[1..]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Tick-scoped record of which bodies touch which
///
/// Holds a colliding-with list per body and the ordered list of every body
/// that touched anything this tick.
///
/// # Examples
///
/// ```
/// use gravsim::collisions::ContactGraph;
///
/// let mut graph = ContactGraph::new(3);
/// graph.check_pair(0, 1, 0.5, 1.0);
/// graph.check_pair(1, 2, 0.5, 1.0);
///
/// let groups = graph.groups();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].members, vec![0, 1, 2]);
/// assert!(graph.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContactGraph {
    neighbors: Vec<Vec<usize>>,
    touched: Vec<usize>,
    is_touched: Vec<bool>,
}

impl ContactGraph {
    /// Creates an empty graph for `body_count` bodies
    pub fn new(body_count: usize) -> Self {
        let mut graph = Self::default();
        graph.reset(body_count);
        graph
    }

    /// Clears all contacts and resizes for `body_count` bodies
    pub fn reset(&mut self, body_count: usize) {
        self.neighbors.iter_mut().for_each(Vec::clear);
        self.neighbors.resize_with(body_count, Vec::new);
        self.touched.clear();
        self.is_touched.clear();
        self.is_touched.resize(body_count, false);
    }

    /// Records a contact between `i` and `j` if `distance <= contact_distance`
    ///
    /// Returns whether a contact was recorded.
    pub fn check_pair(&mut self, i: usize, j: usize, distance: f64, contact_distance: f64) -> bool {
        if distance <= contact_distance {
            self.record(i, j);
            true
        } else {
            false
        }
    }

    /// Records that `i` and `j` touch
    pub fn record(&mut self, i: usize, j: usize) {
        self.neighbors[i].push(j);
        self.neighbors[j].push(i);
        self.mark_touched(i);
        self.mark_touched(j);
    }

    fn mark_touched(&mut self, idx: usize) {
        if !self.is_touched[idx] {
            self.is_touched[idx] = true;
            self.touched.push(idx);
        }
    }

    /// Bodies that touched anything, in the order they were first seen
    pub fn touched(&self) -> &[usize] {
        &self.touched
    }

    /// Bodies recorded as touching `idx`
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.neighbors[idx]
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Splits the recorded contacts into connected groups and clears them
    ///
    /// Walks the touched list in order. Each unvisited entry starts a new
    /// group whose closure is collected with an explicit stack; every
    /// visited body's neighbor list is drained as it is expanded, so an
    /// entry already absorbed into an earlier group is skipped.
    pub fn groups(&mut self) -> Vec<CollisionGroup> {
        let touched = std::mem::take(&mut self.touched);
        let mut visited = vec![false; self.neighbors.len()];
        let mut groups = Vec::new();
        let mut stack = Vec::new();

        for &start in &touched {
            self.is_touched[start] = false;
            if visited[start] {
                continue;
            }

            visited[start] = true;
            let mut members = vec![start];
            stack.push(start);

            while let Some(idx) = stack.pop() {
                for next in std::mem::take(&mut self.neighbors[idx]) {
                    if !visited[next] {
                        visited[next] = true;
                        members.push(next);
                        stack.push(next);
                    }
                }
            }

            groups.push(CollisionGroup { members });
        }

        groups
    }
}

/// Checks every pair of bodies at their stored positions
///
/// Same criterion as the in-loop detection (`distance <= r_a + r_b`) but as
/// a standalone O(N²) pass, for callers that want contacts without
/// stepping.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::collisions::detect_contacts;
///
/// let bodies = [
///     Body::new(1.0, 1.0, [0.0, 0.0], [0.0, 0.0]),
///     Body::new(1.0, 1.0, [1.5, 0.0], [0.0, 0.0]),
/// ];
/// let mut contacts = detect_contacts(&bodies);
/// assert_eq!(contacts.groups().len(), 1);
/// ```
pub fn detect_contacts(bodies: &[Body]) -> ContactGraph {
    let n = bodies.len();
    let mut graph = ContactGraph::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let distance = bodies[i].distance_to(&bodies[j]);
            graph.check_pair(i, j, distance, bodies[i].radius + bodies[j].radius);
        }
    }

    graph
}
