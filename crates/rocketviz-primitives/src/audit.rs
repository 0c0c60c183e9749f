use std::collections::HashMap;

use rocketviz_ir::Mesh;
use tracing::{debug, instrument};

/// Result of [`audit_closed_mesh`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeAudit {
    /// Triangles inspected.
    pub triangles: usize,
    /// Distinct undirected edges.
    pub edges: usize,
    /// Triangles that repeat a corner.
    pub degenerate: usize,
    /// Corner indices past the end of the vertex list.
    pub out_of_range: usize,
    /// Edges used by a single triangle, as `[low, high]`.
    pub open_edges: Vec<[u32; 2]>,
    /// Edges used by three or more triangles, as `[low, high]`.
    pub overshared_edges: Vec<[u32; 2]>,
    /// True if every directed edge appears at most once.
    pub consistently_wound: bool,
}

impl EdgeAudit {
    /// Watertight: no defects and every edge shared by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        self.triangles > 0
            && self.degenerate == 0
            && self.out_of_range == 0
            && self.open_edges.is_empty()
            && self.overshared_edges.is_empty()
    }
}

/// Count edge usage over a mesh's triangles.
#[instrument(skip(mesh), fields(name = %mesh.name))]
pub fn audit_closed_mesh(mesh: &Mesh) -> EdgeAudit {
    let vertices = mesh.num_vertices();
    let mut audit = EdgeAudit {
        consistently_wound: true,
        ..EdgeAudit::default()
    };
    let mut undirected: HashMap<[u32; 2], usize> = HashMap::new();
    let mut directed: HashMap<[u32; 2], usize> = HashMap::new();

    for tri in mesh.triangles() {
        audit.triangles += 1;
        audit.out_of_range += tri.iter().filter(|&&v| v as usize >= vertices).count();
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            audit.degenerate += 1;
            continue;
        }
        for n in 0..3 {
            let (a, b) = (tri[n], tri[(n + 1) % 3]);
            *directed.entry([a, b]).or_default() += 1;
            *undirected.entry([a.min(b), a.max(b)]).or_default() += 1;
        }
    }

    audit.edges = undirected.len();
    for (edge, count) in undirected {
        match count {
            1 => audit.open_edges.push(edge),
            2 => {}
            _ => audit.overshared_edges.push(edge),
        }
    }
    audit.open_edges.sort_unstable();
    audit.overshared_edges.sort_unstable();
    audit.consistently_wound = directed.values().all(|&c| c == 1);

    debug!(
        triangles = audit.triangles,
        edges = audit.edges,
        open = audit.open_edges.len(),
        closed = audit.is_closed(),
        "edge audit complete"
    );
    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BOX_FACES;
    use rocketviz_math::Point3;

    fn unit_box(faces: &[[u32; 3]]) -> Mesh {
        let corners: Vec<Point3> = (0..8)
            .map(|n| Point3::new((n & 1) as f64, ((n >> 1) & 1) as f64, (n >> 2) as f64))
            .collect();
        Mesh::from_parts("box", &corners, faces)
    }

    #[test]
    fn test_box_table_is_closed_and_wound() {
        let audit = audit_closed_mesh(&unit_box(&BOX_FACES));
        assert_eq!(audit.triangles, 12);
        assert_eq!(audit.edges, 18);
        assert!(audit.is_closed());
        assert!(audit.consistently_wound);
        // V - E + F = 2 for a sphere-like closed surface
        assert_eq!(8 - audit.edges as i64 + 12, 2);
    }

    #[test]
    fn test_missing_face_opens_edges() {
        let audit = audit_closed_mesh(&unit_box(&BOX_FACES[..11]));
        assert!(!audit.is_closed());
        assert_eq!(audit.open_edges.len(), 3);
    }

    #[test]
    fn test_degenerate_and_out_of_range() {
        let mut faces = BOX_FACES.to_vec();
        faces.push([0, 3, 0]);
        faces.push([7, 6, 9]);
        let audit = audit_closed_mesh(&unit_box(&faces));
        assert_eq!(audit.degenerate, 1);
        assert_eq!(audit.out_of_range, 1);
        assert!(!audit.is_closed());
    }

    #[test]
    fn test_flipped_triangle_breaks_winding() {
        let mut faces = BOX_FACES;
        faces[0] = [0, 2, 1];
        let audit = audit_closed_mesh(&unit_box(&faces));
        assert!(audit.is_closed());
        assert!(!audit.consistently_wound);
    }

    #[test]
    fn test_empty_mesh_is_not_closed() {
        let audit = audit_closed_mesh(&unit_box(&[]));
        assert_eq!(audit.triangles, 0);
        assert!(!audit.is_closed());
    }
}
