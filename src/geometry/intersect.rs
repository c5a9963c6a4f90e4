// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Pairwise octree descent collecting intersecting face pairs

use super::triangle_intersection::faces_intersect;
use super::{FaceId, Octree, OctreeNode, TriangleMesh};
use crate::error::MeshError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Face of the first mesh paired with a face of the second
pub type FacePair = (FaceId, FaceId);

/// Which side of an internal node pair is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescentStrategy {
    /// Expand every internal side against the other node unchanged
    Exhaustive,
    /// Expand only the internal side, or the larger box when both are internal
    #[default]
    LargerFirst,
}

/// Handling of face pairs the predicate cannot decide (parallel planes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoplanarPolicy {
    /// Fail the query with `DegenerateGeometry`
    #[default]
    Abort,
    /// Treat the pair as not intersecting
    Skip,
    /// Record the pair in [`IntersectionReport::coplanar_pairs`]
    Collect,
}

impl fmt::Display for DescentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exhaustive => "exhaustive",
            Self::LargerFirst => "larger-first",
        })
    }
}

impl FromStr for DescentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" => Ok(Self::Exhaustive),
            "larger-first" | "larger_first" => Ok(Self::LargerFirst),
            other => Err(format!(
                "unknown descent strategy '{other}' (expected 'exhaustive' or 'larger-first')"
            )),
        }
    }
}

impl fmt::Display for CoplanarPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
            Self::Collect => "collect",
        })
    }
}

impl FromStr for CoplanarPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            "collect" => Ok(Self::Collect),
            other => Err(format!(
                "unknown coplanar policy '{other}' (expected 'abort', 'skip' or 'collect')"
            )),
        }
    }
}

/// Outcome of an intersection query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntersectionReport {
    /// Intersecting pairs, sorted, without duplicates
    pub pairs: Vec<FacePair>,
    /// Pairs on parallel planes, filled under [`CoplanarPolicy::Collect`]
    pub coplanar_pairs: Vec<FacePair>,
    /// Node pairs reached by the descent, pruned ones included
    pub node_pairs_visited: usize,
    /// Face pairs passed to the exact predicate
    pub triangle_tests: usize,
}

/// Configurable intersection query between two octrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionQuery {
    pub strategy: DescentStrategy,
    pub coplanar: CoplanarPolicy,
}

impl IntersectionQuery {
    pub fn new(strategy: DescentStrategy, coplanar: CoplanarPolicy) -> Self {
        Self { strategy, coplanar }
    }

    /// Descend both octrees and test every leaf/leaf face pair once.
    ///
    /// When both octrees index the same mesh, faces are not tested against
    /// themselves and each pair is reported once as `(lower, higher)`.
    pub fn run(&self, a: &Octree<'_>, b: &Octree<'_>) -> Result<IntersectionReport, MeshError> {
        let mut descent = Descent {
            query: *self,
            mesh_a: a.mesh(),
            mesh_b: b.mesh(),
            self_query: std::ptr::eq(a.mesh(), b.mesh()),
            tested: AHashSet::new(),
            report: IntersectionReport::default(),
        };
        descent.visit(a.root(), b.root())?;

        let mut report = descent.report;
        report.pairs.sort_unstable();
        report.coplanar_pairs.sort_unstable();

        tracing::debug!(
            strategy = %self.strategy,
            pairs = report.pairs.len(),
            coplanar = report.coplanar_pairs.len(),
            node_pairs = report.node_pairs_visited,
            triangle_tests = report.triangle_tests,
            "intersection query finished"
        );
        Ok(report)
    }
}

/// Intersecting face pairs between two octrees with the default query
pub fn find_intersecting_faces(a: &Octree<'_>, b: &Octree<'_>) -> Result<Vec<FacePair>, MeshError> {
    Ok(IntersectionQuery::default().run(a, b)?.pairs)
}

struct Descent<'a> {
    query: IntersectionQuery,
    mesh_a: &'a TriangleMesh,
    mesh_b: &'a TriangleMesh,
    self_query: bool,
    tested: AHashSet<FacePair>,
    report: IntersectionReport,
}

impl Descent<'_> {
    fn visit(&mut self, a: &OctreeNode, b: &OctreeNode) -> Result<(), MeshError> {
        self.report.node_pairs_visited += 1;
        if !a.bounds.intersects_aabb(&b.bounds) {
            return Ok(());
        }

        match (a.is_leaf(), b.is_leaf()) {
            (true, true) => self.test_leaves(a, b),
            (a_leaf, b_leaf) => match self.query.strategy {
                DescentStrategy::Exhaustive => {
                    if !a_leaf {
                        for child in a.children() {
                            self.visit(child, b)?;
                        }
                    }
                    if !b_leaf {
                        for child in b.children() {
                            self.visit(a, child)?;
                        }
                    }
                    Ok(())
                }
                DescentStrategy::LargerFirst => {
                    let expand_a = b_leaf
                        || (!a_leaf && a.bounds.diagonal_squared() >= b.bounds.diagonal_squared());
                    if expand_a {
                        for child in a.children() {
                            self.visit(child, b)?;
                        }
                    } else {
                        for child in b.children() {
                            self.visit(a, child)?;
                        }
                    }
                    Ok(())
                }
            },
        }
    }

    fn test_leaves(&mut self, a: &OctreeNode, b: &OctreeNode) -> Result<(), MeshError> {
        for &face_a in &a.faces {
            for &face_b in &b.faces {
                let pair = if self.self_query {
                    if face_a == face_b {
                        continue;
                    }
                    (face_a.min(face_b), face_a.max(face_b))
                } else {
                    (face_a, face_b)
                };

                if !self.tested.insert(pair) {
                    continue;
                }
                self.report.triangle_tests += 1;

                match faces_intersect(self.mesh_a, pair.0, self.mesh_b, pair.1) {
                    Ok(true) => self.report.pairs.push(pair),
                    Ok(false) => {}
                    Err(MeshError::DegenerateGeometry { .. }) if self.query.coplanar != CoplanarPolicy::Abort => {
                        if self.query.coplanar == CoplanarPolicy::Collect {
                            self.report.coplanar_pairs.push(pair);
                        }
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{triangles_intersect, Primitive, Vector3};

    fn brute_force(a: &TriangleMesh, b: &TriangleMesh) -> Vec<FacePair> {
        let mut pairs = Vec::new();
        for fa in a.face_ids() {
            for fb in b.face_ids() {
                let ta = a.face_positions(fa).unwrap();
                let tb = b.face_positions(fb).unwrap();
                if triangles_intersect(&ta, &tb).unwrap() {
                    pairs.push((fa, fb));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_separated_cubes() {
        let a = Primitive::cube(1.0, Vector3::ZERO).to_mesh();
        let b = Primitive::cube(1.0, Vector3::new(5.0, 0.0, 0.0)).to_mesh();
        let (ta, tb) = (Octree::build(&a, 4).unwrap(), Octree::build(&b, 4).unwrap());

        let report = IntersectionQuery::default().run(&ta, &tb).unwrap();
        assert!(report.pairs.is_empty());
        assert_eq!(report.triangle_tests, 0);
        assert_eq!(report.node_pairs_visited, 1);
    }

    #[test]
    fn test_overlapping_cubes_match_brute_force() {
        let a = Primitive::cube(1.0, Vector3::ZERO).to_mesh();
        let b = Primitive::cube(1.0, Vector3::new(0.5, 0.3, 0.2)).to_mesh();
        let (ta, tb) = (Octree::build(&a, 3).unwrap(), Octree::build(&b, 3).unwrap());

        let expected = brute_force(&a, &b);
        assert!(!expected.is_empty());
        assert_eq!(find_intersecting_faces(&ta, &tb).unwrap(), expected);

        let exhaustive = IntersectionQuery::new(DescentStrategy::Exhaustive, CoplanarPolicy::Abort)
            .run(&ta, &tb)
            .unwrap();
        assert_eq!(exhaustive.pairs, expected);
    }

    #[test]
    fn test_self_query_skips_identity() {
        let mesh = Primitive::cube(1.0, Vector3::ZERO).to_mesh();
        let octree = Octree::build(&mesh, 2).unwrap();
        let query = IntersectionQuery::new(DescentStrategy::LargerFirst, CoplanarPolicy::Collect);
        let report = query.run(&octree, &octree).unwrap();

        for &(a, b) in report.pairs.iter().chain(&report.coplanar_pairs) {
            assert!(a < b);
        }
        // Each side's two triangles are coplanar
        assert_eq!(report.coplanar_pairs.len(), 6);
        assert!(!report.pairs.is_empty());
    }

    #[test]
    fn test_coplanar_abort() {
        let mesh = Primitive::cube(1.0, Vector3::ZERO).to_mesh();
        let octree = Octree::build(&mesh, 2).unwrap();
        let err = find_intersecting_faces(&octree, &octree).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("larger-first".parse::<DescentStrategy>().unwrap(), DescentStrategy::LargerFirst);
        assert_eq!("Exhaustive".parse::<DescentStrategy>().unwrap(), DescentStrategy::Exhaustive);
        assert_eq!("collect".parse::<CoplanarPolicy>().unwrap(), CoplanarPolicy::Collect);
        assert!("sideways".parse::<CoplanarPolicy>().is_err());
        assert_eq!(DescentStrategy::LargerFirst.to_string(), "larger-first");
    }
}
