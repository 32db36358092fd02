use geo::{BoundingRect, Centroid, LineString};
use serde::{Deserialize, Serialize};

use super::normalize::NormPoint;

/// Even-odd ray-casting point-in-polygon test.
///
/// Casts a ray from `point` in the +u direction and toggles on every edge it
/// crosses. An edge counts when `point.v` lies in the half-open span between
/// its endpoints (one end inclusive, the other exclusive) and the edge meets
/// the ray strictly to the right of `point.u`.
///
/// With this convention a point on a low-u or low-v edge is inside and a
/// point on a high-u or high-v edge is outside.
///
/// Polygons with fewer than 3 vertices enclose nothing and always give
/// `false`. Never fails: NaN coordinates compare false and never toggle.
pub fn is_inside_polygon(point: NormPoint, polygon: &[NormPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut prev = polygon[polygon.len() - 1];

    for &curr in polygon {
        if (curr.v > point.v) != (prev.v > point.v) {
            // Same endpoint order regardless of ring direction, so a reversed
            // ring produces bit-identical intersections.
            let (lo, hi) = if curr.v < prev.v {
                (curr, prev)
            } else {
                (prev, curr)
            };
            let cross_u = lo.u + (point.v - lo.v) * (hi.u - lo.u) / (hi.v - lo.v);
            if cross_u > point.u {
                inside = !inside;
            }
        }
        prev = curr;
    }

    inside
}

/// Axis-aligned bounds of a hit region in normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub min: NormPoint,
    pub max: NormPoint,
}

/// The clickable area of one puzzle, as an implicitly closed ring in
/// normalized image space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitRegion {
    points: Vec<NormPoint>,
}

impl HitRegion {
    pub fn new(points: Vec<NormPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[NormPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn contains(&self, point: NormPoint) -> bool {
        is_inside_polygon(point, &self.points)
    }

    pub fn bounds(&self) -> Option<RegionBounds> {
        let rect = self.ring().bounding_rect()?;
        Some(RegionBounds {
            min: NormPoint::new(rect.min().x, rect.min().y),
            max: NormPoint::new(rect.max().x, rect.max().y),
        })
    }

    /// Area centroid, falling back to the ring's line centroid when the
    /// region has no area.
    pub fn centroid(&self) -> Option<NormPoint> {
        if !self.is_valid() {
            return None;
        }
        let polygon = geo::Polygon::new(self.ring(), vec![]);
        polygon.centroid().map(|c| NormPoint::new(c.x(), c.y()))
    }

    fn ring(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|p| geo::coord! { x: p.u, y: p.v })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<NormPoint> {
        raw.iter().map(|&(u, v)| NormPoint::new(u, v)).collect()
    }

    fn square() -> Vec<NormPoint> {
        pts(&[(0.1, 0.1), (0.5, 0.1), (0.5, 0.5), (0.1, 0.5)])
    }

    fn shapes() -> Vec<Vec<NormPoint>> {
        vec![
            square(),
            pts(&[(0.2, 0.1), (0.9, 0.4), (0.3, 0.8)]),
            // L-shape, concave at (0.4, 0.4)
            pts(&[
                (0.1, 0.1),
                (0.4, 0.1),
                (0.4, 0.4),
                (0.8, 0.4),
                (0.8, 0.7),
                (0.1, 0.7),
            ]),
            // irregular hand-drawn outline
            pts(&[
                (0.512, 0.301),
                (0.587, 0.322),
                (0.611, 0.405),
                (0.574, 0.466),
                (0.498, 0.471),
                (0.457, 0.398),
                (0.471, 0.337),
            ]),
        ]
    }

    fn query_grid() -> Vec<NormPoint> {
        let mut grid = Vec::new();
        for i in -2..=22 {
            for j in -2..=22 {
                grid.push(NormPoint::new(i as f64 * 0.05 + 0.013, j as f64 * 0.05 + 0.007));
            }
        }
        grid
    }

    #[test]
    fn test_square_scenario() {
        let sq = square();
        assert!(is_inside_polygon(NormPoint::new(0.3, 0.3), &sq));
        assert!(!is_inside_polygon(NormPoint::new(0.9, 0.9), &sq));
    }

    #[test]
    fn test_square_boundary_rule() {
        let sq = square();
        // low-u and low-v edges belong to the region
        assert!(is_inside_polygon(NormPoint::new(0.1, 0.3), &sq));
        assert!(is_inside_polygon(NormPoint::new(0.3, 0.1), &sq));
        // high-u and high-v edges do not
        assert!(!is_inside_polygon(NormPoint::new(0.5, 0.3), &sq));
        assert!(!is_inside_polygon(NormPoint::new(0.3, 0.5), &sq));
    }

    #[test]
    fn test_square_corners() {
        let sq = square();
        assert!(is_inside_polygon(NormPoint::new(0.1, 0.1), &sq));
        assert!(!is_inside_polygon(NormPoint::new(0.5, 0.1), &sq));
        assert!(!is_inside_polygon(NormPoint::new(0.5, 0.5), &sq));
        assert!(!is_inside_polygon(NormPoint::new(0.1, 0.5), &sq));
    }

    #[test]
    fn test_degenerate_polygons_never_hit() {
        let candidates = [
            vec![],
            pts(&[(0.5, 0.5)]),
            pts(&[(0.0, 0.0), (1.0, 1.0)]),
        ];
        for poly in &candidates {
            for q in query_grid() {
                assert!(!is_inside_polygon(q, poly));
            }
            assert!(!is_inside_polygon(NormPoint::new(0.5, 0.5), poly));
        }
    }

    #[test]
    fn test_outside_hull_is_miss() {
        for poly in shapes() {
            let region = HitRegion::new(poly.clone());
            let b = region.bounds().unwrap();
            for q in query_grid() {
                let outside = q.u < b.min.u || q.u > b.max.u || q.v < b.min.v || q.v > b.max.v;
                if outside {
                    assert!(!is_inside_polygon(q, &poly), "{:?} should be outside", q);
                }
            }
        }
    }

    #[test]
    fn test_convex_centroid_is_hit() {
        let convex = [
            square(),
            pts(&[(0.2, 0.1), (0.9, 0.4), (0.3, 0.8)]),
            pts(&[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)]),
        ];
        for poly in convex {
            let centroid = HitRegion::new(poly.clone()).centroid().unwrap();
            assert!(is_inside_polygon(centroid, &poly));
        }
    }

    #[test]
    fn test_rotation_invariance() {
        for poly in shapes() {
            let baseline: Vec<bool> = query_grid()
                .into_iter()
                .map(|q| is_inside_polygon(q, &poly))
                .collect();
            for shift in 1..poly.len() {
                let mut rotated = poly.clone();
                rotated.rotate_left(shift);
                let got: Vec<bool> = query_grid()
                    .into_iter()
                    .map(|q| is_inside_polygon(q, &rotated))
                    .collect();
                assert_eq!(baseline, got);
            }
        }
    }

    #[test]
    fn test_reversal_invariance() {
        for poly in shapes() {
            let mut reversed = poly.clone();
            reversed.reverse();
            for q in query_grid() {
                assert_eq!(
                    is_inside_polygon(q, &poly),
                    is_inside_polygon(q, &reversed)
                );
            }
            // boundary points too
            for &v in &poly {
                assert_eq!(is_inside_polygon(v, &poly), is_inside_polygon(v, &reversed));
            }
        }
    }

    #[test]
    fn test_concave_notch_is_miss() {
        let l_shape = &shapes()[2];
        assert!(!is_inside_polygon(NormPoint::new(0.6, 0.2), l_shape));
        assert!(is_inside_polygon(NormPoint::new(0.2, 0.2), l_shape));
        assert!(is_inside_polygon(NormPoint::new(0.6, 0.55), l_shape));
    }

    #[test]
    fn test_nan_point_is_miss() {
        assert!(!is_inside_polygon(NormPoint::new(f64::NAN, 0.3), &square()));
        assert!(!is_inside_polygon(NormPoint::new(0.3, f64::NAN), &square()));
    }

    #[test]
    fn test_region_bounds_and_centroid() {
        let region = HitRegion::new(square());
        let b = region.bounds().unwrap();
        assert_eq!(b.min, NormPoint::new(0.1, 0.1));
        assert_eq!(b.max, NormPoint::new(0.5, 0.5));

        let c = region.centroid().unwrap();
        assert!((c.u - 0.3).abs() < 1e-9);
        assert!((c.v - 0.3).abs() < 1e-9);

        assert!(HitRegion::new(pts(&[(0.1, 0.1), (0.2, 0.2)])).centroid().is_none());
        assert!(HitRegion::default().bounds().is_none());
    }

    #[test]
    fn test_region_deserializes_from_nested_arrays() {
        let region: HitRegion =
            serde_json::from_str("[[0.1,0.1],[0.5,0.1],[0.5,0.5],[0.1,0.5]]").unwrap();
        assert_eq!(region.points(), square().as_slice());
        assert!(region.contains(NormPoint::new(0.3, 0.3)));
    }
}
