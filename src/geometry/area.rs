use geo::{Area as _, BooleanOps, BoundingRect, Contains, Coord, Intersects, LineString, MapCoords, MultiPolygon, Relate};

use super::{ArcType, Ellipse, Path, PathSegment, Rect, Shape};
use crate::math::affine::AffineTransform;
use crate::math::arc_2d::{arc_subdivision_count, sample_arc};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// Rings enclosing less than this are dropped when building an area.
const MIN_RING_AREA: f64 = 1e-12;

/// A region of the plane that supports boolean combination.
///
/// Held as polygons with holes. Curved outlines are flattened when the area is
/// built, at the flatness given by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    region: MultiPolygon<f64>,
}

impl Default for Area {
    fn default() -> Self {
        Self {
            region: MultiPolygon::new(vec![]),
        }
    }
}

fn to_coord(p: &Point2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn to_point(c: &Coord<f64>) -> Point2 {
    Point2::new(c.x, c.y)
}

fn ring_polygon(ring: &[Point2]) -> geo::Polygon<f64> {
    geo::Polygon::new(LineString::new(ring.iter().map(to_coord).collect()), vec![])
}

/// Combines rings with the even-odd rule.
fn region_from_rings(rings: impl IntoIterator<Item = Vec<Point2>>) -> MultiPolygon<f64> {
    let mut region = MultiPolygon::new(vec![]);
    for ring in rings {
        if ring.len() < 3 || signed_area_2d(&ring).abs() < MIN_RING_AREA {
            continue;
        }
        region = region.xor(&MultiPolygon::new(vec![ring_polygon(&ring)]));
    }
    region
}

/// Open ring of a closed geo line string.
fn open_ring(ring: &LineString<f64>) -> Vec<Point2> {
    let mut points: Vec<Point2> = ring.coords().map(to_point).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn ellipse_ring(ellipse: &Ellipse, flatness: f64) -> Vec<Point2> {
    let c = ellipse.center();
    let frame = ellipse.frame();
    let (rx, ry) = (frame.width * 0.5, frame.height * 0.5);
    let n = arc_subdivision_count(rx.max(ry), std::f64::consts::TAU, flatness).max(8);
    (0..n)
        .map(|i| {
            let t = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            Point2::new(c.x + rx * t.cos(), c.y + ry * t.sin())
        })
        .collect()
}

/// Closed rings approximating the outline of `shape`.
fn outline_rings(shape: &Shape, flatness: f64) -> Vec<Vec<Point2>> {
    match shape {
        Shape::Arc(arc) => {
            let mut ring = sample_arc(&arc.center(), arc.radius(), arc.start(), arc.extent(), flatness);
            if arc.arc_type() == ArcType::Pie {
                ring.push(arc.center());
            }
            vec![ring]
        }
        Shape::Ellipse(ellipse) => vec![ellipse_ring(ellipse, flatness)],
        Shape::Rectangle(rect) => vec![rect.corners().to_vec()],
        Shape::Polygon(polygon) => vec![polygon.points().to_vec()],
        Shape::Area(area) => area.rings(),
        other => Path::from_segments(other.segments()).flattened(flatness).subpaths(),
    }
}

impl Area {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            region: region_from_rings([rect.corners().to_vec()]),
        }
    }

    /// The region enclosed by one ring of points.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        Self {
            region: region_from_rings([points.to_vec()]),
        }
    }

    /// The region enclosed by the outline of `shape`.
    ///
    /// Every sub-path is closed implicitly and sub-paths combine by the
    /// even-odd rule. Outlines enclosing nothing, such as lines, give an
    /// empty area.
    #[must_use]
    pub fn from_shape(shape: &Shape, flatness: f64) -> Self {
        if let Shape::Area(area) = shape {
            return area.clone();
        }
        Self {
            region: region_from_rings(outline_rings(shape, flatness)),
        }
    }

    pub fn intersect(&mut self, other: &Area) {
        self.region = self.region.intersection(&other.region);
    }

    pub fn add(&mut self, other: &Area) {
        self.region = self.region.union(&other.region);
    }

    pub fn subtract(&mut self, other: &Area) {
        self.region = self.region.difference(&other.region);
    }

    pub fn exclusive_or(&mut self, other: &Area) {
        self.region = self.region.xor(&other.region);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surface() < MIN_RING_AREA
    }

    /// Enclosed surface.
    #[must_use]
    pub fn surface(&self) -> f64 {
        self.region.unsigned_area()
    }

    /// Returns the bounds of the region, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.region
            .bounding_rect()
            .map(|r| Rect::from_corners(&to_point(&r.min()), &to_point(&r.max())))
    }

    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        self.region.contains(&geo::Point::new(p.x, p.y))
    }

    /// True if all of `rect` lies inside the region. A rectangle without
    /// width or height is tested as the segment or point it reduces to.
    #[must_use]
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if rect.width <= 0.0 && rect.height <= 0.0 {
            return self.contains_point(&Point2::new(rect.x, rect.y));
        }
        if rect.is_empty() {
            let line = geo::Line::new(
                Coord { x: rect.min_x(), y: rect.min_y() },
                Coord { x: rect.max_x(), y: rect.max_y() },
            );
            return self.region.relate(&line).is_contains();
        }
        let mut clipped = Area::from_rect(rect);
        clipped.intersect(self);
        let full = rect.width * rect.height;
        clipped.surface() >= full * (1.0 - 1e-9)
    }

    /// True if the region touches `rect`.
    #[must_use]
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let min = Coord { x: rect.min_x(), y: rect.min_y() };
        let max = Coord { x: rect.max_x(), y: rect.max_y() };
        if rect.width <= 0.0 && rect.height <= 0.0 {
            self.region.intersects(&geo::Point::from(min))
        } else if rect.is_empty() {
            self.region.intersects(&geo::Line::new(min, max))
        } else {
            self.region.intersects(&geo::Rect::new(min, max).to_polygon())
        }
    }

    #[must_use]
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        Self {
            region: self.region.map_coords(|c| to_coord(&transform.transform_point(&to_point(&c)))),
        }
    }

    /// Every boundary ring, outer rings first within each polygon, without
    /// the repeated closing point.
    #[must_use]
    pub fn rings(&self) -> Vec<Vec<Point2>> {
        self.region
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .map(open_ring)
            .filter(|ring| !ring.is_empty())
            .collect()
    }

    /// One closed sub-path per boundary ring.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        for ring in self.rings() {
            let Some((first, rest)) = ring.split_first() else {
                continue;
            };
            segments.push(PathSegment::MoveTo(*first));
            segments.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
            segments.push(PathSegment::Close);
        }
        segments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, Line, Polygon};
    use approx::assert_abs_diff_eq;

    fn square(x: f64, y: f64, size: f64) -> Area {
        Area::from_rect(&Rect::new(x, y, size, size))
    }

    #[test]
    fn default_area_is_empty() {
        let empty = Area::default();
        assert!(empty.is_empty());
        assert_eq!(empty, Area::new());
        assert!(empty.rings().is_empty());
    }

    #[test]
    fn boolean_operations() {
        let mut a = square(0.0, 0.0, 10.0);
        a.intersect(&square(5.0, 5.0, 10.0));
        assert_abs_diff_eq!(a.surface(), 25.0, epsilon = 1e-9);

        let mut u = square(0.0, 0.0, 10.0);
        u.add(&square(5.0, 5.0, 10.0));
        assert_abs_diff_eq!(u.surface(), 175.0, epsilon = 1e-9);

        let mut d = square(0.0, 0.0, 10.0);
        d.subtract(&square(5.0, 5.0, 10.0));
        assert_abs_diff_eq!(d.surface(), 75.0, epsilon = 1e-9);

        let mut x = square(0.0, 0.0, 10.0);
        x.exclusive_or(&square(5.0, 5.0, 10.0));
        assert_abs_diff_eq!(x.surface(), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let mut a = square(0.0, 0.0, 10.0);
        a.intersect(&square(20.0, 20.0, 10.0));
        assert!(a.is_empty());
        assert!(a.bounds().is_none());
    }

    #[test]
    fn lines_enclose_nothing() {
        let line = Shape::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)));
        assert!(Area::from_shape(&line, 0.01).is_empty());
    }

    #[test]
    fn nested_rings_make_a_hole() {
        let mut path = Path::new();
        path.append(&Shape::Rectangle(Rect::new(0.0, 0.0, 10.0, 10.0)), false);
        path.append(&Shape::Rectangle(Rect::new(2.0, 2.0, 6.0, 6.0)), false);
        let area = Area::from_shape(&Shape::Path(path), 0.01);
        assert_abs_diff_eq!(area.surface(), 64.0, epsilon = 1e-9);
        assert!(!area.contains_point(&Point2::new(5.0, 5.0)));
        assert!(area.contains_point(&Point2::new(1.0, 5.0)));
        assert_eq!(area.rings().len(), 2);
    }

    #[test]
    fn circle_area_is_close_to_exact() {
        let area = Area::from_shape(&Shape::Ellipse(Ellipse::circle(Point2::new(0.0, 0.0), 10.0)), 0.001);
        let exact = std::f64::consts::PI * 100.0;
        assert!((area.surface() - exact).abs() / exact < 1e-3, "{}", area.surface());
    }

    #[test]
    fn pie_includes_center() {
        let arc = Arc::new(Point2::new(0.0, 0.0), 10.0, 0.0, 90.0, ArcType::Pie).unwrap();
        let area = Area::from_shape(&Shape::Arc(arc), 0.001);
        let exact = std::f64::consts::PI * 100.0 / 4.0;
        assert!((area.surface() - exact).abs() / exact < 1e-3);
    }

    #[test]
    fn rect_queries() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.contains_rect(&Rect::new(1.0, 1.0, 5.0, 5.0)));
        assert!(!a.contains_rect(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.contains_rect(&Rect::new(1.0, 5.0, 5.0, 0.0)));
        assert!(!a.contains_rect(&Rect::new(5.0, 5.0, 10.0, 0.0)));
        assert!(a.intersects_rect(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects_rect(&Rect::new(5.0, 5.0, 10.0, 0.0)));
        assert!(!a.intersects_rect(&Rect::new(20.0, 5.0, 10.0, 0.0)));
        assert!(!a.intersects_rect(&Rect::new(20.0, 20.0, 1.0, 1.0)));
    }

    #[test]
    fn transform_moves_region() {
        let a = square(0.0, 0.0, 10.0).transformed(&AffineTransform::translation(5.0, -5.0));
        let b = a.bounds().unwrap();
        assert_abs_diff_eq!(b.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.y, -5.0, epsilon = 1e-12);
    }

    #[test]
    fn segments_describe_closed_rings() {
        let area = Area::from_shape(&Shape::Polygon(Polygon::from_rect(&Rect::new(0.0, 0.0, 2.0, 2.0))), 0.01);
        let segs = area.segments();
        assert_eq!(segs.len(), 5);
        assert!(matches!(segs[0], PathSegment::MoveTo(_)));
        assert_eq!(segs[4], PathSegment::Close);
    }
}
