use crate::{Point3, UnitVec3, Vector3};

/// An infinite plane in 3D defined by a unit normal and its signed offset `d` from the origin
/// along that normal.
#[derive(Debug, Clone)]
pub struct Plane3 {
    pub normal: UnitVec3,
    pub d: f64,
}

impl Plane3 {
    pub fn new(normal: UnitVec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Signed distance from the plane to `point`, positive on the side the normal points to.
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.d
    }

    /// Find the distance along a line from `origin` in direction `dir` at which the line crosses
    /// the plane. Both sides of the plane are treated the same. Returns `None` if the line is
    /// parallel to the plane or if the crossing lies behind the origin. The distance is in units
    /// of `dir`'s length.
    ///
    /// # Arguments
    ///
    /// * `origin`: the start of the line
    /// * `dir`: the direction of travel along the line
    ///
    /// returns: Option<f64>
    ///
    /// # Examples
    ///
    /// ```
    /// use rangesim::{Plane3, Point3, Vector3};
    /// let plane = Plane3::new(Vector3::z_axis(), -10.0);
    /// let d = plane.ray_distance(&Point3::new(0.0, 0.0, -5.0), &Vector3::new(0.0, 0.0, -1.0));
    /// assert_eq!(d, Some(5.0));
    /// ```
    pub fn ray_distance(&self, origin: &Point3, dir: &Vector3) -> Option<f64> {
        let denom = self.normal.dot(dir);
        if denom.abs() <= 1e-12 {
            return None;
        }

        let t = -self.signed_distance_to_point(origin) / denom;
        if t >= 0.0 { Some(t) } else { None }
    }
}

impl From<(&UnitVec3, &Point3)> for Plane3 {
    fn from((normal, point): (&UnitVec3, &Point3)) -> Self {
        let d = normal.dot(&point.coords);
        Self::new(*normal, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_distance_both_sides() {
        let plane = Plane3::from((&Vector3::x_axis(), &Point3::new(3.0, 0.0, 0.0)));
        let d0 = plane.ray_distance(&Point3::origin(), &Vector3::x());
        let d1 = plane.ray_distance(&Point3::new(5.0, 1.0, 1.0), &-Vector3::x());
        assert_relative_eq!(d0.unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(d1.unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_distance_parallel_and_behind() {
        let plane = Plane3::new(Vector3::y_axis(), 1.0);
        assert!(plane.ray_distance(&Point3::origin(), &Vector3::x()).is_none());
        assert!(plane.ray_distance(&Point3::origin(), &-Vector3::y()).is_none());
    }

    #[test]
    fn test_from_normal_and_point() {
        let plane = Plane3::from((&Vector3::z_axis(), &Point3::new(4.0, -2.0, 1.5)));
        assert_relative_eq!(plane.d, 1.5, epsilon = 1e-12);
        let p = Point3::new(0.0, 0.0, 4.0);
        assert_relative_eq!(plane.signed_distance_to_point(&p), 2.5, epsilon = 1e-12);
    }
}
