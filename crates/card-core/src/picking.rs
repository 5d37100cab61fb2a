use crate::state::{euler_quat, Camera, Transform};
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Map canvas pixel coordinates (y down) to normalized device coordinates.
#[inline]
pub fn ndc_from_canvas(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((px / w) * 2.0 - 1.0, 1.0 - (py / h) * 2.0)
}

/// Compute a world-space ray from the camera eye through an NDC point.
pub fn ray_from_ndc(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.view_proj().inverse();
    let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let far = far.truncate() / far.w;
    let origin = camera.position;
    Ray {
        origin,
        direction: (far - origin).normalize_or_zero(),
    }
}

/// Slab test against a box of `half_extents` placed by `transform`.
///
/// Returns the distance along the ray to the first surface hit. A ray that
/// starts inside the box reports where it leaves. Boxes with a collapsed axis
/// are never hit.
pub fn ray_obb(ray: &Ray, transform: &Transform, half_extents: Vec3) -> Option<f32> {
    let extents = half_extents * transform.scale.abs();
    if extents.min_element() <= 0.0 || ray.direction == Vec3::ZERO {
        return None;
    }
    // Move the ray into the box's local (rotated, unscaled) frame.
    let inv_rot = euler_quat(transform.rotation).inverse();
    let origin = inv_rot * (ray.origin - transform.position);
    let dir = inv_rot * ray.direction;

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let e = extents[axis];
        if d.abs() < 1e-8 {
            if o.abs() > e {
                return None;
            }
            continue;
        }
        let inv_d = 1.0 / d;
        let mut t0 = (-e - o) * inv_d;
        let mut t1 = (e - o) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}
