use super::scene_graph::WorldBounds;
use bevy::prelude::*;

/// Ray from the camera through a normalised device coordinate.
///
/// `world_from_clip` is the camera's world transform times the inverse
/// projection. Works for reverse-Z perspective as well as orthographic.
pub fn ray_from_ndc(ndc: Vec2, world_from_clip: Mat4) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(0.5));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Distance along the ray to the bounds, or None on a miss.
pub fn ray_hits_bounds(ray: &Ray3d, bounds: &WorldBounds) -> Option<f32> {
    ray_aabb_hit_t(ray.origin, ray.direction.as_vec3(), bounds.min, bounds.max)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for axis in 0..3 {
        let (origin, inv_d) = (ray_origin[axis], inv[axis]);
        if inv_d.is_infinite() {
            // Parallel to the slab: must already be inside it.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((min[axis] - origin) * inv_d, (max[axis] - origin) * inv_d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_box_in_front() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn misses_box_behind() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, None);
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let t = ray_aabb_hit_t(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, None);
    }

    #[test]
    fn center_ndc_looks_down_camera_forward() {
        let view = Transform::from_xyz(0.0, 0.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_infinite_reverse_rh(1.0, 1.0, 0.1);
        let world_from_clip = view.compute_matrix() * projection.inverse();

        let ray = ray_from_ndc(Vec2::ZERO, world_from_clip).unwrap();
        assert!(ray.direction.as_vec3().abs_diff_eq(Vec3::NEG_Z, 1e-4));
        assert!((ray.origin.z - 4.9).abs() < 1e-3);
    }
}
