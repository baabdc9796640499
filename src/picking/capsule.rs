use glam::Vec3;

/// Distance along a ray to where it enters a capsule.
///
/// The capsule is the set of points within `radius` of segment `a`-`b`.
/// `dir` need not be unit length: the result is in multiples of `dir`, so a
/// ray transformed into a volume's local space keeps its world-space
/// distances. A ray that starts inside the capsule does not hit it.
#[must_use]
pub fn ray_capsule(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    radius: f32,
) -> Option<f32> {
    // Intersect with a unit direction and rescale at the end, so the
    // tolerances below do not depend on how much `dir` was shrunk.
    let len = dir.length();
    if !len.is_finite() || len <= 0.0 || radius <= 0.0 {
        return None;
    }
    let unit = dir / len;
    if distance_to_segment(origin, a, b) <= radius {
        return None;
    }

    let body = ray_cylinder_body(origin, unit, a, b, radius);
    let cap_a = ray_sphere(origin, unit, a, radius);
    let cap_b = ray_sphere(origin, unit, b, radius);

    // From outside, the entry point of a union of convex pieces is the
    // earliest entry of any piece.
    [body, cap_a, cap_b]
        .into_iter()
        .flatten()
        .filter(|t| *t >= 0.0)
        .min_by(f32::total_cmp)
        .map(|t| t / len)
}

/// Entry through the curved side of the finite cylinder `a`-`b`. `dir` is
/// unit length.
fn ray_cylinder_body(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    radius: f32,
) -> Option<f32> {
    let ba = b - a;
    let oa = origin - a;
    let baba = ba.dot(ba);
    let bard = ba.dot(dir);
    let baoa = ba.dot(oa);

    let k2 = baba - bard * bard;
    if k2.abs() <= f32::EPSILON * baba {
        // Parallel to the axis (or no axis): only the caps can be hit.
        return None;
    }
    let k1 = baba * dir.dot(oa) - baoa * bard;
    let k0 = baba * oa.dot(oa) - baoa * baoa - radius * radius * baba;

    let h = k1 * k1 - k2 * k0;
    if h < 0.0 {
        return None;
    }
    let t = (-k1 - h.sqrt()) / k2;
    let y = baoa + t * bard;
    (0.0..=baba).contains(&y).then_some(t)
}

/// Near intersection with a sphere along a unit direction.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let qb = dir.dot(oc);
    let qc = oc.dot(oc) - radius * radius;
    let h = qb * qb - qc;
    if h < 0.0 {
        return None;
    }
    Some(-qb - h.sqrt())
}

fn distance_to_segment(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}
