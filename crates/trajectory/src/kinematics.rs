use glam::Vec3;

/// Position of a body launched from `origin` with `velocity` under constant `acceleration`
/// after `t` seconds.
#[inline]
pub fn position_at(origin: Vec3, velocity: Vec3, acceleration: Vec3, t: f32) -> Vec3 {
    origin + velocity * t + 0.5 * t * t * acceleration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let origin = Vec3::new(1., 2., 3.);
        let p = position_at(origin, Vec3::new(4., 5., 6.), Vec3::new(0., -9.81, 0.), 0.);
        assert_eq!(p, origin);
    }

    #[test]
    fn vertical_throw_peaks_and_lands() {
        let velocity = Vec3::new(0., 10., 0.);
        let acceleration = Vec3::new(0., -10., 0.);
        let apex = position_at(Vec3::ZERO, velocity, acceleration, 1.);
        assert!(apex.abs_diff_eq(Vec3::new(0., 5., 0.), 1e-6));
        // Symmetric flight, back on the ground after two seconds
        let landing = position_at(Vec3::ZERO, velocity, acceleration, 2.);
        assert!(landing.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn no_acceleration_is_a_straight_line() {
        let velocity = Vec3::new(3., 0., -4.);
        for i in 0..10 {
            let t = i as f32 * 0.25;
            let p = position_at(Vec3::ZERO, velocity, Vec3::ZERO, t);
            assert!(p.abs_diff_eq(velocity * t, 1e-6));
        }
    }
}
