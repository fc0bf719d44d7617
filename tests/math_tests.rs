use approx::assert_relative_eq;
use locomotion_engine::math::{Quaternion, Ray, Transform, Vector3};
use std::f32::consts::PI;

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);
    assert_eq!(sum.z, 9.0);

    let dot = v1.dot(&v2);
    assert_eq!(dot, 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0);

    let cross = v1.cross(&v2);
    assert_eq!(cross.x, v1.y * v2.z - v1.z * v2.y);
    assert_eq!(cross.y, v1.z * v2.x - v1.x * v2.z);
    assert_eq!(cross.z, v1.x * v2.y - v1.y * v2.x);

    let length = v1.length();
    assert_relative_eq!(length, (1.0f32 + 4.0 + 9.0).sqrt());

    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v1.x / length);
}

#[test]
fn test_clamp_magnitude() {
    let v = Vector3::new(3.0, 4.0, 0.0);
    let clamped = v.clamp_magnitude(1.0);
    assert_relative_eq!(clamped.length(), 1.0);
    assert_relative_eq!(clamped.x, 0.6);
    assert_relative_eq!(clamped.y, 0.8);

    // Shorter vectors pass through untouched.
    let short = Vector3::new(0.1, 0.2, 0.0);
    assert_eq!(short.clamp_magnitude(1.0), short);
}

#[test]
fn test_project_direction_on_plane() {
    let forward = Vector3::unit_z();
    let slope_normal = Vector3::new(0.0, 1.0, 1.0).normalize();

    let projected = forward.project_direction_on_plane(&slope_normal);
    assert_relative_eq!(projected.length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(projected.dot(&slope_normal), 0.0, epsilon = 1e-5);

    // Direction parallel to the normal has no tangent component.
    let up = Vector3::unit_y();
    let degenerate = up.project_direction_on_plane(&Vector3::unit_y());
    assert!(degenerate.is_zero());
}

#[test]
fn test_quaternion_rotation() {
    let q = Quaternion::from_axis_angle(Vector3::unit_y(), PI / 2.0);
    let rotated = q.rotate_vector(Vector3::unit_x());

    assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-5);

    // Inverse rotation brings the vector back.
    let restored = q.inverse().rotate_vector(rotated);
    assert_relative_eq!(restored.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(restored.z, 0.0, epsilon = 1e-5);
}

#[test]
fn test_transform_point_round_trip() {
    let transform = Transform::new(
        Vector3::new(5.0, -2.0, 1.0),
        Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.7),
    );

    let local = Vector3::new(0.5, 1.5, -0.25);
    let world = transform.transform_point(local);
    let back = transform.inverse_transform_point(world);

    assert_relative_eq!(back.x, local.x, epsilon = 1e-5);
    assert_relative_eq!(back.y, local.y, epsilon = 1e-5);
    assert_relative_eq!(back.z, local.z, epsilon = 1e-5);
}

#[test]
fn test_ray_point_at() {
    let ray = Ray::new_normalized(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
    let point = ray.point_at(3.0);
    assert_relative_eq!(point.x, 1.0);
    assert_relative_eq!(point.y, 3.0);
}
