use approx::assert_relative_eq;
use locomotion_engine::contact::{ClassifierParams, ContactClassifier, ContactSample, SurfaceMask};
use locomotion_engine::math::Vector3;

fn params() -> ClassifierParams {
    ClassifierParams::from_angles(
        25.0,
        50.0,
        140.0,
        SurfaceMask::STAIRS,
        SurfaceMask::CLIMBABLE,
    )
}

fn sample(normal: Vector3, surface: SurfaceMask) -> ContactSample {
    ContactSample {
        normal: normal.normalize(),
        surface,
        body: None,
    }
}

#[test]
fn thresholds_encode_angles_as_cosines() {
    let params = params();
    assert_relative_eq!(params.min_ground_dot, 25.0f32.to_radians().cos(), epsilon = 1e-5);
    assert_relative_eq!(params.min_stairs_dot, 50.0f32.to_radians().cos(), epsilon = 1e-5);
    assert_relative_eq!(params.min_climb_dot, 140.0f32.to_radians().cos(), epsilon = 1e-5);
}

#[test]
fn flat_contact_lands_in_ground_bucket() {
    let mut classifier = ContactClassifier::new(params());
    classifier.classify(
        &sample(Vector3::unit_y(), SurfaceMask::GROUND),
        Vector3::unit_y(),
        false,
    );
    assert_eq!(classifier.buckets.ground_count, 1);
    assert_eq!(classifier.buckets.steep_count, 0);
    assert_relative_eq!(classifier.buckets.ground_normal.y, 1.0);
}

#[test]
fn stairs_use_the_laxer_threshold() {
    // A 40 degree slope: too steep for ground (25), fine for stairs (50).
    let normal = Vector3::new(40.0f32.to_radians().sin(), 40.0f32.to_radians().cos(), 0.0);

    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(normal, SurfaceMask::GROUND), Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.ground_count, 0);
    assert_eq!(classifier.buckets.steep_count, 1);

    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(normal, SurfaceMask::STAIRS), Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.ground_count, 1);
    assert_eq!(classifier.buckets.steep_count, 0);
}

#[test]
fn near_vertical_wall_is_steep_not_ceiling() {
    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(Vector3::unit_x(), SurfaceMask::GROUND), Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.steep_count, 1);

    // A ceiling points against the up axis and lands nowhere.
    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(-Vector3::unit_y(), SurfaceMask::GROUND), Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.ground_count, 0);
    assert_eq!(classifier.buckets.steep_count, 0);
    assert_eq!(classifier.buckets.climb_count, 0);
}

#[test]
fn climb_bucket_requires_desire_and_surface() {
    let wall = sample(Vector3::unit_x(), SurfaceMask::CLIMBABLE);

    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&wall, Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.climb_count, 0);

    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&wall, Vector3::unit_y(), true);
    assert_eq!(classifier.buckets.climb_count, 1);
    assert_eq!(classifier.buckets.steep_count, 1);
    assert_eq!(classifier.buckets.last_climb_normal, wall.normal);

    // Same geometry without the climbable flag stays steep only.
    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(Vector3::unit_x(), SurfaceMask::GROUND), Vector3::unit_y(), true);
    assert_eq!(classifier.buckets.climb_count, 0);
}

#[test]
fn overhang_within_climb_angle_is_grabbable() {
    // 130 degrees from up: past vertical but inside the 140 degree limit.
    let angle = 130.0f32.to_radians();
    let normal = Vector3::new(angle.sin(), angle.cos(), 0.0);

    let mut classifier = ContactClassifier::new(params());
    classifier.classify(&sample(normal, SurfaceMask::CLIMBABLE), Vector3::unit_y(), true);
    assert_eq!(classifier.buckets.climb_count, 1);
    // Too overhung to be steep, so it skipped that bucket.
    assert_eq!(classifier.buckets.steep_count, 0);
}

#[test]
fn classification_is_pure() {
    let up = Vector3::new(0.2, 1.0, -0.3).normalize();
    let contact = sample(Vector3::new(0.3, 0.9, 0.1), SurfaceMask::GROUND | SurfaceMask::CLIMBABLE);

    let mut a = ContactClassifier::new(params());
    let mut b = ContactClassifier::new(params());
    for _ in 0..3 {
        a.classify(&contact, up, true);
        b.classify(&contact, up, true);
    }
    assert_eq!(a.buckets.ground_count, b.buckets.ground_count);
    assert_eq!(a.buckets.steep_count, b.buckets.steep_count);
    assert_eq!(a.buckets.climb_count, b.buckets.climb_count);
    assert_eq!(a.buckets.ground_normal, b.buckets.ground_normal);
}

#[test]
fn ground_candidate_outranks_steep_candidate() {
    use locomotion_engine::scene::BodyHandle;

    let mut classifier = ContactClassifier::new(params());
    let mut wall = sample(Vector3::unit_x(), SurfaceMask::GROUND);
    wall.body = Some(BodyHandle(1));
    let mut floor = sample(Vector3::unit_y(), SurfaceMask::GROUND);
    floor.body = Some(BodyHandle(2));

    classifier.classify(&floor, Vector3::unit_y(), false);
    classifier.classify(&wall, Vector3::unit_y(), false);
    assert_eq!(classifier.buckets.connected_body, Some(BodyHandle(2)));
}

#[test]
fn clear_resets_accumulators() {
    let mut classifier = ContactClassifier::new(params());
    classifier.classify(
        &sample(Vector3::unit_y(), SurfaceMask::GROUND),
        Vector3::unit_y(),
        false,
    );
    classifier.clear();
    assert_eq!(classifier.buckets.ground_count, 0);
    assert!(classifier.buckets.ground_normal.is_zero());
    assert_eq!(classifier.buckets.connected_body, None);
}
