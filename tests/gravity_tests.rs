use approx::assert_relative_eq;
use locomotion_engine::gravity::{GravityField, GravitySource, RadialWell, SourceId};
use locomotion_engine::math::Vector3;
use rand::{Rng, SeedableRng};

fn well() -> RadialWell {
    RadialWell::new(Vector3::zero(), 9.81, 1.0, 5.0, 10.0, 15.0)
}

#[test]
fn aggregation_is_linear() {
    let uniform = GravitySource::Uniform(Vector3::new(0.0, -9.81, 0.0));
    let radial = GravitySource::RadialWell(well());

    let mut both = GravityField::new();
    both.register(SourceId(0), uniform);
    both.register(SourceId(1), radial);

    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let p = Vector3::new(
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
        );
        let expected = uniform.get_gravity(p) + radial.get_gravity(p);
        let combined = both.get_gravity(p);
        assert_relative_eq!(combined.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(combined.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(combined.z, expected.z, epsilon = 1e-5);
    }
}

#[test]
fn radial_well_band_structure() {
    let well = well();

    // Zero outside the falloff radii.
    assert!(well.get_gravity(Vector3::new(16.0, 0.0, 0.0)).is_zero());
    assert!(well.get_gravity(Vector3::new(0.5, 0.0, 0.0)).is_zero());

    // Full strength inside [inner, outer], pointing toward the center.
    let g = well.get_gravity(Vector3::new(7.0, 0.0, 0.0));
    assert_relative_eq!(g.length(), 9.81, epsilon = 1e-4);
    assert!(g.x < 0.0);

    // Tapered in the falloff bands.
    let outer_band = well.get_gravity(Vector3::new(12.5, 0.0, 0.0));
    assert_relative_eq!(outer_band.length(), 9.81 * 0.5, epsilon = 1e-3);
    let inner_band = well.get_gravity(Vector3::new(3.0, 0.0, 0.0));
    assert_relative_eq!(inner_band.length(), 9.81 * 0.5, epsilon = 1e-3);
}

#[test]
fn radial_well_is_continuous_at_radii() {
    let well = well();
    for boundary in [1.0f32, 5.0, 10.0, 15.0] {
        let inside = well.get_gravity(Vector3::new(boundary - 1e-3, 0.0, 0.0));
        let outside = well.get_gravity(Vector3::new(boundary + 1e-3, 0.0, 0.0));
        assert_relative_eq!(inside.length(), outside.length(), epsilon = 0.05);
    }
}

#[test]
fn radial_well_magnitude_is_monotone_outside_plateau() {
    let well = well();
    let mut previous = f32::INFINITY;
    let mut d = 10.0;
    while d <= 16.0 {
        let magnitude = well.get_gravity(Vector3::new(d, 0.0, 0.0)).length();
        assert!(magnitude <= previous + 1e-5);
        previous = magnitude;
        d += 0.25;
    }
}

#[test]
fn radial_well_repairs_radius_ordering() {
    // Radii supplied out of order are clamped into a valid chain.
    let well = RadialWell::new(Vector3::zero(), 9.81, 4.0, 2.0, 1.0, 0.5);
    let (inner_falloff, inner, outer, outer_falloff) = well.radii();
    assert!(0.0 <= inner_falloff);
    assert!(inner_falloff <= inner);
    assert!(inner <= outer);
    assert!(outer <= outer_falloff);
}

#[test]
fn up_axis_opposes_gravity() {
    let mut field = GravityField::new();
    field.register(SourceId(7), GravitySource::Uniform(Vector3::new(3.0, -4.0, 0.0)));

    let (g, up) = field.get_gravity_and_up(Vector3::zero(), Vector3::unit_y());
    assert_relative_eq!(up.length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(up.dot(&g.normalize()), -1.0, epsilon = 1e-5);
}

#[test]
fn zero_field_keeps_fallback_up() {
    let field = GravityField::new();
    let fallback = Vector3::new(0.0, 0.0, 1.0);
    let (g, up) = field.get_gravity_and_up(Vector3::zero(), fallback);
    assert!(g.is_zero());
    assert_eq!(up, fallback);

    // Opposing sources that cancel exactly also fall back.
    let mut cancelled = GravityField::new();
    cancelled.register(SourceId(0), GravitySource::Uniform(Vector3::new(0.0, -5.0, 0.0)));
    cancelled.register(SourceId(1), GravitySource::Uniform(Vector3::new(0.0, 5.0, 0.0)));
    let up = cancelled.get_up_axis(Vector3::zero(), fallback);
    assert_eq!(up, fallback);
}

#[test]
fn unregister_returns_the_source() {
    let mut field = GravityField::new();
    field.register(SourceId(1), GravitySource::earth());
    field.register(SourceId(2), GravitySource::RadialWell(well()));
    assert_eq!(field.len(), 2);

    let removed = field.unregister(SourceId(1));
    assert_eq!(removed, GravitySource::earth());
    assert_eq!(field.len(), 1);

    field.clear();
    assert!(field.is_empty());
}

#[test]
#[should_panic(expected = "duplicate registration")]
fn duplicate_registration_panics() {
    let mut field = GravityField::new();
    field.register(SourceId(3), GravitySource::earth());
    field.register(SourceId(3), GravitySource::earth());
}

#[test]
#[should_panic(expected = "unknown gravity source")]
fn unknown_unregistration_panics() {
    let mut field = GravityField::new();
    field.unregister(SourceId(9));
}
