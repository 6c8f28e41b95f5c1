mod common;

use approx::assert_relative_eq;

use common::{sample_object, ScriptedEngine};
use movobj::ephemeris::angular_separation;
use movobj::{Ephemeris, EphemerisFields};

#[test]
fn test_fov_reference_cases() {
    let eph = Ephemeris::new(54832.5, 10.0, 0.0, 21.0, EphemerisFields::default());
    assert!(eph.is_in_field_of_view(5.0, 0.0, 10.0));
    assert!(!eph.is_in_field_of_view(5.0, 0.0, 3.0));

    let wrapped = Ephemeris::new(54832.5, 359.0, 0.0, 21.0, EphemerisFields::default());
    assert!(wrapped.is_in_field_of_view(1.0, 0.0, 3.0));
    assert_relative_eq!(angular_separation(359.0, 0.0, 1.0, 0.0), 2.0, epsilon = 1e-12);
}

#[test]
fn test_separation_is_symmetric() {
    let pairs = [
        (10.0, 20.0, 30.0, -15.0),
        (359.5, -45.0, 0.5, -44.0),
        (180.0, 0.0, 0.0, 0.0),
    ];
    for (ra1, dec1, ra2, dec2) in pairs {
        assert_relative_eq!(
            angular_separation(ra1, dec1, ra2, dec2),
            angular_separation(ra2, dec2, ra1, dec1),
            epsilon = 1e-12
        );
    }
    assert_relative_eq!(angular_separation(180.0, 0.0, 0.0, 0.0), 180.0, epsilon = 1e-9);
}

#[test]
fn test_fov_on_computed_ephemerides() {
    let mut obj = sample_object();
    // RA column of the scripted engine is (epoch - 54000) mod 360
    obj.calc_ephemeris(&ScriptedEngine::default(), [54359.0, 54361.0])
        .unwrap();

    let first = obj.ephemeris_at(54359.0).unwrap();
    let second = obj.ephemeris_at(54361.0).unwrap();
    assert_eq!(first.ra(), 359.0);
    assert_eq!(second.ra(), 1.0);

    // dec is -10 for row 0 and -9 for row 1
    assert!(first.is_in_field_of_view(0.0, -10.0, 1.5));
    assert!(!second.is_in_field_of_view(0.0, -10.0, 1.0));
    assert!(second.is_in_field_of_view(0.0, -9.5, 1.5));
}
