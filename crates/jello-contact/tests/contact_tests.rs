//! Integration tests for jello-contact.

use jello_contact::{
    Collider, CollisionResponse, ContactResult, GroundPlane, MovingPlatform, Scene,
    SphereCollider,
};
use jello_types::Dimension;

// ─── Ground Plane Tests ───────────────────────────────────────

#[test]
fn plane_below_height_is_corrected() {
    let plane = GroundPlane::new(0.5);
    let corrected = plane.check_collision(&[0.3, 0.2, -0.1]).unwrap();
    assert_eq!(corrected, vec![0.3, 0.5, -0.1]);
}

#[test]
fn plane_above_height_is_untouched() {
    let plane = GroundPlane::new(0.5);
    assert!(plane.check_collision(&[0.3, 0.7, -0.1]).is_none());
    assert!(plane.check_collision(&[0.3, 0.5]).is_none());
}

#[test]
fn finite_plane_lets_particles_fall_past_the_edge() {
    let plane = GroundPlane::square(0.0, 1.0);
    assert!(plane.check_collision(&[0.5, -0.1, 0.5]).is_some());
    assert!(plane.check_collision(&[1.5, -0.1, 0.0]).is_none());
    assert!(plane.check_collision(&[0.0, -0.1, -1.2]).is_none());
    // 2-D only checks the x axis
    assert!(plane.check_collision(&[0.9, -0.1]).is_some());
}

// ─── Sphere Tests ─────────────────────────────────────────────

#[test]
fn sphere_projects_to_surface() {
    let sphere = SphereCollider::new(vec![0.0, 0.0, 0.0], 1.0);
    let corrected = sphere.check_collision(&[0.0, 0.5, 0.0]).unwrap();
    assert!((corrected[1] - 1.0).abs() < 1e-12);
    assert!(sphere.check_collision(&[0.0, 1.5, 0.0]).is_none());
}

#[test]
fn sphere_center_pushes_up() {
    let sphere = SphereCollider::new(vec![1.0, 1.0], 0.5);
    let corrected = sphere.check_collision(&[1.0, 1.0]).unwrap();
    assert_eq!(corrected, vec![1.0, 1.5]);
}

#[test]
fn sphere_validates_dimension() {
    let sphere = SphereCollider::new(vec![0.0, 0.0], 1.0);
    assert!(sphere.validate(Dimension::Two).is_ok());
    assert!(sphere.validate(Dimension::Three).is_err());
}

// ─── Moving Platform Tests ────────────────────────────────────

#[test]
fn platform_pushes_out_through_nearest_face() {
    let platform = MovingPlatform::new(vec![0.0, 0.0], vec![1.0, 0.2], vec![0.0, 0.0]);
    let corrected = platform.check_collision(&[0.5, 0.15]).unwrap();
    assert_eq!(corrected, vec![0.5, 0.2]);
    assert!(platform.check_collision(&[1.5, 0.1]).is_none());
}

#[test]
fn platform_advances_with_velocity() {
    let mut platform =
        MovingPlatform::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0], vec![2.0, 0.0, 0.0]);
    platform.advance(0.25);
    assert_eq!(platform.min, vec![0.5, 0.0, 0.0]);
    assert_eq!(platform.max, vec![1.5, 1.0, 1.0]);
    assert!(platform.check_collision(&[0.25, 0.5, 0.5]).is_none());
}

#[test]
fn platform_rejects_inverted_corners() {
    let platform = MovingPlatform::new(vec![1.0, 0.0], vec![0.0, 1.0], vec![]);
    assert!(platform.validate(Dimension::Two).is_err());
}

// ─── Scene Tests ──────────────────────────────────────────────

#[test]
fn empty_scene_never_collides() {
    assert!(Scene::Empty.check_collision(&[0.0, -100.0, 0.0]).is_none());
}

#[test]
fn composite_chains_corrections() {
    let scene = Scene::Composite {
        shapes: vec![
            Scene::Sphere(SphereCollider::new(vec![0.0, 0.0], 1.0)),
            Scene::Plane(GroundPlane::new(2.0)),
        ],
    };
    // The sphere moves the point to (0, 1), then the plane lifts it to y = 2
    let corrected = scene.check_collision(&[0.0, 0.5]).unwrap();
    assert_eq!(corrected, vec![0.0, 2.0]);
    assert_eq!(scene.shape_count(), 2);
}

#[test]
fn composite_advance_moves_children() {
    let mut scene = Scene::bulldoze(Dimension::Two);
    scene.advance(1.0);
    if let Scene::Composite { shapes } = &scene {
        match &shapes[1] {
            Scene::MovingPlatform(p) => assert!((p.min[0] + 1.0).abs() < 1e-12),
            other => panic!("unexpected shape {other:?}"),
        }
    } else {
        panic!("bulldoze should be composite");
    }
}

#[test]
fn presets_validate() {
    for dim in [Dimension::Two, Dimension::Three] {
        for name in ["empty", "ground", "plinko", "bulldoze"] {
            let scene = Scene::preset(name, dim).unwrap();
            assert!(scene.validate(dim).is_ok(), "{name} in {dim:?}");
        }
    }
    assert!(Scene::preset("volcano", Dimension::Three).is_none());
    assert_eq!(Scene::plinko(Dimension::Three).shape_count(), 16);
}

#[test]
fn scene_toml_roundtrip() {
    let toml_str = r#"
        type = "composite"

        [[shapes]]
        type = "plane"
        height = 0.0

        [[shapes]]
        type = "sphere"
        center = [0.0, 1.0, 0.0]
        radius = 0.25
    "#;
    let scene: Scene = toml::from_str(toml_str).unwrap();
    assert_eq!(scene.shape_count(), 2);
    let back: Scene = toml::from_str(&toml::to_string(&scene).unwrap()).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn scene_json_tag() {
    let json = serde_json::to_string(&Scene::ground()).unwrap();
    assert!(json.contains("\"type\":\"plane\""));
    let empty: Scene = serde_json::from_str(r#"{"type":"empty"}"#).unwrap();
    assert_eq!(empty, Scene::Empty);
}

// ─── Response Tests ───────────────────────────────────────────

#[test]
fn revert_restores_previous_and_stops() {
    let mut pos = [0.0, -0.1];
    let mut vel = [1.0, -3.0];
    CollisionResponse::Revert.apply(&[0.0, 0.05], &[0.0, 0.0], 0.01, &mut pos, &mut vel);
    assert_eq!(pos, [0.0, 0.05]);
    assert_eq!(vel, [0.0, 0.0]);
}

#[test]
fn project_derives_velocity_from_displacement() {
    let mut pos = [0.0, -0.1];
    let mut vel = [1.0, -3.0];
    CollisionResponse::Project.apply(&[0.0, 0.05], &[0.01, 0.0], 0.01, &mut pos, &mut vel);
    assert_eq!(pos, [0.01, 0.0]);
    assert!((vel[0] - 1.0).abs() < 1e-12);
    assert!((vel[1] + 5.0).abs() < 1e-12);
}

#[test]
fn response_default_is_revert() {
    assert_eq!(CollisionResponse::default(), CollisionResponse::Revert);
    let parsed: CollisionResponse = serde_json::from_str("\"project\"").unwrap();
    assert_eq!(parsed, CollisionResponse::Project);
}

#[test]
fn contact_result_records_depth() {
    let mut result = ContactResult::default();
    result.record(&[0.0, -0.3], &[0.0, 0.0]);
    result.record(&[0.0, -0.1], &[0.0, 0.0]);
    assert_eq!(result.resolved_count, 2);
    assert!((result.max_penetration - 0.3).abs() < 1e-12);
}
