use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::collisions::detection::{CollisionGroup, ContactGraph, detect_contacts};
use crate::collisions::resolution::*;
use crate::state::SystemState;

fn pair() -> (Body, Body) {
    let a = Body::new(1.0, 0.5, [1.0, 0.0], [0.0, 5.0]);
    let b = Body::new(2.0, 0.5, [1.6, 0.0], [0.0, 3.0]);
    (a, b)
}

#[test]
fn test_merge_bodies_mass_conservation() {
    let (a, b) = pair();

    let merged = merge_bodies(&[a, b]);

    assert_relative_eq!(merged.mass, 3.0);
}

#[test]
fn test_merge_bodies_momentum_conservation() {
    let (a, b) = pair();
    let p_initial = a.momentum() + b.momentum();

    let merged = merge_bodies(&[a, b]);
    let p_final = merged.momentum();

    assert_relative_eq!(p_final.x, p_initial.x, epsilon = 1e-12);
    assert_relative_eq!(p_final.y, p_initial.y, epsilon = 1e-12);
}

#[test]
fn test_merge_bodies_center_of_mass() {
    let a = Body::new(1.0, 0.01, [1.0, 0.0], [0.0, 5.0]);
    let b = Body::new(1.0, 0.01, [2.0, 0.0], [0.0, 3.0]);

    let merged = merge_bodies(&[a, b]);

    // Equal masses: COM at the midpoint
    assert_relative_eq!(merged.position.x, 1.5);
    assert_relative_eq!(merged.position.y, 0.0);
}

#[test]
fn test_merge_bodies_volume_conservation() {
    let a = Body::new(1.0, 3.0, [0.0, 0.0], [0.0, 0.0]);
    let b = Body::new(1.0, 4.0, [1.0, 0.0], [0.0, 0.0]);
    let c = Body::new(1.0, 5.0, [2.0, 0.0], [0.0, 0.0]);

    let merged = merge_bodies(&[a, b, c]);

    // 27 + 64 + 125 = 216 = 6³
    assert_relative_eq!(merged.radius, 6.0, epsilon = 1e-12);
}

#[test]
fn test_merge_keeps_first_id() {
    let mut a = Body::new(1.0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = Body::new(5.0, 1.0, [1.0, 0.0], [0.0, 0.0]);
    a.id = BodyId(3);
    b.id = BodyId(9);

    // The heavier body does not take over the identity
    assert_eq!(merge_bodies(&[a, b]).id, BodyId(3));
    assert_eq!(merge_bodies(&[b, a]).id, BodyId(9));
}

#[test]
fn test_merge_three_bodies() {
    let bodies = [
        Body::new(1.0, 1.0, [0.0, 0.0], [1.0, 0.0]),
        Body::new(2.0, 1.0, [1.0, 0.0], [0.0, 2.0]),
        Body::new(3.0, 1.0, [0.0, 1.0], [-1.0, -1.0]),
    ];

    let merged = merge_bodies(&bodies);

    assert_relative_eq!(merged.mass, 6.0);
    // (1·(1,0) + 2·(0,2) + 3·(-1,-1)) / 6
    assert_relative_eq!(merged.velocity.x, -2.0 / 6.0);
    assert_relative_eq!(merged.velocity.y, 1.0 / 6.0);
    // (1·(0,0) + 2·(1,0) + 3·(0,1)) / 6
    assert_relative_eq!(merged.position.x, 2.0 / 6.0);
    assert_relative_eq!(merged.position.y, 3.0 / 6.0);
}

#[test]
#[should_panic(expected = "non-positive total mass")]
fn test_merge_rejects_massless_group() {
    let a = Body::new(0.0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let b = Body::new(0.0, 1.0, [1.0, 0.0], [0.0, 0.0]);

    merge_bodies(&[a, b]);
}

#[test]
fn test_resolve_single_collision() {
    let mut system = SystemState::new();
    let id_a = system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
    let id_b = system.add_body(1.0, 1.0, Point2::new(1.0, 0.0), Vector2::new(-1.0, 0.0));

    let mut contacts = detect_contacts(&system.bodies);
    let events = resolve_collisions(&mut system, &contacts.groups());

    assert_eq!(system.body_count(), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].survivor, id_a);
    assert_eq!(events[0].absorbed, vec![id_b]);

    let survivor = system.get_body(id_a).unwrap();
    assert_relative_eq!(survivor.mass, 2.0);
    assert_relative_eq!(survivor.velocity.magnitude(), 0.0);
    assert_relative_eq!(survivor.position.x, 0.5);
}

#[test]
fn test_resolve_keeps_bystanders_in_order() {
    let mut system = SystemState::new();
    let far_a = system.add_body(1.0, 1.0, Point2::new(-100.0, 0.0), Vector2::zeros());
    let hit_a = system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros());
    let far_b = system.add_body(1.0, 1.0, Point2::new(100.0, 0.0), Vector2::zeros());
    let hit_b = system.add_body(1.0, 1.0, Point2::new(0.5, 0.0), Vector2::zeros());

    let mut contacts = detect_contacts(&system.bodies);
    resolve_collisions(&mut system, &contacts.groups());

    let order: Vec<BodyId> = system.bodies.iter().map(|b| b.id).collect();
    assert_eq!(order, vec![far_a, hit_a, far_b]);
    assert!(system.get_body(hit_b).is_none());
}

#[test]
fn test_resolve_multiple_groups() {
    let mut system = SystemState::new();
    system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros());
    system.add_body(2.0, 1.0, Point2::new(1.0, 0.0), Vector2::zeros());
    system.add_body(3.0, 1.0, Point2::new(50.0, 0.0), Vector2::zeros());
    system.add_body(4.0, 1.0, Point2::new(51.0, 0.0), Vector2::zeros());
    let initial_mass = system.total_mass();

    let mut contacts = detect_contacts(&system.bodies);
    let events = resolve_collisions(&mut system, &contacts.groups());

    assert_eq!(events.len(), 2);
    assert_eq!(system.body_count(), 2);
    assert_relative_eq!(system.total_mass(), initial_mass);
    assert_relative_eq!(system.bodies[0].mass, 3.0);
    assert_relative_eq!(system.bodies[1].mass, 7.0);
}

#[test]
fn test_resolve_transitive_chain() {
    let mut system = SystemState::new();
    system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(0.0, 1.0));
    system.add_body(1.0, 1.0, Point2::new(1.9, 0.0), Vector2::new(0.0, 2.0));
    system.add_body(1.0, 1.0, Point2::new(3.8, 0.0), Vector2::new(0.0, 3.0));

    let mut contacts = detect_contacts(&system.bodies);
    let events = resolve_collisions(&mut system, &contacts.groups());

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].absorbed.len(), 2);
    assert_eq!(system.body_count(), 1);
    assert_relative_eq!(system.bodies[0].velocity.y, 2.0);
    assert_relative_eq!(system.bodies[0].position.x, 1.9, epsilon = 1e-12);
}

#[test]
fn test_resolve_without_groups_is_noop() {
    let mut system = SystemState::new();
    system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros());

    let events = resolve_collisions(&mut system, &[]);

    assert!(events.is_empty());
    assert_eq!(system.body_count(), 1);
}

#[test]
fn test_resolve_ignores_singleton_groups() {
    let mut system = SystemState::new();
    system.add_body(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros());

    let events = resolve_collisions(&mut system, &[CollisionGroup { members: vec![0] }]);

    assert!(events.is_empty());
    assert_eq!(system.body_count(), 1);
}

#[test]
fn test_merge_event_matches_survivor() {
    let mut system = SystemState::new();
    system.add_body(2.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 1.0));
    system.add_body(2.0, 1.0, Point2::new(1.0, 1.0), Vector2::new(-1.0, 1.0));
    let mut contacts = ContactGraph::new(2);
    contacts.record(0, 1);

    let events = resolve_collisions(&mut system, &contacts.groups());

    let survivor = &system.bodies[0];
    assert_eq!(events[0].mass, survivor.mass);
    assert_eq!(events[0].radius, survivor.radius);
    assert_eq!(events[0].position, survivor.position);
    assert_eq!(events[0].velocity, survivor.velocity);
}
