//! Integration tests for the ambient network.
//!
//! These drive the public API end to end: mounting through a host, single
//! stepping the frame loop, and inspecting what reached the surface.

use glyphnet::prelude::*;
use glyphnet::{link_alpha, DrawCommand};

// ============================================================================
// Helpers
// ============================================================================

/// A document with one container of a fixed size.
struct FakeDocument {
    container_id: &'static str,
    size: Vec2,
}

impl SurfaceHost for FakeDocument {
    type Surface = RecordingSurface;

    fn container_size(&self, container_id: &str) -> Option<Vec2> {
        (container_id == self.container_id).then_some(self.size)
    }

    fn create_surface(&mut self, _: &str, size: Vec2) -> Result<RecordingSurface, NetworkError> {
        Ok(RecordingSurface::new(size))
    }
}

fn document(w: f32, h: f32) -> FakeDocument {
    FakeDocument {
        container_id: DEFAULT_CONTAINER_ID,
        size: Vec2::new(w, h),
    }
}

fn mobile(position: Vec2, velocity: Vec2) -> Node {
    Node {
        position,
        velocity,
        glyph: "φ".into(),
        color: Color::BLACK,
        opacity: 0.6,
        font_size: 16.0,
        role: NodeRole::Mobile,
    }
}

fn in_bounds(node: &Node, size: Vec2) -> bool {
    (0.0..=size.x).contains(&node.position.x) && (0.0..=size.y).contains(&node.position.y)
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_mobile_nodes_stay_in_bounds() {
    let size = Vec2::new(640.0, 360.0);
    let config = NetworkConfig::default().with_node_count(60).with_speed(7.5);
    let mut network = AmbientNetwork::new(RecordingSurface::new(size), config, &mut seeded(2024));

    for _ in 0..2_000 {
        network.frame();
        network.surface_mut().take();
        assert!(network.nodes().iter().all(|n| in_bounds(n, size)));
    }
}

#[test]
fn test_node_count_never_changes() {
    let mut frames = mount(
        &mut document(800.0, 400.0),
        DEFAULT_CONTAINER_ID,
        NetworkConfig::default().with_node_count(45),
        ManualScheduler::new(),
        &mut seeded(1),
    )
    .expect("container exists");

    assert_eq!(frames.network().nodes().len(), 46);
    for i in 0..100 {
        frames.step(f64::from(i) * 16.0);
        if i == 50 {
            frames.on_resize(Vec2::new(300.0, 900.0));
        }
    }
    assert_eq!(frames.network().nodes().len(), 46);
}

#[test]
fn test_anchor_tracks_center_through_resizes() {
    let mut frames = mount(
        &mut document(800.0, 400.0),
        DEFAULT_CONTAINER_ID,
        NetworkConfig::default().with_node_count(10),
        ManualScheduler::new(),
        &mut seeded(3),
    )
    .expect("container exists");

    let sizes = [
        Vec2::new(1024.0, 768.0),
        Vec2::new(375.0, 812.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1920.0, 400.0),
    ];
    for (i, size) in sizes.into_iter().enumerate() {
        frames.step(i as f64 * 16.0);
        assert_eq!(frames.network().anchor().unwrap().position, frames.network().center());

        frames.on_resize(size);
        assert_eq!(frames.network().anchor().unwrap().position, size * 0.5);
    }
}

#[test]
fn test_velocity_flips_only_on_contact() {
    let size = Vec2::new(200.0, 100.0);
    let nodes = vec![
        mobile(Vec2::new(100.0, 50.0), Vec2::new(3.0, -2.0)),
        mobile(Vec2::new(1.0, 99.0), Vec2::new(-1.0, 1.0)),
        mobile(Vec2::new(199.0, 2.0), Vec2::new(0.5, -1.0)),
    ];
    let mut network = AmbientNetwork::from_nodes(
        RecordingSurface::new(size),
        NetworkConfig::default().without_anchor(),
        nodes,
    );

    for _ in 0..500 {
        let before: Vec<(Vec2, Vec2)> = network.nodes().iter().map(|n| (n.position, n.velocity)).collect();
        network.update();
        for (node, (pos, vel)) in network.nodes().iter().zip(before) {
            let unclamped = pos + vel;
            let hit_x = unclamped.x <= 0.0 || unclamped.x >= size.x;
            let hit_y = unclamped.y <= 0.0 || unclamped.y >= size.y;
            assert_eq!(node.velocity.x == -vel.x, hit_x, "x axis at {unclamped:?}");
            assert_eq!(node.velocity.y == -vel.y, hit_y, "y axis at {unclamped:?}");
        }
    }
}

#[test]
fn test_link_alpha_monotonic_in_distance() {
    let threshold = 150.0;
    let mut previous = None;
    for step in 0..150 {
        let d = step as f32;
        let nodes = vec![mobile(Vec2::ZERO, Vec2::ZERO), mobile(Vec2::new(d, 0.0), Vec2::ZERO)];
        let network = AmbientNetwork::from_nodes(
            RecordingSurface::new(Vec2::new(400.0, 400.0)),
            NetworkConfig::default().with_link_threshold(threshold).without_anchor(),
            nodes,
        );
        let links: Vec<_> = network.links().collect();
        assert_eq!(links.len(), 1, "distance {d} is under the threshold");
        if let Some(prev) = previous {
            assert!(links[0].alpha < prev);
        }
        previous = Some(links[0].alpha);
    }

    assert!(link_alpha(threshold, threshold, 1.0).is_none());
    assert!(link_alpha(threshold + 1.0, threshold, 1.0).is_none());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_left_wall_bounce() {
    let mut network = AmbientNetwork::from_nodes(
        RecordingSurface::new(Vec2::new(800.0, 400.0)),
        NetworkConfig::default().without_anchor(),
        vec![mobile(Vec2::new(0.0, 200.0), Vec2::new(-1.0, 0.0))],
    );
    network.update();

    let node = &network.nodes()[0];
    assert_eq!(node.velocity, Vec2::new(1.0, 0.0));
    assert_eq!(node.position, Vec2::new(0.0, 200.0));
}

#[test]
fn test_scenario_single_link_alpha() {
    let config = NetworkConfig::default().with_link_threshold(150.0).without_anchor();
    let weight = config.links.weight;
    let mut network = AmbientNetwork::from_nodes(
        RecordingSurface::new(Vec2::new(800.0, 400.0)),
        config,
        vec![
            mobile(Vec2::new(0.0, 0.0), Vec2::ZERO),
            mobile(Vec2::new(100.0, 0.0), Vec2::ZERO),
        ],
    );
    network.render();

    let lines: Vec<_> = network.surface().lines().collect();
    assert_eq!(lines.len(), 1);
    let (from, to, stroke) = lines[0];
    assert_eq!((from, to), (Vec2::ZERO, Vec2::new(100.0, 0.0)));
    let expected = (1.0 - 100.0 / 150.0) * weight;
    assert!((stroke.alpha - expected).abs() < 1e-6);
}

#[test]
fn test_scenario_missing_container() {
    let mut doc = document(800.0, 400.0);
    let mut scheduler = ManualScheduler::new();

    let mounted = mount(
        &mut doc,
        "does-not-exist",
        NetworkConfig::default(),
        &mut scheduler,
        &mut seeded(0),
    );

    assert!(mounted.is_none());
    assert_eq!(scheduler.requests(), 0);
    assert!(!scheduler.is_pending());
}

#[test]
fn test_scenario_zero_sized_container_keeps_running() {
    let mut frames = mount(
        &mut document(0.0, 0.0),
        DEFAULT_CONTAINER_ID,
        NetworkConfig::default(),
        ManualScheduler::new(),
        &mut seeded(5),
    )
    .expect("zero-sized containers still mount");

    for i in 0..30 {
        assert!(frames.step(f64::from(i) * 16.0));
    }
    assert!(frames.scheduler().is_pending());
    assert!(frames
        .network()
        .nodes()
        .iter()
        .all(|n| n.position == Vec2::ZERO));
}

#[test]
fn test_frame_paints_every_node_twice() {
    let mut frames = mount(
        &mut document(500.0, 300.0),
        DEFAULT_CONTAINER_ID,
        NetworkConfig::default().with_node_count(20),
        ManualScheduler::new(),
        &mut seeded(8),
    )
    .expect("container exists");

    frames.step(0.0);
    let surface = frames.network().surface();
    assert_eq!(surface.glyph_count(), 2 * 21);
    assert!(matches!(surface.commands()[0], DrawCommand::Clear(_)));
}

#[test]
fn test_same_seed_same_layout() {
    let build = || {
        AmbientNetwork::new(
            RecordingSurface::new(Vec2::new(800.0, 400.0)),
            NetworkConfig::default(),
            &mut seeded(77),
        )
    };
    assert_eq!(build().nodes(), build().nodes());
}
