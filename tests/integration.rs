//! Integration tests for relative-length.
//!
//! These tests exercise the public API from outside the crate: parsing
//! expressions from text, attaching them through an engine, and verifying
//! what a host receives as its control tree changes shape and size.

use relative_length::testing::TestHost;
use relative_length::{
    Engine, Length, LengthUnits, Property, PropertyValue, RelativeSize, Thickness,
};

// ---------------------------------------------------------------------------
// Parse and evaluate without an engine
// ---------------------------------------------------------------------------

#[test]
fn test_parse_evaluate_pixels() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let child = host.insert_child(root, 600.0, 400.0);

    let length: Length = "20pw+40ph".parse().expect("parses");
    assert_eq!(length.evaluate(&host, child), Ok(288.0 + 360.0));
}

#[test]
fn test_expressions_survive_a_display_round_trip() {
    let parsed: Length = "20pw + 40ph - 10px".parse().expect("parses");
    let reparsed: Length = parsed.to_string().parse().expect("reparses");
    assert_eq!(parsed, reparsed);
}

#[test]
fn test_size_constrained_by_another_size() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let child = host.insert_child(root, 600.0, 400.0);

    let size = RelativeSize::new(80.pw(), 90.ph());
    let constraint = RelativeSize::new(1000.px(), 600.px());
    let constrained = size
        .constrain(constraint, &host, child)
        .expect("evaluates");

    // 80pw is 1152 against the 1000px cap; 90ph is 810 against 600px.
    // The smaller length wins on both axes.
    assert_eq!(constrained.width.evaluate(&host, child), Ok(1000.0));
    assert_eq!(constrained.height.evaluate(&host, child), Ok(600.0));
}

// ---------------------------------------------------------------------------
// Live width binding
// ---------------------------------------------------------------------------

#[test]
fn test_width_follows_parent_resizes() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let panel = host.insert_child(root, 600.0, 400.0);
    let mut engine: Engine<TestHost> = Engine::new();

    engine
        .attach_str(&mut host, panel, Property::Width, "50pw")
        .expect("attaches");
    assert_eq!(
        host.last_push(panel, Property::Width),
        Some(PropertyValue::Pixels(720.0))
    );

    host.set_bounds(root, 1000.0, 900.0);
    engine.source_changed(&mut host, root);
    assert_eq!(
        host.last_push(panel, Property::Width),
        Some(PropertyValue::Pixels(500.0))
    );

    host.set_bounds(root, 2000.0, 900.0);
    engine.source_changed(&mut host, root);
    assert_eq!(
        host.pushes_for(panel, Property::Width),
        vec![
            PropertyValue::Pixels(720.0),
            PropertyValue::Pixels(500.0),
            PropertyValue::Pixels(1000.0),
        ]
    );
}

#[test]
fn test_declared_parent_size_wins_over_bounds() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let panel = host.insert_child(root, 600.0, 400.0);
    let mut engine: Engine<TestHost> = Engine::new();

    engine
        .attach_str(&mut host, panel, Property::Width, "50pw")
        .expect("attaches");

    host.set_declared_width(root, 800.0);
    engine.source_changed(&mut host, root);
    assert_eq!(
        host.last_push(panel, Property::Width),
        Some(PropertyValue::Pixels(400.0))
    );
}

#[test]
fn test_font_relative_height() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let label = host.insert_child(root, 200.0, 30.0);
    host.set_font_size(label, 16.0);
    let mut engine: Engine<TestHost> = Engine::new();

    engine
        .attach_str(&mut host, label, Property::Height, "2em")
        .expect("attaches");
    assert_eq!(
        host.last_push(label, Property::Height),
        Some(PropertyValue::Pixels(32.0))
    );

    host.set_font_size(label, 24.0);
    engine.source_changed(&mut host, label);
    assert_eq!(
        host.last_push(label, Property::Height),
        Some(PropertyValue::Pixels(48.0))
    );
}

// ---------------------------------------------------------------------------
// Corner radius across a viewport resize
// ---------------------------------------------------------------------------

#[test]
fn test_corner_radius_tracks_the_viewport() {
    let mut host = TestHost::new();
    let window = host.insert_root(1440.0, 900.0);
    let panel = host.insert_child(window, 600.0, 400.0);
    let mut engine: Engine<TestHost> = Engine::new();

    engine
        .attach_str(
            &mut host,
            panel,
            Property::CornerRadius,
            "20pw+40ph 30pw+30ph 40ph+20pw 50ph+10pw",
        )
        .expect("attaches");
    assert_eq!(
        host.last_push(panel, Property::CornerRadius),
        Some(PropertyValue::Quad([648.0, 702.0, 648.0, 594.0]))
    );

    // One resize, one fresh quad; no re-parsing involved.
    host.set_bounds(window, 2560.0, 1600.0);
    engine.source_changed(&mut host, window);
    assert_eq!(
        host.pushes_for(panel, Property::CornerRadius),
        vec![
            PropertyValue::Quad([648.0, 702.0, 648.0, 594.0]),
            PropertyValue::Quad([1152.0, 1248.0, 1152.0, 1056.0]),
        ]
    );
}

#[test]
fn test_margin_mixes_viewport_and_parent_units() {
    let mut host = TestHost::new();
    let window = host.insert_root(1440.0, 900.0);
    let panel = host.insert_child(window, 600.0, 400.0);
    let inner = host.insert_child(panel, 300.0, 200.0);
    let mut engine: Engine<TestHost> = Engine::new();

    // Horizontal margins track the panel, vertical ones the window.
    engine
        .attach_thickness(
            &mut host,
            inner,
            Property::Margin,
            Thickness::symmetric(5.pw(), 10.vh()),
        )
        .expect("attaches");
    assert_eq!(
        host.last_push(inner, Property::Margin),
        Some(PropertyValue::Quad([30.0, 90.0, 30.0, 90.0]))
    );

    // Resizing the panel leaves the viewport-driven sides alone.
    host.set_bounds(panel, 800.0, 400.0);
    engine.source_changed(&mut host, panel);
    assert_eq!(
        host.last_push(inner, Property::Margin),
        Some(PropertyValue::Quad([40.0, 90.0, 40.0, 90.0]))
    );
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_deferred_binding_goes_live_on_attachment() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let floating = host.insert_detached(0.0, 0.0);
    let mut engine: Engine<TestHost> = Engine::new();

    let binding = engine
        .attach_str(&mut host, floating, Property::Width, "25pw")
        .expect("defers");
    assert_eq!(
        host.last_push(floating, Property::Width),
        Some(PropertyValue::Pixels(0.0))
    );

    host.mount(floating, root);
    engine
        .control_attached(&mut host, floating)
        .expect("resolves");
    assert_eq!(
        host.last_push(floating, Property::Width),
        Some(PropertyValue::Pixels(360.0))
    );
    assert_eq!(engine.pixels(binding), Some(360.0));
}

#[test]
fn test_detach_restores_the_property_default() {
    let mut host = TestHost::new();
    let root = host.insert_root(1440.0, 900.0);
    let panel = host.insert_child(root, 600.0, 400.0);
    let mut engine: Engine<TestHost> = Engine::new();

    let width = engine
        .attach_str(&mut host, panel, Property::Width, "50pw")
        .expect("attaches");

    assert!(engine.detach(&mut host, width));
    let last = host.last_push(panel, Property::Width);
    assert!(matches!(last, Some(PropertyValue::Pixels(v)) if v.is_nan()));

    // Later source changes no longer reach the detached property.
    let count = host.pushes_for(panel, Property::Width).len();
    host.set_bounds(root, 2000.0, 900.0);
    engine.source_changed(&mut host, root);
    assert_eq!(host.pushes_for(panel, Property::Width).len(), count);
}
