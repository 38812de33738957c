//! Tests for zoom and container tracking

use rstest::rstest;

use refnet::domain::{
    ContainerSize, DomainError, Point, ViewportConfig, ViewportController,
};

fn zoomed_out(times: usize) -> ViewportController {
    let mut viewport = ViewportController::default();
    for _ in 0..times {
        viewport.zoom_out();
    }
    viewport
}

#[test]
fn given_default_when_zooming_in_then_out_then_returns_to_one() {
    let mut viewport = ViewportController::default();
    viewport.zoom_in();
    assert_eq!(viewport.zoom_factor(), 1.2);
    viewport.zoom_out();
    assert_eq!(viewport.zoom_factor(), 1.0);
}

#[rstest]
#[case(1, 0.8)]
#[case(2, 0.6)]
#[case(3, 0.4)]
#[case(4, 0.4)]
#[case(10, 0.4)]
fn given_repeated_zoom_out_when_reaching_floor_then_stops(
    #[case] times: usize,
    #[case] expected: f64,
) {
    assert_eq!(zoomed_out(times).zoom_factor(), expected);
}

#[test]
fn given_floor_when_zooming_in_then_moves_up_again() {
    let mut viewport = zoomed_out(5);
    viewport.zoom_in();
    assert_eq!(viewport.zoom_factor(), 0.6);
}

#[test]
fn given_any_sequence_when_resetting_then_factor_is_exactly_one() {
    let mut viewport = ViewportController::default();
    for _ in 0..13 {
        viewport.zoom_in();
    }
    viewport.zoom_out();
    viewport.reset_zoom();
    assert_eq!(viewport.zoom_factor(), 1.0);

    let mut viewport = zoomed_out(3);
    viewport.reset_zoom();
    assert_eq!(viewport.zoom_factor(), 1.0);
}

#[test]
fn given_no_ceiling_when_zooming_in_repeatedly_then_keeps_growing() {
    let mut viewport = ViewportController::default();
    for _ in 0..50 {
        viewport.zoom_in();
    }
    assert_eq!(viewport.zoom_factor(), 11.0);
}

#[test]
fn given_resize_when_reading_anchor_then_recomputes_from_width() {
    let mut viewport = ViewportController::default();
    assert_eq!(viewport.translate_anchor(), Point { x: 500.0, y: 50.0 });

    viewport.on_container_resize(ContainerSize::new(800.0, 400.0).unwrap());
    assert_eq!(viewport.translate_anchor(), Point { x: 400.0, y: 50.0 });
    let size = viewport.container_size();
    assert_eq!((size.width(), size.height()), (800.0, 400.0));
}

#[test]
fn given_resize_when_zoomed_then_zoom_is_untouched() {
    let mut viewport = ViewportController::default();
    viewport.zoom_in();
    viewport.on_container_resize(ContainerSize::new(320.0, 480.0).unwrap());
    assert_eq!(viewport.zoom_factor(), 1.2);
    assert_eq!(viewport.translate_anchor().x, 160.0);
}

#[test]
fn given_custom_config_when_created_then_uses_offset_and_initial_size() {
    let viewport = ViewportController::new(ViewportConfig {
        top_offset: 80.0,
        initial_size: ContainerSize::new(1200.0, 900.0).unwrap(),
        ..ViewportConfig::default()
    });
    assert_eq!(viewport.translate_anchor(), Point { x: 600.0, y: 80.0 });
}

#[rstest]
#[case(0.0, 600.0)]
#[case(1000.0, 0.0)]
#[case(-10.0, 600.0)]
#[case(f64::NAN, 600.0)]
#[case(1000.0, f64::INFINITY)]
fn given_invalid_dimensions_when_creating_size_then_rejects(
    #[case] width: f64,
    #[case] height: f64,
) {
    assert!(matches!(
        ContainerSize::new(width, height),
        Err(DomainError::InvalidSize { .. })
    ));
}

#[rstest]
#[case(1.0, 1.0)]
#[case(1280.5, 720.0)]
fn given_valid_dimensions_when_creating_size_then_accessors_return_them(
    #[case] width: f64,
    #[case] height: f64,
) {
    let size = ContainerSize::new(width, height).unwrap();
    assert_eq!(size.width(), width);
    assert_eq!(size.height(), height);

    let json = serde_json::to_value(size).unwrap();
    assert_eq!(json["width"], width);
    assert_eq!(json["height"], height);
}

#[test]
fn given_default_size_when_reading_then_is_valid_container() {
    let size = ContainerSize::default();
    assert_eq!((size.width(), size.height()), (1000.0, 600.0));
    assert_eq!(ContainerSize::new(size.width(), size.height()).unwrap(), size);
}
