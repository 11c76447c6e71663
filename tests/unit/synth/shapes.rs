use super::*;
use crate::synth::palette::default_preset_for;

fn ops_for(kind: CreatureKind, p: f64, palette: &ColorConfig) -> Vec<DrawOp> {
    let (w, h) = kind.frame_size();
    frame_ops(kind, &Pose::at(kind, p, palette), palette, w, h)
}

#[test]
fn every_kind_draws_inside_its_cell() {
    for kind in [CreatureKind::Bird, CreatureKind::Butterfly, CreatureKind::Owl] {
        let palette = default_preset_for(kind)
            .colors
            .with_pattern(true)
            .with_shimmer(true);
        let (w, h) = kind.frame_size();
        let cell = kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        for i in 0..kind.default_frame_count() {
            let p = f64::from(i) / f64::from(kind.default_frame_count());
            let ops = ops_for(kind, p, &palette);
            assert!(!ops.is_empty());
            for op in &ops {
                let bb = op.to_path().bounding_box();
                assert!(
                    bb.x0 >= cell.x0 - 0.5
                        && bb.y0 >= cell.y0 - 0.5
                        && bb.x1 <= cell.x1 + 0.5
                        && bb.y1 <= cell.y1 + 0.5,
                    "{kind} frame {i} op {op:?} escapes {bb:?}"
                );
            }
        }
    }
}

#[test]
fn decorations_add_primitives() {
    let kind = CreatureKind::Butterfly;
    let plain = default_preset_for(kind).colors.with_pattern(false).with_shimmer(false);
    let fancy = plain.clone().with_pattern(true).with_shimmer(true);
    assert!(ops_for(kind, 0.0, &fancy).len() > ops_for(kind, 0.0, &plain).len());
}

#[test]
fn triangle_path_is_closed() {
    let op = DrawOp::FillTriangle {
        points: [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)],
        color: Rgba8::rgb(1, 2, 3),
    };
    let path = op.to_path();
    assert_eq!(path.elements().len(), 4);
    assert!((path.area().abs() - 6.0).abs() < 1e-9);
    assert!(!op.is_stroke());
}

#[test]
fn polyline_is_stroked_and_open() {
    let op = DrawOp::StrokePolyline {
        points: vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0)],
        width: 1.0,
        color: Rgba8::rgb(1, 2, 3),
    };
    assert!(op.is_stroke());
    assert_eq!(op.to_path().elements().len(), 3);
    assert_eq!(op.color(), Rgba8::rgb(1, 2, 3));
}
