extern crate lux;

mod common;

use common::Call;
use lux::prelude::*;

fn uploads(calls: &common::Calls) -> Vec<usize> {
    calls
        .borrow()
        .iter()
        .filter_map(|v| match *v {
            Call::Upload(len) => Some(len),
            _ => None,
        }).collect()
}

#[test]
fn polys_issue_one_upload_and_two_draws() {
    let (mut ctx, calls) = common::context();
    let line = ctx.program("Line2D").unwrap().id();
    let bezier = ctx.program("Bezier2D").unwrap().id();

    let path = Path::new([0.0f32, 0.0])
        .line_to([100.0f32, 0.0])
        .bezier_to([150.0f32, 0.0], [150.0f32, 80.0], [100.0f32, 80.0]);

    let primitives = pix::draw_polys(&mut ctx, &[path]).unwrap();
    assert_eq!(primitives, 2);

    assert_eq!(uploads(&calls), vec![6 * VertexSpec::Vec2F.stride()]);
    assert_eq!(
        common::draws(&calls),
        vec![
            (line, DrawMode::Lines, 0, 2),
            (bezier, DrawMode::Patches(4), 2, 4),
        ]
    );

    assert_eq!(ctx.frame_info().drawcalls, 2);
}

#[test]
fn polys_skip_empty_batches() {
    let (mut ctx, calls) = common::context();
    let line = ctx.program("Line2D").unwrap().id();

    assert_eq!(pix::draw_polys(&mut ctx, &[]).unwrap(), 0);
    assert_eq!(pix::draw_polys(&mut ctx, &[Path::new([1.0f32, 1.0])]).unwrap(), 0);
    assert!(calls.borrow().is_empty());

    let square = Path::new([0.0f32, 0.0])
        .line_to([1.0f32, 0.0])
        .line_to([1.0f32, 1.0])
        .line_to([0.0f32, 1.0])
        .close();

    assert_eq!(pix::draw_polys(&mut ctx, &[square]).unwrap(), 4);
    assert_eq!(common::draws(&calls), vec![(line, DrawMode::Lines, 0, 8)]);
}

#[test]
fn batches_merge_equal_settings() {
    let (mut ctx, calls) = common::context();
    let line = ctx.program("Line2D").unwrap().id();

    let thin = LineSettings::new(1.0, Color::white());
    let wide = LineSettings::new(2.0, Color::white());
    let v = Vertex2::from([0.0f32, 0.0]);

    let items = [
        (wide, vec![v; 4]),
        (thin, vec![v; 2]),
        (wide, vec![v; 2]),
        (thin, vec![]),
    ];

    assert_eq!(LINE_2D.draw(&mut ctx, &items).unwrap(), 4);
    assert_eq!(uploads(&calls), vec![8 * VertexSpec::Vec2F.stride()]);
    assert_eq!(
        common::draws(&calls),
        vec![(line, DrawMode::Lines, 0, 2), (line, DrawMode::Lines, 2, 6)]
    );
}

#[test]
fn batches_keep_distinct_colors_apart() {
    let (mut ctx, calls) = common::context();
    let line = ctx.program("Line2D").unwrap().id();

    let a = Color::new(0.5, 0.0, 0.0, 1.0);
    let b = Color::new(0.501, 0.0, 0.0, 1.0);
    assert_eq!(a.packed(), b.packed());

    let v = Vertex2::from([0.0f32, 0.0]);
    let items = [
        (LineSettings::new(1.0, a), vec![v; 2]),
        (LineSettings::new(1.0, b), vec![v; 2]),
    ];

    assert_eq!(LINE_2D.draw(&mut ctx, &items).unwrap(), 2);
    assert_eq!(
        common::draws(&calls),
        vec![(line, DrawMode::Lines, 0, 2), (line, DrawMode::Lines, 2, 2)]
    );

    let store = ctx.uniforms("Line2D").unwrap();
    let color = store.get(store.slot("uColor").unwrap()).unwrap();
    assert_eq!(color.value, UniformVariable::Vector4f(b.rgba()));
}

#[test]
fn primitives() {
    let (mut ctx, calls) = common::context();
    ctx.state_mut().point_size = 4.0;

    assert_eq!(
        pix::draw_points(&mut ctx, &[[0.0f32, 0.0], [1.0f32, 1.0], [2.0f32, 2.0]]).unwrap(),
        3
    );

    let triangle = [[0.0f32, 0.0], [1.0f32, 0.0], [0.0f32, 1.0]];
    assert_eq!(pix::fill_triangles(&mut ctx, &[triangle, triangle]).unwrap(), 2);

    let quad = Rect::new([0.0f32, 0.0], [10.0f32, 20.0]);
    assert_eq!(pix::fill_quads(&mut ctx, &[quad]).unwrap(), 2);

    let path = Path::new([0.0f32, 0.0]).bezier_to([0.0f32, 1.0], [1.0f32, 1.0], [1.0f32, 0.0]);
    assert_eq!(
        pix::stencil_polys(&mut ctx, &[path]).unwrap(),
        pix::FLATTEN_SEGMENTS as u32
    );

    let store = ctx.uniforms("Point2D").unwrap();
    let size = store.get(store.slot("uSize").unwrap()).unwrap();
    assert_eq!(size.value, UniformVariable::F32(4.0));

    assert_eq!(common::draws(&calls).len(), 4);
    let frame = ctx.advance().unwrap();
    assert_eq!(frame.drawcalls, 4);
    assert_eq!(frame.primitives, 3 + 2 + 2 + pix::FLATTEN_SEGMENTS as u32);
    assert_eq!(ctx.frame_info(), FrameInfo::default());
}

#[test]
fn lines_with_own_settings() {
    let (mut ctx, calls) = common::context();

    let a = Path::new([0.0f32, 0.0]).line_to([1.0f32, 0.0]);
    let b = Path::new([0.0f32, 1.0]).line_to([1.0f32, 1.0]);
    let red = LineSettings::new(1.0, Color::red());

    assert_eq!(
        pix::draw_lines(&mut ctx, &[(red, a.clone()), (red, b)]).unwrap(),
        2
    );
    assert_eq!(common::draws(&calls).len(), 1);

    let blue = LineSettings::new(1.0, Color::blue());
    pix::draw_lines(&mut ctx, &[(red, a.clone()), (blue, a)]).unwrap();
    assert_eq!(common::draws(&calls).len(), 3);
}

#[test]
fn lit_facets() {
    let (mut ctx, calls) = common::context();

    let mut mesh = Facets::new();
    mesh.push([0.0f32, 0.0, 0.0], [1.0f32, 0.0, 0.0], [0.0f32, 1.0, 0.0]);
    mesh.push([0.0f32, 0.0, 1.0], [1.0f32, 0.0, 1.0], [0.0f32, 1.0, 1.0]);

    for &shading in &[Shading::Flat, Shading::Gourad, Shading::Phong] {
        assert_eq!(facets::draw(&mut ctx, shading, &mesh).unwrap(), 2);
    }

    let names = ["FlatFacet", "Gourad", "Phong"];
    let ids: Vec<_> = names
        .iter()
        .map(|v| ctx.program(v).unwrap().id())
        .collect();

    let drawn: Vec<_> = common::draws(&calls).iter().map(|v| v.0).collect();
    assert_eq!(drawn, ids);

    assert_eq!(facets::draw(&mut ctx, Shading::Flat, &Facets::new()).unwrap(), 0);
}
