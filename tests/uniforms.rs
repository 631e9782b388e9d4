extern crate lux;

mod common;

use lux::prelude::*;

#[test]
fn unchanged_values_are_not_written() {
    let (mut ctx, calls) = common::context();

    {
        let (program, visitor) = ctx.program_mut("Line2D").unwrap();
        let width = program.slot("uWidth").unwrap();

        // Freshly linked uniforms hold zeros.
        assert!(!program.set_f32(visitor, width, 0.0).unwrap());
        assert!(program.set_f32(visitor, width, 2.0).unwrap());
        assert!(!program.set_f32(visitor, width, 2.0).unwrap());
        assert!(!program
            .set_f32(visitor, width, 2.0 + UNIFORM_EPSILON / 4.0)
            .unwrap());
    }

    assert_eq!(common::uniform_writes(&calls), 1);
}

#[test]
fn changed_values_are_written_once() {
    let (mut ctx, calls) = common::context();

    let slot = ctx.uniforms("Line2D").unwrap().slot("uColor").unwrap();
    {
        let (program, visitor) = ctx.program_mut("Line2D").unwrap();
        assert!(program.set_color(visitor, slot, Color::red()).unwrap());
        assert!(program.set_color(visitor, slot, Color::blue()).unwrap());
        assert!(!program.set_color(visitor, slot, Color::blue()).unwrap());
    }

    assert_eq!(common::uniform_writes(&calls), 2);

    let cached = ctx.uniforms("Line2D").unwrap().get(slot).unwrap().value;
    assert_eq!(cached, UniformVariable::Vector4f(Color::blue().rgba()));
}

#[test]
fn settings_are_applied_through_the_cache() {
    let (mut ctx, calls) = common::context();
    let settings = LineSettings::new(3.0, Color::green());

    LINE_2D.apply(&mut ctx, &settings).unwrap();
    assert_eq!(common::uniform_writes(&calls), 2);

    LINE_2D.apply(&mut ctx, &settings).unwrap();
    assert_eq!(common::uniform_writes(&calls), 2);

    LINE_2D
        .apply(&mut ctx, &LineSettings::new(3.0, Color::red()))
        .unwrap();
    assert_eq!(common::uniform_writes(&calls), 3);

    // The stencil program only takes the width.
    STENCIL_LINE.apply(&mut ctx, &settings).unwrap();
    assert_eq!(common::uniform_writes(&calls), 4);
    assert!(ctx.uniforms("StencilLine").unwrap().slot("uColor").is_none());
}

#[test]
fn constants() {
    let (mut ctx, calls) = common::context();

    BEZIER_2D.set_constants(&mut ctx).unwrap();
    let store = ctx.uniforms("Bezier2D").unwrap();
    let viewport = store.get(store.slot("uViewport").unwrap()).unwrap();
    assert_eq!(viewport.value, UniformVariable::Vector2f([2.0 / 640.0, 2.0 / 480.0]));
    let level = store.get(store.slot("uMaxLevel").unwrap()).unwrap();
    assert_eq!(level.value, UniformVariable::F32(64.0));

    // Identity transform, viewport scale and tessellation limit.
    assert_eq!(common::uniform_writes(&calls), 3);

    BEZIER_2D.set_constants(&mut ctx).unwrap();
    assert_eq!(common::uniform_writes(&calls), 3);

    ctx.state_mut().viewport = Vector2::new(800.0, 600.0);
    BEZIER_2D.set_constants(&mut ctx).unwrap();
    assert_eq!(common::uniform_writes(&calls), 4);
}

#[test]
fn mismatches() {
    let (mut ctx, calls) = common::context();
    let (program, visitor) = ctx.program_mut("Point2D").unwrap();

    let size = program.slot("uSize").unwrap();
    match program.set_vec2(visitor, size, Vector2::new(1.0, 1.0)) {
        Err(Error::UniformMismatch {
            name,
            expected,
            found,
        }) => {
            assert_eq!(name, "uSize");
            assert_eq!(expected, UniformVariableType::F32);
            assert_eq!(found, UniformVariableType::Vector2f);
        }
        other => panic!("unexpected {:?}", other),
    }

    let len = program.uniforms().len();
    match program.set_f32(visitor, len, 1.0) {
        Err(Error::UniformSlotInvalid(slot)) => assert_eq!(slot, len),
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(common::uniform_writes(&calls), 0);
}
