//! Strokes a few rounded shapes and a lit triangle into a window.

extern crate env_logger;
extern crate lux;

use lux::glutin::{self, GlContext};
use lux::prelude::*;

fn shape(x: f32, y: f32, r: f32) -> Path {
    let k = r * 0.552;
    Path::new([x - r, y])
        .bezier_to([x - r, y + k], [x - k, y + r], [x, y + r])
        .line_to([x + r, y + r])
        .line_to([x + r, y])
        .bezier_to([x + r, y - k], [x + k, y - r], [x, y - r])
        .close()
}

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::default();
    let (w, h) = settings.viewport;

    let builder = glutin::WindowBuilder::new()
        .with_title("polys")
        .with_dimensions(glutin::dpi::LogicalSize::new(f64::from(w), f64::from(h)));

    let context = glutin::ContextBuilder::new()
        .with_gl_profile(glutin::GlProfile::Core)
        .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (4, 0)))
        .with_vsync(true);

    let mut events_loop = glutin::EventsLoop::new();
    let window = glutin::GlWindow::new(builder, context, &events_loop)
        .map_err(|err| Error::Backend(format!("{}", err)))?;

    let visitor = unsafe { GLVisitor::glutin(&window)? };
    let mut ctx = RenderContext::new(settings, Box::new(visitor), Box::new(Embedded::builtin()))?;

    let mut mesh = Facets::new();
    mesh.push([-0.5f32, -0.5, 0.0], [0.5f32, -0.5, 0.0], [0.0f32, 0.5, 0.0]);
    mesh.colors = vec![Color::red(), Color::green(), Color::blue()];

    let mut running = true;
    let mut frames = 0u64;
    while running {
        events_loop.poll_events(|event| {
            if let glutin::Event::WindowEvent { event, .. } = event {
                if let glutin::WindowEvent::CloseRequested = event {
                    running = false;
                }
            }
        });

        ctx.state_mut().transform = Matrix4::one();
        ctx.state_mut().color = Color::gray();
        facets::draw(&mut ctx, Shading::Gourad, &mesh)?;

        ctx.state_mut().line_width = 4.0;
        ctx.state_mut().color = Color::white();
        let paths = [shape(160.0, 240.0, 80.0), shape(480.0, 240.0, 120.0)];
        pix::draw_polys(&mut ctx, &paths)?;

        ctx.state_mut().point_size = 12.0;
        ctx.state_mut().color = Color::red();
        pix::draw_points(&mut ctx, &[[160.0f32, 240.0], [480.0f32, 240.0]])?;

        window
            .swap_buffers()
            .map_err(|err| Error::Backend(format!("{:?}", err)))?;

        let frame = ctx.advance()?;
        frames += 1;
        if frames % 300 == 0 {
            println!("{:?}", frame);
        }
    }

    Ok(())
}
