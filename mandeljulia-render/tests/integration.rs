use mandeljulia_core::{Complex, FractalParams, Julia, Mandelbrot, Panel, Viewport};
use mandeljulia_render::{builtin_palettes, render, render_into, ColorMapper, ColorParams, Palette, RenderBuffer};

const W: u32 = 120;
const H: u32 = 90;

#[test]
fn end_to_end_two_panel_frame() {
    let params = FractalParams::default();
    let colors = ColorParams::default();
    let palette = Palette::default();
    let mapper = ColorMapper::new(&colors, Some(&palette));
    let mut frame = RenderBuffer::for_panels(W, H);

    render_into(
        &Mandelbrot::new(params),
        &Viewport::default_mandelbrot(params.power),
        W,
        H,
        &mapper,
        &mut frame,
        Panel::Mandelbrot.x_offset(W),
    );
    render_into(
        &Julia::new(Complex::new(-0.1, 0.1), params),
        &Viewport::default_julia(),
        W,
        H,
        &mapper,
        &mut frame,
        Panel::Julia.x_offset(W),
    );

    assert_eq!(frame.frames_presented(), 2);
    for x_offset in [0, W] {
        let region = frame.region(x_offset, W);
        assert!(
            region.chunks_exact(4).any(|px| px[..3] != [0, 0, 0]),
            "panel at {x_offset} should contain colored pixels"
        );
        assert!(
            region.chunks_exact(4).any(|px| px[..3] == [0, 0, 0]),
            "panel at {x_offset} should contain interior pixels"
        );
    }
}

#[test]
fn render_determinism() {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::default_mandelbrot(2);
    let r1 = render(&mandelbrot, &viewport, 128, 96);
    let r2 = render(&mandelbrot, &viewport, 128, 96);
    assert_eq!(r1.iterations, r2.iterations, "renders must be deterministic");
}

#[test]
fn palette_switch_without_recompute() {
    let result = render(&Mandelbrot::default(), &Viewport::default_mandelbrot(2), 64, 48);
    let colors = ColorParams::default();
    let palettes = builtin_palettes();

    let mut frames = Vec::new();
    for palette in palettes.iter().take(2) {
        let mut frame = RenderBuffer::new(64, 48);
        ColorMapper::new(&colors, Some(palette)).paint(&result.iterations, &mut frame, 0);
        frames.push(frame.pixels);
    }
    let mut procedural = RenderBuffer::new(64, 48);
    ColorMapper::new(&colors, None).paint(&result.iterations, &mut procedural, 0);

    assert_ne!(frames[0], frames[1], "different palettes should produce different images");
    assert_ne!(frames[0], procedural.pixels);
}

#[test]
fn zoomed_view_reuses_same_pipeline() {
    let viewport = Viewport::from_corners(Complex::new(-0.8, 0.05), Complex::new(-0.7, 0.15), true)
        .expect("non-degenerate zoom");
    let result = render(&Mandelbrot::default(), &viewport, 50, 50);
    assert_eq!(result.iterations.data.len(), 2500);
    assert!(result.iterations.data.iter().any(|r| r.escaped));
}
