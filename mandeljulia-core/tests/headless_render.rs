use mandeljulia_core::{Complex, Fractal, FractalParams, IterationResult, Julia, Mandelbrot, Viewport};

/// Iterate every pixel of a panel and collect results row by row.
fn render_grid<F: Fractal>(fractal: &F, viewport: &Viewport, w: u32, h: u32) -> Vec<IterationResult> {
    let mut results = Vec::with_capacity((w * h) as usize);
    for py in 0..h {
        for px in 0..w {
            let p = viewport.screen_to_plane(px as f64, py as f64, w, h);
            results.push(fractal.iterate(p));
        }
    }
    results
}

#[test]
fn headless_mandelbrot_render() {
    let mandelbrot = Mandelbrot::new(FractalParams::new(2, 100, 2.0).unwrap());
    let results = render_grid(&mandelbrot, &Viewport::default_mandelbrot(2), 100, 100);

    assert_eq!(results.len(), 10_000);
    let interior = results.iter().filter(|r| !r.escaped).count();
    assert!(interior > 0, "should have some interior points");
    assert!(interior < 10_000, "should have some escaped points");
    assert!(results
        .iter()
        .filter(|r| !r.escaped)
        .all(|r| r.iterations == 100));
}

#[test]
fn headless_render_is_deterministic() {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::default_mandelbrot(2);
    assert_eq!(
        render_grid(&mandelbrot, &viewport, 80, 60),
        render_grid(&mandelbrot, &viewport, 80, 60),
        "two identical renders must produce identical results"
    );
}

#[test]
fn headless_julia_render() {
    let julia = Julia::new(Complex::new(-0.1, 0.1), FractalParams::default());
    let results = render_grid(&julia, &Viewport::default_julia(), 100, 100);

    let interior = results.iter().filter(|r| !r.escaped).count();
    assert!(interior > 0, "should have some interior points");
    assert!(interior < 10_000, "should have some escaped points");
}

#[test]
fn higher_power_renders_inside_symmetric_default() {
    let params = FractalParams::new(4, 60, 2.0).unwrap();
    let results = render_grid(&Mandelbrot::new(params), &Viewport::default_mandelbrot(4), 50, 50);
    // Top-left corner (-1.25, 1.25) lies outside the quartic set.
    assert!(results[0].escaped);
    // Pixel (25, 25) maps to the origin.
    assert!(!results[25 * 50 + 25].escaped);
}
