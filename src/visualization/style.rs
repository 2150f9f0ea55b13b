//! Mass-based appearance of bodies in the viewer

/// On-screen radius in pixels for a body of mass `m`
pub fn visual_radius(m: f64) -> f32 {
    let m = m as f32;
    if m >= 1000.0 {
        45.0 // stars
    } else if m >= 10.0 {
        m / 2.5 // planets
    } else {
        (m * 0.6).max(1.5) // small bodies stay visible
    }
}

/// sRGB fill color for a body of mass `m`
pub fn mass_color(m: f64) -> [f32; 3] {
    if m >= 15000.0 {
        [100.0 / 255.0, 150.0 / 255.0, 1.0]
    } else if m >= 3000.0 {
        [1.0, 1.0, 1.0]
    } else if m >= 1000.0 {
        [1.0, 1.0, 0.0]
    } else if m >= 200.0 {
        [1.0, 100.0 / 255.0, 50.0 / 255.0]
    } else {
        [200.0 / 255.0; 3]
    }
}

/// Alpha of trail point `i` out of `len`, oldest points fade out
pub fn trail_alpha(i: usize, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    i as f32 / len as f32
}
