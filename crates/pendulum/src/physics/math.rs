/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// Sine routed through `libm` so runs are bit-identical across platforms.
#[inline]
pub fn sin(x: Scalar) -> Scalar {
    libm::sin(x)
}

/// Cosine routed through `libm`, see [`sin`].
#[inline]
pub fn cos(x: Scalar) -> Scalar {
    libm::cos(x)
}

pub fn degrees_to_radians(degrees: Scalar) -> Scalar {
    degrees * (core::f64::consts::PI / 180.0)
}

pub fn radians_to_degrees(radians: Scalar) -> Scalar {
    radians * (180.0 / core::f64::consts::PI)
}
