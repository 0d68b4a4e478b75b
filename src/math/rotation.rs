/// Normalize a 3-vector, returning `None` for a zero or non-finite vector
pub fn normalize(vector: [f64; 3]) -> Option<[f64; 3]> {
    let length = vector
        .iter()
        .map(|component| component * component)
        .sum::<f64>()
        .sqrt();
    if length > 0.0 && length.is_finite() {
        Some(vector.map(|component| component / length))
    } else {
        None
    }
}

/// Rotate `point` by `angle` radians around a unit `axis` passing through `center`
///
/// Uses Rodrigues' rotation formula, so `axis` must already be normalized.
pub fn rotate_about(point: [f64; 3], center: [f64; 3], axis: [f64; 3], angle: f64) -> [f64; 3] {
    let v = [
        point[0] - center[0],
        point[1] - center[1],
        point[2] - center[2],
    ];
    let (sin, cos) = angle.sin_cos();
    let [kx, ky, kz] = axis;
    let cross = [ky * v[2] - kz * v[1], kz * v[0] - kx * v[2], kx * v[1] - ky * v[0]];
    let dot = kx * v[0] + ky * v[1] + kz * v[2];
    let k = [kx, ky, kz];

    let mut rotated = [0.0; 3];
    for (((out, &vi), &ci), &ki) in rotated.iter_mut().zip(&v).zip(&cross).zip(&k) {
        *out = (ki * dot).mul_add(1.0 - cos, vi.mul_add(cos, ci * sin));
    }
    [
        rotated[0] + center[0],
        rotated[1] + center[1],
        rotated[2] + center[2],
    ]
}
