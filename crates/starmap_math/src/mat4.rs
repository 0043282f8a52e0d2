//! 4x4 Matrix utilities for the orbit camera
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout so they can be uploaded to uniform buffers as-is.

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a homogeneous point by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: [f32; 4]) -> [f32; 4] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
        m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    ]
}

/// Right-handed perspective projection with OpenGL clip depth (-1..1)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Translation matrix
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [x, y, z, 1.0],
    ]
}

/// Rotation about the X axis
pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis
pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// General 4x4 inverse via cofactor expansion
///
/// Returns `None` when the matrix is singular.
pub fn invert(m: Mat4) -> Option<Mat4> {
    let [a00, a01, a02, a03] = m[0];
    let [a10, a11, a12, a13] = m[1];
    let [a20, a21, a22, a23] = m[2];
    let [a30, a31, a32, a33] = m[3];

    let b00 = a00 * a11 - a01 * a10;
    let b01 = a00 * a12 - a02 * a10;
    let b02 = a00 * a13 - a03 * a10;
    let b03 = a01 * a12 - a02 * a11;
    let b04 = a01 * a13 - a03 * a11;
    let b05 = a02 * a13 - a03 * a12;
    let b06 = a20 * a31 - a21 * a30;
    let b07 = a20 * a32 - a22 * a30;
    let b08 = a20 * a33 - a23 * a30;
    let b09 = a21 * a32 - a22 * a31;
    let b10 = a21 * a33 - a23 * a31;
    let b11 = a22 * a33 - a23 * a32;

    let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
    if det == 0.0 {
        return None;
    }
    let inv_det = 1.0 / det;

    Some([
        [
            (a11 * b11 - a12 * b10 + a13 * b09) * inv_det,
            (-a01 * b11 + a02 * b10 - a03 * b09) * inv_det,
            (a31 * b05 - a32 * b04 + a33 * b03) * inv_det,
            (-a21 * b05 + a22 * b04 - a23 * b03) * inv_det,
        ],
        [
            (-a10 * b11 + a12 * b08 - a13 * b07) * inv_det,
            (a00 * b11 - a02 * b08 + a03 * b07) * inv_det,
            (-a30 * b05 + a32 * b02 - a33 * b01) * inv_det,
            (a20 * b05 - a22 * b02 + a23 * b01) * inv_det,
        ],
        [
            (a10 * b10 - a11 * b08 + a13 * b06) * inv_det,
            (-a00 * b10 + a01 * b08 - a03 * b06) * inv_det,
            (a30 * b04 - a31 * b02 + a33 * b00) * inv_det,
            (-a20 * b04 + a21 * b02 - a23 * b00) * inv_det,
        ],
        [
            (-a10 * b09 + a11 * b07 - a12 * b06) * inv_det,
            (a00 * b09 - a01 * b07 + a02 * b06) * inv_det,
            (-a30 * b03 + a31 * b01 - a32 * b00) * inv_det,
            (a20 * b03 - a21 * b01 + a22 * b00) * inv_det,
        ],
    ])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let v = [1.0, 2.0, 3.0, 1.0];
        assert!(vec_approx_eq(transform(IDENTITY, v), v));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = translation(1.0, -2.0, 3.0);
        assert!(vec_approx_eq(transform(t, [0.0, 0.0, 0.0, 1.0]), [1.0, -2.0, 3.0, 1.0]));
        assert!(vec_approx_eq(transform(t, [1.0, 0.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        use std::f32::consts::FRAC_PI_2;

        // X goes to -Z under a right-handed 90° yaw
        let m = rotation_y(FRAC_PI_2);
        let result = transform(m, [1.0, 0.0, 0.0, 0.0]);
        assert!(vec_approx_eq(result, [0.0, 0.0, -1.0, 0.0]), "got {:?}", result);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        use std::f32::consts::FRAC_PI_2;

        // Y goes to Z
        let m = rotation_x(FRAC_PI_2);
        let result = transform(m, [0.0, 1.0, 0.0, 0.0]);
        assert!(vec_approx_eq(result, [0.0, 0.0, 1.0, 0.0]), "got {:?}", result);
    }

    #[test]
    fn test_mul_applies_right_first() {
        use std::f32::consts::FRAC_PI_2;

        // Rotate then translate
        let m = mul(translation(10.0, 0.0, 0.0), rotation_y(FRAC_PI_2));
        let result = transform(m, [1.0, 0.0, 0.0, 1.0]);
        assert!(vec_approx_eq(result, [10.0, 0.0, -1.0, 1.0]), "got {:?}", result);
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation_x(0.5);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = mul(
            perspective(55f32.to_radians(), 1.5, 0.1, 50000.0),
            mul(translation(-3.0, 4.0, -1800.0), mul(rotation_x(0.3), rotation_y(-0.7))),
        );
        let inv = invert(m).expect("mvp should be invertible");
        let product = mul(m, inv);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[i][j] - expected).abs() < 1e-3, "[{}][{}] = {}", i, j, product[i][j]);
            }
        }
    }

    #[test]
    fn test_invert_singular_is_none() {
        let zero = [[0.0f32; 4]; 4];
        assert!(invert(zero).is_none());
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let p = perspective(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
        let near = transform(p, [0.0, 0.0, -1.0, 1.0]);
        let far = transform(p, [0.0, 0.0, -10.0, 1.0]);
        assert!(approx_eq(near[2] / near[3], -1.0));
        assert!(approx_eq(far[2] / far[3], 1.0));
    }

    #[test]
    fn test_transpose_twice_is_identity_op() {
        let m = mul(rotation_x(0.2), translation(1.0, 2.0, 3.0));
        assert!(mat_approx_eq(transpose(transpose(m)), m));
    }
}
