//! various helper functions used to simplify unit tests.
//!
//! **Note**: This module is only compiled and used during testing. Hence, there might be no
//! further documentation show up.

#[cfg(test)]
pub mod test_helper {
    use crate::ray_matrix::RayTransferMatrix;
    use approx::assert_abs_diff_eq;
    use log::Level;
    use uom::si::length::millimeter;

    /// Compare the captured warnings with the expected ones (in order).
    pub fn check_warnings(expected_warnings: Vec<&str>) {
        testing_logger::validate(|captured_logs| {
            let captured_logs: Vec<_> = captured_logs
                .iter()
                .filter(|l| l.level == Level::Warn)
                .collect();
            assert_eq!(captured_logs.len(), expected_warnings.len());
            for log in captured_logs.iter().zip(expected_warnings.clone()) {
                assert_eq!(log.0.body, log.1);
            }
        });
    }
    /// Compare the elements `[A, B, C, D]` of a [`RayTransferMatrix`] (`B` in mm, `C` in 1/mm).
    pub fn check_matrix(matrix: &RayTransferMatrix, expected: [f64; 4], epsilon: f64) {
        assert_abs_diff_eq!(matrix.a(), expected[0], epsilon = epsilon);
        assert_abs_diff_eq!(
            matrix.b().get::<millimeter>(),
            expected[1],
            epsilon = epsilon
        );
        assert_abs_diff_eq!(matrix.c(), expected[2], epsilon = epsilon);
        assert_abs_diff_eq!(matrix.d(), expected[3], epsilon = epsilon);
    }
}
