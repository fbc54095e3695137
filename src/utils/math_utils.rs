//! Small numeric helpers shared by the tracer and the plotting code.
use crate::error::{CloakError, CloakResult};
use log::warn;
use nalgebra::DVector;

#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let newval = value as f64;
    newval
}

/// Creates a linearly spaced vector with `num` entries from `start` to `end` (both included).
///
/// # Errors
/// This function will return an error if `start` or `end` is not finite.
pub fn linspace(start: f64, end: f64, num: usize) -> CloakResult<DVector<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(CloakError::Other(
            "start and end values must be finite!".into(),
        ));
    }
    let mut values = DVector::<f64>::from_element(num, start);
    if num < 2 {
        warn!("Using linspace with less than two elements results in an empty Vector for num=0 or a Vector with one entry being num=start");
        return Ok(values);
    }
    let bin_size = (end - start) / usize_to_f64(num - 1);
    for (step, val) in values.iter_mut().enumerate() {
        *val = usize_to_f64(step).mul_add(bin_size, start);
    }
    // avoid accumulated rounding on the last entry
    values[num - 1] = end;
    Ok(values)
}
