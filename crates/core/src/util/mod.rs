pub mod range;
pub mod unit;

use std::f64::consts::PI;

/// Half of pi, i.e. the colatitude of the equator
pub const HALF_PI: f64 = PI / 2.0;
/// A full turn, in radians
pub const TWO_PI: f64 = PI * 2.0;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} µs", $label, elapsed.as_micros());
        value
    }};
}
