/// Speed of light in vacuum (m/s), rounded the way the calculator has always used it.
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Default half width of the frequency sweep around the center frequency (Hz).
pub const DEFAULT_HALF_SPAN: f64 = 1.0e9;

/// Default number of points in the frequency sweep.
pub const DEFAULT_SWEEP_POINTS: usize = 501;

/// Default return loss (dB) a band must meet to count as matched.
pub const DEFAULT_RETURN_LOSS_THRESHOLD_DB: f64 = 10.0;
