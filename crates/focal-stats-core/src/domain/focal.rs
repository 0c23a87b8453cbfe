//! Focal length value type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Error returned when a value cannot represent a focal length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalLengthError(f64);

impl fmt::Display for FocalLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a finite focal length", self.0)
    }
}

impl std::error::Error for FocalLengthError {}

/// A focal length in millimeters.
///
/// Two focal lengths are the same key when their numeric values are equal,
/// so `50.0` read from a 35mm-equivalent tag and `50.0` resolved from a
/// rational merge into one bucket. Ordering is numeric.
#[derive(Debug, Clone, Copy)]
pub struct FocalLength(f64);

impl FocalLength {
    /// Creates a focal length from a millimeter value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is NaN or infinite.
    pub fn new(millimeters: f64) -> Result<Self, FocalLengthError> {
        if millimeters.is_finite() {
            // -0.0 and 0.0 must hash identically
            Ok(Self(millimeters + 0.0))
        } else {
            Err(FocalLengthError(millimeters))
        }
    }

    /// Resolves an unsigned rational to millimeters rounded to one decimal
    /// place. Returns `None` for a zero denominator.
    ///
    /// The ratio is evaluated as an `f64` and that float is rounded on its
    /// exact decimal value, ties to even, so `4.35` (stored just below the
    /// halfway point) becomes `4.3`.
    #[must_use]
    pub fn from_rational(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Some(Self(round_tenth(
            f64::from(numerator) / f64::from(denominator),
        )))
    }

    /// Signed counterpart of [`FocalLength::from_rational`].
    #[must_use]
    pub fn from_signed_rational(numerator: i32, denominator: i32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let rounded = round_tenth(f64::from(numerator) / f64::from(denominator));
        Some(Self(rounded + 0.0))
    }

    /// Returns the value in millimeters.
    #[must_use]
    pub const fn millimeters(self) -> f64 {
        self.0
    }
}

/// Rounds a finite value to one decimal place.
///
/// `{:.1}` formats from the exact binary value with ties to even; parsing
/// the result back gives the nearest `f64` to that decimal.
fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

impl PartialEq for FocalLength {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FocalLength {}

impl PartialOrd for FocalLength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FocalLength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for FocalLength {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for FocalLength {
    type Error = FocalLengthError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<u16> for FocalLength {
    fn from(value: u16) -> Self {
        Self(f64::from(value))
    }
}

impl From<u32> for FocalLength {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

/// Whole numbers keep one decimal place (`50.0`); anything else uses the
/// shortest representation that round-trips (`24.1`, `4.25`).
impl fmt::Display for FocalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
