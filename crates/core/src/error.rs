//! Grid construction errors
//!
//! The engine performs no I/O, so the only failures are input validation at
//! construction time. Out-of-bounds access is not an error: reads return `None`
//! and writes are ignored.

/// Errors raised while building a [`Grid`](crate::grid::Grid)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// Width or height is zero, or `width * height` overflows
    InvalidDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// A buffer length does not match `width * height`
    ShapeMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },
    /// A raster value is not a finite, non-negative integer
    InvalidClassificationCode {
        /// Column of the offending value
        x: usize,
        /// Row of the offending value
        y: usize,
        /// The raw value
        value: f64,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimension { width, height } => write!(
                f,
                "Grid dimensions must be positive integers, got {width}x{height}"
            ),
            GridError::ShapeMismatch { expected, actual } => write!(
                f,
                "Grid buffer size mismatch: expected {expected} elements, got {actual}"
            ),
            GridError::InvalidClassificationCode { x, y, value } => write!(
                f,
                "Classification value at ({x}, {y}) should be a non-negative integer, got {value}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::InvalidDimension {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Grid dimensions must be positive integers, got 0x5"
        );

        let err = GridError::InvalidClassificationCode {
            x: 1,
            y: 2,
            value: 3.5,
        };
        assert!(err.to_string().contains("(1, 2)"));
        assert!(err.to_string().contains("3.5"));
    }
}
