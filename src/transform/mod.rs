//! Series transformations.
//!
//! # Example
//!
//! ```
//! use registration_trends::transform::trailing_mean;
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let ma = trailing_mean(&series, 3);
//! assert_eq!(ma[0], 1.0);
//! assert_eq!(ma[4], 4.0);
//! ```

pub mod window;

pub use window::{rolling_mean, trailing_mean};
