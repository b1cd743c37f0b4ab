//! Shared test utilities for the pointmap workspace.
//!
//! - [`fixtures`]: raw JSON payloads in both upstream record shapes
//! - [`generators`]: deterministic synthetic payloads, valid and invalid
//! - [`paths`]: locating the sample files under `testdata/`
//!
//! Add as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a sample file under `testdata/`, or skip the test when it is absent.
///
/// ```ignore
/// let path = require_test_file!("members_points.json");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: sample '{}' not found (set TEST_DATA_DIR)", $name);
                return;
            }
        }
    }};
}

/// Like [`require_test_file!`] for several files; yields a `Vec<PathBuf>`.
#[macro_export]
macro_rules! require_test_files {
    ($($name:expr),+ $(,)?) => {{
        vec![$($crate::require_test_file!($name)),+]
    }};
}

/// Assert two floating-point values differ by at most `epsilon`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert a bounding box matches `(min_lon, min_lat, max_lon, max_lat)` within `epsilon`.
#[macro_export]
macro_rules! assert_bbox_approx_eq {
    ($bbox:expr, ($min_lon:expr, $min_lat:expr, $max_lon:expr, $max_lat:expr), $epsilon:expr) => {{
        let bbox = $bbox;
        $crate::assert_approx_eq!(bbox.min_lon, $min_lon, $epsilon);
        $crate::assert_approx_eq!(bbox.min_lat, $min_lat, $epsilon);
        $crate::assert_approx_eq!(bbox.max_lon, $max_lon, $epsilon);
        $crate::assert_approx_eq!(bbox.max_lat, $max_lat, $epsilon);
    }};
}
