//! # kmeans - API documentation
//!
//! Kmeans is a small rust library (plus a thin CLI) for the calculation of
//! k-means-clustering with fully deterministic behavior.
//!
//! ## Design target
//! Its main target is reproducibility: centroids are seeded from the first k
//! samples instead of any randomized scheme, assignment ties resolve to the
//! lowest centroid index, and convergence is detected from per-centroid
//! Euclidean displacement against the previous iteration. Given the same input,
//! every run produces the same output. The API-surface is rather plain: samples
//! are given using a raw row-major vector, instead of any high-level
//! arithmetics / matrix crate such as nalgebra or ndarray.
//!
//! ## Algorithm
//! The implemented variant is Lloyd's algorithm: seed k centroids, then repeat
//! { assign every sample to its nearest centroid; recompute every centroid as
//! the mean of its assigned samples } until either no centroid moves by epsilon
//! or more within one iteration, or the iteration budget runs out. The
//! per-sample nearest-centroid search is parallelized with rayon.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans::*;
//!
//! let (sample_cnt, sample_dims, k) = (4, 1, 2);
//! let samples = vec![1.0f64, 1.5, 5.0, 5.5];
//!
//! let kmean = KMeans::new(samples, sample_cnt, sample_dims);
//! let result = kmean
//!     .kmeans_lloyd(k, DEFAULT_MAX_ITER, KMeans::init_first_k, &KMeansConfig::default())
//!     .unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("Outcome: {:?} after {} iterations", result.outcome, result.iterations);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans::*;
//!
//! let samples = vec![1.0f64, 1.5, 5.0, 5.5];
//!
//! let conf = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|_, nr, max_shift|
//!         println!("Iteration {} - largest centroid displacement: {}", nr, max_shift))
//!     .build();
//!
//! let kmean = KMeans::new(samples, 4, 1);
//! let result = kmean.kmeans_lloyd(2, DEFAULT_MAX_ITER, KMeans::init_first_k, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. This struct is generic over the underlying
//! primitive type, that should be used for the calculations. To use KMeans, an instance of this
//! struct is created, taking over the sample data into its ownership.
//!
//! The [`KMeans`] struct's instance-method [`KMeans::kmeans_lloyd`] runs one clustering calculation.
//! Calling it does not mutate the struct, so multiple runs can be done against the same sample data.
//! Internally, a new instance of [`KMeansState`] is used to store the state (and finally the result)
//! of a calculation. Runtime knobs (convergence epsilon, the empty-cluster policy, status callbacks)
//! are grouped in [`KMeansConfig`]; the centroid initialization method is a static method of
//! [`KMeans`], passed in by reference.
//!
//! The `cli` module and the `kmeans` binary wrap the library with a fixed command-line contract:
//! positional `K N d [max_iter]` arguments, comma-separated stdin points, and `%.4f`-formatted
//! centroids on stdout.

#[macro_use] mod helpers;
mod api;
mod convergence;
mod inits;
mod memory;
mod variants;

pub mod cli;

pub use api::{
    EmptyClusterPolicy, InitDoneCallbackFn, IterationDoneCallbackFn, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansError,
    KMeansState, Outcome, DEFAULT_EPSILON, DEFAULT_MAX_ITER,
};
pub use memory::Primitive;
