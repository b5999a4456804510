use crate::helpers;
use crate::memory::*;

/// Stateful convergence detector for a running k-means calculation.
///
/// Owns the previous-iteration centroid snapshot. After every centroid update,
/// [`ConvergenceCheck::next`] compares the freshly updated centroids against that
/// snapshot: the run converged once every centroid moved strictly less than
/// epsilon. When the check does not pass, the snapshot is refreshed, so the next
/// invocation compares against this iteration's result. On convergence the
/// snapshot is left alone; the calculation terminates anyway.
pub(crate) struct ConvergenceCheck<T: Primitive> {
    epsilon: T,
    dims: usize,
    previous: Vec<T>,
}
impl<T: Primitive> ConvergenceCheck<T> {
    /// Seed the detector with the initial centroids, so the first check measures
    /// the movement caused by the first iteration's update step.
    pub fn new(initial_centroids: &[T], dims: usize, epsilon: T) -> Self {
        Self {
            epsilon,
            dims,
            previous: initial_centroids.to_vec(),
        }
    }

    /// Function that has to be called once per iteration, after the centroid update.
    /// ## Arguments
    /// - **centroids**: The updated centroid buffer [row-major]
    /// ## Returns
    /// - `(converged, max_shift)` where **max_shift** is the largest Euclidean
    ///   displacement any centroid made since the previous iteration
    pub fn next(&mut self, centroids: &[T]) -> (bool, T) {
        let mut converged = true;
        let mut max_shift = T::zero();
        for (c, prev) in centroids.chunks_exact(self.dims).zip(self.previous.chunks_exact(self.dims)) {
            let shift = helpers::euclidean(c, prev);
            // NaN shifts (possible with hand-planted centroids) must not count as converged
            if !(shift < self.epsilon) {
                converged = false;
            }
            if shift > max_shift {
                max_shift = shift;
            }
        }
        if !converged {
            self.previous.copy_from_slice(centroids);
        }
        (converged, max_shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn detects_settled_centroids_f32() { detects_settled_centroids::<f32>(); }
    #[test] fn detects_settled_centroids_f64() { detects_settled_centroids::<f64>(); }

    fn detects_settled_centroids<T: Primitive + std::fmt::LowerExp>() {
        let eps = T::from(0.001).unwrap();
        {
            let initial = [T::zero(), T::zero()];
            let mut check = ConvergenceCheck::new(&initial, 1, eps);
            let (converged, _) = check.next(&initial);
            assert_eq!(converged, true);
        }
        {
            // One centroid moves exactly epsilon: strictly-less comparison fails
            let mut check = ConvergenceCheck::new(&[T::zero(), T::zero()], 1, eps);
            let (converged, max_shift) = check.next(&[T::zero(), T::from(0.001).unwrap()]);
            assert_eq!(converged, false);
            assert_approx_eq!(max_shift, T::from(0.001).unwrap(), T::from(1e-6).unwrap());
        }
        {
            let mut check = ConvergenceCheck::new(&[T::zero(), T::zero()], 1, eps);
            let (converged, _) = check.next(&[T::from(0.0009).unwrap(), T::zero()]);
            assert_eq!(converged, true);
        }
    }

    #[test]
    fn every_centroid_must_settle() {
        let mut check = ConvergenceCheck::new(&[0.0f64, 0.0, 0.0, 0.0], 2, 0.001);
        // First centroid stands still, second one keeps moving
        let (converged, max_shift) = check.next(&[0.0, 0.0, 2.0, 0.0]);
        assert_eq!(converged, false);
        assert_approx_eq!(max_shift, 2.0);
    }

    #[test]
    fn snapshot_refreshes_between_unconverged_iterations() {
        let mut check = ConvergenceCheck::new(&[0.0f64], 1, 0.001);
        assert_eq!(check.next(&[5.0]).0, false);
        // Movement is measured against the refreshed snapshot, not the seed
        assert_eq!(check.next(&[5.0]).0, true);
    }

    #[test]
    fn snapshot_survives_converged_iterations() {
        let mut check = ConvergenceCheck::new(&[0.0f64], 1, 0.5);
        assert_eq!(check.next(&[0.1]).0, true);
        assert_eq!(check.next(&[0.2]).0, true);
        // Still compared against the original snapshot: 0.6 > 0.5
        assert_eq!(check.next(&[0.6]).0, false);
    }

    #[test]
    fn nan_displacement_is_not_converged() {
        let mut check = ConvergenceCheck::new(&[0.0f64], 1, 0.001);
        let (converged, _) = check.next(&[f64::NAN]);
        assert_eq!(converged, false);
    }
}
