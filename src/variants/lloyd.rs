use crate::convergence::ConvergenceCheck;
use crate::memory::*;
use crate::{EmptyClusterPolicy, KMeans, KMeansConfig, KMeansError, KMeansState, Outcome};

pub(crate) struct Lloyd<T: Primitive> {
    _p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Overwrite every centroid with the per-coordinate arithmetic mean of its
    /// assigned samples. Clusters without samples are handled according to the
    /// configured [`EmptyClusterPolicy`].
    fn update_centroids<'a>(data: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<(), KMeansError> {
        let dims = data.sample_dims;
        data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);

        // Sum all samples of a cluster together into new_centroids
        let mut new_centroids = vec![T::zero(); state.centroids.len()];
        data.samples.chunks_exact(dims)
            .zip(state.assignments.iter().cloned())
            .for_each(|(s, centroid_id)| {
                new_centroids.iter_mut().skip(centroid_id * dims).take(dims)
                    .zip(s.iter().cloned())
                    .for_each(|(acc, sv)| *acc += sv);
            });

        for (centroid_id, freq) in state.centroid_frequency.iter().cloned().enumerate() {
            if freq == 0 {
                match config.empty_cluster_policy {
                    // Previous centroid stays in place; a later iteration may repopulate it
                    EmptyClusterPolicy::Freeze => continue,
                    EmptyClusterPolicy::Report => return Err(KMeansError::EmptyCluster(centroid_id)),
                }
            }
            let count = T::from(freq).unwrap();
            state.centroids.iter_mut().skip(centroid_id * dims).take(dims)
                .zip(new_centroids.iter().cloned().skip(centroid_id * dims))
                .for_each(|(c, sum)| *c = sum / count);
        }
        Ok(())
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) {
        assert!(k >= 1 && k <= data.sample_cnt);

        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);

        // Initialize clusters and notify subscriber
        init(data, &mut state, config);
        (config.init_done)(&state);
        let mut convergence = ConvergenceCheck::new(&state.centroids, data.sample_dims, config.epsilon);

        for i in 1..=max_iter {
            data.update_cluster_assignments(&mut state);
            Self::update_centroids(data, &mut state, config)?;
            state.iterations = i;

            let (converged, max_shift) = convergence.next(&state.centroids);
            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, max_shift);
            if converged {
                state.outcome = Outcome::Converged;
                break;
            }
        }
        Ok(state)
    }
}
