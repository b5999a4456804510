use crate::{helpers, memory::*};
use rayon::prelude::*;

/// Default iteration budget of a clustering run.
pub const DEFAULT_MAX_ITER: usize = 200;
/// Default convergence threshold on per-centroid Euclidean displacement.
pub const DEFAULT_EPSILON: f64 = 0.001;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Policy applied by the centroid update step when a cluster ends an iteration
/// with zero assigned samples. A naive mean divides by the member count
/// unconditionally, which turns an empty cluster into a NaN centroid; this
/// crate requires an explicit behavior instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid of an empty cluster unchanged for this iteration.
    /// A later iteration may still capture samples for it.
    #[default]
    Freeze,
    /// Abort the run with [`KMeansError::EmptyCluster`].
    Report,
}

/// Errors reported by a running k-means calculation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KMeansError {
    /// A cluster ended an iteration without any assigned samples, and the
    /// configured [`EmptyClusterPolicy`] was `Report`.
    EmptyCluster(usize),
}
impl std::fmt::Display for KMeansError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KMeansError::EmptyCluster(centroid_id) => write!(f, "cluster {} has no assigned samples", centroid_id),
        }
    }
}
impl std::error::Error for KMeansError {}

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the convergence threshold, the empty-cluster policy, and a couple of callbacks that can be
/// set to get status information from a running calculation.
///
/// For more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **max_shift**: Largest Euclidean displacement any centroid made in this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Convergence threshold. The run converges once every centroid moved strictly
    /// less than this between two consecutive iterations.
    pub(crate) epsilon: T,
    /// Behavior when a cluster receives zero samples in an iteration.
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            epsilon: T::from(DEFAULT_EPSILON).unwrap(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { Ok(()) }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the convergence threshold on per-centroid Euclidean displacement.
    /// ## Default
    /// [`DEFAULT_EPSILON`] (0.001)
    pub fn epsilon(mut self, epsilon: T) -> Self {
        self.config.epsilon = epsilon; self
    }
    /// Set the behavior for clusters that end an iteration without samples. For more
    /// information, see documentation of [`EmptyClusterPolicy`].
    /// ## Default
    /// [`EmptyClusterPolicy::Freeze`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}

/// How a finished clustering run terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every centroid moved strictly less than epsilon in the final iteration.
    Converged,
    /// The iteration budget ran out before the centroids settled.
    Exhausted,
}

/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used for multiple runs, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each cluster
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **iterations**: Amount of iterations the run executed
/// - **outcome**: Whether the run converged or exhausted its iteration budget
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub outcome: Outcome,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            centroids: vec![T::zero(); sample_dims * k],
            centroid_frequency: vec![0usize; k],
            assignments: vec![0usize; sample_cnt],
            iterations: 0,
            outcome: Outcome::Exhausted,
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c, s)| *c = s);
    }
}

/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples array will be the type used internally for all calculations, as well as the
/// result as stored in the returned [`KMeansState`] structure.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - First-k [`KMeans::init_first_k`]
pub struct KMeans<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **samples** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Self {
        assert!(samples.len() == sample_cnt * sample_dims);
        Self {
            sample_cnt,
            sample_dims,
            samples
        }
    }

    /// Re-assign every sample to its nearest centroid, measured by Euclidean distance.
    /// Ties resolve to the centroid with the lowest index: the search starts at positive
    /// infinity and only a strictly smaller distance replaces the current best, so the
    /// first minimum in index order wins.
    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>) {
        let centroids = &state.centroids;
        let dims = self.sample_dims;

        // manually calculate work-packet size, because rayon does not do static scheduling
        // (which is more appropriate here)
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.samples.par_chunks(dims)
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter_mut())
            .for_each(|(s, assignment)| {
                let (best_idx, _) = centroids.chunks_exact(dims)
                    .map(|c| helpers::euclidean(s, c))
                    .enumerate()
                    .fold((0usize, T::infinity()), |best, (idx, dist)| {
                        if dist < best.1 { (idx, dist) } else { best }
                    });
                *assignment = best_idx;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut [usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Normal K-Means algorithm implementation (Lloyd's algorithm) with deterministic
    /// seeding and displacement-based convergence.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit on the amount of iterations; the run stops early once every
    ///   centroid moves strictly less than the configured epsilon within one iteration
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result), or a
    /// [`KMeansError`] when the configured [`EmptyClusterPolicy`] aborted the run.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans::*;
    ///
    /// let (sample_cnt, sample_dims, k) = (4, 1, 2);
    /// let samples = vec![1.0f64, 1.5, 5.0, 5.5];
    ///
    /// let kmean = KMeans::new(samples, sample_cnt, sample_dims);
    /// let result = kmean
    ///     .kmeans_lloyd(k, DEFAULT_MAX_ITER, KMeans::init_first_k, &KMeansConfig::default())
    ///     .unwrap();
    ///
    /// assert_eq!(result.centroids, vec![1.25, 5.25]);
    /// assert_eq!(result.outcome, Outcome::Converged);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// First-k initialization method
    ///
    /// ## Description
    /// This initialization method copies the first k samples verbatim into the initial
    /// centroids. Seeding is fully deterministic, trading clustering quality for
    /// reproducible runs.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_first_k<'a>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) {
        crate::inits::firstk::calculate(kmean, state, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn cluster_assignments_match_naive_search() {
        for sample_dims in [1, 2, 3, 7, 16, 100] {
            calculate_cluster_assignments::<f64>(sample_dims);
            calculate_cluster_assignments::<f32>(sample_dims);
        }
    }

    fn calculate_cluster_assignments<T: Primitive>(sample_dims: usize) {
        let sample_cnt = 1000;
        let k = 5;

        let mut rnd = rand::rngs::StdRng::seed_from_u64(1337);
        let mut samples = vec![T::zero(); sample_cnt * sample_dims];
        samples.iter_mut().for_each(|v| *v = T::from(rnd.gen::<f64>()).unwrap());

        let kmean = KMeans::new(samples, sample_cnt, sample_dims);
        let mut state = KMeansState::new(kmean.sample_cnt, kmean.sample_dims, k);
        KMeans::init_first_k(&kmean, &mut state, &KMeansConfig::default());

        // calculate assignments using a straightforward sequential search
        let mut should_assignments = state.assignments.clone();
        kmean.samples.chunks_exact(sample_dims)
            .zip(should_assignments.iter_mut())
            .for_each(|(s, assignment)| {
                let mut best_idx = 0;
                let mut best_dist = T::infinity();
                for (idx, c) in state.centroids.chunks_exact(sample_dims).enumerate() {
                    let dist = crate::helpers::euclidean(s, c);
                    if dist < best_dist {
                        best_idx = idx;
                        best_dist = dist;
                    }
                }
                *assignment = best_idx;
            });

        kmean.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments, should_assignments);
    }

    #[test]
    fn assignment_tie_breaks_to_lowest_centroid_index() {
        // Sample 1.0 is exactly equidistant to both centroids
        let kmean = KMeans::new(vec![0.0f64, 2.0, 1.0], 3, 1);
        let mut state = KMeansState::new(3, 1, 2);
        state.set_centroid_from_iter(0, [0.0].iter().cloned());
        state.set_centroid_from_iter(1, [2.0].iter().cloned());

        kmean.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments, vec![0, 1, 0]);
    }

    #[test]
    fn assignment_of_duplicate_samples_is_stable() {
        // Duplicate seed samples produce duplicate centroids; everything must land
        // in the lower-indexed one.
        let kmean = KMeans::new(vec![1.0f64, 1.0, 1.0], 3, 1);
        let mut state = KMeansState::new(3, 1, 2);
        KMeans::init_first_k(&kmean, &mut state, &KMeansConfig::default());

        kmean.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments, vec![0, 0, 0]);
    }

    #[test]
    fn cluster_frequencies_count_all_samples() {
        let kmean = KMeans::new(vec![0.0f64; 6], 6, 1);
        let mut frequencies = vec![0usize; 3];
        let used = kmean.update_cluster_frequencies(&[0, 2, 0, 0, 2, 2], &mut frequencies);
        assert_eq!(used, 2);
        assert_eq!(frequencies, vec![3, 0, 3]);
    }
}
