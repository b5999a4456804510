use crate::memory::*;
use crate::{KMeans, KMeansConfig, KMeansState};

#[inline(always)]
pub fn calculate<'a, T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'a, T>) {
    kmean.samples.chunks_exact(kmean.sample_dims)
        .take(state.k)
        .enumerate()
        .for_each(|(ci, c)| { // Copy the first k samples into state.centroids
            state.set_centroid_from_iter(ci, c.iter().cloned());
        });
}
