use crate::memory::Primitive;

/// Euclidean distance between two equal-length coordinate slices.
#[inline(always)]
pub(crate) fn euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().cloned()
        .zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)    // <a> - <b>
        .map(|v| v * v)             // <components> ^2
        .sum::<T>()                 // sum(<components>^2)
        .sqrt()
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_f64() {
        assert_approx_eq!(euclidean(&[0.0f64], &[0.0]), 0.0);
        assert_approx_eq!(euclidean(&[1.0f64], &[5.0]), 4.0);
        assert_approx_eq!(euclidean(&[0.0f64, 0.0], &[3.0, 4.0]), 5.0);
        assert_approx_eq!(euclidean(&[1.0f64, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn euclidean_f32() {
        assert_approx_eq!(euclidean(&[0.0f32, 0.0], &[3.0, 4.0]), 5.0, 1e-6f32);
        assert_approx_eq!(euclidean(&[-1.0f32, -1.0], &[1.0, 1.0]), 8.0f32.sqrt(), 1e-6f32);
    }

    #[test]
    fn euclidean_is_symmetric() {
        let (a, b) = ([0.25f64, 7.5, -3.0], [1.0f64, -2.0, 0.5]);
        assert_approx_eq!(euclidean(&a, &b), euclidean(&b, &a));
    }
}
