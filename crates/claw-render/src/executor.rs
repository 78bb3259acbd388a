//! An abstraction over threading and parallelism systems such as Rayon.

/// Runs independent jobs and concatenates their outputs in job order.
pub trait Executor {
    fn flatten_into_vector<T, F>(&self, length: usize, builder: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> Vec<T> + Send + Sync;
}

/// Runs every job on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn flatten_into_vector<T, F>(&self, length: usize, builder: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> Vec<T> + Send + Sync,
    {
        (0..length).fold(Vec::new(), |mut out, index| {
            out.extend(builder(index));
            out
        })
    }
}

/// Work-stealing executor on the global rayon pool.
#[cfg(feature = "rayon")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RayonExecutor;

#[cfg(feature = "rayon")]
impl Executor for RayonExecutor {
    fn flatten_into_vector<T, F>(&self, length: usize, builder: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> Vec<T> + Send + Sync,
    {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        // `map` + `collect` preserves job order, unlike a bare fold/reduce.
        (0..length)
            .into_par_iter()
            .map(builder)
            .collect::<Vec<Vec<T>>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares<X: Executor>(executor: &X) -> Vec<usize> {
        executor.flatten_into_vector(8, |i| vec![i, i * i])
    }

    #[test]
    fn test_sequential_order() {
        let out = squares(&SequentialExecutor);
        assert_eq!(&out[..6], &[0, 0, 1, 1, 2, 4]);
        assert_eq!(out.len(), 16);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_rayon_matches_sequential() {
        assert_eq!(squares(&RayonExecutor), squares(&SequentialExecutor));
    }
}
