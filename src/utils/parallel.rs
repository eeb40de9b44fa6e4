use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use log::{debug, info};
use rayon::prelude::*;

static POOL_INIT: Once = Once::new();

pub trait ParallelProcessor {
    fn init_parallel_processing() {
        POOL_INIT.call_once(|| {
            // Fails if someone else already built the global pool; that pool is used as is.
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(num_cpus::get())
                .build_global()
            {
                debug!("Global thread pool already configured: {}", e);
            }
        });
        debug!("Using {} CPU threads for processing", rayon::current_num_threads());
    }

    fn get_progress_counter() -> AtomicUsize {
        AtomicUsize::new(0)
    }

    /// Maps every item on the pool. Output order matches input order.
    fn parallel_map<T, F, R>(items: &[T], label: &str, f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        let progress = Self::get_progress_counter();
        let total = items.len();

        items
            .par_iter()
            .map(|item| {
                let result = f(item);
                let processed = progress.fetch_add(1, Ordering::SeqCst) + 1;
                if processed % 100 == 0 || processed == total {
                    info!(
                        "{}: {}/{} ({:.1}%)",
                        label,
                        processed,
                        total,
                        (processed as f64 / total as f64) * 100.0
                    );
                }
                result
            })
            .collect()
    }
}
