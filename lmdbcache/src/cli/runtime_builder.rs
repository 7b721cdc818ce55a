use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::Builder;

/// Blocking threads used for cache transactions.
const MAX_BLOCKING_THREADS: usize = 8;

fn get_worker_thread_name() -> String {
    static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
    let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
    format!("lmdbcache-wrk-{}", id)
}

pub fn create_current_thread_runtime() -> io::Result<tokio::runtime::Runtime> {
    Builder::new_current_thread()
        .thread_name_fn(get_worker_thread_name)
        .max_blocking_threads(MAX_BLOCKING_THREADS)
        .enable_all()
        .build()
}
