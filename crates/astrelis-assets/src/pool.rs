//! Background worker pool for asynchronous loads.
//!
//! A simplified version of a work-stealing thread pool: one shared queue per
//! priority tier, all guarded by a single mutex/condvar pair. Workers always
//! drain High before Normal before Low. `Critical` work never reaches this
//! pool - the cache runs it synchronously on the calling thread instead.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use crate::key::AssetPriority;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Queues {
    high: VecDeque<Job>,
    normal: VecDeque<Job>,
    low: VecDeque<Job>,
    shutdown: bool,
}

impl Queues {
    fn pop(&mut self) -> Option<Job> {
        self.high
            .pop_front()
            .or_else(|| self.normal.pop_front())
            .or_else(|| self.low.pop_front())
    }

    fn is_empty(&self) -> bool {
        self.high.is_empty() && self.normal.is_empty() && self.low.is_empty()
    }
}

struct Shared {
    queues: Mutex<Queues>,
    condvar: Condvar,
}

/// A small fixed-size pool of background workers that execute queued loads
/// in priority order.
pub struct AssetThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl AssetThreadPool {
    /// `thread_count == 0` picks `cores - 1` (minimum 1).
    pub fn new(thread_count: usize) -> Self {
        let thread_count = if thread_count == 0 {
            num_cpus::get().saturating_sub(1).max(1)
        } else {
            thread_count
        };

        let shared = Arc::new(Shared {
            queues: Mutex::new(Queues {
                high: VecDeque::new(),
                normal: VecDeque::new(),
                low: VecDeque::new(),
                shutdown: false,
            }),
            condvar: Condvar::new(),
        });

        let workers = (0..thread_count)
            .map(|index| {
                let shared = shared.clone();
                std::thread::Builder::new()
                    .name(format!("astrelis-assets-worker-{index}"))
                    .spawn(move || worker_loop(shared))
                    .expect("failed to spawn asset worker thread")
            })
            .collect();

        Self { shared, workers }
    }

    /// Submit a job at the given priority. `Critical` jobs run inline on the
    /// calling thread and never touch the queues.
    pub fn submit<F>(&self, priority: AssetPriority, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if priority == AssetPriority::Critical {
            job();
            return;
        }

        let mut queues = self.shared.queues.lock().unwrap();
        let job: Job = Box::new(job);
        match priority {
            AssetPriority::High => queues.high.push_back(job),
            AssetPriority::Normal => queues.normal.push_back(job),
            AssetPriority::Low => queues.low.push_back(job),
            AssetPriority::Critical => unreachable!(),
        }
        self.shared.condvar.notify_one();
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for AssetThreadPool {
    fn drop(&mut self) {
        {
            let mut queues = self.shared.queues.lock().unwrap();
            queues.shutdown = true;
        }
        self.shared.condvar.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: Arc<Shared>) {
    loop {
        let mut queues = shared.queues.lock().unwrap();
        loop {
            if let Some(job) = queues.pop() {
                drop(queues);
                job();
                break;
            }
            if queues.shutdown {
                return;
            }
            queues = shared.condvar.wait(queues).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn submitted_jobs_all_run() {
        let pool = AssetThreadPool::new(2);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..20 {
            let counter = counter.clone();
            pool.submit(AssetPriority::Normal, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn critical_priority_runs_inline_without_a_worker() {
        let pool = AssetThreadPool::new(0);
        let ran = Arc::new(AtomicUsize::new(0));
        let ran_clone = ran.clone();
        pool.submit(AssetPriority::Critical, move || {
            ran_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_thread_count_defaults_to_at_least_one_worker() {
        let pool = AssetThreadPool::new(0);
        assert!(pool.worker_count() >= 1);
    }
}
