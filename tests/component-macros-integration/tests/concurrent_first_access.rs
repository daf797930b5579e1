//! 全局容器的并发首次访问
//!
//! 全局容器每个进程只初始化一次，所以本文件只包含一个测试。

use component_macros::{injectable, provider};
use di_impl::Container;
use std::sync::{Arc, Barrier};

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[provider(role = dyn Clock)]
pub struct FixedClock;

impl FixedClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

pub struct Scheduler {
    clock: Box<dyn Clock>,
}

#[injectable]
impl Scheduler {
    #[inject]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock }
    }
}

const THREADS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_populates_once() {
    assert!(!Container::is_initialized());

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            tokio::task::spawn_blocking(move || {
                barrier.wait();
                let container = Container::get_instance();
                (
                    container as *const Container as usize,
                    container.report().populated_at,
                )
            })
        })
        .collect();

    let mut observed = Vec::with_capacity(THREADS);
    for handle in handles {
        observed.push(handle.await.unwrap());
    }

    let container = Container::get_instance();
    let expected = (
        container as *const Container as usize,
        container.report().populated_at,
    );
    assert!(observed.iter().all(|entry| *entry == expected));
    assert_eq!(container.report().providers_declared, 1);
    assert_eq!(container.report().injection_points_declared, 1);

    let scheduler = container.build::<Scheduler>().unwrap().unwrap();
    assert_eq!(scheduler.clock.now(), 42);
}
