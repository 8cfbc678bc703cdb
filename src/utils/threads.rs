use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

/// 以信号量限制并发数执行一组异步任务
///
/// 返回结果的顺序与传入任务的顺序一致，调用方可以依赖
/// 该顺序做后续聚合。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, limit: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let limit = limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));

    let bounded = futures.into_iter().map(|future| {
        let semaphore = semaphore.clone();
        async move {
            // 信号量在本函数内创建且不会关闭，acquire不会失败
            let _permit = semaphore.acquire().await.ok();
            future.await
        }
    });

    join_all(bounded).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_results_preserve_input_order() {
        let futures: Vec<_> = (0..8u64)
            .map(|i| {
                Box::pin(async move {
                    // 让先提交的任务睡得更久，验证结果仍按提交顺序返回
                    tokio::time::sleep(std::time::Duration::from_millis(8 - i)).await;
                    i
                })
            })
            .collect();

        let results = do_parallel_with_limit(futures, 4).await;
        assert_eq!(results, (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_limit() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let futures: Vec<_> = (0..10)
            .map(|_| {
                let active = active.clone();
                let peak = peak.clone();
                Box::pin(async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        do_parallel_with_limit(futures, 3).await;
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_zero_limit_is_clamped() {
        let futures = vec![Box::pin(async { 42 })];
        let results = do_parallel_with_limit(futures, 0).await;
        assert_eq!(results, vec![42]);
    }
}
