//! Bounded-concurrency fan-out with an optional deadline.
//!
//! Jobs run at most `limit` at a time. Results are buffered into one slot
//! per job and handed back in job order once everything has settled or the
//! deadline passes, so callers never see completion order.

use std::future::Future;
use std::pin::pin;

use futures::stream::{self, StreamExt};
use tokio::time::Instant;
use tracing::debug;

/// How a single job ended.
#[derive(Debug)]
pub enum Outcome<T, E> {
    Done(T),
    Failed(E),
    /// Still running when the deadline passed; its work was cancelled.
    TimedOut,
}

impl<T, E> Outcome<T, E> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

/// Run `run` over every job, at most `limit` at once.
///
/// Returns each job with its outcome, in the order the jobs were given.
/// When `deadline` passes, unfinished jobs are dropped and reported as
/// [`Outcome::TimedOut`].
pub async fn fan_out<J, T, E, F, Fut>(
    jobs: Vec<J>,
    limit: usize,
    deadline: Option<Instant>,
    run: F,
) -> Vec<(J, Outcome<T, E>)>
where
    J: Clone,
    F: Fn(J) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut slots: Vec<Option<Result<T, E>>> = jobs.iter().map(|_| None).collect();

    {
        let mut results = pin!(
            stream::iter(jobs.iter().cloned().enumerate())
                .map(|(index, job)| {
                    let fut = run(job);
                    async move { (index, fut.await) }
                })
                .buffer_unordered(limit.max(1))
        );

        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, results.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        let pending = slots.iter().filter(|s| s.is_none()).count();
                        debug!(pending, "Fan-out deadline passed, cancelling");
                        break;
                    }
                },
                None => results.next().await,
            };

            match next {
                Some((index, result)) => slots[index] = Some(result),
                None => break,
            }
        }
    }

    jobs.into_iter()
        .zip(slots)
        .map(|(job, slot)| {
            let outcome = match slot {
                Some(Ok(value)) => Outcome::Done(value),
                Some(Err(error)) => Outcome::Failed(error),
                None => Outcome::TimedOut,
            };
            (job, outcome)
        })
        .collect()
}
