//! Mail queue: an in-process FIFO that drains to an `EmailTransport` at a
//! fixed rate.
//!
//! One background task owns the transport and sends at most one email per
//! tick. Ticks missed while the queue was idle are not caught up, so a burst
//! after a quiet period is still paced.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::email::transport::{EmailError, EmailTransport, OutboundEmail};

struct Job {
    email: OutboundEmail,
    reply: Option<oneshot::Sender<Result<(), EmailError>>>,
}

/// Cloneable handle to the queue. The worker stops once every handle is dropped
/// and the backlog has drained.
#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl MailQueue {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(transport: Arc<dyn EmailTransport>, rate_per_second: NonZeroU32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let period = Duration::from_secs_f64(1.0 / f64::from(rate_per_second.get()));
        tokio::spawn(run_worker(rx, transport, period));
        info!("Mail queue started ({} emails/s)", rate_per_second);
        Self { tx }
    }

    /// Queues an email and returns immediately. Delivery failures are logged by
    /// the worker.
    pub fn enqueue(&self, email: OutboundEmail) -> Result<(), EmailError> {
        self.tx
            .send(Job { email, reply: None })
            .map_err(|_| EmailError::QueueClosed)
    }

    /// Queues an email and waits for its delivery result.
    pub async fn send(&self, email: OutboundEmail) -> Result<(), EmailError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job {
                email,
                reply: Some(reply),
            })
            .map_err(|_| EmailError::QueueClosed)?;
        rx.await.map_err(|_| EmailError::QueueClosed)?
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<Job>,
    transport: Arc<dyn EmailTransport>,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while let Some(job) = rx.recv().await {
        ticker.tick().await;

        let result = transport.send(&job.email).await;
        if let Err(e) = &result {
            warn!("Failed to send email to {}: {e}", job.email.to);
        }
        if let Some(reply) = job.reply {
            // Caller may have stopped waiting.
            let _ = reply.send(result);
        }
    }

    debug!("Mail queue worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, Instant)>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl EmailTransport for RecordingTransport {
        async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
            if self.fail_for.as_deref() == Some(email.to.as_str()) {
                return Err(EmailError::Api {
                    status: 422,
                    message: "invalid recipient".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((email.to.clone(), Instant::now()));
            Ok(())
        }
    }

    fn email(to: &str) -> OutboundEmail {
        OutboundEmail {
            to: to.to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    fn rate(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_sends_in_fifo_order_at_fixed_rate() {
        let transport = Arc::new(RecordingTransport::default());
        let queue = MailQueue::spawn(transport.clone(), rate(2));

        let start = Instant::now();
        queue.enqueue(email("a@example.com")).unwrap();
        queue.enqueue(email("b@example.com")).unwrap();
        queue.send(email("c@example.com")).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        let order: Vec<&str> = sent.iter().map(|(to, _)| to.as_str()).collect();
        assert_eq!(order, vec!["a@example.com", "b@example.com", "c@example.com"]);

        // 3 emails at 2/s need at least two half-second gaps.
        assert!(sent[2].1 - start >= Duration::from_millis(1000));
        for pair in sent.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_does_not_allow_a_burst() {
        let transport = Arc::new(RecordingTransport::default());
        let queue = MailQueue::spawn(transport.clone(), rate(1));

        queue.send(email("first@example.com")).await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        queue.enqueue(email("second@example.com")).unwrap();
        queue.send(email("third@example.com")).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert!(sent[2].1 - sent[1].1 >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_send_reports_error_and_queue_continues() {
        let transport = Arc::new(RecordingTransport {
            fail_for: Some("bad@example.com".to_string()),
            ..Default::default()
        });
        let queue = MailQueue::spawn(transport.clone(), rate(5));

        let err = queue.send(email("bad@example.com")).await.unwrap_err();
        assert!(matches!(err, EmailError::Api { status: 422, .. }));

        queue.send(email("good@example.com")).await.unwrap();
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "good@example.com");
    }
}
