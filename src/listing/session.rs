//! Interactive listing session with a debounced search box

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::presenter::{ListingEvent, ListingPresenter, RenderInstruction};

/// Input to a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Applied immediately
    Event(ListingEvent),
    /// Raw search box contents; applied once typing pauses
    Keystroke(String),
}

/// A query waiting for the quiet window to elapse
struct PendingQuery {
    query: String,
    deadline: Instant,
}

/// Drives a [`ListingPresenter`] from an input channel
pub struct ListingSession {
    presenter: ListingPresenter,
    debounce: Duration,
}

impl ListingSession {
    pub fn new(presenter: ListingPresenter, debounce: Duration) -> Self {
        Self {
            presenter,
            debounce,
        }
    }

    /// Run the session on a new task
    pub fn spawn(
        self,
        buffer: usize,
    ) -> (
        mpsc::Sender<SessionInput>,
        mpsc::Receiver<RenderInstruction>,
        JoinHandle<ListingPresenter>,
    ) {
        let (input_tx, input_rx) = mpsc::channel(buffer);
        let (output_tx, output_rx) = mpsc::channel(buffer);
        let handle = tokio::spawn(self.run(input_rx, output_tx));
        (input_tx, output_rx, handle)
    }

    /// Process input until the channel closes, emitting a render instruction
    /// at start and for every accepted event
    ///
    /// A query still pending when the input closes is applied before
    /// returning. Stops early if the output receiver is dropped.
    pub async fn run(
        mut self,
        mut input: mpsc::Receiver<SessionInput>,
        output: mpsc::Sender<RenderInstruction>,
    ) -> ListingPresenter {
        if output.send(self.presenter.render()).await.is_err() {
            return self.presenter;
        }

        let mut pending: Option<PendingQuery> = None;

        loop {
            let deadline = pending.as_ref().map(|p| p.deadline);

            let event = tokio::select! {
                received = input.recv() => match received {
                    Some(SessionInput::Keystroke(query)) => {
                        pending = Some(PendingQuery {
                            query,
                            deadline: Instant::now() + self.debounce,
                        });
                        continue;
                    }
                    Some(SessionInput::Event(event)) => {
                        if matches!(event, ListingEvent::Reset | ListingEvent::ClearSearch)
                            && pending.take().is_some()
                        {
                            tracing::debug!("Pending search cancelled by {:?}", event);
                        }
                        event
                    }
                    None => {
                        if let Some(PendingQuery { query, .. }) = pending.take() {
                            if let Some(render) = self.presenter.handle(ListingEvent::QueryChanged(query)) {
                                let _ = output.send(render).await;
                            }
                        }
                        break;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    match pending.take() {
                        Some(PendingQuery { query, .. }) => ListingEvent::QueryChanged(query),
                        None => continue,
                    }
                }
            };

            if let Some(render) = self.presenter.handle(event) {
                if output.send(render).await.is_err() {
                    tracing::debug!("Listing output closed, ending session");
                    break;
                }
            }
        }

        self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_posts;
    use crate::listing::CategoryFilter;
    use std::sync::Arc;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn session() -> ListingSession {
        ListingSession::new(ListingPresenter::new(Arc::from(default_posts()), 9), DEBOUNCE)
    }

    fn keystroke(query: &str) -> SessionInput {
        SessionInput::Keystroke(query.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_render() {
        let (input, mut output, handle) = session().spawn(8);
        let first = output.recv().await.unwrap();
        assert_eq!(first.results_text, "Showing 1-6 of 6 posts");

        drop(input);
        handle.await.unwrap();
        assert!(output.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_window_apply_once() {
        let (input, mut output, handle) = session().spawn(8);
        output.recv().await.unwrap();

        let started = Instant::now();
        for query in ["a", "aw", "aws"] {
            input.send(keystroke(query)).await.unwrap();
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        let render = output.recv().await.unwrap();
        assert_eq!(render.query, "aws");
        assert_eq!(render.view.total_filtered, 2);
        assert!(started.elapsed() >= DEBOUNCE);

        drop(input);
        handle.await.unwrap();
        assert!(output.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_apply_each_query() {
        let (input, mut output, handle) = session().spawn(8);
        output.recv().await.unwrap();

        input.send(keystroke("linux")).await.unwrap();
        assert_eq!(output.recv().await.unwrap().query, "linux");

        input.send(keystroke("dns")).await.unwrap();
        assert_eq!(output.recv().await.unwrap().query, "dns");

        drop(input);
        let presenter = handle.await.unwrap();
        assert_eq!(presenter.state().query, "dns");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_query() {
        let (input, mut output, handle) = session().spawn(8);
        output.recv().await.unwrap();

        input.send(keystroke("linux")).await.unwrap();
        input
            .send(SessionInput::Event(ListingEvent::Reset))
            .await
            .unwrap();

        let render = output.recv().await.unwrap();
        assert_eq!(render.query, "");

        tokio::time::sleep(DEBOUNCE * 2).await;
        drop(input);
        let presenter = handle.await.unwrap();
        assert_eq!(presenter.state().query, "");
        assert!(output.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_apply_immediately() {
        let (input, mut output, handle) = session().spawn(8);
        output.recv().await.unwrap();

        let started = Instant::now();
        input
            .send(SessionInput::Event(ListingEvent::CategorySelected(
                CategoryFilter::parse("devops"),
            )))
            .await
            .unwrap();
        let render = output.recv().await.unwrap();
        assert_eq!(render.view.total_filtered, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);

        input
            .send(SessionInput::Event(ListingEvent::PreviousPage))
            .await
            .unwrap();
        drop(input);
        handle.await.unwrap();
        assert!(output.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_query_flushed_on_close() {
        let (input, mut output, handle) = session().spawn(8);
        output.recv().await.unwrap();

        input.send(keystroke("firewall")).await.unwrap();
        drop(input);

        let render = output.recv().await.unwrap();
        assert_eq!(render.view.total_filtered, 1);
        handle.await.unwrap();
    }
}
