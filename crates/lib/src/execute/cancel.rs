//! Session cancellation.
//!
//! A [`CancelHandle`] is held by whoever reacts to termination requests; the
//! session and the process runner observe the paired [`Cancellation`].

use tokio::sync::watch;

/// Triggers cancellation of a running session.
#[derive(Debug)]
pub struct CancelHandle {
  tx: watch::Sender<bool>,
}

/// Observes whether the session has been cancelled.
#[derive(Debug, Clone)]
pub struct Cancellation {
  rx: watch::Receiver<bool>,
}

/// Create a connected handle/observer pair.
pub fn cancellation() -> (CancelHandle, Cancellation) {
  let (tx, rx) = watch::channel(false);
  (CancelHandle { tx }, Cancellation { rx })
}

impl CancelHandle {
  pub fn cancel(&self) {
    self.tx.send_replace(true);
  }
}

impl Cancellation {
  /// An observer that is never cancelled.
  pub fn never() -> Self {
    cancellation().1
  }

  pub fn is_cancelled(&self) -> bool {
    *self.rx.borrow()
  }

  /// Resolves once cancellation is requested.
  ///
  /// Pends forever if the handle is dropped without cancelling.
  pub async fn cancelled(&self) {
    let mut rx = self.rx.clone();
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
      std::future::pending::<()>().await;
    }
  }
}
