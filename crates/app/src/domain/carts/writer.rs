//! Cart persistence writer.
//!
//! All writes of one store go through a single task, so they reach the
//! storage tiers in the order the mutations happened.

use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, warn};
use uuid::Uuid;
use vitrina::{cart::Cart, snapshot};

use crate::{
    domain::carts::repositories::RemoteCartsRepository,
    storage::{LocalSlot, StorageError},
};

#[derive(Debug)]
pub(crate) enum PersistCommand {
    /// Write `cart` locally, and remotely for `owner` when it has items.
    Save {
        owner: Option<String>,
        cart: Cart,
        revision: i64,
    },

    /// Forget the local copy and the remote record of `owner`.
    Clear { owner: Option<String> },

    /// Acknowledge once every earlier command has been applied.
    Flush(oneshot::Sender<()>),
}

pub(crate) struct CartWriter {
    remote: Arc<dyn RemoteCartsRepository>,
    local: Arc<dyn LocalSlot>,
}

impl CartWriter {
    pub(crate) fn spawn(
        remote: Arc<dyn RemoteCartsRepository>,
        local: Arc<dyn LocalSlot>,
    ) -> (mpsc::UnboundedSender<PersistCommand>, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let writer = Self { remote, local };

        let handle = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                writer.apply(command).await;
            }

            debug!("cart writer stopped");
        });

        (sender, handle)
    }

    async fn apply(&self, command: PersistCommand) {
        match command {
            PersistCommand::Save {
                owner,
                cart,
                revision,
            } => {
                self.save_local(&cart).await;

                if let Some(email) = owner.as_deref()
                    && !cart.is_empty()
                {
                    self.save_remote(email, &cart, revision).await;
                }
            }
            PersistCommand::Clear { owner } => {
                if let Err(error) = self.local.clear().await {
                    warn!(%error, "failed to clear local cart");
                }

                if let Some(email) = owner.as_deref() {
                    match self.remote.delete_cart(email).await {
                        Ok(rows) => debug!(email, rows, "deleted remote cart"),
                        Err(error) => warn!(email, %error, "failed to delete remote cart"),
                    }
                }
            }
            PersistCommand::Flush(done) => {
                if done.send(()).is_err() {
                    debug!("flush requester went away");
                }
            }
        }
    }

    async fn save_local(&self, cart: &Cart) {
        let encoded = match snapshot::encode(cart) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%error, "failed to encode cart");
                return;
            }
        };

        if let Err(error) = self.local.write(encoded).await {
            warn!(%error, "failed to write local cart");
        }
    }

    async fn save_remote(&self, email: &str, cart: &Cart, revision: i64) {
        let existing = match self.remote.find_cart(email).await {
            Ok(existing) => existing,
            Err(error) => {
                warn!(email, %error, "failed to look up remote cart");
                return;
            }
        };

        let result = match existing {
            Some(record) => self.update(record.uuid, email, cart, revision).await,
            None => match self.remote.create_cart(email, cart, revision).await {
                Ok(_) => {
                    debug!(email, revision, "created remote cart");
                    Ok(())
                }
                // Another session created it first.
                Err(StorageError::AlreadyExists) => {
                    self.update_existing(email, cart, revision).await
                }
                Err(error) => Err(error),
            },
        };

        if let Err(error) = result {
            warn!(email, %error, "failed to write remote cart");
        }
    }

    async fn update_existing(
        &self,
        email: &str,
        cart: &Cart,
        revision: i64,
    ) -> Result<(), StorageError> {
        let record = self
            .remote
            .find_cart(email)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.update(record.uuid, email, cart, revision).await
    }

    async fn update(
        &self,
        uuid: Uuid,
        email: &str,
        cart: &Cart,
        revision: i64,
    ) -> Result<(), StorageError> {
        match self.remote.update_cart(uuid, cart, revision).await? {
            0 => debug!(email, revision, "skipped stale remote cart write"),
            _ => debug!(email, revision, "updated remote cart"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::{MemorySlot, Offline};

    use super::*;

    #[tokio::test]
    async fn abandoned_flush_does_not_stop_the_writer() -> TestResult {
        let local = Arc::new(MemorySlot::new());
        let (commands, writer) = CartWriter::spawn(Arc::new(Offline), local.clone());

        let (done, applied) = oneshot::channel();
        drop(applied);

        commands.send(PersistCommand::Flush(done))?;
        commands.send(PersistCommand::Save {
            owner: None,
            cart: Cart::new(),
            revision: 1,
        })?;

        drop(commands);
        writer.await?;

        assert!(
            local.read().await?.is_some(),
            "writes after an abandoned flush are still applied"
        );

        Ok(())
    }
}
