//! Cart store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use rust_decimal::Decimal;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};
use vitrina::{
    cart::Cart,
    items::LineItem,
    products::{Product, ProductId},
    snapshot,
};

use crate::{
    domain::carts::{
        models::MergePolicy,
        records::UserCartRecord,
        repositories::RemoteCartsRepository,
        writer::{CartWriter, PersistCommand},
    },
    identity::Identity,
    storage::LocalSlot,
};

#[derive(Debug, Default)]
struct CartState {
    cart: Cart,
    identity: Identity,
    revision: i64,
}

impl CartState {
    /// Next revision: wall-clock microseconds, never below the last one plus one.
    fn next_revision(&mut self) -> i64 {
        self.revision = Timestamp::now()
            .as_microsecond()
            .max(self.revision.saturating_add(1));

        self.revision
    }
}

/// The visitor's cart, kept consistent across the remote and local tiers.
///
/// Mutations apply to memory synchronously and queue a write for the
/// background writer. Reads only ever see memory.
pub struct CartStore {
    state: Mutex<CartState>,
    commands: mpsc::UnboundedSender<PersistCommand>,
    writer: JoinHandle<()>,
    remote: Arc<dyn RemoteCartsRepository>,
    local: Arc<dyn LocalSlot>,
    policy: MergePolicy,
}

impl CartStore {
    /// Create an empty guest store and start its writer.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteCartsRepository>,
        local: Arc<dyn LocalSlot>,
        policy: MergePolicy,
    ) -> Self {
        let (commands, writer) = CartWriter::spawn(remote.clone(), local.clone());

        Self {
            state: Mutex::new(CartState::default()),
            commands,
            writer,
            remote,
            local,
            policy,
        }
    }

    /// Populate the cart for `identity`.
    ///
    /// Signed-in visitors get their remote cart when one exists. Otherwise,
    /// or when the remote tier fails, the device-local copy is used.
    pub async fn load(&self, identity: Identity) {
        self.flush().await;

        let remote = match identity.email() {
            Some(email) => self.fetch_remote(email).await,
            None => None,
        };

        let cart = match remote {
            Some(cart) => cart,
            None => self.read_local().await,
        };

        info!(
            email = identity.email(),
            items = cart.len(),
            "loaded cart"
        );

        let mut state = self.lock();
        state.cart = cart;
        state.identity = identity;

        if !state.cart.is_empty() {
            self.save(&mut state);
        }
    }

    /// React to a sign-in, sign-out or account switch.
    ///
    /// Switching to a guest always empties the cart, even when the store was
    /// already a guest.
    pub async fn switch_identity(&self, next: Identity) {
        self.flush().await;

        let previous = self.identity();

        let Some(email) = next.email() else {
            let mut state = self.lock();
            state.cart.clear();
            state.identity = Identity::Guest;

            info!(email = previous.email(), "signed out, cart cleared");

            self.send(PersistCommand::Clear {
                owner: previous.email().map(str::to_owned),
            });

            return;
        };

        if previous == next {
            return;
        }

        let remote = self.fetch_remote(email).await;

        let mut state = self.lock();

        match (remote, self.policy) {
            (None, _) => debug!(email, "no remote cart, keeping current cart"),
            (Some(remote), MergePolicy::RemoteWins) => {
                debug!(email, items = remote.len(), "remote cart replaces current cart");
                state.cart = remote;
            }
            (Some(mut remote), MergePolicy::Union) => {
                debug!(email, items = remote.len(), "merging current cart into remote cart");
                remote.merge(std::mem::take(&mut state.cart));
                state.cart = remote;
            }
        }

        state.identity = next;

        self.save(&mut state);
    }

    /// Keep the store in step with a session until the session is dropped.
    pub fn follow(self: &Arc<Self>, mut changes: watch::Receiver<Identity>) -> JoinHandle<()> {
        let store = Arc::clone(self);

        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let identity = changes.borrow_and_update().clone();

                store.switch_identity(identity).await;
            }
        })
    }

    /// Add `quantity` units of one product in one size and color.
    pub fn add_item(&self, product: Product, size: &str, color: &str, quantity: u32) {
        let mut state = self.lock();
        state.cart.add_item(product, size, color, quantity);

        self.save(&mut state);
    }

    /// Remove the item for one product, size and color.
    pub fn remove_item(&self, product_id: &ProductId, size: &str, color: &str) {
        let mut state = self.lock();
        state.cart.remove_item(product_id, size, color);

        self.save(&mut state);
    }

    /// Set the quantity of one item; zero or less removes it.
    pub fn update_quantity(&self, product_id: &ProductId, size: &str, color: &str, quantity: i64) {
        let mut state = self.lock();
        state.cart.update_quantity(product_id, size, color, quantity);

        self.save(&mut state);
    }

    /// Empty the cart and forget every stored copy of it.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.cart.clear();

        self.send(PersistCommand::Clear {
            owner: state.identity.email().map(str::to_owned),
        });
    }

    pub fn items(&self) -> Vec<LineItem> {
        self.lock().cart.items().to_vec()
    }

    pub fn cart(&self) -> Cart {
        self.lock().cart.clone()
    }

    pub fn total_items(&self) -> u64 {
        self.lock().cart.total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.lock().cart.total_price()
    }

    pub fn identity(&self) -> Identity {
        self.lock().identity.clone()
    }

    /// Wait until every write queued so far has been applied.
    pub async fn flush(&self) {
        let (done, applied) = oneshot::channel();

        self.send(PersistCommand::Flush(done));

        if applied.await.is_err() {
            warn!("cart writer stopped before flushing");
        }
    }

    /// Apply pending writes and stop the writer.
    pub async fn close(self) {
        let Self {
            commands, writer, ..
        } = self;

        drop(commands);

        if let Err(error) = writer.await {
            error!(%error, "cart writer failed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a write of the current cart. Called with the state lock held so
    /// commands are queued in mutation order.
    fn save(&self, state: &mut CartState) {
        let revision = state.next_revision();

        self.send(PersistCommand::Save {
            owner: state.identity.email().map(str::to_owned),
            cart: state.cart.clone(),
            revision,
        });
    }

    fn send(&self, command: PersistCommand) {
        if self.commands.send(command).is_err() {
            error!("cart writer is gone, dropping write");
        }
    }

    async fn fetch_remote(&self, email: &str) -> Option<Cart> {
        match self.remote.find_cart(email).await {
            Ok(Some(UserCartRecord { cart, revision, .. })) => {
                let mut state = self.lock();
                state.revision = state.revision.max(revision);

                Some(cart)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(email, %error, "failed to fetch remote cart, using local copy");
                None
            }
        }
    }

    async fn read_local(&self) -> Cart {
        let raw = match self.local.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read local cart");
                return Cart::new();
            }
        };

        snapshot::decode(&raw).unwrap_or_else(|error| {
            warn!(%error, "discarding unreadable local cart");
            Cart::new()
        })
    }
}
