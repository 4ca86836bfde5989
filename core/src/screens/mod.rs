// core/src/screens/mod.rs

//! State-and-intent screen controllers.
//!
//! A screen receives intents through `dispatch`, publishes an immutable state snapshot after
//! every change, and emits one-shot effects (navigation, dialogs, messages) on a queue.
//! Controllers share the signed-in user through the `Session` they are constructed with.

pub mod address;
pub mod cart;
pub mod detail;
pub mod favorites;
pub mod home;
pub mod login;
pub mod payment;
pub mod promotions;
pub mod register;
pub mod settings;
pub mod splash;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

pub use address::AddressScreen;
pub use cart::CartScreen;
pub use detail::DetailScreen;
pub use favorites::FavoritesScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use payment::PaymentScreen;
pub use promotions::PromotionsScreen;
pub use register::RegisterScreen;
pub use settings::SettingsScreen;
pub use splash::SplashScreen;

/// Holds the current state snapshot and the effect queue of one screen.
pub struct StateHolder<S, E> {
  state: watch::Sender<S>,
  effects_tx: mpsc::UnboundedSender<E>,
  effects_rx: Mutex<Option<mpsc::UnboundedReceiver<E>>>,
}

impl<S, E> StateHolder<S, E>
where
  S: Clone + Send + Sync + 'static,
  E: Send + 'static,
{
  pub fn new(initial: S) -> Self {
    let (state, _) = watch::channel(initial);
    let (effects_tx, effects_rx) = mpsc::unbounded_channel();
    Self {
      state,
      effects_tx,
      effects_rx: Mutex::new(Some(effects_rx)),
    }
  }

  pub fn state(&self) -> S {
    self.state.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<S> {
    self.state.subscribe()
  }

  /// Applies `f` to the state and publishes the result as a new snapshot.
  pub fn update(&self, f: impl FnOnce(&mut S)) {
    self.state.send_modify(f);
  }

  /// Queues an effect. Effects wait until the screen's consumer takes the queue.
  pub fn emit(&self, effect: E) {
    // Send only fails once the receiver is dropped.
    let _ = self.effects_tx.send(effect);
  }

  /// The effect queue. Only the first call gets it.
  pub fn take_effects(&self) -> Option<mpsc::UnboundedReceiver<E>> {
    self.effects_rx.lock().take()
  }
}

#[async_trait]
pub trait Screen: Send + Sync {
  type State: Clone + Send + Sync + 'static;
  type Intent: Send + 'static;
  type Effect: Send + 'static;

  fn holder(&self) -> &StateHolder<Self::State, Self::Effect>;

  async fn dispatch(&self, intent: Self::Intent);

  fn state(&self) -> Self::State {
    self.holder().state()
  }

  fn subscribe(&self) -> watch::Receiver<Self::State> {
    self.holder().subscribe()
  }

  fn take_effects(&self) -> Option<mpsc::UnboundedReceiver<Self::Effect>> {
    self.holder().take_effects()
  }
}
