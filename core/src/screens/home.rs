// core/src/screens/home.rs
use super::{Screen, StateHolder};
use crate::account::AccountRepository;
use crate::cart::CartRepository;
use crate::catalog::{search, CatalogRepository};
use crate::error::{EatzyError, Result};
use crate::models::{CatalogItem, Location};
use crate::session::Session;
use async_trait::async_trait;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
  pub loading: bool,
  pub foods: Vec<CatalogItem>,
  /// `foods` narrowed by `query`.
  pub filtered: Vec<CatalogItem>,
  pub query: String,
  pub locations: Vec<Location>,
  pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum HomeIntent {
  Load,
  Search(String),
  ToggleFavorite(CatalogItem),
  AddToCart(CatalogItem),
  SignOut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEffect {
  Toast(String),
  NavigateToIntro,
}

pub struct HomeScreen {
  holder: StateHolder<HomeState, HomeEffect>,
  session: Session,
  catalog: CatalogRepository,
  cart: CartRepository,
  account: AccountRepository,
}

impl HomeScreen {
  pub fn new(session: Session, catalog: CatalogRepository, cart: CartRepository, account: AccountRepository) -> Self {
    Self {
      holder: StateHolder::new(HomeState::default()),
      session,
      catalog,
      cart,
      account,
    }
  }

  async fn load(&self) -> Result<()> {
    let owner = self.session.owner_id()?;
    self.holder.update(|s| s.loading = true);
    let foods = self.catalog.foods(&owner).await?;
    // Locations are secondary; a failure leaves the list empty.
    let locations = match self.account.locations(&owner).await {
      Ok(locations) => locations,
      Err(e) => {
        warn!(error = %e, "Locations unavailable.");
        Vec::new()
      }
    };
    self.cart.subtotal(&owner, &self.session).await;
    self.holder.update(|s| {
      s.filtered = search(&foods, &s.query);
      s.foods = foods;
      s.locations = locations;
      s.loading = false;
      s.error = None;
    });
    Ok(())
  }

  async fn toggle_favorite(&self, food: CatalogItem) -> Result<()> {
    let owner = self.session.owner_id()?;
    let now_favorite = self.catalog.toggle_favorite(food.id, &owner).await?;
    self.holder.update(|s| {
      for item in s.foods.iter_mut().chain(s.filtered.iter_mut()) {
        if item.id == food.id {
          item.is_favorite = now_favorite;
        }
      }
    });
    Ok(())
  }

  async fn add_to_cart(&self, food: CatalogItem) -> Result<()> {
    let owner = self.session.owner_id()?;
    self.cart.add(&food.to_line_item(1), &owner).await?;
    self.cart.subtotal(&owner, &self.session).await;
    self.holder.emit(HomeEffect::Toast(format!("{} added to cart", food.name)));
    Ok(())
  }

  async fn handle(&self, intent: HomeIntent) -> Result<()> {
    match intent {
      HomeIntent::Load => self.load().await,
      HomeIntent::Search(query) => {
        self.holder.update(|s| {
          s.filtered = search(&s.foods, &query);
          s.query = query;
        });
        Ok(())
      }
      HomeIntent::ToggleFavorite(food) => self.toggle_favorite(food).await,
      HomeIntent::AddToCart(food) => self.add_to_cart(food).await,
      HomeIntent::SignOut => {
        self.account.sign_out().await;
        self.session.sign_out();
        self.holder.emit(HomeEffect::NavigateToIntro);
        Ok(())
      }
    }
  }

  fn fail(&self, err: EatzyError) {
    warn!(error = %err, "Home screen action failed.");
    let message = err.user_message();
    self.holder.update(|s| {
      s.loading = false;
      s.error = Some(message.clone());
    });
    self.holder.emit(HomeEffect::Toast(message));
  }
}

#[async_trait]
impl Screen for HomeScreen {
  type State = HomeState;
  type Intent = HomeIntent;
  type Effect = HomeEffect;

  fn holder(&self) -> &StateHolder<HomeState, HomeEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: HomeIntent) {
    if let Err(err) = self.handle(intent).await {
      self.fail(err);
    }
  }
}
