// core/src/screens/favorites.rs
use super::{Screen, StateHolder};
use crate::catalog::CatalogRepository;
use crate::error::Result;
use crate::models::CatalogItem;
use crate::session::Session;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesState {
  pub loading: bool,
  pub favorites: Vec<CatalogItem>,
  pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum FavoritesIntent {
  Load,
  /// Un-favorites the food and drops it from the list.
  Toggle(CatalogItem),
  ClearRequested,
  ClearConfirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesEffect {
  ConfirmClear,
}

pub struct FavoritesScreen {
  holder: StateHolder<FavoritesState, FavoritesEffect>,
  session: Session,
  catalog: CatalogRepository,
}

impl FavoritesScreen {
  pub fn new(session: Session, catalog: CatalogRepository) -> Self {
    Self {
      holder: StateHolder::new(FavoritesState::default()),
      session,
      catalog,
    }
  }

  async fn handle(&self, intent: FavoritesIntent) -> Result<()> {
    let owner = self.session.owner_id()?;
    match intent {
      FavoritesIntent::Load => {
        self.holder.update(|s| s.loading = true);
        let favorites = self.catalog.favorites(&owner).await?;
        self.holder.update(|s| {
          s.favorites = favorites;
          s.loading = false;
          s.error = None;
        });
      }
      FavoritesIntent::Toggle(food) => {
        let still_favorite = self.catalog.toggle_favorite(food.id, &owner).await?;
        if !still_favorite {
          self.holder.update(|s| s.favorites.retain(|f| f.id != food.id));
        }
      }
      FavoritesIntent::ClearRequested => self.holder.emit(FavoritesEffect::ConfirmClear),
      FavoritesIntent::ClearConfirmed => {
        self.catalog.clear_favorites(&owner).await?;
        self.holder.update(|s| s.favorites.clear());
      }
    }
    Ok(())
  }
}

#[async_trait]
impl Screen for FavoritesScreen {
  type State = FavoritesState;
  type Intent = FavoritesIntent;
  type Effect = FavoritesEffect;

  fn holder(&self) -> &StateHolder<FavoritesState, FavoritesEffect> {
    &self.holder
  }

  async fn dispatch(&self, intent: FavoritesIntent) {
    if let Err(err) = self.handle(intent).await {
      let message = err.user_message();
      self.holder.update(|s| {
        s.loading = false;
        s.error = Some(message);
      });
    }
  }
}
