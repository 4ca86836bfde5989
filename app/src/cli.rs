// app/src/cli.rs

use crate::errors::{AppError, Result};
use crate::state::AppState;
use clap::{Args, Parser, Subcommand};
use eatzy::models::{CartLineItem, CatalogItem, UserProfile};
use eatzy::screens::cart::{CartEffect, CartIntent, CartScreen, CartState};
use eatzy::screens::detail::{DetailEffect, DetailIntent, DetailScreen};
use eatzy::screens::favorites::{FavoritesIntent, FavoritesScreen};
use eatzy::screens::home::{HomeIntent, HomeScreen};
use eatzy::screens::login::{LoginEffect, LoginIntent, LoginScreen};
use eatzy::screens::promotions::{PromotionsIntent, PromotionsScreen};
use eatzy::screens::register::{RegisterEffect, RegisterIntent, RegisterScreen};
use eatzy::screens::Screen;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "eatzy")]
#[command(about = "order food from the terminal: browse the menu, manage the cart and favorites", version, long_about = None)]
pub struct Cli {
  #[arg(long, global = true, help = "Account email to sign in with.")]
  email: Option<String>,
  #[arg(long, global = true, help = "Account password to sign in with.")]
  password: Option<String>,
  #[arg(long, global = true, help = "Act as this username without signing in.", value_name = "USERNAME")]
  user: Option<String>,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// list the menu
  Catalog {
    #[arg(long, help = "Case-insensitive name filter.")]
    search: Option<String>,
  },
  /// cart related ops
  #[command(arg_required_else_help = true)]
  Cart(CartArgs),
  /// promotion codes
  #[command(arg_required_else_help = true)]
  Promo(PromoArgs),
  /// local favorites
  #[command(arg_required_else_help = true)]
  Favorite(FavoriteArgs),
  /// create an account and sign in
  #[command(arg_required_else_help = true)]
  Register(RegisterArgs),
}

#[derive(Debug, Args)]
struct CartArgs {
  #[command(subcommand)]
  command: CartCmds,
}

#[derive(Debug, Subcommand)]
enum CartCmds {
  List,
  #[command(arg_required_else_help = true)]
  Add {
    #[arg(value_name = "FOOD_ID")]
    food_id: i64,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    qty: u32,
  },
  #[command(arg_required_else_help = true)]
  Inc { name: String },
  #[command(arg_required_else_help = true)]
  Dec { name: String },
  #[command(arg_required_else_help = true)]
  Remove { name: String },
  Clear,
}

#[derive(Debug, Args)]
struct PromoArgs {
  #[command(subcommand)]
  command: PromoCmds,
}

#[derive(Debug, Subcommand)]
enum PromoCmds {
  /// apply a code to the current cart
  #[command(arg_required_else_help = true)]
  Apply { code: String },
  List,
}

#[derive(Debug, Args)]
struct FavoriteArgs {
  #[command(subcommand)]
  command: FavoriteCmds,
}

#[derive(Debug, Subcommand)]
enum FavoriteCmds {
  #[command(arg_required_else_help = true)]
  Toggle {
    #[arg(value_name = "FOOD_ID")]
    food_id: i64,
  },
  List,
  Clear,
}

#[derive(Debug, Args)]
struct RegisterArgs {
  #[arg(long)]
  full_name: String,
  #[arg(long)]
  username: String,
  #[arg(long = "account-email", help = "Email for the new account.")]
  email: String,
  #[arg(long)]
  phone: String,
  #[arg(long = "account-password", help = "Password for the new account.")]
  password: String,
}

#[derive(Serialize)]
struct CartView<'a> {
  lines: &'a [CartLineItem],
  subtotal: i64,
  promotion_count: u8,
}

impl<'a> From<&'a CartState> for CartView<'a> {
  fn from(state: &'a CartState) -> Self {
    Self {
      lines: &state.lines,
      subtotal: state.subtotal,
      promotion_count: state.promotion_count,
    }
  }
}

impl Cli {
  pub async fn execute(self, state: &AppState) -> Result<()> {
    if let Commands::Register(args) = self.command {
      return register(state, args).await;
    }
    sign_in(state, self.email, self.password, self.user).await?;

    match self.command {
      Commands::Catalog { search } => catalog(state, search).await,
      Commands::Cart(args) => cart(state, args.command).await,
      Commands::Promo(args) => promo(state, args.command).await,
      Commands::Favorite(args) => favorite(state, args.command).await,
      Commands::Register(_) => Ok(()),
    }
  }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn rejected(error: Option<String>) -> Result<()> {
  match error {
    Some(message) => Err(AppError::Rejected(message)),
    None => Ok(()),
  }
}

fn effects<E>(rx: &mut Option<UnboundedReceiver<E>>) -> Vec<E> {
  let mut out = Vec::new();
  if let Some(rx) = rx.as_mut() {
    while let Ok(effect) = rx.try_recv() {
      out.push(effect);
    }
  }
  out
}

async fn sign_in(state: &AppState, email: Option<String>, password: Option<String>, user: Option<String>) -> Result<()> {
  match (email, password, user) {
    (Some(email), Some(password), _) => {
      let screen = LoginScreen::new(state.session.clone(), state.account.clone());
      let mut rx = screen.take_effects();
      screen.dispatch(LoginIntent::EmailChanged(email)).await;
      screen.dispatch(LoginIntent::PasswordChanged(password)).await;
      screen.dispatch(LoginIntent::Submit).await;

      for effect in effects(&mut rx) {
        match effect {
          LoginEffect::NavigateToMain => return Ok(()),
          LoginEffect::ShowMessage(message) => return Err(AppError::Rejected(message)),
        }
      }
      Err(AppError::Rejected("Sign in did not complete.".to_string()))
    }
    (None, None, Some(username)) => {
      info!(%username, "Acting as user without an account.");
      state.session.sign_in(UserProfile {
        id: username.clone(),
        full_name: String::new(),
        username,
        phone: String::new(),
      });
      Ok(())
    }
    _ => Err(AppError::Usage(
      "pass --email and --password together, or --user".to_string(),
    )),
  }
}

async fn load_foods(state: &AppState) -> Result<HomeScreen> {
  let screen = HomeScreen::new(
    state.session.clone(),
    state.catalog.clone(),
    state.cart.clone(),
    state.account.clone(),
  );
  screen.dispatch(HomeIntent::Load).await;
  rejected(screen.state().error)?;
  Ok(screen)
}

fn find_food(foods: &[CatalogItem], food_id: i64) -> Result<CatalogItem> {
  foods
    .iter()
    .find(|f| f.id == food_id)
    .cloned()
    .ok_or_else(|| AppError::Usage(format!("no food with id {}", food_id)))
}

async fn catalog(state: &AppState, query: Option<String>) -> Result<()> {
  let screen = load_foods(state).await?;
  if let Some(query) = query {
    screen.dispatch(HomeIntent::Search(query)).await;
  }
  print_json(&screen.state().filtered)
}

async fn load_cart(state: &AppState) -> Result<CartScreen> {
  let screen = CartScreen::new(state.session.clone(), state.cart.clone(), state.account.clone());
  screen.dispatch(CartIntent::Load).await;
  rejected(screen.state().error)?;
  Ok(screen)
}

fn find_line(state: &CartState, name: &str) -> Result<CartLineItem> {
  state
    .lines
    .iter()
    .find(|l| l.name == name)
    .cloned()
    .ok_or_else(|| AppError::Usage(format!("'{}' is not in the cart", name)))
}

async fn cart(state: &AppState, command: CartCmds) -> Result<()> {
  if let CartCmds::Add { food_id, qty } = command {
    let home = load_foods(state).await?;
    let food = find_food(&home.state().foods, food_id)?;
    let detail = DetailScreen::new(state.session.clone(), state.catalog.clone(), state.cart.clone(), food);
    let mut rx = detail.take_effects();
    for _ in 1..qty {
      detail.dispatch(DetailIntent::Increase).await;
    }
    detail.dispatch(DetailIntent::AddToCart).await;
    for effect in effects(&mut rx) {
      match effect {
        DetailEffect::AddedToCart { amount } => info!(amount, "Added to cart."),
        DetailEffect::Message(message) => return Err(AppError::Rejected(message)),
      }
    }
    let screen = load_cart(state).await?;
    return print_json(&CartView::from(&screen.state()));
  }

  let screen = load_cart(state).await?;
  let current = screen.state();
  let intent = match command {
    CartCmds::List | CartCmds::Add { .. } => None,
    CartCmds::Inc { name } => Some(CartIntent::Increase(find_line(&current, &name)?)),
    CartCmds::Dec { name } => Some(CartIntent::Decrease(find_line(&current, &name)?)),
    CartCmds::Remove { name } => Some(CartIntent::Remove(find_line(&current, &name)?)),
    CartCmds::Clear => Some(CartIntent::ClearConfirmed),
  };
  if let Some(intent) = intent {
    screen.dispatch(intent).await;
  }

  let after = screen.state();
  rejected(after.error.clone())?;
  print_json(&CartView::from(&after))
}

async fn promo(state: &AppState, command: PromoCmds) -> Result<()> {
  match command {
    PromoCmds::Apply { code } => {
      let screen = load_cart(state).await?;
      let mut rx = screen.take_effects();
      let before = screen.state().subtotal;
      screen.dispatch(CartIntent::PromotionCodeChanged(code)).await;
      screen.dispatch(CartIntent::SubmitPromotion).await;

      for effect in effects(&mut rx) {
        if let CartEffect::Message(message) = effect {
          println!("{}", message);
        }
      }
      let after = screen.state();
      rejected(after.error.clone())?;
      info!(before, after = after.subtotal, "Promotion applied.");
      print_json(&CartView::from(&after))
    }
    PromoCmds::List => {
      let screen = PromotionsScreen::new(state.session.clone(), state.account.clone());
      screen.dispatch(PromotionsIntent::Load).await;
      let current = screen.state();
      rejected(current.error)?;
      print_json(&current.promotions)
    }
  }
}

async fn favorite(state: &AppState, command: FavoriteCmds) -> Result<()> {
  let screen = FavoritesScreen::new(state.session.clone(), state.catalog.clone());
  match command {
    FavoriteCmds::Toggle { food_id } => {
      let home = load_foods(state).await?;
      let food = find_food(&home.state().foods, food_id)?;
      screen.dispatch(FavoritesIntent::Toggle(food)).await;
    }
    FavoriteCmds::Clear => screen.dispatch(FavoritesIntent::ClearConfirmed).await,
    FavoriteCmds::List => {}
  }
  screen.dispatch(FavoritesIntent::Load).await;
  let current = screen.state();
  rejected(current.error)?;
  print_json(&current.favorites)
}

async fn register(state: &AppState, args: RegisterArgs) -> Result<()> {
  let screen = RegisterScreen::new(state.session.clone(), state.account.clone());
  let mut rx = screen.take_effects();
  screen.dispatch(RegisterIntent::FullNameChanged(args.full_name)).await;
  screen.dispatch(RegisterIntent::UsernameChanged(args.username)).await;
  screen.dispatch(RegisterIntent::EmailChanged(args.email)).await;
  screen.dispatch(RegisterIntent::PhoneChanged(args.phone)).await;
  screen.dispatch(RegisterIntent::PasswordChanged(args.password)).await;
  screen.dispatch(RegisterIntent::Submit).await;

  for effect in effects(&mut rx) {
    match effect {
      RegisterEffect::NavigateToMain => {
        let user = state.session.current_user();
        return print_json(&user);
      }
      RegisterEffect::ShowMessage(message) => return Err(AppError::Rejected(message)),
    }
  }
  Err(AppError::Rejected("Registration did not complete.".to_string()))
}
