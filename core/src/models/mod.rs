// core/src/models/mod.rs
pub mod cart_item;
pub mod favorite;
pub mod food;
pub mod location;
pub mod payment;
pub mod promotion;
pub mod user;

pub use cart_item::CartLineItem;
pub use favorite::FavoriteMark;
pub use food::CatalogItem;
pub use location::Location;
pub use payment::PaymentCard;
pub use promotion::Promotion;
pub use user::UserProfile;
