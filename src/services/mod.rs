pub mod catalog;
pub mod favorites;
pub mod share;

pub use favorites::FavoriteService;
pub use share::ShareService;
