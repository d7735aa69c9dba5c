pub mod auctions;
pub mod images;
pub mod loans;
pub mod properties;
pub mod tours;
pub mod wishlist;
