pub mod amenities;
pub mod auctions;
pub mod criteria;
pub mod home_loans;
pub mod images;
pub mod loaner_properties;
pub mod loaners;
pub mod locations;
pub mod properties;
pub mod requested_tours;
pub mod users;
pub mod wishlist_auctions;
pub mod wishlist_properties;
pub mod wishlists;

pub use amenities::Entity as Amenities;
pub use auctions::Entity as Auctions;
pub use criteria::Entity as Criteria;
pub use home_loans::Entity as HomeLoans;
pub use images::Entity as Images;
pub use loaner_properties::Entity as LoanerProperties;
pub use loaners::Entity as Loaners;
pub use locations::Entity as Locations;
pub use properties::Entity as Properties;
pub use requested_tours::Entity as RequestedTours;
pub use users::Entity as Users;
pub use wishlist_auctions::Entity as WishlistAuctions;
pub use wishlist_properties::Entity as WishlistProperties;
pub use wishlists::Entity as Wishlists;
