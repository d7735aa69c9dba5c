pub mod auction_service;
pub mod image_service;
pub mod loan_service;
pub mod property_service;
pub mod tour_service;
pub mod wishlist_service;
