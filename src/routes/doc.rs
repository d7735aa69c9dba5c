use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auctions::{AuctionDetail, AuctionList, CreateAuctionRequest, PlaceBidRequest, UpdateAuctionRequest},
        images::{BulkCreateImagesRequest, ImageList},
        loans::{
            CreateHomeLoanRequest, CriteriaPayload, EmbeddedLoanerPayload, HomeLoanDetail,
            HomeLoanList,
        },
        properties::{
            AmenitiesPatch, AmenitiesPayload, CreatePropertyRequest, DiscountRequest,
            ImagePayload, LoanerLink, LoanerPayload, LocationPatch, LocationPayload,
            PropertyDetail, PropertyList, SearchPropertiesRequest, SoldOutRequest,
            UpdatePropertyRequest,
        },
        tours::{RequestTourRequest, TourList},
        wishlist::{AddWishlistItemRequest, WishlistDetail},
    },
    models::{Amenities, Criteria, Image, Loaner, Location, PropertyKind, Tour},
    response::{ApiResponse, Meta},
    routes::{auctions, health, images, loans, params, properties, tours, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        properties::list_properties,
        properties::search_properties,
        properties::get_property,
        properties::create_property,
        properties::update_property,
        properties::set_discount,
        properties::toggle_sold_out,
        auctions::list_auctions,
        auctions::get_auction,
        auctions::create_auction,
        auctions::update_auction,
        auctions::place_bid,
        loans::list_home_loans,
        loans::create_home_loan,
        wishlist::my_wishlist,
        wishlist::get_or_create_wishlist,
        wishlist::add_items,
        tours::list_tours,
        tours::request_tour,
        images::bulk_create
    ),
    components(
        schemas(
            Location,
            Amenities,
            Image,
            Loaner,
            Criteria,
            Tour,
            PropertyKind,
            LocationPayload,
            LocationPatch,
            AmenitiesPayload,
            AmenitiesPatch,
            ImagePayload,
            LoanerPayload,
            LoanerLink,
            CreatePropertyRequest,
            UpdatePropertyRequest,
            SearchPropertiesRequest,
            DiscountRequest,
            SoldOutRequest,
            PropertyDetail,
            PropertyList,
            CreateAuctionRequest,
            UpdateAuctionRequest,
            PlaceBidRequest,
            AuctionDetail,
            AuctionList,
            CreateHomeLoanRequest,
            CriteriaPayload,
            EmbeddedLoanerPayload,
            HomeLoanDetail,
            HomeLoanList,
            AddWishlistItemRequest,
            WishlistDetail,
            RequestTourRequest,
            TourList,
            BulkCreateImagesRequest,
            ImageList,
            params::PropertyListQuery,
            params::AuctionListQuery,
            params::LoanListQuery,
            Meta,
            ApiResponse<PropertyDetail>,
            ApiResponse<PropertyList>,
            ApiResponse<AuctionDetail>,
            ApiResponse<AuctionList>,
            ApiResponse<HomeLoanDetail>,
            ApiResponse<HomeLoanList>,
            ApiResponse<WishlistDetail>,
            ApiResponse<TourList>,
            ApiResponse<ImageList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Properties", description = "Property listing endpoints"),
        (name = "Auctions", description = "Auction endpoints"),
        (name = "HomeLoans", description = "Home loan endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Tours", description = "Requested tour endpoints"),
        (name = "Images", description = "Image endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
