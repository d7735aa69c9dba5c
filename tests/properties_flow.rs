use axum_realestate_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        auctions::{CreateAuctionRequest, PlaceBidRequest},
        loans::{CreateHomeLoanRequest, CriteriaPayload, EmbeddedLoanerPayload},
        properties::{
            AmenitiesPayload, CreatePropertyRequest, DiscountRequest, ImagePayload, LoanerPayload,
            LocationPayload, SearchPropertiesRequest, UpdatePropertyRequest,
        },
        tours::RequestTourRequest,
        wishlist::AddWishlistItemRequest,
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    models::PropertyKind,
    routes::params::{AuctionListQuery, PropertyListQuery},
    services::{
        auction_service, loan_service, property_service, tour_service, wishlist_service,
    },
    state::AppState,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: create the property aggregate -> search -> wishlist
// toggles -> auction bidding -> tours and loans.
#[tokio::test]
async fn property_aggregate_and_marketplace_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let owner_id = create_user(&state, "user", "owner@example.com").await?;
    let owner = AuthUser {
        user_id: owner_id,
        role: "user".into(),
    };

    // Create the full aggregate in one request.
    let created = property_service::create_property(
        &state,
        &owner,
        CreatePropertyRequest {
            name: "Bole Villa".into(),
            description: "Detached villa near the airport".into(),
            price: 250_000.0,
            currency: None,
            discount: None,
            is_store: false,
            kind: Some(PropertyKind::Villa),
            move_in_date: None,
            rental: false,
            location: LocationPayload {
                name: "Bole".into(),
                longitude: Decimal::new(387, 1),
                latitude: Decimal::new(90, 1),
            },
            amenities: AmenitiesPayload {
                bedroom: 4,
                bathroom: 3,
                area: 320.0,
            },
            pictures: vec![ImagePayload {
                image_url: "https://img.example.com/villa-front.jpg".into(),
                is_cover: Some(true),
                blur_hash: None,
            }],
            loaners: vec![LoanerPayload {
                name: "Awash Bank".into(),
                logo: None,
                real_state_provided: Some(true),
                phone: Some("+251-11-000000".into()),
                description: Some("Up to 20 year mortgages".into()),
            }],
        },
    )
    .await?;

    let property = created.data.unwrap();
    assert_eq!(property.currency, "ETB");
    assert_eq!(property.kind.as_deref(), Some("Villa"));
    assert_eq!(property.created_by, Some(owner_id));
    let amenities = property.amenities.as_ref().expect("amenities");
    assert_eq!(amenities.bedroom, 4);
    assert_eq!(property.pictures.len(), 1);
    assert!(property.pictures[0].is_cover);
    assert_eq!(property.loaner_detail.len(), 1);
    let first_loaner = property.loaner_detail[0].loaner.id;

    // A second property naming the same loaner reuses the existing row.
    let second = property_service::create_property(
        &state,
        &owner,
        CreatePropertyRequest {
            name: "CMC Apartment".into(),
            description: "Two bedroom apartment".into(),
            price: 90_000.0,
            currency: Some("USD".into()),
            discount: None,
            is_store: false,
            kind: Some(PropertyKind::Apartment),
            move_in_date: None,
            rental: true,
            location: LocationPayload {
                name: "CMC".into(),
                longitude: Decimal::new(388, 1),
                latitude: Decimal::new(91, 1),
            },
            amenities: AmenitiesPayload {
                bedroom: 2,
                bathroom: 1,
                area: 85.0,
            },
            pictures: vec![],
            loaners: vec![LoanerPayload {
                name: "Awash Bank".into(),
                logo: None,
                real_state_provided: None,
                phone: None,
                description: None,
            }],
        },
    )
    .await?;
    let second_property = second.data.unwrap();
    assert_eq!(second_property.loaner_detail[0].loaner.id, first_loaner);

    // A scalar-only update leaves the nested sections untouched.
    let updated = property_service::update_property(
        &state,
        property.id,
        UpdatePropertyRequest {
            discount: Some(5.0),
            ..Default::default()
        },
        Some(owner_id),
    )
    .await?;
    let updated = updated.data.unwrap();
    assert_eq!(updated.discount, Some(5.0));
    assert_eq!(updated.amenities.as_ref().expect("amenities").bedroom, 4);
    assert_eq!(updated.pictures.len(), 1);

    // Listing filters: rental excludes the villa, type picks it back out.
    let rentals = property_service::list_properties(
        &state,
        PropertyListQuery {
            kind: None,
            status: Some("rental".into()),
        },
        None,
    )
    .await?;
    let rentals = rentals.data.unwrap();
    assert_eq!(rentals.items.len(), 1);
    assert_eq!(rentals.items[0].id, second_property.id);

    // Search: stringly-typed price bounds and an "Any" bedroom threshold.
    let results = property_service::search_properties(
        &state,
        serde_json::from_value::<SearchPropertiesRequest>(serde_json::json!({
            "min_price": "100000",
            "bedroom": "Any",
            "type": "Villa"
        }))?,
        None,
    )
    .await?;
    let results = results.data.unwrap();
    assert_eq!(results.items.len(), 1);
    assert_eq!(results.items[0].id, property.id);

    // Geo search around Bole finds the villa but not CMC when the radius
    // is tight enough.
    let nearby = property_service::search_properties(
        &state,
        serde_json::from_value::<SearchPropertiesRequest>(serde_json::json!({
            "latitude": 9.0,
            "longitude": 38.7,
            "radius": 5.0
        }))?,
        None,
    )
    .await?;
    let nearby = nearby.data.unwrap();
    assert!(nearby.items.iter().any(|p| p.id == property.id));
    assert!(!nearby.items.iter().any(|p| p.id == second_property.id));

    // Wishlist: create, add, double-add stays single, remove absent is a no-op.
    wishlist_service::get_or_create_wishlist(&state, &owner).await?;
    wishlist_service::add_items(
        &state,
        &owner,
        AddWishlistItemRequest {
            item_id: property.id,
            is_wishlisted: true,
            is_property: true,
        },
    )
    .await?;
    let wishlist = wishlist_service::add_items(
        &state,
        &owner,
        AddWishlistItemRequest {
            item_id: property.id,
            is_wishlisted: true,
            is_property: true,
        },
    )
    .await?;
    let wishlist = wishlist.data.unwrap();
    assert_eq!(wishlist.properties.len(), 1);
    assert!(wishlist.properties[0].is_wishlisted);

    // The viewer's wishlist flag shows up on reads; anonymous reads stay false.
    let seen = property_service::get_property(&state, property.id, Some(owner_id)).await?;
    assert!(seen.data.unwrap().is_wishlisted);
    let anon = property_service::get_property(&state, property.id, None).await?;
    assert!(!anon.data.unwrap().is_wishlisted);

    let wishlist = wishlist_service::add_items(
        &state,
        &owner,
        AddWishlistItemRequest {
            item_id: second_property.id,
            is_wishlisted: false,
            is_property: true,
        },
    )
    .await?;
    assert_eq!(wishlist.data.unwrap().properties.len(), 1);

    // Unknown items are a client error, not a server one.
    let missing = wishlist_service::add_items(
        &state,
        &owner,
        AddWishlistItemRequest {
            item_id: Uuid::new_v4(),
            is_wishlisted: true,
            is_property: true,
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    // Auction bidding: the first bid may equal the starting bid, later bids
    // must strictly exceed the standing one.
    let auction = auction_service::create_auction(
        &state,
        CreateAuctionRequest {
            name: "Old Airport Plot".into(),
            description: "500 sqm plot at auction".into(),
            starting_bid: 1000.0,
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(7),
            status: None,
            location: LocationPayload {
                name: "Old Airport".into(),
                longitude: Decimal::new(386, 1),
                latitude: Decimal::new(89, 1),
            },
            pictures: vec![ImagePayload {
                image_url: "https://img.example.com/plot-aerial.jpg".into(),
                is_cover: Some(true),
                blur_hash: None,
            }],
        },
        Some(owner_id),
    )
    .await?;
    let auction = auction.data.unwrap();
    assert_eq!(auction.status, "PENDING");
    assert_eq!(auction.current_bid, None);
    assert_eq!(auction.pictures.len(), 1);

    // Image reconcile: a URL already attached to the property gets its
    // metadata updated in place, while a URL owned by an auction is never
    // adopted and becomes a fresh property image instead.
    let reconciled = property_service::update_property(
        &state,
        property.id,
        UpdatePropertyRequest {
            pictures: Some(vec![
                ImagePayload {
                    image_url: "https://img.example.com/villa-front.jpg".into(),
                    is_cover: None,
                    blur_hash: Some("LKO2?U%2Tw=w".into()),
                },
                ImagePayload {
                    image_url: "https://img.example.com/plot-aerial.jpg".into(),
                    is_cover: None,
                    blur_hash: None,
                },
            ]),
            ..Default::default()
        },
        Some(owner_id),
    )
    .await?;
    let reconciled = reconciled.data.unwrap();
    assert_eq!(reconciled.pictures.len(), 2);
    let front = reconciled
        .pictures
        .iter()
        .find(|p| p.image_url.ends_with("villa-front.jpg"))
        .expect("existing image kept");
    assert_eq!(front.blur_hash.as_deref(), Some("LKO2?U%2Tw=w"));
    assert!(front.is_cover);

    // The auction keeps its own copy of the shared URL, untouched.
    let auction_after = auction_service::get_auction(&state, auction.id, None).await?;
    assert_eq!(auction_after.data.unwrap().pictures.len(), 1);

    let too_low =
        auction_service::place_bid(&state, auction.id, PlaceBidRequest { bid_amount: 999.0 }, None)
            .await;
    assert!(matches!(too_low, Err(AppError::BadRequest(_))));

    let first = auction_service::place_bid(
        &state,
        auction.id,
        PlaceBidRequest { bid_amount: 1000.0 },
        None,
    )
    .await?;
    assert_eq!(first.data.unwrap().current_bid, Some(1000.0));

    let equal = auction_service::place_bid(
        &state,
        auction.id,
        PlaceBidRequest { bid_amount: 1000.0 },
        None,
    )
    .await;
    assert!(matches!(equal, Err(AppError::BadRequest(_))));

    let raised = auction_service::place_bid(
        &state,
        auction.id,
        PlaceBidRequest { bid_amount: 1500.0 },
        None,
    )
    .await?;
    assert_eq!(raised.data.unwrap().current_bid, Some(1500.0));

    // Auction search matches on the joined location name.
    let found = auction_service::list_auctions(
        &state,
        AuctionListQuery {
            search: Some("Airport".into()),
        },
        None,
    )
    .await?;
    assert_eq!(found.data.unwrap().items.len(), 1);

    // Tours: requesting against a real property succeeds, the owner sees it.
    let tour = tour_service::request_tour(
        &state,
        &owner,
        RequestTourRequest {
            item_id: property.id,
            date: Utc::now() + Duration::days(1),
        },
    )
    .await?;
    assert_eq!(tour.data.unwrap().status, "PENDING");

    let tours = tour_service::list_tours(&state, &owner).await?;
    assert_eq!(tours.data.unwrap().items.len(), 1);

    // Home loans: the embedded loaner is always created fresh.
    let loan = loan_service::create_home_loan(
        &state,
        CreateHomeLoanRequest {
            name: "Starter Mortgage".into(),
            description: "Entry level home loan".into(),
            loaner: EmbeddedLoanerPayload {
                name: "Awash Bank".into(),
                logo: None,
                real_state_provided: Some(true),
                phone: None,
            },
            criteria: vec![
                CriteriaPayload {
                    description: "Two years of employment".into(),
                },
                CriteriaPayload {
                    description: "20% down payment".into(),
                },
            ],
        },
    )
    .await?;
    let loan = loan.data.unwrap();
    assert_eq!(loan.criteria.len(), 2);
    let loan_loaner = loan.loaner.expect("loaner");
    assert_ne!(loan_loaner.id, first_loaner);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE requested_tours, wishlist_auctions, wishlist_properties, wishlists, \
         criteria, home_loans, loaner_properties, loaners, images, amenities, auctions, \
         properties, locations, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { orm })
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
