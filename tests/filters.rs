use axum_realestate_api::{
    dto::properties::{LooseNumber, SearchPropertiesRequest, Threshold, TypeFilter},
    models::PropertyKind,
    services::auction_service::bid_accepted,
};

#[test]
fn loose_number_accepts_numbers_and_numeric_strings() {
    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "min_price": 1000, "max_price": "2500.5" }))
            .expect("valid body");

    assert_eq!(body.min_price.unwrap().as_f64(), Some(1000.0));
    assert_eq!(body.max_price.unwrap().as_f64(), Some(2500.5));
}

#[test]
fn unparsable_loose_number_degrades_to_ignored() {
    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "min_price": "cheap" })).expect("valid body");

    assert_eq!(body.min_price.unwrap().as_f64(), None);
}

#[test]
fn threshold_any_means_no_constraint() {
    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "bedroom": "Any", "bathroom": "3", "area": 120 }))
            .expect("valid body");

    assert_eq!(body.bedroom.unwrap().min_value(), None);
    assert_eq!(body.bathroom.unwrap().min_value(), Some(3.0));
    assert_eq!(body.area.unwrap().min_value(), Some(120.0));
}

#[test]
fn type_filter_accepts_single_value_and_list() {
    let single: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "type": "Villa" })).expect("valid body");
    match single.kind.expect("type filter") {
        TypeFilter::One(value) => assert_eq!(value, "Villa"),
        TypeFilter::Many(_) => panic!("expected single value"),
    }

    let many: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "type": ["Villa", "Apartment"] }))
            .expect("valid body");
    match many.kind.expect("type filter") {
        TypeFilter::Many(values) => assert_eq!(values, vec!["Villa", "Apartment"]),
        TypeFilter::One(_) => panic!("expected list"),
    }
}

#[test]
fn property_kind_uses_display_names_on_the_wire() {
    let kind: PropertyKind = serde_json::from_value(serde_json::json!("Plot Land")).expect("kind");
    assert_eq!(kind.as_str(), "Plot Land");

    let kind: PropertyKind =
        serde_json::from_value(serde_json::json!("Office Space")).expect("kind");
    assert_eq!(kind.as_str(), "Office Space");

    assert_eq!(
        serde_json::to_value(PropertyKind::SingleFamily).expect("serialize"),
        serde_json::json!("Single Family")
    );
}

#[test]
fn bounding_box_spans_radius_in_degrees() {
    let body: SearchPropertiesRequest = serde_json::from_value(serde_json::json!({
        "latitude": 9.0,
        "longitude": "38.7",
        "radius": 11.1
    }))
    .expect("valid body");

    let bbox = body.bounding_box().expect("bounding box");
    // 11.1 km / 111 km-per-degree = 0.1 degrees in each direction.
    assert!((bbox.min_lat - 8.9).abs() < 1e-9);
    assert!((bbox.max_lat - 9.1).abs() < 1e-9);
    assert!(bbox.contains(9.05, 38.7));
    assert!(!bbox.contains(9.2, 38.7));
}

#[test]
fn bounding_box_defaults_radius_and_requires_both_coordinates() {
    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "latitude": 9.0, "longitude": 38.7 }))
            .expect("valid body");
    let bbox = body.bounding_box().expect("bounding box");
    // Default radius is 10 km, roughly 0.09 degrees.
    assert!((bbox.max_lat - bbox.min_lat - 2.0 * 10.0 / 111.0).abs() < 1e-9);

    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "latitude": 9.0 })).expect("valid body");
    assert!(body.bounding_box().is_none());

    let body: SearchPropertiesRequest =
        serde_json::from_value(serde_json::json!({ "latitude": "here", "longitude": 38.7 }))
            .expect("valid body");
    assert!(body.bounding_box().is_none());
}

#[test]
fn first_bid_may_equal_starting_bid_but_later_bids_must_exceed() {
    // No bids yet: must meet the starting bid.
    assert!(!bid_accepted(1000.0, None, 999.0));
    assert!(bid_accepted(1000.0, None, 1000.0));

    // With a standing bid: strictly greater only.
    assert!(!bid_accepted(1000.0, Some(1000.0), 1000.0));
    assert!(bid_accepted(1000.0, Some(1000.0), 1500.0));
}

#[test]
fn loose_number_trims_whitespace() {
    let value = LooseNumber::Text("  42 ".to_string());
    assert_eq!(value.as_f64(), Some(42.0));

    let threshold = Threshold::Text(" 2 ".to_string());
    assert_eq!(threshold.min_value(), Some(2.0));
}
