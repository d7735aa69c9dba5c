use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location_id: Uuid,
    pub price: f64,
    pub currency: String,
    pub discount: Option<f64>,
    pub sold_out: bool,
    pub is_store: bool,
    pub kind: Option<String>,
    pub move_in_date: Option<DateTimeWithTimeZone>,
    pub rental: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id"
    )]
    Location,
    #[sea_orm(has_one = "super::amenities::Entity")]
    Amenities,
    #[sea_orm(has_many = "super::images::Entity")]
    Images,
    #[sea_orm(has_many = "super::loaner_properties::Entity")]
    LoanerProperties,
    #[sea_orm(has_many = "super::wishlist_properties::Entity")]
    WishlistProperties,
    #[sea_orm(has_many = "super::requested_tours::Entity")]
    RequestedTours,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::amenities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Amenities.def()
    }
}

impl Related<super::images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::loaner_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoanerProperties.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
