use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wishlists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::wishlist_properties::Entity")]
    WishlistProperties,
    #[sea_orm(has_many = "super::wishlist_auctions::Entity")]
    WishlistAuctions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::wishlist_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistProperties.def()
    }
}

impl Related<super::wishlist_auctions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistAuctions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
