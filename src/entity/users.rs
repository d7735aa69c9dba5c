use sea_orm::entity::prelude::*;

// Accounts are issued by the external auth service; this table only anchors
// foreign keys for ownership, wishlists and tours.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::properties::Entity")]
    Properties,
    #[sea_orm(has_one = "super::wishlists::Entity")]
    Wishlists,
    #[sea_orm(has_many = "super::requested_tours::Entity")]
    RequestedTours,
}

impl Related<super::wishlists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wishlists.def()
    }
}

impl Related<super::requested_tours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestedTours.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
