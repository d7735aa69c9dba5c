use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loaner_properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub loaner_id: Uuid,
    pub property_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::loaners::Entity",
        from = "Column::LoanerId",
        to = "super::loaners::Column::Id"
    )]
    Loaner,
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Property,
}

impl Related<super::loaners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loaner.def()
    }
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
