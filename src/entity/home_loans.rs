use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "home_loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub loaner_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::loaners::Entity",
        from = "Column::LoanerId",
        to = "super::loaners::Column::Id"
    )]
    Loaner,
    #[sea_orm(has_many = "super::criteria::Entity")]
    Criteria,
}

impl Related<super::loaners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loaner.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
