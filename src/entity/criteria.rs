use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub description: String,
    pub loan_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::home_loans::Entity",
        from = "Column::LoanId",
        to = "super::home_loans::Column::Id"
    )]
    HomeLoan,
}

impl Related<super::home_loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeLoan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
