use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loaners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub real_state_provided: bool,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::loaner_properties::Entity")]
    LoanerProperties,
    #[sea_orm(has_many = "super::home_loans::Entity")]
    HomeLoans,
}

impl Related<super::loaner_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoanerProperties.def()
    }
}

impl Related<super::home_loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeLoans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
