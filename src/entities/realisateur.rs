use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "realisateur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::realiser::Entity")]
    Realiser,
}

impl Related<super::realiser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realiser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
