use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "acteur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::jouer::Entity")]
    Jouer,
}

impl Related<super::jouer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jouer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
