use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "programmation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date_debut: String,
    pub date_fin: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seance::Entity")]
    Seance,
    #[sea_orm(has_many = "super::programmer::Entity")]
    Programmer,
    #[sea_orm(has_many = "super::projeter::Entity")]
    Projeter,
}

impl Related<super::seance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seance.def()
    }
}

impl Related<super::programmer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programmer.def()
    }
}

impl Related<super::projeter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projeter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
