use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cinema")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nom: String,
    pub note: Option<f64>,
    #[sea_orm(unique)]
    pub adresse_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::adresse::Entity",
        from = "Column::AdresseId",
        to = "super::adresse::Column::Id"
    )]
    Adresse,
    #[sea_orm(has_many = "super::projeter::Entity")]
    Projeter,
}

impl Related<super::adresse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adresse.def()
    }
}

impl Related<super::projeter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projeter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
