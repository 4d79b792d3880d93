use sea_orm::entity::prelude::*;

/// Film ↔ actor link, ordered by `position`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jouer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub film_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub acteur_id: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::film::Entity",
        from = "Column::FilmId",
        to = "super::film::Column::Id",
        on_delete = "Cascade"
    )]
    Film,
    #[sea_orm(
        belongs_to = "super::acteur::Entity",
        from = "Column::ActeurId",
        to = "super::acteur::Column::Id",
        on_delete = "Cascade"
    )]
    Acteur,
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl Related<super::acteur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Acteur.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
