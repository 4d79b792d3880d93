use sea_orm::entity::prelude::*;

/// Film ↔ director link. `position` keeps the order the directors were given in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "realiser")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub film_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub realisateur_id: i32,
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
        belongs_to = "super::realisateur::Entity",
        from = "Column::RealisateurId",
        to = "super::realisateur::Column::Id",
        on_delete = "Cascade"
    )]
    Realisateur,
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl Related<super::realisateur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realisateur.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
