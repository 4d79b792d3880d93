use sea_orm::entity::prelude::*;

/// Programmation ↔ film link.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "programmer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub programmation_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub film_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::programmation::Entity",
        from = "Column::ProgrammationId",
        to = "super::programmation::Column::Id",
        on_delete = "Cascade"
    )]
    Programmation,
    #[sea_orm(
        belongs_to = "super::film::Entity",
        from = "Column::FilmId",
        to = "super::film::Column::Id",
        on_delete = "Cascade"
    )]
    Film,
}

impl Related<super::programmation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programmation.def()
    }
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
