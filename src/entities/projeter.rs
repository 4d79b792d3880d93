use sea_orm::entity::prelude::*;

/// Programmation ↔ cinema link.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projeter")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub programmation_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub cinema_id: i32,
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
        belongs_to = "super::cinema::Entity",
        from = "Column::CinemaId",
        to = "super::cinema::Column::Id",
        on_delete = "Cascade"
    )]
    Cinema,
}

impl Related<super::programmation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programmation.def()
    }
}

impl Related<super::cinema::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cinema.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
