use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub jour: String,
    pub heure: String,
    pub programmation_id: i32,
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
}

impl Related<super::programmation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programmation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
