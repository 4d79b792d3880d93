use sea_orm::entity::prelude::*;

/// Single-room screening. `debut` is `date_heure` as unix seconds, used for the
/// conflict window lookup.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "seance_salle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub film_id: i32,
    pub salle_id: i32,
    pub date_heure: String,
    pub debut: i64,
    pub tarif_normal: f64,
    pub tarif_reduit: f64,
    pub tarif_enfant: f64,
    pub places_disponibles: i32,
    pub places_reservees: i32,
    pub version: String,
    pub qualite: String,
    pub type_seance: String,
    pub statut: String,
    pub date_creation: i64,
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
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
