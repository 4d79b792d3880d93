use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub titre: String,
    pub duree: i32,
    pub langue: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub age_minimum: i32,
    pub classification: Option<String>,
    pub date_sortie: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub poster: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bande_annonce: Option<String>,
    /// JSON array of genre tags.
    #[sea_orm(column_type = "Text")]
    pub genres: String,
    pub statut: String,
    pub date_creation: i64,
    pub date_modification: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::realiser::Entity")]
    Realiser,
    #[sea_orm(has_many = "super::jouer::Entity")]
    Jouer,
    #[sea_orm(has_many = "super::seance_salle::Entity")]
    SeanceSalle,
}

impl Related<super::realiser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realiser.def()
    }
}

impl Related<super::jouer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jouer.def()
    }
}

impl Related<super::seance_salle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeanceSalle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
