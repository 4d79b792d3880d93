use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Unique person name. MySQL's default collation folds case and accents, so
/// force a binary one there.
fn person_name<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let mut def = string_uniq(name);
    if manager.get_database_backend() == sea_orm::DatabaseBackend::MySql {
        def.extra("COLLATE utf8mb4_bin");
    }
    def
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(text(Film::Titre))
                    .col(integer(Film::Duree))
                    .col(string(Film::Langue))
                    .col(text_null(Film::Synopsis))
                    .col(integer(Film::AgeMinimum))
                    .col(string_null(Film::Classification))
                    .col(string_null(Film::DateSortie))
                    .col(text_null(Film::Poster))
                    .col(text_null(Film::BandeAnnonce))
                    .col(text(Film::Genres))
                    .col(string(Film::Statut))
                    .col(big_integer(Film::DateCreation))
                    .col(big_integer_null(Film::DateModification))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Realisateur::Table)
                    .if_not_exists()
                    .col(pk_auto(Realisateur::Id))
                    .col(person_name(manager, Realisateur::Nom))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Acteur::Table)
                    .if_not_exists()
                    .col(pk_auto(Acteur::Id))
                    .col(person_name(manager, Acteur::Nom))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Realiser::Table)
                    .if_not_exists()
                    .col(integer(Realiser::FilmId))
                    .col(integer(Realiser::RealisateurId))
                    .col(integer(Realiser::Position))
                    .primary_key(Index::create().col(Realiser::FilmId).col(Realiser::RealisateurId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_realiser_film")
                            .from(Realiser::Table, Realiser::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_realiser_realisateur")
                            .from(Realiser::Table, Realiser::RealisateurId)
                            .to(Realisateur::Table, Realisateur::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Jouer::Table)
                    .if_not_exists()
                    .col(integer(Jouer::FilmId))
                    .col(integer(Jouer::ActeurId))
                    .col(integer(Jouer::Position))
                    .primary_key(Index::create().col(Jouer::FilmId).col(Jouer::ActeurId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jouer_film")
                            .from(Jouer::Table, Jouer::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jouer_acteur")
                            .from(Jouer::Table, Jouer::ActeurId)
                            .to(Acteur::Table, Acteur::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Jouer::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Realiser::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Acteur::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Realisateur::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
    Titre,
    Duree,
    Langue,
    Synopsis,
    AgeMinimum,
    Classification,
    DateSortie,
    Poster,
    BandeAnnonce,
    Genres,
    Statut,
    DateCreation,
    DateModification,
}

#[derive(DeriveIden)]
enum Realisateur {
    Table,
    Id,
    Nom,
}

#[derive(DeriveIden)]
enum Acteur {
    Table,
    Id,
    Nom,
}

#[derive(DeriveIden)]
enum Realiser {
    Table,
    FilmId,
    RealisateurId,
    Position,
}

#[derive(DeriveIden)]
enum Jouer {
    Table,
    FilmId,
    ActeurId,
    Position,
}
