use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Adresse::Table)
                    .if_not_exists()
                    .col(pk_auto(Adresse::Id))
                    .col(string_null(Adresse::Numero))
                    .col(string(Adresse::Rue))
                    .col(string(Adresse::Ville))
                    .col(string(Adresse::CodePostal))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cinema::Table)
                    .if_not_exists()
                    .col(pk_auto(Cinema::Id))
                    .col(string(Cinema::Nom))
                    .col(double_null(Cinema::Note))
                    .col(integer(Cinema::AdresseId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cinema_adresse")
                            .from(Cinema::Table, Cinema::AdresseId)
                            .to(Adresse::Table, Adresse::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cinema_adresse_unique")
                    .table(Cinema::Table)
                    .col(Cinema::AdresseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cinema::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Adresse::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Adresse {
    Table,
    Id,
    Numero,
    Rue,
    Ville,
    CodePostal,
}

#[derive(DeriveIden)]
enum Cinema {
    Table,
    Id,
    Nom,
    Note,
    AdresseId,
}
