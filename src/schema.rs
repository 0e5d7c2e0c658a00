use sea_query::Iden;

/// Songs table - one row per play, keyed by played_at
#[derive(Iden)]
pub enum Songs {
    Table,
    Artist,
    Album,
    PlayedAt,
    SongName,
}
