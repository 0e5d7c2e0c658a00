pub mod ddl;
pub mod songs;
