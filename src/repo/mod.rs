mod entries;
mod giveaways;

#[cfg(test)]
pub(crate) mod test;

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub use entries::*;
pub use giveaways::*;

use crate::config::DatabaseConfig;

pub(crate) static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Clone)]
pub struct Repositories {
    pub giveaways: Giveaways,
    pub entries: Entries,
}

impl Repositories {
    pub fn new(db_conn: &Pool<Sqlite>) -> Self {
        Self {
            giveaways: Giveaways::new(db_conn.clone()),
            entries: Entries::new(db_conn.clone()),
        }
    }
}

pub async fn establish_database_connection(config: &DatabaseConfig) -> anyhow::Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

#[macro_export]
macro_rules! repository {
    ($name:ident, $($methods:item),*) => {
        #[derive(Clone)]
        pub struct $name {
            pool: sqlx::Pool<sqlx::Sqlite>,
        }

        impl $name {
            pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
                Self { pool }
            }

            $($methods)*
        }
    };
}
