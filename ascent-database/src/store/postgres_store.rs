use anyhow::Context as _;
use sqlx::PgPool;

use crate::model::progression::{ProgressionRecord, UserProfile};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    level: i32,
    exp: i64,
    coins: i64,
    rank: i32,
    title: String,
    last_check_in: Option<i64>,
    redeemed_codes: Vec<String>,
    created_at: i64,
}

const USER_COLUMNS: &str =
    "id, name, level, exp, coins, rank, title, last_check_in, redeemed_codes, created_at";

#[derive(Clone, Debug)]
pub(crate) struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_user(&self, user_id: u64, name: &str, now: u64) -> anyhow::Result<bool> {
        let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
        let now_i64 = i64::try_from(now).context("created_at out of i64 range")?;
        let initial = ProgressionRecord::initial();
        let level = i32::try_from(initial.level).context("level out of i32 range")?;
        let rank = i32::try_from(initial.rank).context("rank out of i32 range")?;

        let inserted = sqlx::query(
            "INSERT INTO users (id, name, level, exp, coins, rank, title, created_at)
             VALUES ($1, $2, $3, 0, 0, $4, $5, $6)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(user_id_i64)
        .bind(name)
        .bind(level)
        .bind(rank)
        .bind(&initial.title)
        .bind(now_i64)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    pub async fn load_profile(&self, user_id: u64) -> anyhow::Result<Option<UserProfile>> {
        let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(user_id_i64)
                .fetch_optional(&self.pool)
                .await?;

        row.map(to_profile).transpose()
    }

    /// Read-modify-write one record under a row lock.
    ///
    /// Returns `None` when the user does not exist. The boolean is true when
    /// the record changed and was written back.
    pub async fn update_record<F, T>(
        &self,
        user_id: u64,
        apply: F,
    ) -> anyhow::Result<Option<(T, bool)>>
    where
        F: FnOnce(&mut ProgressionRecord) -> T + Send,
        T: Send,
    {
        let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
        let mut tx = self.pool.begin().await?;

        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(user_id_i64)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let before = to_profile(row)?.progression;
        let mut record = before.clone();
        let output = apply(&mut record);

        if record == before {
            tx.rollback().await?;
            return Ok(Some((output, false)));
        }

        let level = i32::try_from(record.level).context("level out of i32 range")?;
        let exp = i64::try_from(record.exp).context("exp out of i64 range")?;
        let coins = i64::try_from(record.coins).context("coins out of i64 range")?;
        let rank = i32::try_from(record.rank).context("rank out of i32 range")?;
        let last_check_in = record
            .last_check_in
            .map(i64::try_from)
            .transpose()
            .context("last_check_in out of i64 range")?;

        sqlx::query(
            "UPDATE users
             SET level = $2, exp = $3, coins = $4, rank = $5, title = $6,
                 last_check_in = $7, redeemed_codes = $8
             WHERE id = $1",
        )
        .bind(user_id_i64)
        .bind(level)
        .bind(exp)
        .bind(coins)
        .bind(rank)
        .bind(&record.title)
        .bind(last_check_in)
        .bind(&record.redeemed_codes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((output, true)))
    }
}

fn to_profile(row: UserRow) -> anyhow::Result<UserProfile> {
    let progression = ProgressionRecord {
        level: u32::try_from(row.level).context("level row out of u32 range")?,
        exp: u64::try_from(row.exp).context("exp row out of u64 range")?,
        coins: u64::try_from(row.coins).context("coins row out of u64 range")?,
        rank: u32::try_from(row.rank).context("rank row out of u32 range")?,
        title: row.title,
        last_check_in: row
            .last_check_in
            .map(u64::try_from)
            .transpose()
            .context("last_check_in row out of u64 range")?,
        redeemed_codes: row.redeemed_codes,
    };

    Ok(UserProfile {
        user_id: u64::try_from(row.id).context("id row out of u64 range")?,
        name: row.name,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        progression,
    })
}
