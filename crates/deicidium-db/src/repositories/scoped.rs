//! Guild-scoped collection query shared by member and event repositories

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use deicidium_core::value_objects::{GuildId, QueryOptions, SortOrder};

/// Static description of a guild-owned table
pub struct ScopedTable {
    pub name: &'static str,
    pub columns: &'static str,
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Asc => "ORDER BY created_at ASC",
        SortOrder::Desc => "ORDER BY created_at DESC",
        SortOrder::None => "",
    }
}

/// Rows plus a window count; the count is taken before `LIMIT` applies
fn select_sql(table: &ScopedTable, sort: SortOrder) -> String {
    format!(
        "SELECT {}, COUNT(*) OVER () AS {TOTAL_COLUMN} FROM {} WHERE guild = $1 {} LIMIT $2",
        table.columns,
        table.name,
        order_clause(sort)
    )
}

const TOTAL_COLUMN: &str = "total_count";

/// Fetch the rows of `table` owned by `guild_id` together with the exact total
///
/// Rows and total come from one statement, so they describe the same snapshot.
/// The total ignores the limit. `LIMIT NULL` means no limit in PostgreSQL.
pub async fn fetch_scoped<M>(
    pool: &PgPool,
    table: &ScopedTable,
    guild_id: GuildId,
    options: QueryOptions,
) -> Result<(Vec<M>, u64), sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow>,
{
    let limit = options.effective_limit().map(i64::from);
    let rows = sqlx::query(&select_sql(table, options.sort))
        .bind(guild_id.into_inner())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    // No rows means nothing matched; a limit is never zero here
    let total: i64 = match rows.first() {
        Some(row) => row.try_get(TOTAL_COLUMN)?,
        None => 0,
    };
    let models = rows.iter().map(|row| M::from_row(row)).collect::<Result<Vec<M>, _>>()?;

    Ok((models, u64::try_from(total).unwrap_or(0)))
}
