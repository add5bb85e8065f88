//! Parameterized SQL for the `jobs` table.
//!
//! Every function runs on the caller's connection so a request never holds
//! more than one.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use crate::models::job::{Job, JobDraft};

/// Optional columns may hold NULL when rows were written by other tools.
const JOB_COLUMNS: &str = "id, title, company, location, type, \
     COALESCE(salary, '') AS salary, \
     COALESCE(tags, '') AS tags, \
     COALESCE(description, '') AS description, \
     COALESCE(requirements, '') AS requirements, \
     COALESCE(application_link, '') AS application_link, \
     date_posted";

const SEARCH_COLUMNS: [&str; 4] = ["title", "company", "location", "tags"];

/// Escapes LIKE wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Returns one page of jobs, newest first, optionally filtered by a
/// case-insensitive substring over title, company, location and tags.
pub async fn list(
    conn: &mut SqliteConnection,
    search: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Job>, sqlx::Error> {
    debug!("Listing jobs: search={search:?} limit={limit} offset={offset}");

    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {JOB_COLUMNS} FROM jobs"));
    if !search.is_empty() {
        let pattern = format!("%{}%", escape_like(search));
        query.push(" WHERE ");
        let mut filters = query.separated(" OR ");
        for column in SEARCH_COLUMNS {
            filters.push(format!("{column} LIKE "));
            filters.push_bind_unseparated(pattern.clone());
            filters.push_unseparated(" ESCAPE '\\'");
        }
    }
    query
        .push(" ORDER BY date_posted DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    query.build_query_as::<Job>().fetch_all(conn).await
}

/// Inserts a validated job and returns it with its assigned id.
pub async fn create(
    conn: &mut SqliteConnection,
    draft: JobDraft,
    date_posted: NaiveDate,
) -> Result<Job, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO jobs
            (title, company, location, type, salary, tags,
             description, requirements, application_link, date_posted)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.company)
    .bind(&draft.location)
    .bind(&draft.job_type)
    .bind(&draft.salary)
    .bind(&draft.tags)
    .bind(&draft.description)
    .bind(&draft.requirements)
    .bind(&draft.application_link)
    .bind(date_posted)
    .execute(conn)
    .await?;

    let JobDraft {
        title,
        company,
        location,
        job_type,
        salary,
        tags,
        description,
        requirements,
        application_link,
    } = draft;

    Ok(Job {
        id: result.last_insert_rowid(),
        title,
        company,
        location,
        job_type,
        salary,
        tags,
        description,
        requirements,
        application_link,
        date_posted,
    })
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Job>, sqlx::Error> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?");
    sqlx::query_as::<_, Job>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Applies `(column, value)` assignments to one row and returns the row as
/// stored afterwards. An empty assignment list writes nothing.
///
/// Returns `None` when no row has `id`.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    assignments: Vec<(&'static str, String)>,
) -> Result<Option<Job>, sqlx::Error> {
    if assignments.is_empty() {
        return get(conn, id).await;
    }

    let mut query = QueryBuilder::<Sqlite>::new("UPDATE jobs SET ");
    let mut set = query.separated(", ");
    for (column, value) in assignments {
        set.push(format!("{column} = "));
        set.push_bind_unseparated(value);
    }
    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(&mut *conn).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get(conn, id).await
}

/// Hard-deletes a row. Returns `false` when no row has `id`.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    fn draft(title: &str, company: &str, tags: &str) -> JobDraft {
        JobDraft {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            salary: String::new(),
            tags: tags.to_string(),
            description: String::new(),
            requirements: String::new(),
            application_link: String::new(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        let created = create(&mut conn, draft("Engineer", "Acme", "rust"), date("2024-03-01"))
            .await
            .unwrap();
        let fetched = get(&mut conn, created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.date_posted, date("2024-03-01"));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        let first = create(&mut conn, draft("A", "Acme", ""), date("2024-01-01"))
            .await
            .unwrap();
        assert!(delete(&mut conn, first.id).await.unwrap());
        let second = create(&mut conn, draft("B", "Acme", ""), date("2024-01-01"))
            .await
            .unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        for (title, day) in [("old", "2023-01-01"), ("new", "2024-06-01"), ("mid", "2023-09-15")] {
            create(&mut conn, draft(title, "Acme", ""), date(day))
                .await
                .unwrap();
        }

        let jobs = list(&mut conn, "", 10, 0).await.unwrap();
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_list_search_is_literal_substring() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        create(&mut conn, draft("100% remote", "Initech", ""), date("2024-01-01"))
            .await
            .unwrap();
        create(&mut conn, draft("1000 perks", "Initech", ""), date("2024-01-01"))
            .await
            .unwrap();

        let jobs = list(&mut conn, "100%", 10, 0).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "100% remote");
    }

    #[tokio::test]
    async fn test_list_search_matches_tags_case_insensitively() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        create(&mut conn, draft("Engineer", "Initech", "Remote, Senior"), date("2024-01-01"))
            .await
            .unwrap();
        create(&mut conn, draft("Designer", "Initech", "onsite"), date("2024-01-01"))
            .await
            .unwrap();

        let jobs = list(&mut conn, "senior", 10, 0).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Engineer");
    }

    #[tokio::test]
    async fn test_update_without_assignments_returns_current_row() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        let created = create(&mut conn, draft("Engineer", "Acme", ""), date("2024-01-01"))
            .await
            .unwrap();
        let unchanged = update(&mut conn, created.id, Vec::new()).await.unwrap();

        assert_eq!(unchanged, Some(created));
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        let result = update(&mut conn, 404, vec![("salary", "1".to_string())])
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_null_optional_columns_read_as_empty() {
        let db = test_db().await;
        let mut conn = db.pool.acquire().await.unwrap();

        sqlx::query(
            "INSERT INTO jobs (title, company, location, type, date_posted) \
             VALUES ('Engineer', 'Acme', 'Remote', 'Contract', '2024-02-02')",
        )
        .execute(&mut *conn)
        .await
        .unwrap();

        let jobs = list(&mut conn, "", 10, 0).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].salary, "");
        assert_eq!(jobs[0].tags, "");
    }
}
