use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::JobRow;

/// Parameters for inserting a new job. Jobs always open in status `open`.
pub struct NewJob<'a> {
    pub org_id: Uuid,
    pub title: &'a str,
    pub department: Option<&'a str>,
    pub requirements: &'a [String],
    pub required_experience_years: Option<i32>,
    pub salary_max: Option<i64>,
    pub location: Option<&'a str>,
    pub remote_allowed: bool,
    pub priority: &'a str,
}

pub async fn insert_job(pool: &PgPool, params: NewJob<'_>) -> Result<JobRow, sqlx::Error> {
    let NewJob {
        org_id,
        title,
        department,
        requirements,
        required_experience_years,
        salary_max,
        location,
        remote_allowed,
        priority,
    } = params;

    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, org_id, title, department, requirements, required_experience_years,
             salary_max, location, remote_allowed, status, priority)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'open', $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(org_id)
    .bind(title)
    .bind(department)
    .bind(requirements)
    .bind(required_experience_years)
    .bind(salary_max)
    .bind(location)
    .bind(remote_allowed)
    .bind(priority)
    .fetch_one(pool)
    .await
}

pub async fn get_job(pool: &PgPool, id: Uuid, org_id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND org_id = $2")
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_jobs(pool: &PgPool, org_id: Uuid) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE org_id = $1 ORDER BY created_at DESC")
        .bind(org_id)
        .fetch_all(pool)
        .await
}
