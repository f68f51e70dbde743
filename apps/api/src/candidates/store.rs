use sqlx::PgPool;
use uuid::Uuid;

use crate::models::candidate::CandidateRow;
use crate::models::osint::OsintProfileRow;

/// Parameters for inserting a new candidate.
pub struct NewCandidate<'a> {
    pub org_id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub handle: Option<&'a str>,
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub experience_years: i32,
    pub skills: &'a [String],
    pub pipeline_stage: &'a str,
    pub availability: &'a str,
    pub progression: &'a str,
    pub salary_expectation_min: Option<i64>,
    pub culture_ratings: &'a [f64],
    pub engagement_score: Option<f64>,
}

pub async fn insert_candidate(
    pool: &PgPool,
    params: NewCandidate<'_>,
) -> Result<CandidateRow, sqlx::Error> {
    let NewCandidate {
        org_id,
        full_name,
        email,
        handle,
        title,
        company,
        location,
        experience_years,
        skills,
        pipeline_stage,
        availability,
        progression,
        salary_expectation_min,
        culture_ratings,
        engagement_score,
    } = params;

    sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (id, org_id, full_name, email, handle, title, company, experience_years,
             skills, location, pipeline_stage, availability, progression,
             salary_expectation_min, culture_ratings, engagement_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(org_id)
    .bind(full_name)
    .bind(email)
    .bind(handle)
    .bind(title)
    .bind(company)
    .bind(experience_years)
    .bind(skills)
    .bind(location)
    .bind(pipeline_stage)
    .bind(availability)
    .bind(progression)
    .bind(salary_expectation_min)
    .bind(culture_ratings)
    .bind(engagement_score)
    .fetch_one(pool)
    .await
}

pub async fn get_candidate(
    pool: &PgPool,
    id: Uuid,
    org_id: Uuid,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1 AND org_id = $2")
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_candidates(
    pool: &PgPool,
    org_id: Uuid,
    stage: Option<&str>,
) -> Result<Vec<CandidateRow>, sqlx::Error> {
    match stage {
        Some(stage) => {
            sqlx::query_as::<_, CandidateRow>(
                r#"
                SELECT * FROM candidates
                WHERE org_id = $1 AND pipeline_stage = $2
                ORDER BY created_at DESC
                "#,
            )
            .bind(org_id)
            .bind(stage)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, CandidateRow>(
                "SELECT * FROM candidates WHERE org_id = $1 ORDER BY created_at DESC",
            )
            .bind(org_id)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn update_stage(
    pool: &PgPool,
    id: Uuid,
    org_id: Uuid,
    stage: &str,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET pipeline_stage = $1, updated_at = NOW()
        WHERE id = $2 AND org_id = $3
        RETURNING *
        "#,
    )
    .bind(stage)
    .bind(id)
    .bind(org_id)
    .fetch_optional(pool)
    .await
}

/// Signal values for an OSINT profile refresh. PUT semantics: the stored
/// profile is replaced wholesale, absent fields become NULL.
pub struct OsintUpdate<'a> {
    pub technical_depth: Option<f64>,
    pub community_influence: Option<f64>,
    pub github_activity: Option<f64>,
    pub availability_signal: Option<&'a str>,
}

pub async fn upsert_osint_profile(
    pool: &PgPool,
    candidate_id: Uuid,
    update: OsintUpdate<'_>,
) -> Result<OsintProfileRow, sqlx::Error> {
    sqlx::query_as::<_, OsintProfileRow>(
        r#"
        INSERT INTO osint_profiles
            (id, candidate_id, technical_depth, community_influence,
             github_activity, availability_signal)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (candidate_id) DO UPDATE SET
            technical_depth = EXCLUDED.technical_depth,
            community_influence = EXCLUDED.community_influence,
            github_activity = EXCLUDED.github_activity,
            availability_signal = EXCLUDED.availability_signal,
            refreshed_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(candidate_id)
    .bind(update.technical_depth)
    .bind(update.community_influence)
    .bind(update.github_activity)
    .bind(update.availability_signal)
    .fetch_one(pool)
    .await
}

pub async fn get_osint_profile(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Option<OsintProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, OsintProfileRow>("SELECT * FROM osint_profiles WHERE candidate_id = $1")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await
}
