use sqlx::PgPool;
use uuid::Uuid;

use crate::models::template::MessageTemplateRow;

pub async fn insert_template(
    pool: &PgPool,
    org_id: Uuid,
    name: &str,
    channel: &str,
    body: &str,
) -> Result<MessageTemplateRow, sqlx::Error> {
    sqlx::query_as::<_, MessageTemplateRow>(
        r#"
        INSERT INTO message_templates (id, org_id, name, channel, body)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(org_id)
    .bind(name)
    .bind(channel)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn list_templates(
    pool: &PgPool,
    org_id: Uuid,
) -> Result<Vec<MessageTemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageTemplateRow>(
        "SELECT * FROM message_templates WHERE org_id = $1 ORDER BY created_at DESC",
    )
    .bind(org_id)
    .fetch_all(pool)
    .await
}

pub async fn get_template(
    pool: &PgPool,
    id: Uuid,
    org_id: Uuid,
) -> Result<Option<MessageTemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageTemplateRow>(
        "SELECT * FROM message_templates WHERE id = $1 AND org_id = $2",
    )
    .bind(id)
    .bind(org_id)
    .fetch_optional(pool)
    .await
}
