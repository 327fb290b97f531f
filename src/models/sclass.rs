use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sclass {
    pub id: Uuid,
    pub sclass_name: String,
    pub school_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSclassRequest {
    pub sclass_name: String,
    pub school_id: Uuid,
}
