use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
}
