/*
 * Responsibility
 * - GET /me: echo the identity the auth gate resolved for this request
 */
use axum::Json;

use crate::api::v1::{dto::me::MeResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: ctx.user_id,
    })
}
