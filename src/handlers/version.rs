//! Version information endpoint handler.

use crate::{build_info, models::VersionResponse};
use actix_web::web;
use paperclip::actix::api_v2_operation;

#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current API version, commit hash, and build time.",
    tags("Version")
)]
pub async fn version() -> web::Json<VersionResponse> {
    web::Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: build_info::COMMIT.to_string(),
        build_time: build_info::BUILD_TIME.to_string(),
    })
}
