//! AQI band table endpoint handler.

use crate::models::AqiBandInfo;
use actix_web::web;
use paperclip::actix::api_v2_operation;

/// Static AQI severity bands, for clients that colour AQI values
#[api_v2_operation(
    summary = "AQI Severity Bands",
    description = "Returns the AQI severity bands as inclusive upper bounds with their labels. The last band is open-ended.",
    tags("AQI")
)]
pub async fn aqi_bands() -> web::Json<Vec<AqiBandInfo>> {
    web::Json(AqiBandInfo::table())
}
