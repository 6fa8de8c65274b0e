//! Challenge tools.

use crate::{garmin::GarminClient, lib::format};

use super::{PagingRequest, ToolError};

pub async fn get_adhoc_challenges(
    client: &GarminClient,
    request: PagingRequest,
) -> Result<String, ToolError> {
    let value = client
        .get_adhoc_challenges(request.start(), request.limit())
        .await?;
    Ok(format::render("Ad hoc challenges", &value))
}

pub async fn get_badge_challenges(
    client: &GarminClient,
    request: PagingRequest,
) -> Result<String, ToolError> {
    let value = client
        .get_badge_challenges(request.start(), request.limit())
        .await?;
    Ok(format::render("Badge challenges", &value))
}
