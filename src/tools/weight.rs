//! Weight management tools.

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date_range, DateRangeRequest, ToolError};

pub async fn get_body_composition(
    client: &GarminClient,
    request: DateRangeRequest,
) -> Result<String, ToolError> {
    let (start, end) = parse_date_range(&request.start_date, &request.end_date)?;
    let value = client.get_body_composition(start, end).await?;
    Ok(format::render("Body composition", &value))
}

pub async fn get_weigh_ins(
    client: &GarminClient,
    request: DateRangeRequest,
) -> Result<String, ToolError> {
    let (start, end) = parse_date_range(&request.start_date, &request.end_date)?;
    let value = client.get_weigh_ins(start, end).await?;
    Ok(format::render("Weigh-ins", &value))
}
