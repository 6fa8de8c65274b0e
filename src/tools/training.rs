//! Training metric tools.

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date, DateRequest, ToolError};

pub async fn get_training_status(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_training_status(date).await?;
    Ok(format::render(&format!("Training status for {date}"), &value))
}

pub async fn get_training_readiness(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_training_readiness(date).await?;
    Ok(format::render(
        &format!("Training readiness for {date}"),
        &value,
    ))
}
