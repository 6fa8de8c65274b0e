//! Workout tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{garmin::GarminClient, lib::format};

use super::{PagingRequest, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WorkoutIdRequest {
    /// Numeric Garmin workout identifier.
    pub workout_id: u64,
}

pub async fn get_workouts(
    client: &GarminClient,
    request: PagingRequest,
) -> Result<String, ToolError> {
    let value = client
        .get_workouts(request.start(), request.limit())
        .await?;
    Ok(format::render("Workouts", &value))
}

pub async fn get_workout(
    client: &GarminClient,
    request: WorkoutIdRequest,
) -> Result<String, ToolError> {
    let value = client.get_workout(request.workout_id).await?;
    Ok(format::render(
        &format!("Workout {}", request.workout_id),
        &value,
    ))
}
