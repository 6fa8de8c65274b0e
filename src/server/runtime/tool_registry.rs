use std::{future::Future, sync::Arc};

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    garmin::GarminClient,
    lib::telemetry::ToolCallSpan,
    tools::{
        self,
        activities::{ActivitiesByDateRequest, ActivityIdRequest},
        devices::DeviceIdRequest,
        workouts::WorkoutIdRequest,
        DateRangeRequest, DateRequest, PagingRequest, ToolError,
    },
};

/// MCP server handler owning the tool registry.
///
/// Holds the single authenticated client for the process; tools borrow it,
/// none may replace it.
#[derive(Clone)]
pub struct GarminServer {
    client: Arc<GarminClient>,
    instructions: Arc<String>,
    tool_router: ToolRouter<Self>,
}

impl GarminServer {
    pub fn new(client: Arc<GarminClient>, instructions: String) -> Self {
        Self {
            client,
            instructions: Arc::new(instructions),
            tool_router: Self::tool_router(),
        }
    }

    /// Run one tool body under a telemetry span and wrap its text result.
    async fn run_tool<F>(&self, tool: &'static str, body: F) -> Result<CallToolResult, ErrorData>
    where
        F: Future<Output = Result<String, ToolError>>,
    {
        let span = ToolCallSpan::start(tool);
        match body.await {
            Ok(text) => {
                span.finish("ok");
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(err) => {
                span.finish("error");
                Err(err.into_error_data())
            }
        }
    }
}

#[tool_router(router = tool_router)]
impl GarminServer {
    // Activity management

    #[tool(
        name = "list_activities",
        description = "List recent Garmin activities as a short text summary"
    )]
    async fn list_activities(
        &self,
        Parameters(request): Parameters<PagingRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "list_activities",
            tools::activities::list_activities(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_activity",
        description = "Fetch the full detail payload for one activity by ID"
    )]
    async fn get_activity(
        &self,
        Parameters(request): Parameters<ActivityIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_activity",
            tools::activities::get_activity(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_activities_by_date",
        description = "List activities within a date range (YYYY-MM-DD), optionally filtered by type"
    )]
    async fn get_activities_by_date(
        &self,
        Parameters(request): Parameters<ActivitiesByDateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_activities_by_date",
            tools::activities::get_activities_by_date(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_last_activity",
        description = "Fetch the most recent Garmin activity"
    )]
    async fn get_last_activity(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_last_activity",
            tools::activities::get_last_activity(&self.client),
        )
        .await
    }

    // Health & wellness

    #[tool(
        name = "get_daily_summary",
        description = "Fetch the daily wellness summary for a date (YYYY-MM-DD)"
    )]
    async fn get_daily_summary(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_daily_summary",
            tools::wellness::get_daily_summary(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_sleep_data",
        description = "Fetch sleep data for a date (YYYY-MM-DD)"
    )]
    async fn get_sleep_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_sleep_data",
            tools::wellness::get_sleep_data(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_heart_rate_data",
        description = "Fetch daily heart rate data for a date (YYYY-MM-DD)"
    )]
    async fn get_heart_rate_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_heart_rate_data",
            tools::wellness::get_heart_rate_data(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_body_battery",
        description = "Fetch body battery reports for a date range (YYYY-MM-DD)"
    )]
    async fn get_body_battery(
        &self,
        Parameters(request): Parameters<DateRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_body_battery",
            tools::wellness::get_body_battery(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_stress_data",
        description = "Fetch daily stress data for a date (YYYY-MM-DD)"
    )]
    async fn get_stress_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_stress_data",
            tools::wellness::get_stress_data(&self.client, request),
        )
        .await
    }

    // User profile

    #[tool(
        name = "get_user_profile",
        description = "Fetch the Garmin Connect social profile of the signed-in user"
    )]
    async fn get_user_profile(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_user_profile",
            tools::profile::get_user_profile(&self.client),
        )
        .await
    }

    #[tool(
        name = "get_user_settings",
        description = "Fetch the account settings of the signed-in user"
    )]
    async fn get_user_settings(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_user_settings",
            tools::profile::get_user_settings(&self.client),
        )
        .await
    }

    // Devices

    #[tool(name = "get_devices", description = "List registered Garmin devices")]
    async fn get_devices(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool("get_devices", tools::devices::get_devices(&self.client))
            .await
    }

    #[tool(
        name = "get_device_settings",
        description = "Fetch settings for one device by ID"
    )]
    async fn get_device_settings(
        &self,
        Parameters(request): Parameters<DeviceIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_device_settings",
            tools::devices::get_device_settings(&self.client, request),
        )
        .await
    }

    // Gear management

    #[tool(name = "get_gear_list", description = "List registered gear")]
    async fn get_gear_list(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool("get_gear_list", tools::gear::get_gear_list(&self.client))
            .await
    }

    #[tool(
        name = "get_gear_defaults",
        description = "Fetch gear defaults per activity type"
    )]
    async fn get_gear_defaults(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_gear_defaults",
            tools::gear::get_gear_defaults(&self.client),
        )
        .await
    }

    // Weight management

    #[tool(
        name = "get_body_composition",
        description = "Fetch body composition data for a date range (YYYY-MM-DD)"
    )]
    async fn get_body_composition(
        &self,
        Parameters(request): Parameters<DateRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_body_composition",
            tools::weight::get_body_composition(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_weigh_ins",
        description = "Fetch weigh-ins for a date range (YYYY-MM-DD)"
    )]
    async fn get_weigh_ins(
        &self,
        Parameters(request): Parameters<DateRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_weigh_ins",
            tools::weight::get_weigh_ins(&self.client, request),
        )
        .await
    }

    // Challenges

    #[tool(
        name = "get_adhoc_challenges",
        description = "List historical ad hoc challenges"
    )]
    async fn get_adhoc_challenges(
        &self,
        Parameters(request): Parameters<PagingRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_adhoc_challenges",
            tools::challenges::get_adhoc_challenges(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_badge_challenges",
        description = "List completed badge challenges"
    )]
    async fn get_badge_challenges(
        &self,
        Parameters(request): Parameters<PagingRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_badge_challenges",
            tools::challenges::get_badge_challenges(&self.client, request),
        )
        .await
    }

    // Training

    #[tool(
        name = "get_training_status",
        description = "Fetch aggregated training status for a date (YYYY-MM-DD)"
    )]
    async fn get_training_status(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_training_status",
            tools::training::get_training_status(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_training_readiness",
        description = "Fetch training readiness for a date (YYYY-MM-DD)"
    )]
    async fn get_training_readiness(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_training_readiness",
            tools::training::get_training_readiness(&self.client, request),
        )
        .await
    }

    // Workouts

    #[tool(name = "get_workouts", description = "List saved workouts")]
    async fn get_workouts(
        &self,
        Parameters(request): Parameters<PagingRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_workouts",
            tools::workouts::get_workouts(&self.client, request),
        )
        .await
    }

    #[tool(name = "get_workout", description = "Fetch one workout by ID")]
    async fn get_workout(
        &self,
        Parameters(request): Parameters<WorkoutIdRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_workout",
            tools::workouts::get_workout(&self.client, request),
        )
        .await
    }

    // Data management

    #[tool(
        name = "get_hydration_data",
        description = "Fetch hydration data for a date (YYYY-MM-DD)"
    )]
    async fn get_hydration_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_hydration_data",
            tools::data::get_hydration_data(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_spo2_data",
        description = "Fetch pulse ox (SpO2) data for a date (YYYY-MM-DD)"
    )]
    async fn get_spo2_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_spo2_data",
            tools::data::get_spo2_data(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_blood_pressure",
        description = "Fetch blood pressure readings for a date range (YYYY-MM-DD)"
    )]
    async fn get_blood_pressure(
        &self,
        Parameters(request): Parameters<DateRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_blood_pressure",
            tools::data::get_blood_pressure(&self.client, request),
        )
        .await
    }

    // Women's health

    #[tool(
        name = "get_menstrual_data",
        description = "Fetch menstrual cycle data for a date (YYYY-MM-DD)"
    )]
    async fn get_menstrual_data(
        &self,
        Parameters(request): Parameters<DateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_menstrual_data",
            tools::womens_health::get_menstrual_data(&self.client, request),
        )
        .await
    }

    #[tool(
        name = "get_pregnancy_summary",
        description = "Fetch the pregnancy tracking snapshot"
    )]
    async fn get_pregnancy_summary(&self) -> Result<CallToolResult, ErrorData> {
        self.run_tool(
            "get_pregnancy_summary",
            tools::womens_health::get_pregnancy_summary(&self.client),
        )
        .await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GarminServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
