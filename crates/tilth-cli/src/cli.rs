//! Command-line interface definitions and command handlers
//!
//! Argument structures use clap's derive API and convert into the core
//! parameter types, so the core crate stays free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ScheduleStore → Display
//! ```
//!
//! [`Cli`] owns the store and the renderer and turns every command into
//! rendered markdown.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use tilth_core::{
    engine,
    params::{
        CreateSchedule, Id, ListSchedules, PatchActivity, UpcomingActivities,
        UpdateScheduleStatus,
    },
    ActivityStatus, ActivityUpdateResult, CreateResult, CropList, DeleteResult,
    ScheduleStatus, ScheduleStore, ScheduleSummaries, Timeline, Upcoming,
};
use tokio_util::sync::CancellationToken;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Preview a crop timeline without saving it
#[derive(Args)]
pub struct PreviewArgs {
    /// Exact crop name as listed by `tilth crops`
    pub crop: String,
    /// Planting date (YYYY-MM-DD)
    pub start_date: String,
}

/// Create and save a schedule
#[derive(Args)]
pub struct CreateScheduleArgs {
    /// Exact crop name as listed by `tilth crops`
    pub crop: String,
    /// Planting date (YYYY-MM-DD) all activity offsets are anchored to
    pub start_date: String,
}

impl TryFrom<CreateScheduleArgs> for CreateSchedule {
    type Error = tilth_core::ScheduleError;

    fn try_from(val: CreateScheduleArgs) -> std::result::Result<Self, Self::Error> {
        CreateSchedule::parse(val.crop, &val.start_date)
    }
}

/// List schedules
#[derive(Args)]
pub struct ListSchedulesArgs {
    /// Only show schedules in this status
    #[arg(short, long)]
    pub status: Option<ScheduleStatusArg>,
}

impl From<ListSchedulesArgs> for ListSchedules {
    fn from(val: ListSchedulesArgs) -> Self {
        ListSchedules {
            status: val.status.map(Into::into),
        }
    }
}

/// Show a schedule's timeline
#[derive(Args)]
pub struct ShowScheduleArgs {
    /// ID of the schedule to display
    pub id: u64,
}

impl From<ShowScheduleArgs> for Id {
    fn from(val: ShowScheduleArgs) -> Self {
        Id { id: val.id }
    }
}

/// Explicitly change a schedule's status
#[derive(Args)]
pub struct ScheduleStatusArgs {
    /// ID of the schedule
    pub id: u64,
    /// New status
    pub status: ScheduleStatusArg,
}

impl From<ScheduleStatusArgs> for UpdateScheduleStatus {
    fn from(val: ScheduleStatusArgs) -> Self {
        UpdateScheduleStatus {
            id: val.id,
            status: val.status.into(),
        }
    }
}

/// Delete a schedule permanently
#[derive(Args)]
pub struct DeleteScheduleArgs {
    /// ID of the schedule to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Show activities due soon
#[derive(Args)]
pub struct UpcomingArgs {
    /// ID of the schedule
    pub id: u64,
    /// Look-ahead window in days
    #[arg(long, default_value_t = engine::DEFAULT_HORIZON_DAYS)]
    pub days: u32,
}

impl From<UpcomingArgs> for UpcomingActivities {
    fn from(val: UpcomingArgs) -> Self {
        UpcomingActivities {
            schedule_id: val.id,
            horizon_days: val.days,
        }
    }
}

/// Identify one activity within a schedule
#[derive(Args)]
pub struct ActivityArgs {
    /// ID of the schedule
    pub schedule_id: u64,
    /// Activity ID as shown in the timeline (e.g. "Sowing-0")
    pub activity_id: String,
}

impl ActivityArgs {
    fn into_params(self, status: ActivityStatus) -> PatchActivity {
        PatchActivity {
            schedule_id: self.schedule_id,
            activity_id: self.activity_id,
            status,
        }
    }
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Create a schedule from a crop template
    #[command(alias = "c")]
    Create(CreateScheduleArgs),
    /// List schedules with their progress
    #[command(alias = "l")]
    List(ListSchedulesArgs),
    /// Show a schedule's full timeline
    #[command(alias = "s")]
    Show(ShowScheduleArgs),
    /// Set a schedule's status (e.g. cancel it)
    Status(ScheduleStatusArgs),
    /// Delete a schedule permanently
    Delete(DeleteScheduleArgs),
    /// Show overdue and upcoming activities
    #[command(alias = "u")]
    Upcoming(UpcomingArgs),
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Mark an activity as completed
    Done(ActivityArgs),
    /// Mark a completed activity as pending again
    Undo(ActivityArgs),
    /// Skip an activity; this cannot be undone
    Skip(ActivityArgs),
}

/// Command-line representation of schedule status values
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ScheduleStatusArg {
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl From<ScheduleStatusArg> for ScheduleStatus {
    fn from(val: ScheduleStatusArg) -> Self {
        match val {
            ScheduleStatusArg::Planning => ScheduleStatus::Planning,
            ScheduleStatusArg::Active => ScheduleStatus::Active,
            ScheduleStatusArg::Completed => ScheduleStatus::Completed,
            ScheduleStatusArg::Cancelled => ScheduleStatus::Cancelled,
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Executes commands against a store and renders the results.
pub struct Cli {
    store: ScheduleStore,
    renderer: TerminalRenderer,
    today: Date,
    token: CancellationToken,
}

impl Cli {
    pub fn new(
        store: ScheduleStore,
        renderer: TerminalRenderer,
        today: Date,
        token: CancellationToken,
    ) -> Self {
        Self {
            store,
            renderer,
            today,
            token,
        }
    }

    pub fn list_crops(&self) -> Result<()> {
        self.renderer
            .render(&CropList(self.store.registry()).to_string())
    }

    pub fn preview(&self, args: PreviewArgs) -> Result<()> {
        let start_date = engine::parse_start_date(&args.start_date)?;
        let schedule = self
            .store
            .preview(&args.crop, start_date)
            .with_context(|| format!("Failed to preview '{}'", args.crop))?;
        self.renderer
            .render(&Timeline::new(&schedule, self.today).to_string())
    }

    pub async fn handle_schedule_command(&self, command: ScheduleCommands) -> Result<()> {
        match command {
            ScheduleCommands::Create(args) => {
                let params = CreateSchedule::try_from(args)?;
                let schedule = self
                    .store
                    .create(&params)
                    .await
                    .context("Failed to create schedule")?;
                self.renderer.render(
                    &CreateResult {
                        schedule: &schedule,
                        today: self.today,
                    }
                    .to_string(),
                )
            }
            ScheduleCommands::List(args) => self.list_schedules(&args.into()).await,
            ScheduleCommands::Show(args) => {
                let Id { id } = args.into();
                let schedule = self
                    .store
                    .get(id, &self.token)
                    .await
                    .with_context(|| format!("Failed to load schedule {id}"))?;
                self.renderer
                    .render(&Timeline::new(&schedule, self.today).to_string())
            }
            ScheduleCommands::Status(args) => {
                let params = UpdateScheduleStatus::from(args);
                let schedule = self
                    .store
                    .set_status(&params)
                    .await
                    .with_context(|| format!("Failed to update schedule {}", params.id))?;
                self.renderer
                    .render(&Timeline::new(&schedule, self.today).to_string())
            }
            ScheduleCommands::Delete(args) => {
                if !args.confirm {
                    anyhow::bail!(
                        "Deleting schedule {} is permanent; re-run with --confirm",
                        args.id
                    );
                }
                self.store
                    .remove(args.id)
                    .await
                    .with_context(|| format!("Failed to delete schedule {}", args.id))?;
                self.renderer
                    .render(&DeleteResult { id: args.id }.to_string())
            }
            ScheduleCommands::Upcoming(args) => {
                let params = UpcomingActivities::from(args);
                let schedule = self
                    .store
                    .get(params.schedule_id, &self.token)
                    .await
                    .with_context(|| format!("Failed to load schedule {}", params.schedule_id))?;
                let reminders = engine::upcoming(&schedule, self.today, params.horizon_days);
                self.renderer.render(&Upcoming(&reminders).to_string())
            }
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        let params = match command {
            ActivityCommands::Done(args) => args.into_params(ActivityStatus::Completed),
            ActivityCommands::Undo(args) => args.into_params(ActivityStatus::Pending),
            ActivityCommands::Skip(args) => args.into_params(ActivityStatus::Skipped),
        };

        let schedule = self.store.patch_activity(&params).await.with_context(|| {
            format!(
                "Failed to update activity '{}' in schedule {}",
                params.activity_id, params.schedule_id
            )
        })?;
        self.renderer.render(
            &ActivityUpdateResult {
                schedule: &schedule,
                activity_id: &params.activity_id,
            }
            .to_string(),
        )
    }

    pub async fn list_schedules(&self, params: &ListSchedules) -> Result<()> {
        let summaries = self
            .store
            .list(params.status, &self.token)
            .await
            .context("Failed to list schedules")?;
        self.renderer
            .render(&ScheduleSummaries(summaries).to_string())
    }
}
