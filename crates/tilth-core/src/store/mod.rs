//! Cached client-side view of the remote schedule service.
//!
//! [`ScheduleStore`] is the only stateful part of the crate. It forwards every
//! operation to a [`ScheduleService`] and keeps the last authoritative answer
//! in a local cache:
//!
//! ```text
//! ┌─────────────┐    ┌─────────────────┐    ┌──────────────────────┐
//! │   Caller    │───▶│  ScheduleStore  │───▶│   ScheduleService    │
//! │ (CLI, app)  │    │  cache + locks  │    │  (http | sqlite)     │
//! └─────────────┘    └─────────────────┘    └──────────────────────┘
//! ```
//!
//! ## Cache rules
//!
//! 1. `list` replaces the cached slice for its filter; it never merges.
//! 2. `get` replaces the cached schedule for its ID.
//! 3. A failed call leaves the cache exactly as it was.
//! 4. A read whose [`CancellationToken`] fires before the response arrives
//!    returns [`ScheduleError::Cancelled`] and writes nothing.
//! 5. Only one mutation per schedule may be in flight; a second one fails
//!    with [`ScheduleError::ScheduleBusy`] instead of queueing.
//! 6. `remove` is final. A read that started before the removal finished
//!    never writes the removed schedule back.
//!
//! With optimistic updates enabled, `patch_activity` echoes the new status
//! into the cached schedule before the service answers. The previous copy is
//! restored unless the service confirms the change, including when the
//! caller drops the call midway.
//!
//! The cache lock is a plain `std::sync::RwLock` and is never held across an
//! `.await`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tilth_core::{params::CreateSchedule, StoreBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new().build().await?;
//!
//! let schedule = store
//!     .create(&CreateSchedule::parse("Wheat", "2024-01-01")?)
//!     .await?;
//! let summaries = store.list(None, &CancellationToken::new()).await?;
//! assert!(summaries.iter().any(|s| Some(s.id) == schedule.id));
//! # Ok(())
//! # }
//! ```

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use jiff::civil::Date;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::{
    engine::{apply_activity_status, generate, progress},
    error::{Result, ScheduleError},
    models::{Schedule, ScheduleStatus, ScheduleSummary},
    params::{CreateSchedule, PatchActivity, UpdateScheduleStatus},
    remote::ScheduleService,
    templates::TemplateRegistry,
};

pub mod builder;


pub use builder::StoreBuilder;

#[derive(Debug, Default)]
struct ScheduleCache {
    /// Summary slices keyed by the filter that produced them
    summaries: HashMap<Option<ScheduleStatus>, Vec<ScheduleSummary>>,
    schedules: HashMap<u64, Schedule>,
    /// Number of completed removals so far
    removals: u64,
    /// Removal count at the time each schedule was removed
    removed: HashMap<u64, u64>,
}

impl ScheduleCache {
    /// Brings every cached summary slice in line with a fresh schedule.
    ///
    /// Slices that held the schedule get the new summary in place, or lose it
    /// when the status no longer matches their filter. Slices that never held
    /// it are left for the next `list` to refresh.
    fn refresh_summary(&mut self, summary: &ScheduleSummary) {
        for (filter, slice) in &mut self.summaries {
            let Some(position) = slice.iter().position(|s| s.id == summary.id) else {
                continue;
            };
            if filter_matches(*filter, summary.status) {
                slice[position] = summary.clone();
            } else {
                slice.remove(position);
            }
        }
    }

    fn store_schedule(&mut self, schedule: &Schedule) {
        let Some(id) = schedule.id else {
            return;
        };
        if let Some(summary) = ScheduleSummary::from_schedule(schedule) {
            self.refresh_summary(&summary);
        }
        self.schedules.insert(id, schedule.clone());
    }

    fn evict(&mut self, id: u64) {
        self.schedules.remove(&id);
        for slice in self.summaries.values_mut() {
            slice.retain(|s| s.id != id);
        }
        self.removals += 1;
        self.removed.insert(id, self.removals);
    }

    /// Whether `id` was removed after the removal count was `mark`.
    fn removed_since(&self, id: u64, mark: u64) -> bool {
        self.removed.get(&id).is_some_and(|&at| at > mark)
    }
}

fn filter_matches(filter: Option<ScheduleStatus>, status: ScheduleStatus) -> bool {
    filter.map_or(true, |wanted| wanted == status)
}

/// Marks a schedule as having a mutation in flight until dropped.
struct InFlight<'a> {
    ids: &'a Mutex<HashSet<u64>>,
    id: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// Restores the pre-echo copy of a schedule unless disarmed.
struct EchoRollback<'a> {
    cache: &'a RwLock<ScheduleCache>,
    previous: Option<Schedule>,
}

impl EchoRollback<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for EchoRollback<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            warn!("Rolling back unconfirmed status echo for schedule {:?}", previous.id);
            write_cache(self.cache).store_schedule(&previous);
        }
    }
}

fn read_cache(cache: &RwLock<ScheduleCache>) -> RwLockReadGuard<'_, ScheduleCache> {
    cache.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_cache(cache: &RwLock<ScheduleCache>) -> RwLockWriteGuard<'_, ScheduleCache> {
    cache.write().unwrap_or_else(PoisonError::into_inner)
}

/// Client-side schedule store with a local cache.
pub struct ScheduleStore {
    service: Arc<dyn ScheduleService>,
    registry: Arc<TemplateRegistry>,
    cache: RwLock<ScheduleCache>,
    in_flight: Mutex<HashSet<u64>>,
    optimistic: bool,
}

impl ScheduleStore {
    pub fn new(service: Arc<dyn ScheduleService>, registry: Arc<TemplateRegistry>) -> Self {
        Self {
            service,
            registry,
            cache: RwLock::new(ScheduleCache::default()),
            in_flight: Mutex::new(HashSet::new()),
            optimistic: false,
        }
    }

    /// Enables the local echo of activity status changes.
    pub fn with_optimistic_updates(mut self, enabled: bool) -> Self {
        self.optimistic = enabled;
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn backend_tag(&self) -> &'static str {
        self.service.backend_tag()
    }

    /// Generates an unsaved schedule locally, without contacting the service.
    pub fn preview(&self, crop_name: &str, start_date: Date) -> Result<Schedule> {
        generate(&self.registry, crop_name, start_date)
    }

    /// Lists schedule summaries and replaces the cached slice for `status`.
    pub async fn list(
        &self,
        status: Option<ScheduleStatus>,
        token: &CancellationToken,
    ) -> Result<Vec<ScheduleSummary>> {
        let mark = read_cache(&self.cache).removals;
        let mut summaries = cancellable(token, self.service.list_schedules(status)).await?;

        let mut cache = write_cache(&self.cache);
        if token.is_cancelled() {
            warn!("Discarding schedule list for cancelled request");
            return Err(ScheduleError::Cancelled);
        }
        summaries.retain(|s| !cache.removed_since(s.id, mark));
        debug!("Caching {} summaries for filter {status:?}", summaries.len());
        cache.summaries.insert(status, summaries.clone());
        Ok(summaries)
    }

    /// Fetches one schedule and replaces its cached copy.
    pub async fn get(&self, id: u64, token: &CancellationToken) -> Result<Schedule> {
        let mark = read_cache(&self.cache).removals;
        let schedule = cancellable(token, self.service.get_schedule(id)).await?;

        let mut cache = write_cache(&self.cache);
        if token.is_cancelled() {
            warn!("Discarding schedule {id} for cancelled request");
            return Err(ScheduleError::Cancelled);
        }
        if cache.removed_since(id, mark) {
            warn!("Discarding schedule {id} removed while the read was in flight");
            return Err(ScheduleError::ScheduleNotFound { id });
        }
        cache.store_schedule(&schedule);
        Ok(schedule)
    }

    /// Creates a schedule remotely and caches the saved copy.
    pub async fn create(&self, params: &CreateSchedule) -> Result<Schedule> {
        debug!("create: {params:?}");
        let schedule = self.service.create_schedule(params).await?;

        let mut cache = write_cache(&self.cache);
        if let Some(id) = schedule.id {
            cache.removed.remove(&id);
        }
        if let Some(summary) = ScheduleSummary::from_schedule(&schedule) {
            for (filter, slice) in &mut cache.summaries {
                if filter_matches(*filter, summary.status) {
                    slice.insert(0, summary.clone());
                }
            }
        }
        cache.store_schedule(&schedule);
        Ok(schedule)
    }

    /// Changes one activity's status and replaces the cached schedule with the
    /// service's answer.
    pub async fn patch_activity(&self, params: &PatchActivity) -> Result<Schedule> {
        debug!("patch_activity: {params:?}");
        let _guard = self.claim(params.schedule_id)?;

        let rollback = EchoRollback {
            cache: &self.cache,
            previous: if self.optimistic { self.echo(params) } else { None },
        };

        match self.service.patch_activity(params).await {
            Ok(schedule) => {
                rollback.disarm();
                write_cache(&self.cache).store_schedule(&schedule);
                Ok(schedule)
            }
            Err(e) => {
                warn!(
                    "Activity '{}' in schedule {} was not updated: {e}",
                    params.activity_id, params.schedule_id
                );
                drop(rollback);
                Err(e)
            }
        }
    }

    /// Explicitly changes a schedule's status.
    pub async fn set_status(&self, params: &UpdateScheduleStatus) -> Result<Schedule> {
        debug!("set_status: {params:?}");
        let _guard = self.claim(params.id)?;

        let schedule = self.service.update_schedule_status(params).await?;
        write_cache(&self.cache).store_schedule(&schedule);
        Ok(schedule)
    }

    /// Deletes a schedule remotely, then evicts it from every cache entry.
    pub async fn remove(&self, id: u64) -> Result<()> {
        debug!("remove: {id}");
        let _guard = self.claim(id)?;

        self.service.delete_schedule(id).await?;
        write_cache(&self.cache).evict(id);
        Ok(())
    }

    pub fn cached_schedule(&self, id: u64) -> Option<Schedule> {
        read_cache(&self.cache).schedules.get(&id).cloned()
    }

    pub fn cached_summaries(&self, status: Option<ScheduleStatus>) -> Option<Vec<ScheduleSummary>> {
        read_cache(&self.cache).summaries.get(&status).cloned()
    }

    /// Progress of a cached schedule, recomputed from its activities.
    pub fn progress(&self, id: u64) -> Option<u8> {
        read_cache(&self.cache).schedules.get(&id).map(progress)
    }

    fn claim(&self, id: u64) -> Result<InFlight<'_>> {
        let mut ids = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id) {
            return Err(ScheduleError::ScheduleBusy { id });
        }
        Ok(InFlight {
            ids: &self.in_flight,
            id,
        })
    }

    /// Applies the requested status to the cached schedule, returning the
    /// copy to restore on failure. Nothing is echoed when the schedule is not
    /// cached or the change would be rejected locally.
    fn echo(&self, params: &PatchActivity) -> Option<Schedule> {
        let mut cache = write_cache(&self.cache);
        let cached = cache.schedules.get(&params.schedule_id)?;

        let mut echoed = cached.clone();
        if let Err(e) = apply_activity_status(&mut echoed, &params.activity_id, params.status) {
            debug!("Skipping optimistic echo: {e}");
            return None;
        }

        let previous = cached.clone();
        cache.store_schedule(&echoed);
        Some(previous)
    }
}

/// Races a service call against the caller's token.
async fn cancellable<T, F>(token: &CancellationToken, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(ScheduleError::Cancelled),
        result = call => result,
    }
}
