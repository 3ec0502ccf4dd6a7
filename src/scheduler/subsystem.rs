/*!
 * Scheduler Subsystem
 * Owns the weight store and enforces liveness, permission, and range
 * checks on every weight access
 */

use super::config::SchedulerConfig;
use super::stats::{AtomicWeightStats, WeightStats};
use super::store::WeightStore;
use super::traits::WeightControl;
use super::types::WindowGate;
use crate::core::errors::{WeightError, WeightResult};
use crate::core::types::{resolve_target, Degrees, Pid, Weight};
use crate::permissions::{
    Action, PermissionChecker, PermissionManager, PermissionRequest, Resource,
};
use crate::process::{ExitListener, ProcessResolver, ProcessTable};
use std::sync::Arc;
use tracing::{debug, info};

/// Weight control for one scheduler instance
///
/// Every operation resolves in the same order: caller liveness, target
/// liveness, permission, then weight range. The first failing check is
/// reported and nothing is written.
#[derive(Clone)]
pub struct SchedulerSubsystem {
    config: Arc<SchedulerConfig>,
    store: Arc<WeightStore>,
    resolver: Arc<dyn ProcessResolver>,
    table: Option<Arc<ProcessTable>>,
    permissions: PermissionManager,
    stats: Arc<AtomicWeightStats>,
}

/// Builder for SchedulerSubsystem
pub struct SchedulerSubsystemBuilder {
    config: SchedulerConfig,
    resolver: Option<Arc<dyn ProcessResolver>>,
    table: Option<Arc<ProcessTable>>,
    permissions: Option<PermissionManager>,
}

impl SchedulerSubsystemBuilder {
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            resolver: None,
            table: None,
            permissions: None,
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve PIDs through an external process registry
    ///
    /// The registry must forward process exits to the built subsystem's
    /// [`ExitListener`] impl before a PID can be reused; otherwise a recycled
    /// PID inherits the previous owner's weight and capabilities.
    pub fn with_resolver(mut self, resolver: Arc<dyn ProcessResolver>) -> Self {
        self.resolver = Some(resolver);
        self.table = None;
        self
    }

    /// Resolve PIDs through a process table and follow its exits
    pub fn with_process_table(mut self, table: Arc<ProcessTable>) -> Self {
        self.resolver = None;
        self.table = Some(table);
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionManager) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Build the subsystem
    ///
    /// Without a resolver or table, a fresh process table is created and
    /// exposed through [`SchedulerSubsystem::process_table`]. The config's
    /// `allow_cross_process_read` switch overrides the permission manager's.
    pub fn build(self) -> crate::core::errors::Result<SchedulerSubsystem> {
        self.config.validate()?;

        let (resolver, table): (Arc<dyn ProcessResolver>, Option<Arc<ProcessTable>>) =
            match (self.resolver, self.table) {
                (_, Some(table)) => (table.clone(), Some(table)),
                (Some(resolver), None) => (resolver, None),
                (None, None) => {
                    let table = Arc::new(ProcessTable::new());
                    (table.clone(), Some(table))
                }
            };

        let permissions = self
            .permissions
            .unwrap_or_default()
            .with_cross_process_read(self.config.allow_cross_process_read);
        let store = Arc::new(WeightStore::new(self.config.default_weight));

        if let Some(table) = &table {
            table.subscribe(store.clone());
            table.subscribe(Arc::new(permissions.clone()));
        }

        info!(
            default_weight = self.config.default_weight,
            min_weight = self.config.min_weight,
            max_weight = self.config.max_weight,
            cross_read = self.config.allow_cross_process_read,
            "scheduler weight subsystem initialized"
        );

        Ok(SchedulerSubsystem {
            config: Arc::new(self.config),
            store,
            resolver,
            table,
            permissions,
            stats: Arc::new(AtomicWeightStats::new()),
        })
    }
}

impl Default for SchedulerSubsystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerSubsystem {
    pub fn builder() -> SchedulerSubsystemBuilder {
        SchedulerSubsystemBuilder::new()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Process table the subsystem follows, if it owns or was given one
    pub fn process_table(&self) -> Option<&Arc<ProcessTable>> {
        self.table.as_ref()
    }

    pub fn permissions(&self) -> &PermissionManager {
        &self.permissions
    }

    pub fn store(&self) -> &Arc<WeightStore> {
        &self.store
    }

    pub fn stats(&self) -> WeightStats {
        self.stats.snapshot()
    }

    /// Resolve caller and target to live PIDs
    fn resolve(&self, caller: Pid, pid: Pid) -> WeightResult<Pid> {
        if !self.resolver.is_alive(caller) {
            return Err(WeightError::NoSuchProcess(caller));
        }
        let target = resolve_target(caller, pid);
        if target != caller && !self.resolver.is_alive(target) {
            return Err(WeightError::NoSuchProcess(target));
        }
        Ok(target)
    }

    fn authorize(&self, request: PermissionRequest) -> WeightResult<()> {
        let caller = request.pid;
        let Resource::Process(target) = request.resource;
        let response = match request.action {
            Action::Write => self.permissions.check_and_audit(&request),
            Action::Read => self.permissions.check(&request),
        };
        if response.is_allowed() {
            Ok(())
        } else {
            debug!(caller, target, reason = response.reason(), "weight access denied");
            Err(WeightError::PermissionDenied { caller, target })
        }
    }

    fn rejected<T>(&self, err: WeightError) -> WeightResult<T> {
        self.stats.inc_rejected();
        debug!(error = %err, "weight call rejected");
        Err(err)
    }

    fn write(&self, caller: Pid, pid: Pid, weight: i64) -> WeightResult<(Pid, Weight, Weight)> {
        let target = self.resolve(caller, pid)?;
        self.authorize(PermissionRequest::weight_write(caller, target))?;
        let weight = self.config.check_weight(weight)?;
        let previous = self.store.swap(target, weight);
        // The target may have exited after it was resolved; its exit hook
        // already ran, so drop the record here instead
        if !self.resolver.is_alive(target) {
            self.store.remove(target);
        }
        self.stats.inc_writes();
        Ok((target, previous, weight))
    }

    /// Restore the baseline weight of `pid`
    ///
    /// Same checks as a set; returns the weight that was replaced.
    pub fn reset_weight(&self, caller: Pid, pid: Pid) -> WeightResult<Weight> {
        let result = self.resolve(caller, pid).and_then(|target| {
            self.authorize(PermissionRequest::weight_write(caller, target))?;
            Ok(target)
        });
        match result {
            Ok(target) => {
                let previous = self.store.remove(target).unwrap_or(self.store.baseline());
                self.stats.inc_writes();
                info!(caller, target, previous, "weight reset to baseline");
                Ok(previous)
            }
            Err(err) => self.rejected(err),
        }
    }

    /// Apply `gate.weight` to `pid` only if `now` lies inside the gate's window
    ///
    /// Returns whether the weight was applied. The window test runs first, so
    /// a closed gate never reports liveness or permission errors.
    pub fn apply_gated(
        &self,
        caller: Pid,
        pid: Pid,
        now: Degrees,
        gate: WindowGate,
    ) -> WeightResult<bool> {
        if !gate.admits(now) {
            self.stats.inc_gated_skips();
            debug!(caller, pid, now, ?gate, "gate closed, weight not applied");
            return Ok(false);
        }
        self.set_weight(caller, pid, gate.weight as i64)?;
        Ok(true)
    }

    /// Explicitly configured weights of live processes, sorted by PID
    pub fn weights(&self) -> Vec<(Pid, Weight)> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|(pid, _)| self.resolver.is_alive(*pid))
            .collect()
    }
}

impl WeightControl for SchedulerSubsystem {
    fn get_weight(&self, caller: Pid, pid: Pid) -> WeightResult<Weight> {
        let result = self.resolve(caller, pid).and_then(|target| {
            self.authorize(PermissionRequest::weight_read(caller, target))?;
            Ok(self.store.load(target))
        });
        match result {
            Ok(weight) => {
                self.stats.inc_reads();
                Ok(weight)
            }
            Err(err) => self.rejected(err),
        }
    }

    fn set_weight(&self, caller: Pid, pid: Pid, weight: i64) -> WeightResult<()> {
        match self.write(caller, pid, weight) {
            Ok((target, previous, weight)) => {
                info!(caller, target, previous, weight, "weight updated");
                Ok(())
            }
            Err(err) => self.rejected(err),
        }
    }
}

/// Drops the weight record and capability grants of an exited process
impl ExitListener for SchedulerSubsystem {
    fn on_exit(&self, pid: Pid) {
        self.store.on_exit(pid);
        self.permissions.on_exit(pid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Capability;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Caller 1 is always live; target 2 dies right after its first lookup
    struct DiesAfterResolve {
        target_lookups: AtomicUsize,
    }

    impl ProcessResolver for DiesAfterResolve {
        fn is_alive(&self, pid: Pid) -> bool {
            match pid {
                1 => true,
                2 => self.target_lookups.fetch_add(1, Ordering::SeqCst) == 0,
                _ => false,
            }
        }
    }

    #[test]
    fn test_write_racing_exit_leaves_no_record() {
        let sched = SchedulerSubsystem::builder()
            .with_resolver(Arc::new(DiesAfterResolve {
                target_lookups: AtomicUsize::new(0),
            }))
            .build()
            .unwrap();
        sched.permissions().grant(1, Capability::SchedulerAdmin);

        sched.set_weight(1, 2, 500).unwrap();
        assert!(sched.store().is_empty());
        assert!(sched.process_table().is_none());
    }

    #[test]
    fn test_exit_notification_clears_state() {
        let (table, sched) = setup();
        let pid = table.spawn("proc");
        sched.set_weight(pid, 0, 900).unwrap();
        sched.permissions().grant(pid, Capability::SchedulerAdmin);

        sched.on_exit(pid);
        assert!(sched.store().is_empty());
        assert!(!sched.permissions().has_capability(pid, Capability::SchedulerAdmin));
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 10);
    }

    fn setup() -> (Arc<ProcessTable>, SchedulerSubsystem) {
        let table = Arc::new(ProcessTable::new());
        let subsystem = SchedulerSubsystem::builder()
            .with_process_table(table.clone())
            .build()
            .unwrap();
        (table, subsystem)
    }

    #[test]
    fn test_self_pid_sentinel() {
        let (table, sched) = setup();
        let pid = table.spawn("proc");
        sched.set_weight(pid, 0, 42).unwrap();
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 42);
        assert_eq!(sched.get_weight(pid, pid).unwrap(), 42);
    }

    #[test]
    fn test_dead_caller_rejected() {
        let (_table, sched) = setup();
        assert_eq!(sched.get_weight(77, 0), Err(WeightError::NoSuchProcess(77)));
    }

    #[test]
    fn test_reset_weight() {
        let (table, sched) = setup();
        let pid = table.spawn("proc");
        sched.set_weight(pid, 0, 300).unwrap();
        assert_eq!(sched.reset_weight(pid, 0).unwrap(), 300);
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 10);
        // Resetting an unset weight reports the baseline
        assert_eq!(sched.reset_weight(pid, 0).unwrap(), 10);
    }

    #[test]
    fn test_reset_requires_permission() {
        let (table, sched) = setup();
        let a = table.spawn("a");
        let b = table.spawn("b");
        sched.set_weight(b, 0, 300).unwrap();
        assert!(matches!(
            sched.reset_weight(a, b),
            Err(WeightError::PermissionDenied { .. })
        ));
        assert_eq!(sched.get_weight(b, 0).unwrap(), 300);
    }

    #[test]
    fn test_apply_gated() {
        let (table, sched) = setup();
        let pid = table.spawn("sensor");
        let gate = WindowGate::new(90, 45, 77);

        assert!(!sched.apply_gated(pid, 0, 10, gate).unwrap());
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 10);

        assert!(sched.apply_gated(pid, 0, 100, gate).unwrap());
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 77);
        assert_eq!(sched.stats().gated_skips, 1);
    }

    #[test]
    fn test_weights_snapshot_skips_dead() {
        let (table, sched) = setup();
        let a = table.spawn("a");
        let b = table.spawn("b");
        sched.set_weight(a, 0, 5).unwrap();
        sched.set_weight(b, 0, 6).unwrap();
        table.exit(a);
        assert_eq!(sched.weights(), vec![(b, 6)]);
    }

    #[test]
    fn test_admin_writes_other_process() {
        let (table, sched) = setup();
        let admin = table.spawn("admin");
        let worker = table.spawn("worker");
        sched.permissions().grant(admin, Capability::SchedulerAdmin);

        sched.set_weight(admin, worker, 500).unwrap();
        assert_eq!(sched.get_weight(admin, worker).unwrap(), 500);
        assert_eq!(sched.permissions().audit().for_pid(admin, 10).len(), 1);
    }

    #[test]
    fn test_default_build_owns_table() {
        let sched = SchedulerSubsystem::builder().build().unwrap();
        let table = sched.process_table().unwrap().clone();
        let pid = table.spawn("proc");
        assert_eq!(sched.get_weight(pid, 0).unwrap(), 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SchedulerConfig::new();
        config.max_weight = 0;
        assert!(SchedulerSubsystem::builder().with_config(config).build().is_err());
    }
}
