//! Optimization session.
//!
//! A [`Session`] owns the point set, the best tour found so far and at most
//! one active run of a [`Strategy`]. It is driven either one unit at a time
//! with [`step`](Session::step), which suits hosts with a render loop, or
//! in batch with [`run_to_completion`](Session::run_to_completion).
//!
//! ```
//! use u_tsp::ga::GaConfig;
//! use u_tsp::session::{RunStatus, Session, Strategy};
//!
//! let mut session = Session::new();
//! session
//!     .set_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
//!     .unwrap();
//!
//! assert!(session.start(Strategy::Population(GaConfig::fast().with_seed(1))).unwrap());
//! while session.step().unwrap() == RunStatus::Running {
//!     // draw session.current_best() here
//! }
//! let best = session.current_best().unwrap();
//! assert!((best.length() - 4.0).abs() < 1e-9);
//! ```
//!
//! # Cancellation
//!
//! [`cancel`](Session::cancel) ends the active run immediately. The token
//! from [`cancel_token`](Session::cancel_token) may be set from another
//! thread; the session notices it at the start of the next `step()`.
//! Either way the best tour found so far stays available.
//!
//! # Overflowing coordinates
//!
//! Points far enough apart that their distances overflow `f64` have no tour
//! with a finite perimeter. A run on them still ends normally, but no tour
//! is ever accepted: [`current_best`](Session::current_best) stays `None`
//! and the observer receives neither `on_improved` nor `on_completed`.

mod observer;
mod status;

pub use observer::{SessionEvent, SessionObserver};
pub use status::{RunStatus, SessionStatus, StepReport};

use crate::aco::{AcoConfig, AcoRun};
use crate::error::{Result, TspError};
use crate::ga::{GaConfig, GaRun, MIN_POINTS};
use crate::geometry::{Point, ProblemInstance};
use crate::tour::{BestSolution, BestTracker};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.
pub type CancelToken = Arc<AtomicBool>;

/// The search strategy of a run, with its configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Genetic search.
    Population(GaConfig),
    /// Ant colony search.
    Colony(AcoConfig),
}

impl Strategy {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Population(_) => "population",
            Strategy::Colony(_) => "colony",
        }
    }
}

impl From<GaConfig> for Strategy {
    fn from(config: GaConfig) -> Self {
        Strategy::Population(config)
    }
}

impl From<AcoConfig> for Strategy {
    fn from(config: AcoConfig) -> Self {
        Strategy::Colony(config)
    }
}

#[derive(Debug)]
enum ActiveRun {
    Population(GaRun),
    Colony(AcoRun),
}

impl ActiveRun {
    fn new(instance: &ProblemInstance, strategy: &Strategy) -> Result<Self> {
        Ok(match strategy {
            Strategy::Population(config) => ActiveRun::Population(GaRun::new(instance, config)?),
            Strategy::Colony(config) => ActiveRun::Colony(AcoRun::new(instance, config)?),
        })
    }

    fn step(&mut self, instance: &ProblemInstance, best: &mut BestTracker) -> StepReport {
        match self {
            ActiveRun::Population(run) => run.step(instance, best),
            ActiveRun::Colony(run) => run.step(instance, best),
        }
    }

    fn cancel(&mut self) {
        match self {
            ActiveRun::Population(run) => run.cancel(),
            ActiveRun::Colony(run) => run.cancel(),
        }
    }
}

/// Orchestrates runs over a point set and tracks the best tour.
///
/// The best tour survives across runs on the same points, so a second run
/// only reports tours that beat the first. Changing the points or calling
/// [`reset`](Self::reset) forgets it.
pub struct Session {
    instance: ProblemInstance,
    best: BestTracker,
    active: Option<ActiveRun>,
    status: SessionStatus,
    cancel: CancelToken,
    observer: Option<Box<dyn SessionObserver + Send>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("points", &self.instance.len())
            .field("status", &self.status)
            .field("best", &self.best.get().map(BestSolution::length))
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self {
            instance: ProblemInstance::new(),
            best: BestTracker::new(),
            active: None,
            status: SessionStatus::Idle,
            cancel: Arc::new(AtomicBool::new(false)),
            observer: None,
        }
    }

    /// Installs an observer for improvement and completion callbacks.
    pub fn with_observer(mut self, observer: impl SessionObserver + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Sets the coordinate scale and returns the session.
    pub fn with_scale(mut self, sx: f64, sy: f64) -> Result<Self> {
        self.set_scale(sx, sy)?;
        Ok(self)
    }

    /// Changes the coordinate scale. Discards any run and the best tour.
    pub fn set_scale(&mut self, sx: f64, sy: f64) -> Result<()> {
        self.instance.set_scale(sx, sy)?;
        self.reset();
        Ok(())
    }

    /// Replaces the point set. Discards any run and the best tour.
    ///
    /// On error nothing changes.
    pub fn set_points<I, P>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        self.instance.set_points(points)?;
        self.reset();
        Ok(())
    }

    /// Appends a point and returns its index. Discards any run and the best
    /// tour.
    pub fn add_point(&mut self, point: impl Into<Point>) -> Result<usize> {
        let index = self.instance.add_point(point)?;
        self.reset();
        Ok(index)
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.instance.clear();
        self.reset();
    }

    /// The problem instance.
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// The points, in index order.
    pub fn points(&self) -> &[Point] {
        self.instance.points()
    }

    /// Starts a run.
    ///
    /// Returns `Ok(false)` without doing anything when fewer than three
    /// points are set.
    ///
    /// # Errors
    /// [`TspError::AlreadyRunning`] while a run is active, and
    /// [`TspError::InvalidConfig`] for an invalid configuration.
    pub fn start(&mut self, strategy: Strategy) -> Result<bool> {
        if self.status == SessionStatus::Running {
            return Err(TspError::AlreadyRunning);
        }
        if self.instance.len() < MIN_POINTS {
            log::debug!(
                "not starting {} run: {} points",
                strategy.name(),
                self.instance.len()
            );
            return Ok(false);
        }

        let run = ActiveRun::new(&self.instance, &strategy)?;
        self.cancel.store(false, Ordering::Relaxed);
        self.active = Some(run);
        self.status = SessionStatus::Running;
        log::info!(
            "{} run started on {} points",
            strategy.name(),
            self.instance.len()
        );
        Ok(true)
    }

    /// Executes one unit of work: a generation or a colony iteration.
    ///
    /// Improvements found during the unit are reported to the observer in
    /// order. Once the run has ended, further calls return its final status.
    ///
    /// # Errors
    /// [`TspError::NotRunning`] if no run has been started.
    pub fn step(&mut self) -> Result<RunStatus> {
        match self.status {
            SessionStatus::Idle => return Err(TspError::NotRunning),
            SessionStatus::Finished(status) => return Ok(status),
            SessionStatus::Running => {}
        }

        if self.cancel.load(Ordering::Relaxed) {
            self.finish_cancelled();
            return Ok(RunStatus::Cancelled);
        }

        let Some(run) = self.active.as_mut() else {
            return Err(TspError::NotRunning);
        };
        let report = run.step(&self.instance, &mut self.best);

        for improvement in &report.improvements {
            log::debug!("improved tour: {:.4}", improvement.length());
            if let Some(observer) = self.observer.as_mut() {
                observer.on_improved(improvement.tour(), improvement.length());
            }
        }

        if report.status.is_terminal() {
            self.finish(report.status);
        }
        Ok(report.status)
    }

    /// Steps until the run ends and returns how it ended.
    pub fn run_to_completion(&mut self) -> Result<RunStatus> {
        loop {
            let status = self.step()?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }

    /// Starts a run and drives it to the end.
    ///
    /// Returns the best tour, or `None` when there are fewer than three
    /// points.
    pub fn solve(&mut self, strategy: Strategy) -> Result<Option<&BestSolution>> {
        if !self.start(strategy)? {
            return Ok(None);
        }
        self.run_to_completion()?;
        Ok(self.best.get())
    }

    /// Cancels the active run, if any. The best tour is kept.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if self.status == SessionStatus::Running {
            self.finish_cancelled();
        }
    }

    /// A flag that cancels the active run when set.
    ///
    /// The flag is cleared by every successful [`start`](Self::start).
    pub fn cancel_token(&self) -> CancelToken {
        Arc::clone(&self.cancel)
    }

    /// Discards any run and the best tour. Points are kept.
    pub fn reset(&mut self) {
        if self.active.take().is_some() {
            log::debug!("active run discarded");
        }
        self.best.clear();
        self.status = SessionStatus::Idle;
        self.cancel.store(false, Ordering::Relaxed);
    }

    /// The shortest tour found so far.
    pub fn current_best(&self) -> Option<&BestSolution> {
        self.best.get()
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns true while a run is active.
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    fn finish_cancelled(&mut self) {
        if let Some(run) = self.active.as_mut() {
            run.cancel();
        }
        self.finish(RunStatus::Cancelled);
    }

    fn finish(&mut self, status: RunStatus) {
        self.active = None;
        self.status = SessionStatus::Finished(status);
        match self.best.get() {
            Some(best) => {
                log::info!("run finished: {:?}, best {:.4}", status, best.length());
                if let Some(observer) = self.observer.as_mut() {
                    observer.on_completed(best.tour(), best.length(), status);
                }
            }
            None => log::info!("run finished: {:?} without a tour", status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::Repair;
    use std::sync::mpsc::channel;

    fn square_session() -> Session {
        let mut session = Session::new();
        session
            .set_points([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
            .unwrap();
        session
    }

    fn ga() -> Strategy {
        Strategy::Population(
            GaConfig::fast()
                .with_population_size(30)
                .with_elite_count(5)
                .with_seed(42)
                .with_parallel(false),
        )
    }

    fn aco() -> Strategy {
        Strategy::Colony(
            AcoConfig::default()
                .with_ant_count(8)
                .with_max_iterations(20)
                .with_seed(42),
        )
    }

    #[test]
    fn test_solve_square_both_strategies() {
        for strategy in [ga(), aco()] {
            let mut session = square_session();
            let best = session.solve(strategy).unwrap().unwrap();
            assert!((best.length() - 4.0).abs() < 1e-9);
            assert!(matches!(session.status(), SessionStatus::Finished(_)));
        }
    }

    #[test]
    fn test_start_needs_three_points() {
        let mut session = Session::new();
        assert!(!session.start(ga()).unwrap());
        session.add_point((0.0, 0.0)).unwrap();
        session.add_point((1.0, 0.0)).unwrap();
        assert!(!session.start(aco()).unwrap());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.solve(ga()).unwrap().is_none());
        assert!(session.current_best().is_none());
    }

    #[test]
    fn test_step_without_run() {
        let mut session = square_session();
        assert_eq!(session.step(), Err(TspError::NotRunning));
    }

    #[test]
    fn test_already_running() {
        let mut session = square_session();
        assert!(session.start(ga()).unwrap());
        assert_eq!(session.start(aco()), Err(TspError::AlreadyRunning));
        assert!(session.is_running());
    }

    #[test]
    fn test_invalid_config_leaves_session_idle() {
        let mut session = square_session();
        let bad = Strategy::Colony(AcoConfig::default().with_ant_count(0));
        assert!(matches!(
            session.start(bad),
            Err(TspError::InvalidConfig(_))
        ));
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_cancel_keeps_best() {
        let mut session = square_session();
        session.start(ga()).unwrap();
        session.step().unwrap();
        let before = session.current_best().cloned();
        assert!(before.is_some());

        session.cancel();
        assert_eq!(
            session.status(),
            SessionStatus::Finished(RunStatus::Cancelled)
        );
        assert_eq!(session.current_best().cloned(), before);
        assert_eq!(session.step(), Ok(RunStatus::Cancelled));
    }

    #[test]
    fn test_cancel_token_observed_at_next_step() {
        let mut session = square_session();
        session.start(aco()).unwrap();
        session.step().unwrap();
        session.cancel_token().store(true, Ordering::Relaxed);
        assert!(session.is_running());
        assert_eq!(session.step(), Ok(RunStatus::Cancelled));

        // a new start clears the flag
        assert!(session.start(aco()).unwrap());
        assert_eq!(session.step(), Ok(RunStatus::Running));
    }

    #[test]
    fn test_point_change_discards_run_and_best() {
        let mut session = square_session();
        session.start(ga()).unwrap();
        session.step().unwrap();
        session.add_point((0.5, 2.0)).unwrap();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.current_best().is_none());

        let best = session.solve(aco()).unwrap().unwrap();
        assert_eq!(best.tour().len(), 5);
    }

    #[test]
    fn test_invalid_point_keeps_state() {
        let mut session = square_session();
        session.solve(aco()).unwrap();
        assert!(session.add_point((f64::NAN, 0.0)).is_err());
        assert!(session.current_best().is_some());
        assert_eq!(session.points().len(), 4);
    }

    #[test]
    fn test_observer_receives_monotone_improvements() {
        let (tx, rx) = channel::<SessionEvent>();
        let mut session = Session::new().with_observer(tx);
        let mut rng = crate::random::create_rng(5);
        use rand::Rng;
        session
            .set_points(
                (0..15).map(|_| (rng.random_range(0.0..10.0), rng.random_range(0.0..10.0))),
            )
            .unwrap();
        let colony = Strategy::Colony(
            AcoConfig::default()
                .with_ant_count(5)
                .with_max_iterations(10)
                .with_repair(Repair::None)
                .with_seed(3),
        );
        session.solve(colony).unwrap();

        let events: Vec<SessionEvent> = rx.try_iter().collect();
        let mut last = f64::INFINITY;
        let mut improvements = 0;
        for event in &events[..events.len() - 1] {
            match event {
                SessionEvent::Improved { length, .. } => {
                    assert!(*length < last);
                    last = *length;
                    improvements += 1;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(improvements > 0);
        match events.last() {
            Some(SessionEvent::Completed { length, status, .. }) => {
                assert_eq!(*length, last);
                assert_eq!(*status, RunStatus::Completed);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(session.current_best().map(|b| b.length()), Some(last));
    }

    #[test]
    fn test_overflowing_distances_finish_without_completion_event() {
        let (tx, rx) = channel::<SessionEvent>();
        let mut session = Session::new().with_observer(tx);
        session
            .set_points([(-1e308, 0.0), (1e308, 0.0), (0.0, 1e308)])
            .unwrap();

        assert!(session.solve(aco()).unwrap().is_none());
        assert_eq!(
            session.status(),
            SessionStatus::Finished(RunStatus::Completed)
        );
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_best_persists_across_runs() {
        let mut session = square_session();
        session.solve(aco()).unwrap();
        let first = session.current_best().cloned().unwrap();
        session.solve(ga()).unwrap();
        let second = session.current_best().unwrap();
        assert!(second.length() <= first.length());
    }

    #[test]
    fn test_scale_changes_lengths() {
        let mut session = square_session().with_scale(2.0, 3.0).unwrap();
        let best = session.solve(aco()).unwrap().unwrap();
        assert!((best.length() - 10.0).abs() < 1e-9);
    }
}
