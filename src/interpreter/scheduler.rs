use std::{collections::VecDeque, fmt};

use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Fold,
        expression::{Expression, ExpressionId},
        parser::statement::parse_statement,
        variables::{Variable, VariableStore},
    },
};

/// What happened to one expression during a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The expression folded to a value, which was committed to its
    /// variable. The expression is gone.
    Resolved {
        /// The expression.
        id:       ExpressionId,
        /// The variable that was assigned.
        variable: Variable,
        /// The committed value.
        value:    f64,
    },
    /// The expression depends on an undefined variable and went back to the
    /// end of the queue.
    Postponed {
        /// The expression.
        id:      ExpressionId,
        /// The first undefined variable it depends on.
        missing: Variable,
    },
    /// The expression failed for a reason that retrying cannot fix and was
    /// discarded.
    Failed {
        /// The expression.
        id:    ExpressionId,
        /// Why it failed.
        error: RuntimeError,
    },
}

impl Event {
    /// The expression the event is about.
    #[must_use]
    pub const fn id(&self) -> ExpressionId {
        match self {
            Self::Resolved { id, .. } | Self::Postponed { id, .. } | Self::Failed { id, .. } => *id,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved { id, variable, value } => {
                write!(f,
                       "Expression ({id}) was calculated. The value of {variable} is now {value}")
            },
            Self::Postponed { id, missing } => {
                write!(f, "Expression ({id}) was postponed: variable {missing} is not defined")
            },
            Self::Failed { id, error } => write!(f, "Expression ({id}) failed: {error}"),
        }
    }
}

/// Whether a pass changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The queue was empty; nothing was attempted.
    Idle,
    /// At least one expression resolved, or the queue ended up empty.
    Advanced,
    /// No expression resolved and some are still waiting. Further passes
    /// cannot help until a new statement is submitted: the waiting
    /// expressions depend on each other in a cycle or on variables nothing
    /// will define.
    Stalled,
}

/// The result of one [`Scheduler::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// One event per attempted expression, in attempt order.
    pub events:   Vec<Event>,
    /// Whether the pass made progress.
    pub progress: Progress,
}

impl StepReport {
    /// Number of expressions resolved during the pass.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Resolved { .. }))
            .count()
    }
}

/// Holds the pending expressions and the variable store, and evaluates the
/// former against the latter one pass at a time.
///
/// There is no dependency graph. Every pass simply tries each pending
/// expression once; those that still miss a variable are retried on the
/// next pass. A pass that resolves nothing while expressions remain is
/// reported as [`Progress::Stalled`] so the caller can stop.
///
/// # Example
/// ```
/// use lazycalc::interpreter::{
///     scheduler::{Progress, Scheduler},
///     variables::Variable,
/// };
///
/// let mut scheduler = Scheduler::new();
/// scheduler.submit("B = A + 1").unwrap();
/// scheduler.submit("A = 5").unwrap();
///
/// let first = scheduler.step();
/// assert_eq!(first.resolved(), 1);
/// let second = scheduler.step();
/// assert_eq!(second.resolved(), 1);
///
/// assert_eq!(scheduler.value(Variable::try_from('b').unwrap()), Some(6.0));
/// assert_eq!(scheduler.step().progress, Progress::Idle);
/// ```
#[derive(Debug, Default)]
pub struct Scheduler {
    queue:     VecDeque<Expression>,
    variables: VariableStore,
    last_id:   u64,
}

impl Scheduler {
    /// Creates a scheduler with an empty queue and no defined variable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a statement and queues it.
    ///
    /// Sequence numbers are only consumed by accepted statements.
    ///
    /// # Errors
    /// Returns the [`ParseError`] of a malformed statement, which is not
    /// queued.
    pub fn submit(&mut self, text: &str) -> Result<ExpressionId, ParseError> {
        let statement = parse_statement(text)?;
        self.last_id += 1;
        let id = ExpressionId(self.last_id);
        log::debug!("queued expression ({id}) for {}", statement.target);
        self.queue.push_back(Expression::new(id, statement));
        Ok(id)
    }

    /// Performs one evaluation pass.
    ///
    /// Exactly the expressions queued when the pass starts are attempted, in
    /// queue order. A resolved expression commits its value immediately, so
    /// expressions later in the same pass can use it. Blocked expressions go
    /// back to the end of the queue with their partially folded tree;
    /// failing ones are dropped.
    pub fn step(&mut self) -> StepReport {
        if self.queue.is_empty() {
            return StepReport { events:   Vec::new(),
                                progress: Progress::Idle, };
        }

        let count = self.queue.len();
        let mut events = Vec::with_capacity(count);
        let mut resolved = 0;

        for _ in 0..count {
            let Some(mut expr) = self.queue.pop_front() else {
                break;
            };
            let id = expr.id();

            match expr.evaluate(&self.variables) {
                Ok(Fold::Resolved(value)) => {
                    let variable = expr.target();
                    self.variables.set(variable, value);
                    log::debug!("committed ({id}): {variable} = {value}");
                    resolved += 1;
                    events.push(Event::Resolved { id,
                                                  variable,
                                                  value });
                },
                Ok(Fold::Blocked(missing)) => {
                    log::debug!("requeued ({id}), waiting for {missing}: {}", expr.root());
                    self.queue.push_back(expr);
                    events.push(Event::Postponed { id, missing });
                },
                Err(error) => {
                    log::debug!("discarded ({id}): {error}");
                    events.push(Event::Failed { id, error });
                },
            }
        }

        let progress = if resolved == 0 && !self.queue.is_empty() {
            Progress::Stalled
        } else {
            Progress::Advanced
        };
        log::debug!("pass resolved {resolved} of {count}, {} pending", self.queue.len());

        StepReport { events, progress }
    }

    /// Runs passes until the queue is empty or a pass stalls.
    ///
    /// Terminates because every non-stalled pass removes at least one
    /// expression from the queue. Returns the report of every pass run,
    /// which is empty when there was nothing to do.
    pub fn settle(&mut self) -> Vec<StepReport> {
        let mut reports = Vec::new();
        loop {
            let report = self.step();
            match report.progress {
                Progress::Idle => break,
                Progress::Stalled => {
                    reports.push(report);
                    break;
                },
                Progress::Advanced => reports.push(report),
            }
        }
        reports
    }

    /// The value of `var`, if it has been committed.
    #[must_use]
    pub const fn value(&self, var: Variable) -> Option<f64> {
        self.variables.get(var)
    }

    /// The variable store.
    #[must_use]
    pub const fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// The pending expressions, in the order the next pass will try them.
    pub fn pending(&self) -> impl Iterator<Item = &Expression> {
        self.queue.iter()
    }

    /// Returns whether no expression is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
