//! Delayed one-shot tasks
//!
//! Tasks are advanced by the frame loop with the elapsed frame time and run
//! on the same thread, against a context the caller passes in.

use std::time::Duration;

type Task<C> = Box<dyn FnOnce(&mut C)>;

struct ScheduledTask<C> {
    remaining: Duration,
    task: Task<C>,
}

pub struct Scheduler<C> {
    tasks: Vec<ScheduledTask<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Scheduler { tasks: Vec::new() }
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` once, the first time at least `delay` has elapsed
    pub fn schedule_once(&mut self, delay: Duration, task: impl FnOnce(&mut C) + 'static) {
        self.tasks.push(ScheduledTask {
            remaining: delay,
            task: Box::new(task),
        });
    }

    /// Advances every task by `elapsed` and runs the due ones in the order
    /// they were scheduled. Returns how many ran.
    ///
    /// Tasks scheduled from inside a running task wait for the next call.
    pub fn advance(&mut self, elapsed: Duration, context: &mut C) -> usize {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());

        for mut scheduled in self.tasks.drain(..) {
            scheduled.remaining = scheduled.remaining.saturating_sub(elapsed);
            if scheduled.remaining.is_zero() {
                due.push(scheduled.task);
            } else {
                waiting.push(scheduled);
            }
        }
        self.tasks = waiting;

        let count = due.len();
        for task in due {
            task(context);
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_runs_after_delay() {
        let mut scheduler: Scheduler<Vec<&str>> = Scheduler::new();
        let mut log = Vec::new();
        scheduler.schedule_once(Duration::from_secs(5), |log| log.push("ran"));

        assert_eq!(scheduler.advance(Duration::from_secs(2), &mut log), 0);
        assert!(log.is_empty());
        assert_eq!(scheduler.advance(Duration::from_secs(3), &mut log), 1);
        assert_eq!(log, ["ran"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_task_runs_only_once() {
        let mut scheduler: Scheduler<u32> = Scheduler::new();
        let mut count = 0;
        scheduler.schedule_once(Duration::ZERO, |count| *count += 1);

        scheduler.advance(Duration::from_millis(16), &mut count);
        scheduler.advance(Duration::from_millis(16), &mut count);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_due_tasks_run_in_schedule_order() {
        let mut scheduler: Scheduler<Vec<u32>> = Scheduler::new();
        let mut order = Vec::new();
        scheduler.schedule_once(Duration::from_millis(30), |o| o.push(1));
        scheduler.schedule_once(Duration::from_millis(10), |o| o.push(2));
        scheduler.schedule_once(Duration::from_secs(1), |o| o.push(3));

        assert_eq!(scheduler.advance(Duration::from_millis(50), &mut order), 2);
        assert_eq!(order, [1, 2]);
        assert_eq!(scheduler.pending(), 1);
    }
}
