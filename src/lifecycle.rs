//! Ownership of the single active piece session.
//!
//! The frame loop reschedules itself every display refresh. A [`RunFlag`] is
//! shared between the loop and the [`Stage`] that owns the session; stopping
//! the flag is how a selection change cancels the old loop.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Activating,
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct RunFlag(Rc<Cell<Phase>>);

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Phase::Activating)))
    }

    pub fn phase(&self) -> Phase {
        self.0.get()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Moves to `Running` unless already stopped; a stopped flag never restarts.
    pub fn start(&self) {
        if self.phase() != Phase::Stopped {
            self.0.set(Phase::Running);
        }
    }

    pub fn stop(&self) {
        self.0.set(Phase::Stopped);
    }
}

/// Releases whatever a session attached to the page and the graphics context.
pub trait Teardown {
    fn teardown(&mut self);
}

struct Active<S> {
    session: S,
    flag: RunFlag,
}

pub struct Stage<S: Teardown> {
    active: Option<Active<S>>,
}

impl<S: Teardown> Default for Stage<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Teardown> Stage<S> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn current(&self) -> Option<&S> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn flag(&self) -> Option<&RunFlag> {
        self.active.as_ref().map(|a| &a.flag)
    }

    /// Stops and tears down the current session, then installs `session`.
    pub fn replace(&mut self, session: S, flag: RunFlag) {
        self.clear();
        flag.start();
        self.active = Some(Active { session, flag });
    }

    /// Attaches `session`, installs it in place of the current one and starts
    /// its loop. A failed attach tears the new session down and leaves the
    /// current one running. A failed start leaves the stage empty.
    pub fn launch<E>(
        &mut self,
        mut session: S,
        attach: impl FnOnce(&S) -> Result<(), E>,
        run: impl FnOnce(RunFlag) -> Result<(), E>,
    ) -> Result<RunFlag, E> {
        if let Err(e) = attach(&session) {
            session.teardown();
            return Err(e);
        }
        let flag = RunFlag::new();
        self.replace(session, flag.clone());
        if let Err(e) = run(flag.clone()) {
            self.clear();
            return Err(e);
        }
        Ok(flag)
    }

    pub fn clear(&mut self) {
        if let Some(mut old) = self.active.take() {
            old.flag.stop();
            old.session.teardown();
        }
    }
}

impl<S: Teardown> Drop for Stage<S> {
    fn drop(&mut self) {
        self.clear();
    }
}
