//! Navigation state machine.

use super::screen::Screen;

/// Computes the automatic transition for the given authentication state.
///
/// Pure function: the controller calls it whenever the session or the
/// restoring flag changes, but it can be evaluated on its own.
///
/// - While restoring, nothing moves.
/// - A session on `landing` moves to `dashboard`.
/// - No session on a protected screen moves to `landing`.
///
/// An authenticated user on `signin`/`signup` stays put.
pub fn next_screen(current: Screen, session_present: bool, restoring: bool) -> Screen {
    if restoring {
        return current;
    }

    if session_present && current == Screen::Landing {
        Screen::Dashboard
    } else if !session_present && !current.is_public() {
        Screen::Landing
    } else {
        current
    }
}

/// Owns the current screen.
///
/// Explicit navigation is unconditional. The automatic rule is applied by
/// [`NavigationController::on_auth_change`], which only acts when the
/// observed `(session_present, restoring)` pair differs from the last one.
#[derive(Debug, Clone)]
pub struct NavigationController {
    current: Screen,
    observed: Option<(bool, bool)>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Creates a controller on the landing screen.
    pub fn new() -> Self {
        Self {
            current: Screen::Landing,
            observed: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Moves to `to` regardless of the current screen.
    pub fn navigate(&mut self, to: Screen) -> Screen {
        if self.current != to {
            tracing::debug!(from = %self.current, to = %to, "navigate");
        }
        self.current = to;
        self.current
    }

    /// Re-evaluates the automatic rule after an authentication change.
    ///
    /// Returns the screen after evaluation. Calling this repeatedly with
    /// unchanged inputs is a no-op.
    pub fn on_auth_change(&mut self, session_present: bool, restoring: bool) -> Screen {
        let inputs = (session_present, restoring);
        if self.observed == Some(inputs) {
            return self.current;
        }
        self.observed = Some(inputs);

        let next = next_screen(self.current, session_present, restoring);
        if next != self.current {
            tracing::debug!(
                from = %self.current,
                to = %next,
                session_present,
                "automatic navigation"
            );
            self.current = next;
        }
        self.current
    }
}
