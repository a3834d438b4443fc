//! Scoped make/unmake.

use std::ops::{Deref, DerefMut};

use shakmaty::Color;

use super::Rules;
use crate::error::RulesError;

/// Holds a position with one pending undo; dropping the guard undoes it.
///
/// Both the recursive search and the mobility count in the evaluator go
/// through this, so early returns and `?` always restore the position.
pub struct UndoGuard<'a, R: Rules> {
    pos: &'a mut R,
}

impl<'a, R: Rules> UndoGuard<'a, R> {
    pub fn apply(pos: &'a mut R, mv: &R::Move) -> Result<Self, RulesError> {
        pos.apply(mv)?;
        Ok(UndoGuard { pos })
    }

    pub fn set_turn(pos: &'a mut R, color: Color) -> Result<Self, RulesError> {
        pos.set_turn(color)?;
        Ok(UndoGuard { pos })
    }
}

impl<R: Rules> Deref for UndoGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.pos
    }
}

impl<R: Rules> DerefMut for UndoGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.pos
    }
}

impl<R: Rules> Drop for UndoGuard<'_, R> {
    fn drop(&mut self) {
        if let Err(err) = self.pos.undo() {
            tracing::warn!(%err, "undo guard could not restore position");
        }
    }
}
