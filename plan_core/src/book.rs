//! The plan collection and its mutation interface.
//!
//! Front ends never touch the record tree directly. They read through the
//! accessors and route every change through [`PlanBook`] by id, so a stale or
//! unknown id surfaces as an error instead of landing on the wrong record.

use crate::config::InputConfig;
use crate::input::{EntryForm, ExerciseForm};
use crate::types::{EntryId, ExerciseId, Plan, PlanId};
use crate::{Error, Result};
use std::collections::BTreeSet;

/// All training plans, in creation order
#[derive(Clone, Debug, Default)]
pub struct PlanBook {
    plans: Vec<Plan>,
}

impl PlanBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new plan with no exercises
    pub fn create_plan(&mut self, name: impl Into<String>) -> PlanId {
        let plan = Plan::new(name);
        let id = plan.id();
        tracing::debug!("Created plan {} ({:?})", id, plan.name());
        self.plans.push(plan);
        id
    }

    /// Remove the plans at `positions`, together with everything they own.
    ///
    /// Positions refer to the list as it was before the call. Duplicates are
    /// collapsed and positions past the end are ignored. Returns the removed
    /// plans in their former order.
    pub fn delete_plans(&mut self, positions: &[usize]) -> Vec<Plan> {
        let targets: BTreeSet<usize> = positions.iter().copied().collect();
        let mut removed = Vec::with_capacity(targets.len());
        let mut kept = Vec::with_capacity(self.plans.len());

        for (index, plan) in std::mem::take(&mut self.plans).into_iter().enumerate() {
            if targets.contains(&index) {
                removed.push(plan);
            } else {
                kept.push(plan);
            }
        }
        self.plans = kept;

        let ignored = targets.len() - removed.len();
        if ignored > 0 {
            tracing::debug!("Ignored {} out-of-range plan position(s)", ignored);
        }
        for plan in &removed {
            tracing::debug!("Deleted plan {} ({:?})", plan.id(), plan.name());
        }
        removed
    }

    /// Plans in display order
    pub fn list_plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn position_of(&self, id: PlanId) -> Option<usize> {
        self.plans.iter().position(|p| p.id() == id)
    }

    pub fn plan(&self, id: PlanId) -> Result<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id() == id)
            .ok_or(Error::PlanNotFound(id))
    }

    pub fn plan_mut(&mut self, id: PlanId) -> Result<&mut Plan> {
        self.plans
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(Error::PlanNotFound(id))
    }

    /// Validate the form and append the exercise to the plan.
    ///
    /// The plan is left untouched when validation fails.
    pub fn add_exercise(
        &mut self,
        plan_id: PlanId,
        form: &ExerciseForm,
        rules: &InputConfig,
    ) -> Result<ExerciseId> {
        let plan = self.plan_mut(plan_id)?;
        let input = form.parse(rules).map_err(|e| {
            tracing::info!("Rejected exercise form: {}", e);
            e
        })?;
        Ok(plan.add_exercise(input))
    }

    /// Validate the form and log the entry against the exercise.
    ///
    /// The exercise is left untouched when validation fails.
    pub fn add_entry(
        &mut self,
        plan_id: PlanId,
        exercise_id: ExerciseId,
        form: &EntryForm,
        rules: &InputConfig,
    ) -> Result<EntryId> {
        let exercise = self
            .plan_mut(plan_id)?
            .exercise_mut(exercise_id)
            .ok_or(Error::ExerciseNotFound(exercise_id))?;
        let input = form.parse(rules).map_err(|e| {
            tracing::info!("Rejected entry form: {}", e);
            e
        })?;
        Ok(exercise.log_entry(input))
    }
}
