//! Savings goals for weddings, houses and other big-ticket plans.

use chrono::{Duration, NaiveDateTime};
use fintrack_core::calculations::common::round_half_up_dp;
use fintrack_core::format_inr;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::DAYS_PER_MONTH;
use crate::{LedgerError, SavingsGoal};

/// Deadline applied when a goal is created without one.
const DEFAULT_GOAL_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct SavingsGoalManager {
    goals: Vec<SavingsGoal>,
    next_id: u64,
}

impl Default for SavingsGoalManager {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            next_id: 1,
        }
    }
}

impl SavingsGoalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a goal with nothing saved yet.
    ///
    /// `deadline` defaults to a year after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the target is not positive or the deadline
    /// is not after `now`.
    pub fn create_goal(
        &mut self,
        name: &str,
        target_amount: Decimal,
        deadline: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<&SavingsGoal, LedgerError> {
        let deadline = deadline.unwrap_or(now + Duration::days(DEFAULT_GOAL_DAYS));
        let mut goal = SavingsGoal::new(name, target_amount, Decimal::ZERO, deadline, now)?;
        goal.id = Some(self.next_id);
        self.next_id += 1;

        debug!(id = ?goal.id, goal = name, %target_amount, %deadline, "savings goal created");
        self.goals.push(goal);
        Ok(&self.goals[self.goals.len() - 1])
    }

    pub fn goal(
        &self,
        id: u64,
    ) -> Option<&SavingsGoal> {
        self.goals.iter().find(|g| g.id == Some(id))
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::SavingsGoalNotFound`] for an unknown id and
    /// [`LedgerError::NonPositiveAmount`] unless `amount` is above zero.
    pub fn add_contribution(
        &mut self,
        id: u64,
        amount: Decimal,
    ) -> Result<&SavingsGoal, LedgerError> {
        let goal = self.goal_mut(id)?;
        goal.add_contribution(amount)?;
        debug!(id, %amount, saved = %goal.current_saved, "contribution added");
        Ok(goal)
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    /// Goals whose exceeded state matches `exceeded`; all goals for `None`.
    pub fn goals_by_status(
        &self,
        exceeded: Option<bool>,
    ) -> Vec<&SavingsGoal> {
        self.goals
            .iter()
            .filter(|g| exceeded.is_none_or(|wanted| g.is_exceeded() == wanted))
            .collect()
    }

    /// Goals with a deadline within `months` 30-day months of `now`.
    pub fn goals_due_within(
        &self,
        months: u32,
        now: NaiveDateTime,
    ) -> Vec<&SavingsGoal> {
        let cutoff = now + Duration::days(i64::from(months) * DAYS_PER_MONTH);
        self.goals.iter().filter(|g| g.deadline <= cutoff).collect()
    }

    pub fn total_saved(&self) -> Decimal {
        self.goals.iter().map(|g| g.current_saved).sum()
    }

    pub fn total_target(&self) -> Decimal {
        self.goals.iter().map(|g| g.target_amount).sum()
    }

    /// Saved over target across every goal, capped at 100.
    pub fn overall_progress(&self) -> Decimal {
        let target = self.total_target();
        if target.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_saved() / target * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    }

    pub fn summary_report(
        &self,
        now: NaiveDateTime,
    ) -> String {
        if self.goals.is_empty() {
            return "No savings goals set yet.".to_string();
        }

        let rule = "=".repeat(50);
        let thin = "-".repeat(30);
        let mut lines = vec![
            rule.clone(),
            "SAVINGS GOALS SUMMARY".to_string(),
            rule.clone(),
            String::new(),
        ];

        for goal in &self.goals {
            let status = if goal.is_exceeded() {
                "✓ EXCEEDED".to_string()
            } else {
                percent(goal.progress_percentage())
            };

            lines.push(format!("{}:", goal.name));
            lines.push(format!("  Target: {}", format_inr(goal.target_amount)));
            lines.push(format!("  Saved:  {}", format_inr(goal.current_saved)));
            lines.push(format!("  Status: {status}"));

            if goal.is_exceeded() {
                lines.push(format!("  Excess: {}", format_inr(goal.excess_amount())));
            } else {
                lines.push(format!("  Remaining: {}", format_inr(goal.remaining_amount())));
                let monthly = goal.monthly_required(now);
                if monthly > Decimal::ZERO {
                    lines.push(format!("  Monthly needed: {}", format_inr(monthly)));
                }
            }
            lines.push(String::new());
        }

        lines.push(thin.clone());
        lines.push("OVERALL SUMMARY".to_string());
        lines.push(thin);
        lines.push(format!("Total saved: {}", format_inr(self.total_saved())));
        lines.push(format!("Total target: {}", format_inr(self.total_target())));
        lines.push(format!("Overall progress: {}", percent(self.overall_progress())));
        lines.push(rule);

        lines.join("\n")
    }

    /// Returns whether a goal was removed.
    pub fn delete_goal(
        &mut self,
        id: u64,
    ) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != Some(id));
        self.goals.len() != before
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::SavingsGoalNotFound`] for an unknown id and
    /// [`LedgerError::DeadlineNotInFuture`] unless `deadline` is after `now`.
    pub fn update_deadline(
        &mut self,
        id: u64,
        deadline: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        let goal = self.goal_mut(id)?;
        if deadline <= now {
            return Err(LedgerError::DeadlineNotInFuture(deadline));
        }
        goal.deadline = deadline;
        Ok(())
    }

    fn goal_mut(
        &mut self,
        id: u64,
    ) -> Result<&mut SavingsGoal, LedgerError> {
        self.goals
            .iter_mut()
            .find(|g| g.id == Some(id))
            .ok_or(LedgerError::SavingsGoalNotFound(id))
    }
}

fn percent(value: Decimal) -> String {
    format!("{:.1}%", round_half_up_dp(value, 1))
}
