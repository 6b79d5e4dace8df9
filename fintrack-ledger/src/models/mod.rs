mod budget;
mod recurring_expense;
mod savings_goal;
mod transaction;

pub use budget::{Budget, BudgetPeriod};
pub use recurring_expense::{Frequency, RecurringExpense};
pub(crate) use savings_goal::DAYS_PER_MONTH;
pub use savings_goal::SavingsGoal;
pub use transaction::Transaction;
