//! Sign-up flow spanning the auth and sales stores.

use crate::{
    config::app::SalesConfig,
    errors::{Error, Result},
    models::User,
    stores::{AuthStore, SalesStore, auth::validate_email, sales::validate_goals},
};

/// Logs in a new team member and registers them as a sales person keyed by
/// their email, so the sales they record are attributed to them.
///
/// Signing up again with a known email logs in without touching the existing
/// sales person or their goals.
///
/// Every input is checked before either store changes, so a rejected sign-up
/// leaves the user logged out.
///
/// # Errors
/// Returns `Error::MissingField` for a blank name, `Error::InvalidEmail` for a
/// malformed email and `Error::InvalidValue` when a configured goal is zero.
pub fn register_and_login<'a>(
    auth: &'a mut AuthStore,
    sales: &mut SalesStore,
    email: &str,
    name: &str,
    goals: &SalesConfig,
) -> Result<&'a User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    validate_email(email)?;
    validate_goals(goals.monthly_goal, goals.yearly_goal)?;

    let user = auth.login(email, Some(name))?;
    sales.add_sales_person(
        user.id.clone(),
        user.name.clone(),
        goals.monthly_goal,
        goals.yearly_goal,
    )?;
    Ok(user)
}
