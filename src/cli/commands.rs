//! CLI command implementations
//!
//! Each protected command is a screen: run the guard, fetch through the
//! gateway, render. Mutations splice the server's answer into the list
//! already on screen instead of re-fetching the collection.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use futures_util::future;
use std::fs;

use crate::api::{ApiClient, FoodInput, MealInput, ProfileUpdate};
use crate::auth::{
    check, Credentials, Destination, GuardDecision, Role, Section, SessionSnapshot, SessionStore,
};
use crate::cli::{
    confirm, format_role, info, print_admin_stats, print_document, print_food_list,
    print_food_table, print_meal_list, print_meal_table, print_user_detail, print_user_list,
    print_user_table, prompts, state, success, warn, with_spinner, AdminAction, AdminMealsAction,
    AdminUsersAction, FoodsAction, MealsAction, ProfileAction, ReportAction,
};
use crate::config::{self, Config};
use crate::error::Error;

fn open_store(config: &Config) -> SessionStore {
    SessionStore::new(config.session.dir.clone())
}

/// Gate a command on the guard's decision. The CLI analog of a redirect is
/// a pointer at the right screen plus a nonzero exit; nothing
/// section-restricted runs before this returns.
fn require(store: &SessionStore, section: Section) -> Result<SessionSnapshot> {
    let snapshot = store.read();
    match check(&snapshot, section) {
        GuardDecision::Allow => Ok(snapshot),
        GuardDecision::Redirect(Destination::Login) => Err(Error::NotAuthenticated.into()),
        GuardDecision::Redirect(dest @ Destination::UserHome) => {
            bail!(
                "This screen needs an administrator account. Your home is '{}'.",
                dest.command()
            )
        }
        GuardDecision::Redirect(dest @ Destination::AdminHome) => {
            bail!(
                "Administrator accounts use the admin screens. Go to '{}'.",
                dest.command()
            )
        }
    }
}

fn home_for(role: Role) -> Destination {
    if role.is_admin() {
        Destination::AdminHome
    } else {
        Destination::UserHome
    }
}

/// Initialize a foodtrack.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("foodtrack.toml");

    if config_path.exists() {
        warn("foodtrack.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created foodtrack.toml");
    info("Point [api].base_url at your backend, then run 'foodtrack login'");

    Ok(())
}

/// Sign in and persist the session
pub async fn login(email: Option<String>) -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    let client = ApiClient::new(&config, store.clone());

    let credentials = prompts::credentials(email)?;

    let auth = match with_spinner("Signing in...", client.login(&credentials)).await {
        Ok(auth) => auth,
        Err(Error::Api {
            status: 400 | 401, ..
        }) => bail!("Invalid email or password"),
        Err(e) => return Err(e.into()),
    };

    store.write(&auth.token, &auth.user)?;
    success(&format!(
        "Signed in as {} ({})",
        auth.user.email,
        format_role(auth.user.role)
    ));
    info(&format!(
        "Your home screen: '{}'",
        home_for(auth.user.role).command()
    ));

    Ok(())
}

/// Create an account, then sign straight in with it
pub async fn register() -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    let client = ApiClient::new(&config, store.clone());

    let registration = prompts::registration()?;

    with_spinner("Creating account...", client.register(&registration)).await?;
    success(&format!("Account created for {}", registration.email));

    let credentials = Credentials {
        email: registration.email.clone(),
        password: registration.password.clone(),
    };
    let auth = match with_spinner("Signing in...", client.login(&credentials)).await {
        Ok(auth) => auth,
        Err(e) => {
            tracing::debug!("automatic sign-in after registration failed: {}", e);
            warn("Account created, but automatic sign-in failed. Run 'foodtrack login'.");
            return Ok(());
        }
    };

    store.write(&auth.token, &auth.user)?;
    success(&format!("Signed in as {}", auth.user.email));
    info(&format!(
        "Your home screen: '{}'",
        home_for(auth.user.role).command()
    ));

    Ok(())
}

/// Clear the stored session
pub async fn logout() -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);

    store.clear()?;
    success("Logged out");

    Ok(())
}

/// Show the current session without contacting the backend
pub async fn whoami() -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);

    let snapshot = store.read();
    if !snapshot.is_authenticated() {
        info("Not logged in");
        return Ok(());
    }

    match &snapshot.user {
        Some(user) => print_user_detail(user),
        None => info(&format!(
            "Logged in with role {}",
            format_role(snapshot.role())
        )),
    }

    Ok(())
}

/// Show the dashboard for the session's role
pub async fn dashboard() -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);

    let snapshot = store.read();
    if !snapshot.is_authenticated() {
        return Err(Error::NotAuthenticated.into());
    }

    let client = ApiClient::new(&config, store);

    // An admin landing on the user home is routed to the admin home
    if snapshot.role().is_admin() {
        info("Routing to the admin dashboard");
        return admin_dashboard(&client).await;
    }

    let summary = with_spinner("Loading dashboard...", client.dashboard()).await?;
    print_document("Dashboard", &summary)
}

/// Food screens (user section)
pub async fn foods(action: FoodsAction) -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    require(&store, Section::User)?;
    let client = ApiClient::new(&config, store);

    match action {
        FoodsAction::List { format } => {
            let foods = with_spinner("Loading foods...", client.list_foods()).await?;
            print_food_list(&foods, format)
        }
        FoodsAction::Add { name, calories } => {
            let mut foods = with_spinner("Loading foods...", client.list_foods()).await?;
            let created =
                with_spinner("Saving...", client.create_food(&FoodInput { name, calories }))
                    .await?;

            success(&format!("Added '{}' (id {})", created.name, created.id));
            state::upsert(&mut foods, created);
            print_food_table(&foods);
            Ok(())
        }
        FoodsAction::Update { id, name, calories } => {
            let mut foods = with_spinner("Loading foods...", client.list_foods()).await?;
            let Some(existing) = foods.iter().find(|f| f.id == id) else {
                bail!("Food {} not found", id);
            };

            let input = FoodInput {
                name: name.unwrap_or_else(|| existing.name.clone()),
                calories: calories.unwrap_or(existing.calories),
            };
            let updated = with_spinner("Saving...", client.update_food(id, &input)).await?;

            success(&format!("Updated '{}'", updated.name));
            state::upsert(&mut foods, updated);
            print_food_table(&foods);
            Ok(())
        }
        FoodsAction::Delete { id, force } => {
            if !force && !confirm("Delete this food?") {
                info("Cancelled");
                return Ok(());
            }

            let mut foods = with_spinner("Loading foods...", client.list_foods()).await?;
            with_spinner("Deleting...", client.delete_food(id)).await?;

            if state::remove(&mut foods, id) {
                success(&format!("Deleted food {}", id));
            } else {
                warn(&format!("Food {} was not in the list", id));
            }
            print_food_table(&foods);
            Ok(())
        }
    }
}

/// Meal screens (user section)
pub async fn meals(action: MealsAction) -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    require(&store, Section::User)?;
    let client = ApiClient::new(&config, store);

    match action {
        MealsAction::List { format } => {
            let meals = with_spinner("Loading meals...", client.list_meals()).await?;
            print_meal_list(&meals, format)
        }
        MealsAction::Add {
            name,
            calories,
            protein,
            date,
        } => {
            let mut meals = with_spinner("Loading meals...", client.list_meals()).await?;

            let input = MealInput {
                name,
                calories,
                protein,
                date: date.map(midnight_utc),
            };
            let created = with_spinner("Saving...", client.create_meal(&input)).await?;

            success(&format!("Logged '{}' (id {})", created.name, created.id));
            state::upsert(&mut meals, created);
            print_meal_table(&meals);
            Ok(())
        }
        MealsAction::Delete { id, force } => {
            if !force && !confirm("Delete this meal?") {
                info("Cancelled");
                return Ok(());
            }

            let mut meals = with_spinner("Loading meals...", client.list_meals()).await?;
            with_spinner("Deleting...", client.delete_meal(id)).await?;

            if state::remove(&mut meals, id) {
                success(&format!("Deleted meal {}", id));
            } else {
                warn(&format!("Meal {} was not in the list", id));
            }
            print_meal_table(&meals);
            Ok(())
        }
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}

/// Profile screen (user section)
pub async fn profile(action: ProfileAction) -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    let snapshot = require(&store, Section::User)?;
    let client = ApiClient::new(&config, store.clone());

    match action {
        ProfileAction::Show => {
            // The profile screen renders the stored user; it only asks the
            // backend when the stored entry is missing or corrupt.
            match snapshot.user {
                Some(user) => print_user_detail(&user),
                None => {
                    let user = with_spinner("Loading profile...", client.me()).await?;
                    store.update_user(&user)?;
                    print_user_detail(&user);
                }
            }
            Ok(())
        }
        ProfileAction::Update { name, email } => {
            if name.is_none() && email.is_none() {
                warn("Nothing to update. Pass --name and/or --email.");
                return Ok(());
            }

            let updated = with_spinner(
                "Saving...",
                client.update_profile(&ProfileUpdate { name, email }),
            )
            .await?;

            store.update_user(&updated)?;
            success("Profile updated");
            print_user_detail(&updated);
            Ok(())
        }
    }
}

/// Admin screens
pub async fn admin(action: AdminAction) -> Result<()> {
    let config = config::load_config()?;
    let store = open_store(&config);
    require(&store, Section::Admin)?;
    let client = ApiClient::new(&config, store);

    match action {
        AdminAction::Dashboard => admin_dashboard(&client).await,
        AdminAction::Users { action } => admin_users(&client, action).await,
        AdminAction::Foods { action } => admin_foods(&client, action).await,
        AdminAction::Meals { action } => admin_meals(&client, action).await,
        AdminAction::Report { action } => admin_report(&client, action).await,
    }
}

async fn admin_dashboard(client: &ApiClient) -> Result<()> {
    // The three lists load at once; the stat cards render only after all
    // of them resolve.
    let (users, foods, meals) = with_spinner(
        "Loading dashboard...",
        future::try_join3(
            client.admin_list_users(),
            client.admin_list_foods(),
            client.admin_list_meals(),
        ),
    )
    .await?;

    print_admin_stats(users.len(), foods.len(), meals.len());
    Ok(())
}

async fn admin_users(client: &ApiClient, action: AdminUsersAction) -> Result<()> {
    match action {
        AdminUsersAction::List { format } => {
            let users = with_spinner("Loading accounts...", client.admin_list_users()).await?;
            print_user_list(&users, format)
        }
        AdminUsersAction::SetRole { id, role } => {
            let updated =
                with_spinner("Saving...", client.admin_set_user_role(id, role.into())).await?;
            success(&format!(
                "{} is now {}",
                updated.email,
                format_role(updated.role)
            ));
            Ok(())
        }
        AdminUsersAction::Delete { id, force } => {
            if !force && !confirm("Delete this account? This cannot be undone.") {
                info("Cancelled");
                return Ok(());
            }

            let mut users = with_spinner("Loading accounts...", client.admin_list_users()).await?;
            with_spinner("Deleting...", client.admin_delete_user(id)).await?;

            if state::remove(&mut users, id) {
                success(&format!("Deleted account {}", id));
            } else {
                warn(&format!("Account {} was not in the list", id));
            }
            print_user_table(&users);
            Ok(())
        }
    }
}

async fn admin_foods(client: &ApiClient, action: FoodsAction) -> Result<()> {
    match action {
        FoodsAction::List { format } => {
            let foods = with_spinner("Loading foods...", client.admin_list_foods()).await?;
            print_food_list(&foods, format)
        }
        FoodsAction::Add { name, calories } => {
            let mut foods = with_spinner("Loading foods...", client.admin_list_foods()).await?;
            let created = with_spinner(
                "Saving...",
                client.admin_create_food(&FoodInput { name, calories }),
            )
            .await?;

            success(&format!("Added '{}' (id {})", created.name, created.id));
            state::upsert(&mut foods, created);
            print_food_table(&foods);
            Ok(())
        }
        FoodsAction::Update { id, name, calories } => {
            let mut foods = with_spinner("Loading foods...", client.admin_list_foods()).await?;
            let Some(existing) = foods.iter().find(|f| f.id == id) else {
                bail!("Food {} not found", id);
            };

            let input = FoodInput {
                name: name.unwrap_or_else(|| existing.name.clone()),
                calories: calories.unwrap_or(existing.calories),
            };
            let updated = with_spinner("Saving...", client.admin_update_food(id, &input)).await?;

            success(&format!("Updated '{}'", updated.name));
            state::upsert(&mut foods, updated);
            print_food_table(&foods);
            Ok(())
        }
        FoodsAction::Delete { id, force } => {
            if !force && !confirm("Delete this food from the catalog?") {
                info("Cancelled");
                return Ok(());
            }

            let mut foods = with_spinner("Loading foods...", client.admin_list_foods()).await?;
            with_spinner("Deleting...", client.admin_delete_food(id)).await?;

            if state::remove(&mut foods, id) {
                success(&format!("Deleted food {}", id));
            } else {
                warn(&format!("Food {} was not in the list", id));
            }
            print_food_table(&foods);
            Ok(())
        }
    }
}

async fn admin_meals(client: &ApiClient, action: AdminMealsAction) -> Result<()> {
    match action {
        AdminMealsAction::List { format } => {
            let meals = with_spinner("Loading meals...", client.admin_list_meals()).await?;
            print_meal_list(&meals, format)
        }
        AdminMealsAction::Delete { id, force } => {
            if !force && !confirm("Delete this meal?") {
                info("Cancelled");
                return Ok(());
            }

            let mut meals = with_spinner("Loading meals...", client.admin_list_meals()).await?;
            with_spinner("Deleting...", client.admin_delete_meal(id)).await?;

            if state::remove(&mut meals, id) {
                success(&format!("Deleted meal {}", id));
            } else {
                warn(&format!("Meal {} was not in the list", id));
            }
            print_meal_table(&meals);
            Ok(())
        }
    }
}

async fn admin_report(client: &ApiClient, action: ReportAction) -> Result<()> {
    match action {
        ReportAction::Daily { date } => {
            let report = with_spinner("Loading report...", client.admin_report_daily(date)).await?;
            print_document("Daily report", &report)
        }
        ReportAction::Monthly { month } => {
            if let Some(month) = &month {
                NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
                    .map_err(|_| anyhow::anyhow!("Invalid month '{}', expected YYYY-MM", month))?;
            }

            let report = with_spinner(
                "Loading report...",
                client.admin_report_monthly(month.as_deref()),
            )
            .await?;
            print_document("Monthly report", &report)
        }
    }
}
