//! Interactive prompts for the sign-in screens

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::auth::{Credentials, Registration};

/// Gather login credentials, prompting for whatever was not passed as a flag.
pub fn credentials(email: Option<String>) -> Result<Credentials> {
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };

    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    Ok(Credentials { email, password })
}

/// Gather a registration payload interactively.
pub fn registration() -> Result<Registration> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .interact_text()?;

    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;

    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    Ok(Registration {
        name,
        email,
        password,
    })
}
