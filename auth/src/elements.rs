//! Locators for the storefront login page.

use browser::Selector;

/// Login-name input on the credential form.
pub const LOGIN_FIELD: Selector = Selector::xpath("//form//input[@type='text']");

/// Password input on the credential form.
pub const PASSWORD_FIELD: Selector = Selector::xpath("//form//input[@type='password']");

/// Submits the credential form.
pub const AUTH_BUTTON: Selector = Selector::xpath("//form//button[@type='submit']");

/// "Sign in" control shown when the site recognizes an injected session.
pub const GLOBAL_LOGIN_BUTTON: Selector =
    Selector::xpath("//a[contains(@class, 'global_action_link')]");
