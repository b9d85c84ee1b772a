//! Sandboxed settings loading for tests.
//!
//! Settings layers read `GRID_COMPOSE_*` variables and files relative to the
//! working directory. [`with_clean_jail`] runs a closure inside a
//! [`figment::Jail`] whose environment starts empty, so variables exported by
//! the developer's shell never leak into a layering assertion.

use anyhow::{Result, anyhow};

/// Runs `f` in a [`figment::Jail`] with every environment variable cleared.
///
/// The closure may create files and set variables through the jail; both are
/// undone when it returns. Failures are reported as `anyhow::Error`.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_clean_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        jail.clear_env();
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("settings jail failed: {err}"))?;
    output.ok_or_else(|| anyhow!("settings jail produced no value"))
}

/// Carries a displayable error across the jail boundary as a
/// [`figment::Error`].
pub fn jail_error<E: std::fmt::Display>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
