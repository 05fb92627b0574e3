use hlm_core::access::{Route, navigation};
use hlm_core::enums::Role;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct NavEntry {
    route: Route,
    path: &'static str,
    title: &'static str,
}

fn entries(role: Role) -> Vec<NavEntry> {
    navigation(role)
        .into_iter()
        .map(|route| NavEntry {
            route,
            path: route.path(),
            title: route.title(),
        })
        .collect()
}

/// Handle `hlm nav`: the screens the signed-in role may open.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    output(&entries(actor.role), flags.format)
}

#[cfg(test)]
mod tests {
    use hlm_core::enums::Role;

    use super::entries;

    #[test]
    fn employee_menu_has_projects_but_no_finance() {
        let titles = entries(Role::Employee)
            .into_iter()
            .map(|entry| entry.title)
            .collect::<Vec<_>>();
        assert!(titles.contains(&"Projects"));
        assert!(!titles.contains(&"Finance"));
        assert_eq!(titles.first(), Some(&"Dashboard"));
    }
}
