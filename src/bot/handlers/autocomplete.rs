//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions stand in for the dropdowns of the room screen: building names
//! (with the "All Buildings" sentinel), floor numbers and tenant names.

use crate::{
    bot::Context,
    core::{
        building, floor,
        form::{ALL_BUILDINGS, ALL_FLOORS},
        tenant,
    },
};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

fn matching(candidates: Vec<String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests building names, including the "All Buildings" sentinel.
pub async fn autocomplete_building_filter(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(names) = building::get_all_building_names(&ctx.data().database).await else {
        return Vec::new();
    };
    let mut candidates = vec![ALL_BUILDINGS.to_string()];
    candidates.extend(names);
    matching(candidates, partial)
}

/// Suggests existing building names only.
pub async fn autocomplete_building_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(names) = building::get_all_building_names(&ctx.data().database).await else {
        return Vec::new();
    };
    matching(names, partial)
}

/// Suggests floor numbers for the building currently chosen in the caller's
/// room form, or for every building when none is chosen.
pub async fn autocomplete_floor_number(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let db = &ctx.data().database;
    // A form busy with one of the caller's own commands counts as no choice
    let chosen = ctx
        .data()
        .existing_form(ctx.author().id.get())
        .await
        .and_then(|shared| {
            shared
                .try_lock()
                .ok()
                .and_then(|form| form.building_filter().name().map(str::to_string))
        });

    let building_ids: Vec<i64> = match chosen {
        Some(name) => building::get_building_id_by_name(db, &name)
            .await
            .ok()
            .flatten()
            .into_iter()
            .collect(),
        None => building::get_all_buildings(db)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|b| b.id)
            .collect(),
    };

    let mut numbers = vec![ALL_FLOORS.to_string()];
    for id in building_ids {
        if let Ok(found) = floor::get_floor_numbers_by_building_id(db, id).await {
            for number in found {
                if !numbers.contains(&number) {
                    numbers.push(number);
                }
            }
        }
    }
    numbers[1..].sort_by(|a, b| floor::compare_floor_numbers(a, b));
    matching(numbers, partial)
}

/// Suggests tenant names.
pub async fn autocomplete_tenant_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(tenants) = tenant::get_all_tenants(&ctx.data().database).await else {
        return Vec::new();
    };
    matching(tenants.into_iter().map(|t| t.name).collect(), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        let names = vec!["Maple House".to_string(), "Oak Court".to_string()];
        assert_eq!(matching(names.clone(), "maple"), vec!["Maple House"]);
        assert_eq!(matching(names, "").len(), 2);
    }

    #[test]
    fn test_matching_caps_suggestions() {
        let names: Vec<String> = (0..40).map(|i| format!("Building {i}")).collect();
        assert_eq!(matching(names, "building").len(), MAX_SUGGESTIONS);
    }
}
