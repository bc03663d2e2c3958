//! Eligibility gates a technique must clear before its chance is rolled
//!
//! Checks run in a fixed order and short-circuit on the first failure.
//! The cheap actor-state gates come first; the map scans for situational
//! conditions come last.

use crate::core::config::GlobalConfig;
use crate::core::types::ActorId;
use crate::dispatch;
use crate::events::TriggerKind;
use crate::host::{count_adjacent_hostiles, near_solid_structure, CombatHost};
use crate::implement::categorize;
use crate::techniques::TechniqueDescriptor;

/// Minimum adjacent hostiles for the Surrounded condition
const SURROUNDED_THRESHOLD: usize = 2;

/// Can `actor` attempt `technique` right now?
pub fn is_eligible(
    host: &dyn CombatHost,
    actor: ActorId,
    technique: &TechniqueDescriptor,
    config: &GlobalConfig,
) -> bool {
    // 1. Basic actor state
    if !host.is_alive(actor) || host.is_downed(actor) {
        return false;
    }

    // 2. Global and per-technique switches
    if !config.enabled || !config.toggles.enabled(technique.id) {
        return false;
    }

    // 3. Player-only policy
    if config.player_only && !host.is_player_controlled(actor) {
        return false;
    }

    // 4. Mental states that interfere with deliberate technique use
    if host.in_interfering_state(actor) {
        return false;
    }

    // 5. Already mid-technique
    if dispatch::resolution_in_progress() {
        return false;
    }

    // 6. Incapacitating statuses gate unconditionally
    if host.is_incapacitated(actor) {
        return false;
    }

    // 7. Busy/cooldown only blocks non-reactive triggers; an actor mid-swing
    //    still reacts to a hit or a knockdown.
    if !technique.trigger.is_reactive() && host.is_busy(actor) {
        return false;
    }

    // 8. Implement category
    let category = categorize(host.equipped_implement(actor).as_ref());
    if !technique.required.matches(category) {
        return false;
    }

    // 9. Situational condition
    match technique.trigger {
        TriggerKind::Surrounded => count_adjacent_hostiles(host, actor) >= SURROUNDED_THRESHOLD,
        TriggerKind::NearWall => near_solid_structure(host, actor),
        _ => true,
    }
}
