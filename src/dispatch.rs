//! Dispatch controller
//!
//! One `handle` call per intercepted combat event. Candidates are taken in
//! catalog order; the first one to win its probability draw executes and
//! the loop stops. Nothing here may fail outward: every internal error
//! degrades to "let the original combat outcome proceed unmodified".
//!
//! A technique's own counter-damage goes back through the host's damage
//! pathway, which is the same pathway that raises events into this
//! controller. The process-scoped resolving flag breaks that cycle: while
//! an effect is executing, any nested `handle` call returns immediately
//! with no technique triggered.

use std::cell::Cell;

use crate::chance::trigger_chance;
use crate::core::config::GlobalConfig;
use crate::core::error::Result;
use crate::eligibility::is_eligible;
use crate::events::CombatEvent;
use crate::host::{ChanceSource, CombatHost, Presenter};
use crate::proficiency::level_from_experience;
use crate::techniques::{catalog, EffectContext};

thread_local! {
    /// Set while an effect routine is executing. Single-threaded host,
    /// so a thread-local is process-scoped in practice.
    static RESOLVING: Cell<bool> = const { Cell::new(false) };
}

/// Is a technique effect currently executing on this thread?
pub(crate) fn resolution_in_progress() -> bool {
    RESOLVING.with(Cell::get)
}

/// RAII guard for the resolving flag; released on every exit path
struct ResolveGuard;

impl ResolveGuard {
    fn acquire() -> Self {
        RESOLVING.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for ResolveGuard {
    fn drop(&mut self) {
        RESOLVING.with(|flag| flag.set(false));
    }
}

/// The technique resolution engine
///
/// Owns the configuration; the catalog is process-global and read-only.
#[derive(Debug, Clone)]
pub struct TechniqueEngine {
    config: GlobalConfig,
}

impl TechniqueEngine {
    pub fn new(config: GlobalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Swap in a new configuration (the settings-apply operation)
    pub fn apply_config(&mut self, config: GlobalConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Resolve one combat event
    ///
    /// Returns `true` when the winning technique's outcome replaces the
    /// event's default effect, `false` when the host should proceed as it
    /// would have. At most one technique executes per call.
    pub fn handle(
        &self,
        host: &mut dyn CombatHost,
        rolls: &mut dyn ChanceSource,
        presenter: &mut dyn Presenter,
        event: &mut CombatEvent,
    ) -> bool {
        if resolution_in_progress() {
            tracing::trace!("nested resolution short-circuited");
            return false;
        }
        if !self.config.enabled {
            return false;
        }

        let subject = event.subject();
        let opponent = event.opponent();
        let kind = event.trigger_kind();

        // Dead or missing participants: not applicable, not an error
        if !host.is_alive(subject) {
            return false;
        }
        if let Some(opponent) = opponent {
            if !host.is_alive(opponent) {
                return false;
            }
        }

        let level = level_from_experience(host.melee_experience(subject));

        for technique in catalog() {
            if technique.trigger != kind {
                continue;
            }
            if !is_eligible(&*host, subject, technique, &self.config) {
                continue;
            }

            let base = technique.base_chance.unwrap_or(self.config.base_chance);
            let p = trigger_chance(level, base, technique.skill_scaling, &self.config);
            if !rolls.chance(p) {
                continue;
            }

            let outcome = {
                let _guard = ResolveGuard::acquire();
                let mut ctx = EffectContext {
                    host: &mut *host,
                    rolls: &mut *rolls,
                    presenter: &mut *presenter,
                    config: &self.config,
                    user: subject,
                    target: opponent,
                    level,
                    damage: event.damage_mut(),
                };
                (technique.effect)(&mut ctx)
            };

            match outcome {
                Ok(outcome) => {
                    tracing::debug!(
                        technique = technique.name,
                        level,
                        chance = p,
                        suppress = outcome.suppress_original,
                        "technique executed"
                    );
                    return outcome.suppress_original;
                }
                Err(e) => {
                    tracing::warn!(
                        technique = technique.name,
                        error = %e,
                        "technique attempt abandoned"
                    );
                    continue;
                }
            }
        }

        false
    }
}

impl Default for TechniqueEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_clears_on_drop() {
        assert!(!resolution_in_progress());
        {
            let _guard = ResolveGuard::acquire();
            assert!(resolution_in_progress());
        }
        assert!(!resolution_in_progress());
    }

    #[test]
    fn test_guard_clears_on_panic_unwind() {
        let result = std::panic::catch_unwind(|| {
            let _guard = ResolveGuard::acquire();
            panic!("mid-resolution failure");
        });
        assert!(result.is_err());
        assert!(!resolution_in_progress());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = GlobalConfig {
            chance_multiplier: -1.0,
            ..GlobalConfig::default()
        };
        assert!(TechniqueEngine::new(config).is_err());
    }
}
